//! Catalog serialization and the playlist/catalog file boundary

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{CatalogError, Result};
use crate::m3u_parser::parse_m3u;
use crate::models::Channel;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: char = '\u{feff}';

/// Serialize channels as a JSON array of six-field objects
pub fn to_json(channels: &[Channel], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(channels)?
    } else {
        serde_json::to_string(channels)?
    };
    Ok(json)
}

/// Read playlist text from disk - auto-detects gzip compression
///
/// Invalid UTF-8 sequences are replaced rather than rejected, and a leading
/// byte order mark is removed so the first line is seen as written.
pub fn read_playlist(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CatalogError::InputNotFound(path.to_path_buf()));
    }

    let raw = fs::read(path).map_err(|e| CatalogError::io(path, e))?;

    let bytes = if raw.starts_with(&GZIP_MAGIC) {
        tracing::debug!(path = %path.display(), "input is gzip compressed");
        let mut decoded = Vec::with_capacity(raw.len() * 4);
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| CatalogError::io(path, e))?;
        decoded
    } else {
        raw
    };

    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&*text).to_string())
}

/// Write the catalog, creating missing parent directories
pub fn write_catalog(path: &Path, channels: &[Channel], pretty: bool) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "creating output directory");
            fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;
        }
    }

    let json = to_json(channels, pretty)?;
    fs::write(path, json).map_err(|e| CatalogError::io(path, e))
}

/// Read a playlist, parse it and write the catalog in one step
pub fn convert_file(input: &Path, output: &Path, pretty: bool) -> Result<Vec<Channel>> {
    tracing::info!(input = %input.display(), "reading playlist");
    let content = read_playlist(input)?;

    let channels = parse_m3u(&content);
    tracing::info!(count = channels.len(), output = %output.display(), "writing catalog");

    write_catalog(output, &channels, pretty)?;
    Ok(channels)
}

/// Entry count per category, in order of first appearance
pub fn category_counts(channels: &[Channel]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for channel in channels {
        match counts.iter_mut().find(|(cat, _)| *cat == channel.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((channel.category.clone(), 1)),
        }
    }
    counts
}
