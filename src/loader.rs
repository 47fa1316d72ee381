//! Catalog loader for consumers of the JSON catalog
//!
//! Catalogs may come from other producers, so every record is normalized
//! again on load instead of being trusted as-is.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CatalogError, Result};
use crate::models::{Channel, DEFAULT_CATEGORY, DEFAULT_COUNTRY};

/// Name used by the loader when a record has none
pub const LOADER_DEFAULT_NAME: &str = "Unknown";

/// Parse catalog JSON: a bare array, or an object with a `channels` array.
///
/// Any other shape yields an empty list.
pub fn load_catalog_str(text: &str) -> Result<Vec<Channel>> {
    let data: Value = serde_json::from_str(text)?;

    let records: &[Value] = match &data {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match obj.get("channels") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    // Generated ids count only the entries left after falsy ones are skipped
    let channels: Vec<Channel> = records
        .iter()
        .filter(|record| !is_falsy(record))
        .enumerate()
        .filter_map(|(index, record)| normalize(record.as_object()?, index))
        .collect();

    if channels.len() < records.len() {
        tracing::debug!(
            dropped = records.len() - channels.len(),
            "skipped catalog records without a stream URL"
        );
    }

    Ok(channels)
}

/// Load and normalize a catalog file
pub fn load_catalog(path: &Path) -> Result<Vec<Channel>> {
    if !path.exists() {
        return Err(CatalogError::InputNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    load_catalog_str(&text)
}

/// Load a catalog, degrading to an empty set plus a message on failure
pub fn load_catalog_or_empty(path: &Path) -> (Vec<Channel>, Option<String>) {
    match load_catalog(path) {
        Ok(channels) => (channels, None),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "channel load error");
            (Vec::new(), Some(e.to_string()))
        }
    }
}

/// Rebuild one record with defaults; `None` when it has no usable stream URL
fn normalize(record: &Map<String, Value>, index: usize) -> Option<Channel> {
    let stream_url = match record.get("streamUrl") {
        Some(Value::String(url)) if !url.trim().is_empty() => url.clone(),
        _ => return None,
    };

    let name = str_field(record, "name");
    let id = str_field(record, "id").unwrap_or_else(|| {
        format!("{}-{}", name.as_deref().unwrap_or("channel"), index)
    });

    Some(Channel {
        id,
        name: name.unwrap_or_else(|| LOADER_DEFAULT_NAME.to_string()),
        logo: str_field(record, "logo").unwrap_or_default(),
        category: str_field(record, "category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        country: str_field(record, "country").unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        stream_url,
    })
}

/// `null`, `false`, zero and the empty string
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// String value of a field; numbers are accepted and stringified
fn str_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
