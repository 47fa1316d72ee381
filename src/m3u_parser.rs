//! M3U playlist parser producing catalog channels

use crate::models::{Channel, DEFAULT_CATEGORY, DEFAULT_COUNTRY};

const EXTINF: &str = "#EXTINF:";
const UTF8_BOM: char = '\u{feff}';

/// Scanner state between lines
#[derive(Debug)]
enum ParseState {
    Idle,
    /// Metadata captured, waiting for the stream URL line
    PendingEntry(Channel),
}

/// Parse M3U content and extract channels
///
/// Entries are emitted in the order their URL lines appear. An `#EXTINF`
/// line always starts a new entry and abandons any pending one; an entry
/// with no URL before the end of input is dropped. A leading byte order
/// mark is ignored.
pub fn parse_m3u(content: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut state = ParseState::Idle;
    let mut ordinal = 0usize;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with(EXTINF) {
            ordinal += 1;
            if let ParseState::PendingEntry(abandoned) = &state {
                tracing::trace!(id = %abandoned.id, "abandoning entry without stream URL");
            }
            state = ParseState::PendingEntry(parse_extinf(line, ordinal));
        } else if !line.is_empty() && !line.starts_with('#') {
            // URL line
            let pending = std::mem::replace(&mut state, ParseState::Idle);
            if let ParseState::PendingEntry(mut channel) = pending {
                channel.stream_url = line.to_string();
                channels.push(channel);
            }
        }
    }

    if let ParseState::PendingEntry(dangling) = state {
        tracing::trace!(id = %dangling.id, "dropping trailing entry without stream URL");
    }

    channels
}

/// Build a partial channel from an `#EXTINF` line
///
/// Each field is looked up on its own, so a missing or broken attribute
/// never hides the others. `stream_url` is left empty.
pub fn parse_extinf(line: &str, ordinal: usize) -> Channel {
    let mut channel = Channel::with_ordinal(ordinal);

    if let Some(name) = extract_attr(line, "tvg-name") {
        channel.name = name.to_string();
    } else if let Some(name) = trailing_name(line) {
        channel.name = name.to_string();
    }

    if let Some(logo) = extract_attr(line, "tvg-logo") {
        channel.logo = logo.to_string();
    }

    channel.category = non_empty_or(extract_attr(line, "group-title"), DEFAULT_CATEGORY);
    channel.country = non_empty_or(extract_attr(line, "tvg-country"), DEFAULT_COUNTRY);

    channel
}

/// Value of the first `key="value"` pair on the line.
///
/// The key must appear as a whole word, so `tvg-name` does not match inside
/// `x-tvg-name`. A value without its closing quote counts as absent.
fn extract_attr<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", key);
    let mut from = 0;

    while let Some(pos) = line[from..].find(&needle) {
        let start = from + pos;
        let standalone = line[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '-' || c == '_'));

        let value_start = start + needle.len();
        if standalone {
            let rest = &line[value_start..];
            return rest.find('"').map(|end| &rest[..end]);
        }
        from = value_start;
    }

    None
}

/// Display name after the last comma, if any text follows it
fn trailing_name(line: &str) -> Option<&str> {
    let comma = line.rfind(',')?;
    let name = line[comma + 1..].trim();
    (!name.is_empty()).then_some(name)
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
#[path = "m3u_parser_tests.rs"]
mod tests;
