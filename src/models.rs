//! Data models for the channel catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NAME: &str = "Unknown Channel";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_COUNTRY: &str = "Unknown";

/// One playlist entry as written to the catalog.
///
/// All six fields are always serialized, even when default-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub category: String,
    pub country: String,
    #[serde(rename = "streamUrl")]
    pub stream_url: String,
}

impl Channel {
    /// Fresh entry for the `n`th `#EXTINF` directive, every field defaulted.
    pub fn with_ordinal(n: usize) -> Self {
        Self {
            id: format!("channel-{}", n),
            name: DEFAULT_NAME.to_string(),
            logo: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            stream_url: String::new(),
        }
    }
}

/// Channels keyed by a grouping label (category or country)
pub type ChannelsByCategory = BTreeMap<String, Vec<Channel>>;
