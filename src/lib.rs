//! M3U catalog - turns IPTV playlists into a flat JSON channel catalog

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod m3u_parser;
pub mod models;

pub use catalog::{category_counts, convert_file, read_playlist, to_json, write_catalog};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use loader::{load_catalog, load_catalog_or_empty, load_catalog_str};
pub use m3u_parser::{parse_extinf, parse_m3u};
pub use models::{Channel, ChannelsByCategory};
