use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::session::{MediaItem, MediaItemMetadata};

/// One playable entry of the configured catalog
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct CatalogEntry {
    /// Stable media id
    pub id: String,

    /// Track title
    #[serde(default)]
    pub title: Option<String>,

    /// Track artist
    #[serde(default)]
    pub artist: Option<String>,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Media location
    #[serde(default)]
    pub uri: Option<String>,

    /// Artwork location
    #[serde(default)]
    pub artwork_uri: Option<String>,

    /// Length in seconds, if known
    #[serde(default)]
    pub duration_secs: Option<u64>,

    /// Whether the entry is a live stream
    #[serde(default)]
    pub live: bool,
}

impl From<&CatalogEntry> for MediaItem {
    fn from(entry: &CatalogEntry) -> Self {
        MediaItem {
            media_id: entry.id.clone(),
            uri: entry.uri.clone(),
            duration: entry.duration_secs.map(Duration::from_secs),
            live: entry.live,
            metadata: MediaItemMetadata {
                title: entry.title.clone(),
                artist: entry.artist.clone(),
                album: entry.album.clone(),
                artwork_uri: entry.artwork_uri.clone(),
                ..Default::default()
            },
        }
    }
}
