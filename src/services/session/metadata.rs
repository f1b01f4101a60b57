use std::time::Duration;

use tracing::debug;

use super::Player;

/// Metadata projection published to the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Media id of the item
    pub media_id: Option<String>,

    /// Track title
    pub title: Option<String>,

    /// Track artist(s)
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Album artist(s)
    pub album_artist: Option<String>,

    /// Secondary display line
    pub display_subtitle: Option<String>,

    /// Long display description
    pub display_description: Option<String>,

    /// Artwork location
    pub art_uri: Option<String>,

    /// Media location
    pub media_uri: Option<String>,

    /// Track duration; absent for live or unknown lengths
    pub duration: Option<Duration>,

    /// Position of the track on its album
    pub track_number: Option<u32>,
}

impl MediaMetadata {
    /// Whether the record carries no information
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builds the metadata projection from a player.
pub trait MetadataProvider: Send + Sync {
    /// Metadata for the player's current item
    fn metadata(&self, player: &dyn Player) -> MediaMetadata;

    /// Whether two projections are equivalent for publishing purposes
    fn same_as(&self, old: &MediaMetadata, new: &MediaMetadata) -> bool {
        old == new
    }
}

/// Projects the current media item's own metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetadataProvider;

impl MetadataProvider for DefaultMetadataProvider {
    fn metadata(&self, player: &dyn Player) -> MediaMetadata {
        if player.media_item_count() == 0 {
            return MediaMetadata::default();
        }

        let Some(item) = player.current_media_item() else {
            return MediaMetadata::default();
        };

        let duration = if item.live { None } else { item.duration };
        let media_id = item.has_media_id().then(|| item.media_id.clone());
        let info = item.metadata;

        debug!(
            title = ?info.title,
            art = ?info.artwork_uri,
            "Building metadata for current item"
        );

        MediaMetadata {
            media_id,
            title: info.title,
            artist: info.artist,
            album: info.album,
            album_artist: info.album_artist,
            display_subtitle: info.subtitle,
            display_description: info.description,
            art_uri: info.artwork_uri,
            media_uri: item.uri,
            duration,
            track_number: info.track_number,
        }
    }
}
