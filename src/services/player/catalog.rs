use std::sync::Arc;

use tracing::{debug, info};

use crate::services::session::{Extras, MediaItem, MediaItemMetadata, PlaybackPreparer, Player};

use super::MemoryPlayer;

/// Resolves prepare requests against a fixed catalog and loads the result
/// into a [`MemoryPlayer`].
pub struct CatalogPreparer {
    player: Arc<MemoryPlayer>,
    catalog: Vec<MediaItem>,
}

impl CatalogPreparer {
    /// Create a preparer over `catalog`
    pub fn new(player: Arc<MemoryPlayer>, catalog: Vec<MediaItem>) -> Self {
        Self { player, catalog }
    }

    /// Items whose title, artist or album contain `query`, ignoring case.
    ///
    /// An empty query matches the whole catalog.
    pub fn search(&self, query: &str) -> Vec<MediaItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.catalog.clone();
        }

        self.catalog
            .iter()
            .filter(|item| {
                let info = &item.metadata;
                [&info.title, &info.artist, &info.album]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    fn load(&self, items: Vec<MediaItem>, start_index: usize, play_when_ready: bool) {
        if items.is_empty() {
            debug!("Nothing to prepare");
            return;
        }

        info!(count = items.len(), start_index, play_when_ready, "Loading items");
        self.player.set_media_items(items, start_index);
        self.player.prepare();
        self.player.set_play_when_ready(play_when_ready);
    }
}

impl PlaybackPreparer for CatalogPreparer {
    fn on_prepare(&self, play_when_ready: bool) {
        if self.player.media_item_count() > 0 {
            self.player.prepare();
            self.player.set_play_when_ready(play_when_ready);
            return;
        }

        self.load(self.catalog.clone(), 0, play_when_ready);
    }

    fn on_prepare_from_media_id(&self, media_id: &str, play_when_ready: bool, _extras: &Extras) {
        let Some(start_index) = self.catalog.iter().position(|item| item.media_id == media_id)
        else {
            debug!(%media_id, "Unknown media id");
            return;
        };

        self.load(self.catalog.clone(), start_index, play_when_ready);
    }

    fn on_prepare_from_search(&self, query: &str, play_when_ready: bool, _extras: &Extras) {
        self.load(self.search(query), 0, play_when_ready);
    }

    fn on_prepare_from_uri(&self, uri: &str, play_when_ready: bool, _extras: &Extras) {
        let item = self
            .catalog
            .iter()
            .find(|item| item.uri.as_deref() == Some(uri))
            .cloned()
            .unwrap_or_else(|| MediaItem {
                media_id: uri.to_string(),
                uri: Some(uri.to_string()),
                metadata: MediaItemMetadata {
                    title: Some(uri.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            });

        self.load(vec![item], 0, play_when_ready);
    }
}
