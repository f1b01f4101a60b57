use std::time::Duration;

use tracing::{debug, trace};

use super::{PlaybackActions, Player, QueueNavigator};

/// Queue navigator whose queue item ids are timeline indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineQueueNavigator;

impl TimelineQueueNavigator {
    /// Create a navigator
    pub fn new() -> Self {
        Self
    }
}

impl QueueNavigator for TimelineQueueNavigator {
    fn on_timeline_changed(&self, player: &dyn Player) {
        trace!(
            items = player.media_item_count(),
            index = player.current_media_item_index(),
            "Timeline changed"
        );
    }

    fn supported_actions(&self, player: &dyn Player) -> PlaybackActions {
        if player.media_item_count() == 0 {
            return PlaybackActions::empty();
        }

        let live = player.is_current_item_live();
        let mut actions = PlaybackActions::empty();

        if player.media_item_count() > 1 {
            actions |= PlaybackActions::SKIP_TO_QUEUE_ITEM;
        }
        if player.is_current_item_seekable() || !live || player.has_previous_media_item() {
            actions |= PlaybackActions::SKIP_TO_PREVIOUS;
        }
        if live || player.has_next_media_item() {
            actions |= PlaybackActions::SKIP_TO_NEXT;
        }

        actions
    }

    fn active_queue_item_id(&self, player: &dyn Player) -> Option<u64> {
        (player.media_item_count() > 0).then(|| player.current_media_item_index() as u64)
    }

    fn on_skip_to_previous(&self, player: &dyn Player) {
        player.seek_to_previous();
    }

    fn on_skip_to_next(&self, player: &dyn Player) {
        player.seek_to_next();
    }

    fn on_skip_to_queue_item(&self, player: &dyn Player, id: u64) {
        let count = player.media_item_count();
        match usize::try_from(id) {
            Ok(index) if index < count => player.seek_to(index, Duration::ZERO),
            _ => debug!(id, count, "Queue item out of range"),
        }
    }
}
