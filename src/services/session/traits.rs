use std::time::Duration;

use tokio::sync::broadcast;

use super::{
    CommandSender, ExecutionContext, Extras, MediaItem, MediaMetadata, PlaybackActions,
    PlaybackStateRecord, PlayerEvents, PlayerState, RepeatMode, SessionFlags, ShuffleMode,
};

/// OS-level media session that external controllers observe and command.
///
/// Writes are fire-and-forget; a backend that fails to forward a value to
/// its transport logs the failure itself.
pub trait MediaSession: Send + Sync {
    /// Set the session capability flags
    fn set_flags(&self, flags: SessionFlags);

    /// Install the handler that receives controller commands
    fn set_command_handler(&self, handler: CommandSender);

    /// Publish a new playback state
    fn set_playback_state(&self, state: PlaybackStateRecord);

    /// Publish new metadata
    fn set_metadata(&self, metadata: MediaMetadata);

    /// Metadata most recently published, if any
    fn metadata(&self) -> Option<MediaMetadata>;

    /// Publish the repeat mode
    fn set_repeat_mode(&self, mode: RepeatMode);

    /// Publish the shuffle mode
    fn set_shuffle_mode(&self, mode: ShuffleMode);
}

/// Playback engine whose state is projected into the session.
pub trait Player: Send + Sync {
    /// Context this player delivers its callbacks on
    fn context(&self) -> ExecutionContext;

    /// Subscribe to player events.
    ///
    /// Dropping the receiver detaches the listener.
    fn subscribe(&self) -> broadcast::Receiver<PlayerEvents>;

    /// Current engine state
    fn playback_state(&self) -> PlayerState;

    /// Whether playback should proceed once ready
    fn play_when_ready(&self) -> bool;

    /// Whether the player is actually advancing the position
    fn is_playing(&self) -> bool {
        self.playback_state() == PlayerState::Ready && self.play_when_ready()
    }

    /// Whether the current item is a live stream
    fn is_current_item_live(&self) -> bool;

    /// Whether the current item supports seeking
    fn is_current_item_seekable(&self) -> bool;

    /// Position within the current item
    fn current_position(&self) -> Duration;

    /// Buffered position within the current item
    fn buffered_position(&self) -> Duration;

    /// Configured playback speed
    fn playback_speed(&self) -> f32;

    /// Item currently playing or prepared
    fn current_media_item(&self) -> Option<MediaItem>;

    /// Index of the current item in the timeline
    fn current_media_item_index(&self) -> usize;

    /// Number of items in the timeline
    fn media_item_count(&self) -> usize;

    /// Whether an item follows the current one
    fn has_next_media_item(&self) -> bool {
        self.current_media_item_index() + 1 < self.media_item_count()
    }

    /// Whether an item precedes the current one
    fn has_previous_media_item(&self) -> bool {
        self.media_item_count() > 0 && self.current_media_item_index() > 0
    }

    /// Clear play intent
    fn pause(&self);

    /// Stop playback and release resources
    fn stop(&self);

    /// Remove every item from the timeline
    fn clear_media_items(&self);

    /// Seek to a position in the item at `index`
    fn seek_to(&self, index: usize, position: Duration);

    /// Seek to the next item
    fn seek_to_next(&self);

    /// Seek to the previous item, or the start of the current one
    fn seek_to_previous(&self);
}

/// Loads content into the player on behalf of session commands.
pub trait PlaybackPreparer: Send + Sync {
    /// Prepare whatever is current or a sensible default
    fn on_prepare(&self, play_when_ready: bool);

    /// Prepare the item identified by `media_id`
    fn on_prepare_from_media_id(&self, media_id: &str, play_when_ready: bool, extras: &Extras);

    /// Prepare the result of a search
    fn on_prepare_from_search(&self, query: &str, play_when_ready: bool, extras: &Extras);

    /// Prepare a uri
    fn on_prepare_from_uri(&self, uri: &str, play_when_ready: bool, extras: &Extras);
}

/// Maps session queue commands onto player navigation.
pub trait QueueNavigator: Send + Sync {
    /// Player timeline may have changed
    fn on_timeline_changed(&self, player: &dyn Player);

    /// Navigation actions available for the player's current state
    fn supported_actions(&self, player: &dyn Player) -> PlaybackActions;

    /// Queue item id of the current item
    fn active_queue_item_id(&self, player: &dyn Player) -> Option<u64>;

    /// Skip to the previous item
    fn on_skip_to_previous(&self, player: &dyn Player);

    /// Skip to the next item
    fn on_skip_to_next(&self, player: &dyn Player);

    /// Jump to a queue item
    fn on_skip_to_queue_item(&self, player: &dyn Player, id: u64);
}
