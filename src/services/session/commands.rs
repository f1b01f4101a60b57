use std::time::Duration;

use tokio::sync::mpsc;

use super::{Extras, Rating};

/// Sending half a session uses to deliver commands to its handler.
pub type CommandSender = mpsc::UnboundedSender<SessionCommand>;

/// Commands external controllers issue through the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Prepare the current or default content without playing
    Prepare,

    /// Prepare a specific media id without playing
    PrepareFromMediaId {
        /// Media id to prepare
        media_id: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Prepare the result of a search without playing
    PrepareFromSearch {
        /// Search query, possibly empty
        query: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Prepare a uri without playing
    PrepareFromUri {
        /// Uri to prepare
        uri: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Prepare and play the current or default content
    Play,

    /// Prepare and play a specific media id
    PlayFromMediaId {
        /// Media id to play
        media_id: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Prepare and play the result of a search
    PlayFromSearch {
        /// Search query, possibly empty
        query: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Prepare and play a uri
    PlayFromUri {
        /// Uri to play
        uri: String,
        /// Caller supplied extras
        extras: Extras,
    },

    /// Pause playback
    Pause,

    /// Stop playback and clear the player's items
    Stop,

    /// Skip to the previous item
    SkipToPrevious,

    /// Skip to the next item
    SkipToNext,

    /// Jump to a queue item by id
    SkipToQueueItem(u64),

    /// Seek within the current item
    SeekTo(Duration),

    /// Rate the current item
    SetRating(Rating),

    /// Application defined action
    CustomAction {
        /// Action name
        action: String,
        /// Caller supplied extras
        extras: Extras,
    },
}

impl SessionCommand {
    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::PrepareFromMediaId { .. } => "prepare_from_media_id",
            Self::PrepareFromSearch { .. } => "prepare_from_search",
            Self::PrepareFromUri { .. } => "prepare_from_uri",
            Self::Play => "play",
            Self::PlayFromMediaId { .. } => "play_from_media_id",
            Self::PlayFromSearch { .. } => "play_from_search",
            Self::PlayFromUri { .. } => "play_from_uri",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::SkipToPrevious => "skip_to_previous",
            Self::SkipToNext => "skip_to_next",
            Self::SkipToQueueItem(_) => "skip_to_queue_item",
            Self::SeekTo(_) => "seek_to",
            Self::SetRating(_) => "set_rating",
            Self::CustomAction { .. } => "custom_action",
        }
    }
}
