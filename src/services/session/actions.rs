//! Session flag types.

use bitflags::bitflags;

bitflags! {
    /// Transport actions a session advertises to external controllers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlaybackActions: u64 {
        /// Stop playback.
        const STOP = 1 << 0;
        /// Pause playback.
        const PAUSE = 1 << 1;
        /// Start or resume playback.
        const PLAY = 1 << 2;
        /// Rewind.
        const REWIND = 1 << 3;
        /// Skip to the previous item.
        const SKIP_TO_PREVIOUS = 1 << 4;
        /// Skip to the next item.
        const SKIP_TO_NEXT = 1 << 5;
        /// Fast forward.
        const FAST_FORWARD = 1 << 6;
        /// Rate the current item.
        const SET_RATING = 1 << 7;
        /// Seek within the current item.
        const SEEK_TO = 1 << 8;
        /// Toggle between play and pause.
        const PLAY_PAUSE = 1 << 9;
        /// Play a specific media id.
        const PLAY_FROM_MEDIA_ID = 1 << 10;
        /// Play the result of a search query.
        const PLAY_FROM_SEARCH = 1 << 11;
        /// Jump to a queue item.
        const SKIP_TO_QUEUE_ITEM = 1 << 12;
        /// Play a uri.
        const PLAY_FROM_URI = 1 << 13;
        /// Prepare without playing.
        const PREPARE = 1 << 14;
        /// Prepare a specific media id.
        const PREPARE_FROM_MEDIA_ID = 1 << 15;
        /// Prepare the result of a search query.
        const PREPARE_FROM_SEARCH = 1 << 16;
        /// Prepare a uri.
        const PREPARE_FROM_URI = 1 << 17;
        /// Change the repeat mode.
        const SET_REPEAT_MODE = 1 << 18;
        /// Change the shuffle mode.
        const SET_SHUFFLE_MODE = 1 << 21;
        /// Change the playback speed.
        const SET_PLAYBACK_SPEED = 1 << 22;
    }

    /// Capability flags of the session itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SessionFlags: u32 {
        /// Session receives media button presses.
        const HANDLES_MEDIA_BUTTONS = 1 << 0;
        /// Session receives transport control commands.
        const HANDLES_TRANSPORT_CONTROLS = 1 << 1;
        /// Session receives queue editing commands.
        const HANDLES_QUEUE_COMMANDS = 1 << 2;
    }

    /// Player changes delivered together in one callback.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlayerEvents: u32 {
        /// Items were added, removed or replaced.
        const TIMELINE_CHANGED = 1 << 0;
        /// Playback moved to another item.
        const MEDIA_ITEM_TRANSITION = 1 << 1;
        /// Buffering/ready/ended/idle state changed.
        const PLAYBACK_STATE_CHANGED = 1 << 2;
        /// Play intent changed.
        const PLAY_WHEN_READY_CHANGED = 1 << 3;
        /// Whether the player is actually playing changed.
        const IS_PLAYING_CHANGED = 1 << 4;
        /// Position jumped (seek or item change).
        const POSITION_DISCONTINUITY = 1 << 5;
        /// Speed changed.
        const PLAYBACK_PARAMETERS_CHANGED = 1 << 6;
        /// Buffered position changed.
        const BUFFERED_POSITION_CHANGED = 1 << 9;
    }
}

impl PlaybackActions {
    /// Actions advertised regardless of player state.
    pub const BASE: Self = Self::SET_RATING
        .union(Self::PLAY_PAUSE)
        .union(Self::PLAY_FROM_URI)
        .union(Self::PREPARE)
        .union(Self::PREPARE_FROM_URI)
        .union(Self::PLAY_FROM_SEARCH);

    /// Actions a queue navigator is allowed to contribute.
    pub const QUEUE_NAVIGATION: Self = Self::SKIP_TO_QUEUE_ITEM
        .union(Self::SKIP_TO_PREVIOUS)
        .union(Self::SKIP_TO_NEXT);

    /// Skip actions that only make sense for non-live content.
    pub const SKIPS: Self = Self::SKIP_TO_PREVIOUS.union(Self::SKIP_TO_NEXT);
}

impl SessionFlags {
    /// Flags the connector installs on construction.
    pub const BASE: Self = Self::HANDLES_MEDIA_BUTTONS.union(Self::HANDLES_TRANSPORT_CONTROLS);
}
