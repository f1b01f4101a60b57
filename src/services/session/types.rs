use std::time::{Duration, Instant};

use super::PlaybackActions;

/// Free-form key/value payload attached to prepare and custom commands.
pub type Extras = serde_json::Map<String, serde_json::Value>;

/// Media id reported by items that were never given one.
pub const DEFAULT_MEDIA_ID: &str = "";

/// Engine-side playback state of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Nothing prepared
    #[default]
    Idle,

    /// Waiting for data before playback can continue
    Buffering,

    /// Able to play from the current position
    Ready,

    /// Reached the end of the timeline
    Ended,
}

/// Playback status as published to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No player or nothing prepared
    #[default]
    None,

    /// Stopped; live content that is not playing reports this
    Stopped,

    /// Paused with a resumable position
    Paused,

    /// Playing
    Playing,

    /// Intends to play but waiting for data
    Buffering,
}

impl PlaybackStatus {
    /// Whether controllers should treat the session as playing
    pub fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }
}

impl From<PlaybackStatus> for &'static str {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Playing | PlaybackStatus::Buffering => "Playing",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Stopped | PlaybackStatus::None => "Stopped",
        }
    }
}

/// Repeat mode for item or queue repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// No repetition
    #[default]
    None,

    /// Repeat the current item
    One,

    /// Repeat the whole queue
    All,
}

impl From<RepeatMode> for &'static str {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::None => "None",
            RepeatMode::One => "Track",
            RepeatMode::All => "Playlist",
        }
    }
}

/// Shuffle mode for randomizing playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Queue order
    #[default]
    None,

    /// Randomized order
    All,
}

impl From<bool> for ShuffleMode {
    fn from(shuffle: bool) -> Self {
        if shuffle { Self::All } else { Self::None }
    }
}

impl From<ShuffleMode> for bool {
    fn from(mode: ShuffleMode) -> Self {
        matches!(mode, ShuffleMode::All)
    }
}

/// Rating sent by a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    /// Rating removed
    Unrated,

    /// Heart rating
    Heart(bool),

    /// Thumbs up (true) or down (false)
    Thumb(bool),

    /// Star count
    Stars(u8),

    /// Percentage between 0 and 100
    Percentage(f32),
}

/// Descriptive metadata carried by a media item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItemMetadata {
    /// Item title
    pub title: Option<String>,

    /// Item artist(s)
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Album artist(s)
    pub album_artist: Option<String>,

    /// Secondary display line
    pub subtitle: Option<String>,

    /// Long description
    pub description: Option<String>,

    /// Artwork location
    pub artwork_uri: Option<String>,

    /// Position of the track on its album
    pub track_number: Option<u32>,
}

/// A playable item as known to the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    /// Stable media id, `DEFAULT_MEDIA_ID` when unset
    pub media_id: String,

    /// Location of the media
    pub uri: Option<String>,

    /// Known duration of the item
    pub duration: Option<Duration>,

    /// Whether the item is a live stream
    pub live: bool,

    /// Descriptive metadata
    pub metadata: MediaItemMetadata,
}

impl MediaItem {
    /// Create an item with the given media id and no metadata
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            ..Default::default()
        }
    }

    /// Whether the item carries a real media id
    pub fn has_media_id(&self) -> bool {
        self.media_id != DEFAULT_MEDIA_ID
    }
}

/// Playback state projection written to the session
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStateRecord {
    /// Published status
    pub status: PlaybackStatus,

    /// Playback position at `updated_at`
    pub position: Duration,

    /// Speed controllers should extrapolate with; zero unless playing
    pub speed: f32,

    /// Actions controllers may invoke
    pub actions: PlaybackActions,

    /// Buffered position of the current item
    pub buffered_position: Duration,

    /// Queue item currently playing
    pub active_queue_item_id: Option<u64>,

    /// Media id of the current item when it has one
    pub media_id: Option<String>,

    /// Configured player speed, published even while paused
    pub player_speed: f32,

    /// When the projection was computed
    pub updated_at: Instant,
}

impl PlaybackStateRecord {
    /// Projection used while no player is attached.
    pub fn detached() -> Self {
        Self {
            status: PlaybackStatus::None,
            position: Duration::ZERO,
            speed: 0.0,
            actions: PlaybackActions::BASE,
            buffered_position: Duration::ZERO,
            active_queue_item_id: None,
            media_id: None,
            player_speed: 0.0,
            updated_at: Instant::now(),
        }
    }

    /// Extrapolate the playback position to `now`.
    pub fn position_at(&self, now: Instant) -> Duration {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return self.position;
        }

        let elapsed = now.saturating_duration_since(self.updated_at);
        match Duration::try_from_secs_f32(elapsed.as_secs_f32() * self.speed) {
            Ok(advanced) => self.position.saturating_add(advanced),
            Err(_) => self.position,
        }
    }
}
