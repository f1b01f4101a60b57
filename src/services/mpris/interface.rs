use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::debug;
use zbus::{
    fdo, interface,
    zvariant::{self, ObjectPath, OwnedValue, Value},
};

use crate::{
    config::SessionConfig,
    services::session::{
        Extras, InMemorySession, MediaMetadata, MediaSession, PlaybackActions,
        PlaybackStateRecord, SessionCommand,
    },
};

use super::utils;

/// Object path both MPRIS interfaces are served at.
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";

const NO_TRACK_PATH: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";
const TRACK_PATH_PREFIX: &str = "/org/mediasession/track";

/// `org.mpris.MediaPlayer2` root interface
#[derive(Debug, Clone)]
pub struct RootInterface {
    identity: String,
    desktop_entry: Option<String>,
    supported_uri_schemes: Vec<String>,
    supported_mime_types: Vec<String>,
}

impl From<&SessionConfig> for RootInterface {
    fn from(config: &SessionConfig) -> Self {
        Self {
            identity: config.identity.clone(),
            desktop_entry: config.desktop_entry.clone(),
            supported_uri_schemes: config.supported_uri_schemes.clone(),
            supported_mime_types: config.supported_mime_types.clone(),
        }
    }
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootInterface {
    fn raise(&self) {
        debug!("Raise requested, not supported");
    }

    fn quit(&self) {
        debug!("Quit requested, not supported");
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> String {
        self.identity.clone()
    }

    #[zbus(property)]
    fn desktop_entry(&self) -> String {
        self.desktop_entry.clone().unwrap_or_default()
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        self.supported_uri_schemes.clone()
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        self.supported_mime_types.clone()
    }
}

/// `org.mpris.MediaPlayer2.Player` interface backed by session state
pub struct PlayerInterface {
    session: Arc<InMemorySession>,
}

impl PlayerInterface {
    /// Serve the state held by `session`
    pub fn new(session: Arc<InMemorySession>) -> Self {
        Self { session }
    }

    fn dispatch(&self, command: SessionCommand) -> fdo::Result<()> {
        self.session
            .dispatch(command)
            .map_err(|e| fdo::Error::Failed(e.to_string()))
    }

    fn actions(&self) -> PlaybackActions {
        self.session
            .playback_state()
            .map(|state| state.actions)
            .unwrap_or_default()
    }

    fn position_now(&self) -> Duration {
        self.session
            .playback_state()
            .map(|state| state.position_at(Instant::now()))
            .unwrap_or_default()
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerInterface {
    fn next(&self) -> fdo::Result<()> {
        self.dispatch(SessionCommand::SkipToNext)
    }

    fn previous(&self) -> fdo::Result<()> {
        self.dispatch(SessionCommand::SkipToPrevious)
    }

    fn pause(&self) -> fdo::Result<()> {
        self.dispatch(SessionCommand::Pause)
    }

    fn play_pause(&self) -> fdo::Result<()> {
        let playing = self
            .session
            .playback_state()
            .is_some_and(|state| state.status.is_active());

        if playing {
            self.dispatch(SessionCommand::Pause)
        } else {
            self.dispatch(SessionCommand::Play)
        }
    }

    fn stop(&self) -> fdo::Result<()> {
        self.dispatch(SessionCommand::Stop)
    }

    fn play(&self) -> fdo::Result<()> {
        self.dispatch(SessionCommand::Play)
    }

    fn seek(&self, offset: i64) -> fdo::Result<()> {
        let current = utils::to_mpris_micros(self.position_now());
        let target = utils::from_mpris_micros(current.saturating_add(offset));

        let length = self.session.metadata().and_then(|m| m.duration);
        if length.is_some_and(|length| target > length) {
            return self.dispatch(SessionCommand::SkipToNext);
        }

        self.dispatch(SessionCommand::SeekTo(target))
    }

    fn set_position(&self, track_id: ObjectPath<'_>, position: i64) -> fdo::Result<()> {
        let current = track_path(self.session.playback_state().as_ref());
        if track_id.as_str() != current.as_str() || position < 0 {
            debug!(%track_id, position, "Ignoring stale SetPosition");
            return Ok(());
        }

        let target = utils::from_mpris_micros(position);
        let length = self.session.metadata().and_then(|m| m.duration);
        if length.is_some_and(|length| target > length) {
            debug!(position, ?length, "Ignoring SetPosition past the end of the track");
            return Ok(());
        }

        self.dispatch(SessionCommand::SeekTo(target))
    }

    fn open_uri(&self, uri: String) -> fdo::Result<()> {
        self.dispatch(SessionCommand::PlayFromUri {
            uri,
            extras: Extras::new(),
        })
    }

    #[zbus(property)]
    fn playback_status(&self) -> String {
        let status = self
            .session
            .playback_state()
            .map(|state| state.status)
            .unwrap_or_default();
        <&str>::from(status).to_string()
    }

    #[zbus(property)]
    fn loop_status(&self) -> String {
        <&str>::from(self.session.repeat_mode()).to_string()
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.session.shuffle_mode().into()
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        self.session
            .playback_state()
            .map(|state| f64::from(state.player_speed))
            .filter(|speed| *speed > 0.0)
            .unwrap_or(1.0)
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        self.rate().min(1.0)
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        self.rate().max(1.0)
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn metadata(&self) -> fdo::Result<HashMap<String, OwnedValue>> {
        let metadata = self.session.metadata().unwrap_or_default();
        mpris_metadata(self.session.playback_state().as_ref(), &metadata)
            .map_err(|e| fdo::Error::Failed(format!("metadata conversion failed: {e}")))
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn position(&self) -> i64 {
        utils::to_mpris_micros(self.position_now())
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.actions().contains(PlaybackActions::SKIP_TO_NEXT)
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.actions().contains(PlaybackActions::SKIP_TO_PREVIOUS)
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.actions()
            .intersects(PlaybackActions::PLAY | PlaybackActions::PLAY_PAUSE)
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.actions()
            .intersects(PlaybackActions::PAUSE | PlaybackActions::PLAY_PAUSE)
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        self.actions().contains(PlaybackActions::SEEK_TO)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }
}

/// Object path identifying the active queue item
pub fn track_path(state: Option<&PlaybackStateRecord>) -> ObjectPath<'static> {
    let no_track = || ObjectPath::from_static_str_unchecked(NO_TRACK_PATH);

    match state.and_then(|s| s.active_queue_item_id) {
        Some(id) => ObjectPath::try_from(format!("{TRACK_PATH_PREFIX}/{id}"))
            .unwrap_or_else(|_| no_track()),
        None => no_track(),
    }
}

/// Translate a metadata projection into MPRIS `xesam:`/`mpris:` entries.
///
/// # Errors
///
/// Returns an error if a value cannot be converted to an owned variant.
pub fn mpris_metadata(
    state: Option<&PlaybackStateRecord>,
    metadata: &MediaMetadata,
) -> zvariant::Result<HashMap<String, OwnedValue>> {
    let mut map = HashMap::new();

    insert(&mut map, "mpris:trackid", track_path(state))?;

    if let Some(length) = metadata.duration {
        insert(&mut map, "mpris:length", utils::to_mpris_micros(length))?;
    }
    if let Some(art) = &metadata.art_uri {
        insert(&mut map, "mpris:artUrl", art.clone())?;
    }
    if let Some(title) = &metadata.title {
        insert(&mut map, "xesam:title", title.clone())?;
    }
    if let Some(artist) = &metadata.artist {
        insert(&mut map, "xesam:artist", vec![artist.clone()])?;
    }
    if let Some(album) = &metadata.album {
        insert(&mut map, "xesam:album", album.clone())?;
    }
    if let Some(album_artist) = &metadata.album_artist {
        insert(&mut map, "xesam:albumArtist", vec![album_artist.clone()])?;
    }
    if let Some(url) = &metadata.media_uri {
        insert(&mut map, "xesam:url", url.clone())?;
    }
    if let Some(track_number) = metadata.track_number {
        let track_number = i32::try_from(track_number).unwrap_or(i32::MAX);
        insert(&mut map, "xesam:trackNumber", track_number)?;
    }

    Ok(map)
}

fn insert(
    map: &mut HashMap<String, OwnedValue>,
    key: &str,
    value: impl Into<Value<'static>>,
) -> zvariant::Result<()> {
    map.insert(key.to_string(), OwnedValue::try_from(value.into())?);
    Ok(())
}
