use std::sync::Arc;

use futures::{StreamExt, stream::BoxStream};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};
use zbus::{Connection, object_server::InterfaceRef};

use crate::{
    config::SessionConfig,
    core::{Result, SessionError},
    services::session::{
        CommandSender, InMemorySession, MediaMetadata, MediaSession, PlaybackStateRecord,
        RepeatMode, SessionFlags, ShuffleMode,
    },
};

use super::interface::{MPRIS_PATH, PlayerInterface, RootInterface};

#[derive(Debug, Clone, Copy)]
enum Change {
    PlaybackState,
    Metadata,
    LoopStatus,
    Shuffle,
}

/// Media session exported over D-Bus as an MPRIS player.
///
/// Published state lives in an [`InMemorySession`]; every change is
/// announced to desktop controllers with `PropertiesChanged`, and their
/// method calls arrive at the installed command handler.
pub struct MprisSession {
    state: Arc<InMemorySession>,
    connection: Connection,
    signals: JoinHandle<()>,
}

impl MprisSession {
    /// Claim `org.mpris.MediaPlayer2.<bus_name>` on the session bus and
    /// start serving the MPRIS interfaces.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InitializationFailed` if the bus connection
    /// cannot be established or the name cannot be claimed.
    #[instrument(skip(config), fields(bus_name = %config.bus_name))]
    pub async fn start(config: &SessionConfig) -> Result<Self> {
        let state = Arc::new(InMemorySession::new());
        let bus_name = format!("org.mpris.MediaPlayer2.{}", config.bus_name);

        let connection = zbus::connection::Builder::session()?
            .name(bus_name.clone())?
            .serve_at(MPRIS_PATH, RootInterface::from(config))?
            .serve_at(MPRIS_PATH, PlayerInterface::new(Arc::clone(&state)))?
            .build()
            .await
            .map_err(|e| {
                SessionError::InitializationFailed(format!("D-Bus connection failed: {e}"))
            })?;

        let player_iface = connection
            .object_server()
            .interface::<_, PlayerInterface>(MPRIS_PATH)
            .await?;

        let signals = tokio::spawn(announce_changes(player_iface, Arc::clone(&state)));

        info!(%bus_name, "MPRIS session exported");

        Ok(Self {
            state,
            connection,
            signals,
        })
    }

    /// Session state backing the exported properties
    pub fn state(&self) -> &Arc<InMemorySession> {
        &self.state
    }

    /// Underlying D-Bus connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl Drop for MprisSession {
    fn drop(&mut self) {
        self.signals.abort();
    }
}

impl MediaSession for MprisSession {
    fn set_flags(&self, flags: SessionFlags) {
        self.state.set_flags(flags);
    }

    fn set_command_handler(&self, handler: CommandSender) {
        self.state.set_command_handler(handler);
    }

    fn set_playback_state(&self, state: PlaybackStateRecord) {
        self.state.set_playback_state(state);
    }

    fn set_metadata(&self, metadata: MediaMetadata) {
        self.state.set_metadata(metadata);
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        self.state.metadata()
    }

    fn set_repeat_mode(&self, mode: RepeatMode) {
        self.state.set_repeat_mode(mode);
    }

    fn set_shuffle_mode(&self, mode: ShuffleMode) {
        self.state.set_shuffle_mode(mode);
    }
}

async fn announce_changes(iface: InterfaceRef<PlayerInterface>, state: Arc<InMemorySession>) {
    let streams: Vec<BoxStream<'_, Change>> = vec![
        state.watch_playback_state().map(|_| Change::PlaybackState).boxed(),
        state.watch_metadata().map(|_| Change::Metadata).boxed(),
        state.watch_repeat_mode().map(|_| Change::LoopStatus).boxed(),
        state.watch_shuffle_mode().map(|_| Change::Shuffle).boxed(),
    ];
    let mut changes = futures::stream::select_all(streams);

    while let Some(change) = changes.next().await {
        if let Err(e) = announce(&iface, change).await {
            warn!(?change, "Failed to emit PropertiesChanged: {e}");
        }
    }
}

async fn announce(iface: &InterfaceRef<PlayerInterface>, change: Change) -> zbus::Result<()> {
    let emitter = iface.signal_emitter();
    let player = iface.get().await;

    match change {
        Change::PlaybackState => {
            player.playback_status_changed(emitter).await?;
            player.rate_changed(emitter).await?;
            player.can_play_changed(emitter).await?;
            player.can_pause_changed(emitter).await?;
            player.can_go_next_changed(emitter).await?;
            player.can_go_previous_changed(emitter).await?;
            player.can_seek_changed(emitter).await?;
            // trackid is derived from the active queue item
            player.metadata_changed(emitter).await?;
        }
        Change::Metadata => player.metadata_changed(emitter).await?,
        Change::LoopStatus => player.loop_status_changed(emitter).await?,
        Change::Shuffle => player.shuffle_changed(emitter).await?,
    }

    Ok(())
}
