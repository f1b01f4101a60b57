use std::sync::Arc;

use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc, oneshot,
};
use tracing::{debug, info, instrument, warn};

use crate::core::{Result, SessionError};

use super::{
    DefaultMetadataProvider, ExecutionContext, MediaMetadata, MediaSession, MetadataProvider,
    PlaybackPreparer, PlaybackStateRecord, Player, PlayerEvents, QueueNavigator, RepeatMode,
    SessionCommand, SessionFlags, ShuffleMode, state,
};

enum Control {
    SetPlayer {
        player: Option<Arc<dyn Player>>,
        reply: oneshot::Sender<Result<()>>,
    },
    Shutdown,
}

/// Keeps an OS media session in sync with a player and forwards the
/// session's commands to the player's collaborators.
///
/// The connector is fixed to one [`ExecutionContext`]. Everything it does
/// happens either inside [`SessionConnector::run`] or through direct calls
/// made from that same context.
pub struct SessionConnector {
    context: ExecutionContext,
    session: Arc<dyn MediaSession>,
    preparer: Arc<dyn PlaybackPreparer>,
    navigator: Arc<dyn QueueNavigator>,
    metadata_provider: Box<dyn MetadataProvider>,
    player: Option<Arc<dyn Player>>,
    player_events: Option<broadcast::Receiver<PlayerEvents>>,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    control_tx: mpsc::UnboundedSender<Control>,
    control_rx: mpsc::UnboundedReceiver<Control>,
}

impl SessionConnector {
    /// Create a connector and install it as the session's command handler.
    ///
    /// The session's flags are set to [`SessionFlags::BASE`].
    pub fn new(
        context: ExecutionContext,
        session: Arc<dyn MediaSession>,
        preparer: Arc<dyn PlaybackPreparer>,
        navigator: Arc<dyn QueueNavigator>,
    ) -> Self {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        session.set_flags(SessionFlags::BASE);
        session.set_command_handler(command_tx);

        Self {
            context,
            session,
            preparer,
            navigator,
            metadata_provider: Box::new(DefaultMetadataProvider),
            player: None,
            player_events: None,
            commands,
            control_tx,
            control_rx,
        }
    }

    /// Replace the metadata provider
    pub fn with_metadata_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.metadata_provider = Box::new(provider);
        self
    }

    /// Context this connector is fixed to
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Player currently attached
    pub fn player(&self) -> Option<&Arc<dyn Player>> {
        self.player.as_ref()
    }

    /// Handle for controlling the connector while [`run`](Self::run) owns it
    pub fn handle(&self) -> ConnectorHandle {
        ConnectorHandle {
            context: self.context,
            control: self.control_tx.clone(),
        }
    }

    /// Attach a player, or detach with `None`.
    ///
    /// Both projections are republished immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ContextMismatch` if the player is bound to a
    /// different context; the previous player stays attached in that case.
    #[instrument(skip_all, fields(context = %self.context))]
    pub fn set_player(&mut self, player: Option<Arc<dyn Player>>) -> Result<()> {
        if let Some(new_player) = &player {
            check_context(self.context, new_player.context())?;
        }

        if self.player_events.take().is_some() {
            debug!("Detached from previous player");
        }

        self.player_events = player.as_ref().map(|p| p.subscribe());
        self.player = player;
        info!(attached = self.player.is_some(), "Player replaced");

        self.update();
        Ok(())
    }

    /// React to a batch of player events.
    pub fn on_player_events(&mut self, events: PlayerEvents) {
        debug!(?events, "Player events");
        if let Some(player) = &self.player {
            self.navigator.on_timeline_changed(player.as_ref());
        }
        self.update();
    }

    /// Forward one session command to its collaborator.
    pub fn handle_command(&mut self, command: SessionCommand) {
        debug!(command = command.name(), "Session command");

        match command {
            SessionCommand::Prepare => self.preparer.on_prepare(false),
            SessionCommand::PrepareFromMediaId { media_id, extras } => {
                debug!(%media_id, "Prepare from media id");
                self.preparer.on_prepare_from_media_id(&media_id, false, &extras);
            }
            SessionCommand::PrepareFromSearch { query, extras } => {
                debug!(%query, "Prepare from search");
                self.preparer.on_prepare_from_search(&query, false, &extras);
            }
            SessionCommand::PrepareFromUri { uri, extras } => {
                debug!(%uri, "Prepare from uri");
                self.preparer.on_prepare_from_uri(&uri, false, &extras);
            }
            SessionCommand::Play => self.preparer.on_prepare(true),
            SessionCommand::PlayFromMediaId { media_id, extras } => {
                debug!(%media_id, "Play from media id");
                self.preparer.on_prepare_from_media_id(&media_id, true, &extras);
            }
            SessionCommand::PlayFromSearch { query, extras } => {
                debug!(%query, "Play from search");
                self.preparer.on_prepare_from_search(&query, true, &extras);
            }
            SessionCommand::PlayFromUri { uri, extras } => {
                debug!(%uri, "Play from uri");
                self.preparer.on_prepare_from_uri(&uri, true, &extras);
            }
            SessionCommand::Pause => {
                if let Some(player) = &self.player {
                    player.pause();
                }
            }
            SessionCommand::Stop => {
                if let Some(player) = &self.player {
                    player.stop();
                    player.clear_media_items();
                }
            }
            SessionCommand::SkipToPrevious => {
                if let Some(player) = &self.player {
                    self.navigator.on_skip_to_previous(player.as_ref());
                }
            }
            SessionCommand::SkipToNext => {
                if let Some(player) = &self.player {
                    self.navigator.on_skip_to_next(player.as_ref());
                }
            }
            SessionCommand::SkipToQueueItem(id) => {
                if let Some(player) = &self.player {
                    self.navigator.on_skip_to_queue_item(player.as_ref(), id);
                }
            }
            SessionCommand::SeekTo(position) => {
                debug!(?position, "Seek");
                if let Some(player) = &self.player {
                    player.seek_to(player.current_media_item_index(), position);
                }
            }
            SessionCommand::SetRating(rating) => {
                debug!(?rating, "Rating ignored");
            }
            SessionCommand::CustomAction { action, .. } => {
                debug!(%action, "Custom action ignored");
            }
        }
    }

    /// Drive the connector until shut down.
    ///
    /// Session commands, player events and handle requests are all handled
    /// here, one at a time. The loop ends on [`ConnectorHandle::shutdown`] or
    /// once the session has dropped its command sender.
    #[instrument(skip_all, fields(context = %self.context))]
    pub async fn run(mut self) {
        info!("Session connector running");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        info!("Session dropped its command handler");
                        break;
                    }
                },
                Some(control) = self.control_rx.recv() => match control {
                    Control::SetPlayer { player, reply } => {
                        let _ = reply.send(self.set_player(player));
                    }
                    Control::Shutdown => break,
                },
                event = next_player_event(&mut self.player_events) => match event {
                    Ok(events) => self.on_player_events(events),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Player events lagged, refreshing session");
                        self.on_player_events(PlayerEvents::all());
                    }
                    Err(RecvError::Closed) => {
                        warn!("Player event stream closed");
                        self.player_events = None;
                    }
                },
            }
        }

        info!("Session connector stopped");
    }

    fn update(&self) {
        self.update_playback_state();
        self.update_metadata();
    }

    fn update_playback_state(&self) {
        let Some(player) = &self.player else {
            self.session.set_playback_state(PlaybackStateRecord::detached());
            self.session.set_repeat_mode(RepeatMode::None);
            self.session.set_shuffle_mode(ShuffleMode::None);
            return;
        };

        let record = state::build_playback_state(player.as_ref(), self.navigator.as_ref());
        debug!(status = ?record.status, actions = ?record.actions, "Publishing playback state");
        self.session.set_playback_state(record);
    }

    fn update_metadata(&self) {
        let metadata = match &self.player {
            Some(player) => self.metadata_provider.metadata(player.as_ref()),
            None => MediaMetadata::default(),
        };

        if let Some(previous) = self.session.metadata() {
            if self.metadata_provider.same_as(&previous, &metadata) {
                debug!("Metadata unchanged, not publishing");
                return;
            }
        }

        debug!(title = ?metadata.title, "Publishing metadata");
        self.session.set_metadata(metadata);
    }
}

/// Cloneable handle to a running [`SessionConnector`].
#[derive(Clone)]
pub struct ConnectorHandle {
    context: ExecutionContext,
    control: mpsc::UnboundedSender<Control>,
}

impl ConnectorHandle {
    /// Context of the connector behind this handle
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Attach a player to the running connector, or detach with `None`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ContextMismatch` if the player is bound to a
    /// different context, or `SessionError::ConnectorClosed` if the connector
    /// is no longer running.
    pub async fn set_player(&self, player: Option<Arc<dyn Player>>) -> Result<()> {
        if let Some(new_player) = &player {
            check_context(self.context, new_player.context())?;
        }

        let (reply, response) = oneshot::channel();
        self.control
            .send(Control::SetPlayer { player, reply })
            .map_err(|_| SessionError::ConnectorClosed)?;

        response.await.map_err(|_| SessionError::ConnectorClosed)?
    }

    /// Stop the connector's run loop.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ConnectorClosed` if it already stopped.
    pub fn shutdown(&self) -> Result<()> {
        self.control
            .send(Control::Shutdown)
            .map_err(|_| SessionError::ConnectorClosed)
    }
}

fn check_context(expected: ExecutionContext, actual: ExecutionContext) -> Result<()> {
    if expected != actual {
        return Err(SessionError::ContextMismatch { expected, actual });
    }
    Ok(())
}

async fn next_player_event(
    events: &mut Option<broadcast::Receiver<PlayerEvents>>,
) -> std::result::Result<PlayerEvents, RecvError> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
