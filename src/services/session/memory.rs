use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use futures::Stream;
use tracing::debug;

use crate::{
    core::{Result, SessionError},
    services::common::Property,
};

use super::{
    CommandSender, MediaMetadata, MediaSession, PlaybackStateRecord, RepeatMode, SessionCommand,
    SessionFlags, ShuffleMode,
};

/// In-process media session.
///
/// Stores every published value as a watchable [`Property`] and lets the
/// host inject controller commands through [`dispatch`](Self::dispatch).
/// Other session backends build on it to share state handling.
#[derive(Debug)]
pub struct InMemorySession {
    flags: Property<SessionFlags>,
    playback_state: Property<Option<PlaybackStateRecord>>,
    metadata: Property<Option<MediaMetadata>>,
    repeat_mode: Property<RepeatMode>,
    shuffle_mode: Property<ShuffleMode>,
    handler: Mutex<Option<CommandSender>>,
    playback_state_writes: AtomicUsize,
    metadata_writes: AtomicUsize,
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySession {
    /// Create an empty session with no handler installed
    pub fn new() -> Self {
        Self {
            flags: Property::new(SessionFlags::empty()),
            playback_state: Property::new(None),
            metadata: Property::new(None),
            repeat_mode: Property::new(RepeatMode::None),
            shuffle_mode: Property::new(ShuffleMode::None),
            handler: Mutex::new(None),
            playback_state_writes: AtomicUsize::new(0),
            metadata_writes: AtomicUsize::new(0),
        }
    }

    /// Capability flags currently set
    pub fn flags(&self) -> SessionFlags {
        self.flags.get()
    }

    /// Last published playback state
    pub fn playback_state(&self) -> Option<PlaybackStateRecord> {
        self.playback_state.get()
    }

    /// Last published repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode.get()
    }

    /// Last published shuffle mode
    pub fn shuffle_mode(&self) -> ShuffleMode {
        self.shuffle_mode.get()
    }

    /// Stream of playback state changes, starting with the current value
    pub fn watch_playback_state(&self) -> impl Stream<Item = Option<PlaybackStateRecord>> + Send {
        self.playback_state.watch()
    }

    /// Stream of metadata changes, starting with the current value
    pub fn watch_metadata(&self) -> impl Stream<Item = Option<MediaMetadata>> + Send {
        self.metadata.watch()
    }

    /// Stream of repeat mode changes, starting with the current value
    pub fn watch_repeat_mode(&self) -> impl Stream<Item = RepeatMode> + Send {
        self.repeat_mode.watch()
    }

    /// Stream of shuffle mode changes, starting with the current value
    pub fn watch_shuffle_mode(&self) -> impl Stream<Item = ShuffleMode> + Send {
        self.shuffle_mode.watch()
    }

    /// Number of playback state writes received
    pub fn playback_state_writes(&self) -> usize {
        self.playback_state_writes.load(Ordering::Relaxed)
    }

    /// Number of metadata writes received
    pub fn metadata_writes(&self) -> usize {
        self.metadata_writes.load(Ordering::Relaxed)
    }

    /// Whether a command handler is installed
    pub fn has_command_handler(&self) -> bool {
        self.handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Deliver a controller command to the installed handler.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCommandHandler` if no handler was installed,
    /// or `SessionError::ConnectorClosed` if the handler has gone away.
    pub fn dispatch(&self, command: SessionCommand) -> Result<()> {
        let handler = self.handler.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = handler.as_ref() else {
            return Err(SessionError::NoCommandHandler);
        };

        debug!(command = command.name(), "Dispatching controller command");
        sender
            .send(command)
            .map_err(|_| SessionError::ConnectorClosed)
    }
}

impl MediaSession for InMemorySession {
    fn set_flags(&self, flags: SessionFlags) {
        self.flags.set(flags);
    }

    fn set_command_handler(&self, handler: CommandSender) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn set_playback_state(&self, state: PlaybackStateRecord) {
        self.playback_state_writes.fetch_add(1, Ordering::Relaxed);
        self.playback_state.set(Some(state));
    }

    fn set_metadata(&self, metadata: MediaMetadata) {
        self.metadata_writes.fetch_add(1, Ordering::Relaxed);
        self.metadata.set(Some(metadata));
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        self.metadata.get()
    }

    fn set_repeat_mode(&self, mode: RepeatMode) {
        self.repeat_mode.set(mode);
    }

    fn set_shuffle_mode(&self, mode: ShuffleMode) {
        self.shuffle_mode.set(mode);
    }
}
