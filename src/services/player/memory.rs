use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::sync::broadcast;
use tracing::trace;

use crate::services::session::{
    ExecutionContext, MediaItem, Player, PlayerEvents, PlayerState,
};

const EVENT_CAPACITY: usize = 64;

/// Seeking back past this point of an item restarts it instead.
const MAX_SEEK_TO_PREVIOUS_POSITION: Duration = Duration::from_secs(3);

#[derive(Debug)]
struct Inner {
    items: Vec<MediaItem>,
    index: usize,
    state: PlayerState,
    play_when_ready: bool,
    position: Duration,
    buffered_position: Duration,
    speed: f32,
}

/// Player state kept in memory.
///
/// Holds a timeline of [`MediaItem`]s and the engine state a real player
/// would report, and broadcasts [`PlayerEvents`] on every change. It does
/// not render media; hosts and tests drive its state directly.
#[derive(Debug)]
pub struct MemoryPlayer {
    context: ExecutionContext,
    events: broadcast::Sender<PlayerEvents>,
    inner: Mutex<Inner>,
}

impl MemoryPlayer {
    /// Create an idle, empty player bound to `context`
    pub fn new(context: ExecutionContext) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            context,
            events,
            inner: Mutex::new(Inner {
                items: Vec::new(),
                index: 0,
                state: PlayerState::Idle,
                play_when_ready: false,
                position: Duration::ZERO,
                buffered_position: Duration::ZERO,
                speed: 1.0,
            }),
        }
    }

    /// Replace the timeline and start at `start_index`
    pub fn set_media_items(&self, items: Vec<MediaItem>, start_index: usize) {
        self.mutate(
            PlayerEvents::TIMELINE_CHANGED
                | PlayerEvents::MEDIA_ITEM_TRANSITION
                | PlayerEvents::POSITION_DISCONTINUITY,
            |inner| {
                inner.index = start_index.min(items.len().saturating_sub(1));
                inner.items = items;
                inner.position = Duration::ZERO;
                inner.buffered_position = Duration::ZERO;
            },
        );
    }

    /// Move from idle to ready if there is anything to play
    pub fn prepare(&self) {
        self.mutate(PlayerEvents::PLAYBACK_STATE_CHANGED, |inner| {
            if !inner.items.is_empty() {
                inner.state = PlayerState::Ready;
            }
        });
    }

    /// Set play intent
    pub fn set_play_when_ready(&self, play_when_ready: bool) {
        self.mutate(
            PlayerEvents::PLAY_WHEN_READY_CHANGED | PlayerEvents::IS_PLAYING_CHANGED,
            |inner| inner.play_when_ready = play_when_ready,
        );
    }

    /// Set play intent to true
    pub fn play(&self) {
        self.set_play_when_ready(true);
    }

    /// Force the engine state
    pub fn set_playback_state(&self, state: PlayerState) {
        self.mutate(
            PlayerEvents::PLAYBACK_STATE_CHANGED | PlayerEvents::IS_PLAYING_CHANGED,
            |inner| inner.state = state,
        );
    }

    /// Report a new position without a discontinuity
    pub fn set_position(&self, position: Duration) {
        self.lock().position = position;
    }

    /// Report a new buffered position
    pub fn set_buffered_position(&self, position: Duration) {
        self.mutate(PlayerEvents::BUFFERED_POSITION_CHANGED, |inner| {
            inner.buffered_position = position;
        });
    }

    /// Change the playback speed
    pub fn set_speed(&self, speed: f32) {
        self.mutate(PlayerEvents::PLAYBACK_PARAMETERS_CHANGED, |inner| {
            inner.speed = speed;
        });
    }

    /// Snapshot of the timeline
    pub fn media_items(&self) -> Vec<MediaItem> {
        self.lock().items.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, events: PlayerEvents, change: impl FnOnce(&mut Inner)) {
        {
            let mut inner = self.lock();
            change(&mut inner);
        }
        trace!(?events, "Player changed");
        let _ = self.events.send(events);
    }

    fn current_item(inner: &Inner) -> Option<&MediaItem> {
        inner.items.get(inner.index)
    }
}

impl Player for MemoryPlayer {
    fn context(&self) -> ExecutionContext {
        self.context
    }

    fn subscribe(&self) -> broadcast::Receiver<PlayerEvents> {
        self.events.subscribe()
    }

    fn playback_state(&self) -> PlayerState {
        self.lock().state
    }

    fn play_when_ready(&self) -> bool {
        self.lock().play_when_ready
    }

    fn is_current_item_live(&self) -> bool {
        Self::current_item(&self.lock()).is_some_and(|item| item.live)
    }

    fn is_current_item_seekable(&self) -> bool {
        Self::current_item(&self.lock()).is_some_and(|item| !item.live && item.duration.is_some())
    }

    fn current_position(&self) -> Duration {
        self.lock().position
    }

    fn buffered_position(&self) -> Duration {
        self.lock().buffered_position
    }

    fn playback_speed(&self) -> f32 {
        self.lock().speed
    }

    fn current_media_item(&self) -> Option<MediaItem> {
        Self::current_item(&self.lock()).cloned()
    }

    fn current_media_item_index(&self) -> usize {
        self.lock().index
    }

    fn media_item_count(&self) -> usize {
        self.lock().items.len()
    }

    fn pause(&self) {
        self.set_play_when_ready(false);
    }

    fn stop(&self) {
        self.mutate(
            PlayerEvents::PLAYBACK_STATE_CHANGED | PlayerEvents::IS_PLAYING_CHANGED,
            |inner| {
                inner.state = PlayerState::Idle;
                inner.buffered_position = Duration::ZERO;
            },
        );
    }

    fn clear_media_items(&self) {
        self.mutate(
            PlayerEvents::TIMELINE_CHANGED | PlayerEvents::MEDIA_ITEM_TRANSITION,
            |inner| {
                inner.items.clear();
                inner.index = 0;
                inner.position = Duration::ZERO;
                if inner.state != PlayerState::Idle {
                    inner.state = PlayerState::Ended;
                }
            },
        );
    }

    fn seek_to(&self, index: usize, position: Duration) {
        self.mutate(
            PlayerEvents::POSITION_DISCONTINUITY | PlayerEvents::MEDIA_ITEM_TRANSITION,
            |inner| {
                if index < inner.items.len() {
                    inner.index = index;
                    inner.position = position;
                }
            },
        );
    }

    fn seek_to_next(&self) {
        let next = {
            let inner = self.lock();
            (inner.index + 1 < inner.items.len()).then_some(inner.index + 1)
        };
        if let Some(index) = next {
            self.seek_to(index, Duration::ZERO);
        }
    }

    fn seek_to_previous(&self) {
        let (index, position) = {
            let inner = self.lock();
            (inner.index, inner.position)
        };

        if index > 0 && position <= MAX_SEEK_TO_PREVIOUS_POSITION {
            self.seek_to(index - 1, Duration::ZERO);
        } else {
            self.seek_to(index, Duration::ZERO);
        }
    }
}
