//! Unit tests for the session connector
//!
//! Collaborators are recording fakes; the session is the in-memory backend.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    core::SessionError,
    services::{
        player::MemoryPlayer,
        session::{
            ExecutionContext, Extras, InMemorySession, MediaItem, MediaItemMetadata,
            MediaMetadata, MediaSession, MetadataProvider, PlaybackActions, PlaybackPreparer,
            PlaybackStatus, Player, PlayerEvents, PlayerState, QueueNavigator, Rating,
            RepeatMode, SessionCommand, SessionConnector, SessionFlags, ShuffleMode,
        },
    },
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Prepare(bool),
    MediaId(String, bool, Extras),
    Search(String, bool, Extras),
    Uri(String, bool, Extras),
    TimelineChanged,
    SkipPrevious,
    SkipNext,
    SkipToItem(u64),
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    navigator_actions: Mutex<PlaybackActions>,
}

impl Recorder {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn forwarded(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::TimelineChanged)
            .collect()
    }
}

impl PlaybackPreparer for Recorder {
    fn on_prepare(&self, play_when_ready: bool) {
        self.record(Call::Prepare(play_when_ready));
    }

    fn on_prepare_from_media_id(&self, media_id: &str, play_when_ready: bool, extras: &Extras) {
        self.record(Call::MediaId(
            media_id.to_string(),
            play_when_ready,
            extras.clone(),
        ));
    }

    fn on_prepare_from_search(&self, query: &str, play_when_ready: bool, extras: &Extras) {
        self.record(Call::Search(query.to_string(), play_when_ready, extras.clone()));
    }

    fn on_prepare_from_uri(&self, uri: &str, play_when_ready: bool, extras: &Extras) {
        self.record(Call::Uri(uri.to_string(), play_when_ready, extras.clone()));
    }
}

impl QueueNavigator for Recorder {
    fn on_timeline_changed(&self, _player: &dyn Player) {
        self.record(Call::TimelineChanged);
    }

    fn supported_actions(&self, _player: &dyn Player) -> PlaybackActions {
        *self.navigator_actions.lock().unwrap()
    }

    fn active_queue_item_id(&self, player: &dyn Player) -> Option<u64> {
        Some(player.current_media_item_index() as u64 + 100)
    }

    fn on_skip_to_previous(&self, _player: &dyn Player) {
        self.record(Call::SkipPrevious);
    }

    fn on_skip_to_next(&self, _player: &dyn Player) {
        self.record(Call::SkipNext);
    }

    fn on_skip_to_queue_item(&self, _player: &dyn Player, id: u64) {
        self.record(Call::SkipToItem(id));
    }
}

struct Fixture {
    context: ExecutionContext,
    session: Arc<InMemorySession>,
    recorder: Arc<Recorder>,
    connector: SessionConnector,
}

fn fixture() -> Fixture {
    let context = ExecutionContext::unique();
    let session = Arc::new(InMemorySession::new());
    let recorder = Arc::new(Recorder::default());
    let connector = SessionConnector::new(
        context,
        session.clone(),
        recorder.clone(),
        recorder.clone(),
    );

    Fixture {
        context,
        session,
        recorder,
        connector,
    }
}

fn song(id: &str, title: &str) -> MediaItem {
    MediaItem {
        media_id: id.to_string(),
        uri: Some(format!("file:///music/{id}.flac")),
        duration: Some(Duration::from_secs(180)),
        live: false,
        metadata: MediaItemMetadata {
            title: Some(title.to_string()),
            artist: Some("Low Tide".to_string()),
            ..Default::default()
        },
    }
}

fn station(id: &str) -> MediaItem {
    MediaItem {
        live: true,
        duration: None,
        ..song(id, "Live Radio")
    }
}

fn player_with(context: ExecutionContext, items: Vec<MediaItem>) -> Arc<MemoryPlayer> {
    let player = Arc::new(MemoryPlayer::new(context));
    player.set_media_items(items, 0);
    player
}

mod construction {
    use super::*;

    #[test]
    fn installs_flags_and_command_handler() {
        let f = fixture();

        assert_eq!(f.session.flags(), SessionFlags::BASE);
        assert!(f.session.has_command_handler());
        assert_eq!(f.connector.context(), f.context);
        assert!(f.connector.player().is_none());
    }
}

mod player_attachment {
    use super::*;

    #[test]
    fn attaching_publishes_both_projections() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "Night Drive")]);

        f.connector.set_player(Some(player)).unwrap();

        let state = f.session.playback_state().unwrap();
        assert_eq!(state.status, PlaybackStatus::None);
        assert_eq!(state.media_id.as_deref(), Some("a"));
        assert_eq!(state.active_queue_item_id, Some(100));

        let metadata = f.session.metadata().unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Night Drive"));
        assert_eq!(metadata.duration, Some(Duration::from_secs(180)));
    }

    #[test]
    fn foreign_context_is_rejected_and_nothing_changes() {
        let mut f = fixture();
        let own = player_with(f.context, vec![song("a", "Night Drive")]);
        f.connector.set_player(Some(own.clone())).unwrap();
        let writes = f.session.playback_state_writes();

        let foreign = player_with(ExecutionContext::unique(), vec![song("b", "Other")]);
        let result = f.connector.set_player(Some(foreign));

        match result {
            Err(SessionError::ContextMismatch { expected, .. }) => assert_eq!(expected, f.context),
            other => panic!("expected context mismatch, got {other:?}"),
        }
        assert_eq!(f.session.playback_state_writes(), writes);
        let attached = f.connector.player().unwrap();
        assert_eq!(attached.current_media_item().unwrap().media_id, "a");
    }

    #[test]
    fn detaching_publishes_empty_projections() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "Night Drive")]);
        f.connector.set_player(Some(player)).unwrap();
        f.session.set_repeat_mode(RepeatMode::All);
        f.session.set_shuffle_mode(ShuffleMode::All);

        f.connector.set_player(None).unwrap();

        let state = f.session.playback_state().unwrap();
        assert_eq!(state.status, PlaybackStatus::None);
        assert_eq!(state.actions, PlaybackActions::BASE);
        assert_eq!(state.position, Duration::ZERO);
        assert_eq!(state.speed, 0.0);
        assert_eq!(f.session.metadata(), Some(MediaMetadata::default()));
        assert_eq!(f.session.repeat_mode(), RepeatMode::None);
        assert_eq!(f.session.shuffle_mode(), ShuffleMode::None);
    }

    #[test]
    fn attached_player_leaves_session_modes_alone() {
        let mut f = fixture();
        f.session.set_repeat_mode(RepeatMode::One);
        f.session.set_shuffle_mode(ShuffleMode::All);
        let player = player_with(f.context, vec![song("a", "A"), song("b", "B")]);

        f.connector.set_player(Some(player.clone())).unwrap();
        player.seek_to_next();
        f.connector.on_player_events(PlayerEvents::all());

        assert_eq!(f.session.repeat_mode(), RepeatMode::One);
        assert_eq!(f.session.shuffle_mode(), ShuffleMode::All);
    }
}

mod projections {
    use super::*;

    #[test]
    fn playing_state_uses_player_speed() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "Night Drive")]);
        f.connector.set_player(Some(player.clone())).unwrap();

        player.set_speed(1.5);
        player.prepare();
        player.play();
        f.connector.on_player_events(PlayerEvents::IS_PLAYING_CHANGED);

        let state = f.session.playback_state().unwrap();
        assert_eq!(state.status, PlaybackStatus::Playing);
        assert_eq!(state.speed, 1.5);
        assert_eq!(state.player_speed, 1.5);
        assert!(state.actions.contains(PlaybackActions::PAUSE));
        assert!(!state.actions.contains(PlaybackActions::PLAY));
    }

    #[test]
    fn paused_state_reports_zero_speed_and_play_action() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "Night Drive")]);
        player.prepare();
        f.connector.set_player(Some(player)).unwrap();

        let state = f.session.playback_state().unwrap();
        assert_eq!(state.status, PlaybackStatus::Paused);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.player_speed, 1.0);
        assert!(state.actions.contains(PlaybackActions::PLAY));
    }

    #[test]
    fn live_content_stops_instead_of_pausing() {
        let mut f = fixture();
        let player = player_with(f.context, vec![station("radio")]);
        player.prepare();
        f.connector.set_player(Some(player.clone())).unwrap();

        assert_eq!(f.session.playback_state().unwrap().status, PlaybackStatus::Stopped);

        player.play();
        f.connector.on_player_events(PlayerEvents::PLAY_WHEN_READY_CHANGED);
        let state = f.session.playback_state().unwrap();
        assert_eq!(state.status, PlaybackStatus::Playing);
        assert!(state.actions.contains(PlaybackActions::STOP));
        assert!(!state.actions.contains(PlaybackActions::PAUSE));
    }

    #[test]
    fn skip_actions_present_iff_not_live() {
        let mut f = fixture();
        *f.recorder.navigator_actions.lock().unwrap() = PlaybackActions::QUEUE_NAVIGATION;

        let songs = player_with(f.context, vec![song("a", "A"), song("b", "B")]);
        f.connector.set_player(Some(songs)).unwrap();
        let actions = f.session.playback_state().unwrap().actions;
        assert!(actions.contains(PlaybackActions::SKIPS));
        assert!(actions.contains(PlaybackActions::SKIP_TO_QUEUE_ITEM));

        let radio = player_with(f.context, vec![station("radio")]);
        f.connector.set_player(Some(radio)).unwrap();
        let actions = f.session.playback_state().unwrap().actions;
        assert!(!actions.intersects(PlaybackActions::SKIPS));
        assert!(actions.contains(PlaybackActions::SKIP_TO_QUEUE_ITEM));
    }

    #[test]
    fn navigator_actions_are_masked() {
        let mut f = fixture();
        *f.recorder.navigator_actions.lock().unwrap() =
            PlaybackActions::SKIP_TO_QUEUE_ITEM | PlaybackActions::FAST_FORWARD;

        let player = player_with(f.context, vec![song("a", "A")]);
        f.connector.set_player(Some(player)).unwrap();

        let actions = f.session.playback_state().unwrap().actions;
        assert!(actions.contains(PlaybackActions::SKIP_TO_QUEUE_ITEM));
        assert!(!actions.contains(PlaybackActions::FAST_FORWARD));
        assert!(actions.contains(PlaybackActions::BASE));
    }

    #[test]
    fn default_media_id_is_not_published() {
        let mut f = fixture();
        let player = player_with(f.context, vec![MediaItem::new("")]);

        f.connector.set_player(Some(player)).unwrap();

        let state = f.session.playback_state().unwrap();
        assert_eq!(state.media_id, None);
        assert_eq!(f.session.metadata().unwrap().media_id, None);
    }

    #[test]
    fn events_notify_navigator_before_publishing() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "A")]);
        f.connector.set_player(Some(player)).unwrap();

        f.connector.on_player_events(PlayerEvents::TIMELINE_CHANGED);

        assert_eq!(f.recorder.calls(), vec![Call::TimelineChanged]);
    }

    #[test]
    fn live_items_publish_no_duration() {
        let mut f = fixture();
        let player = player_with(f.context, vec![station("radio")]);

        f.connector.set_player(Some(player)).unwrap();

        let metadata = f.session.metadata().unwrap();
        assert_eq!(metadata.duration, None);
        assert_eq!(metadata.media_id.as_deref(), Some("radio"));
    }
}

mod metadata_dedup {
    use super::*;

    #[test]
    fn unchanged_metadata_is_not_republished() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "A"), song("b", "B")]);
        f.connector.set_player(Some(player.clone())).unwrap();
        assert_eq!(f.session.metadata_writes(), 1);

        player.set_buffered_position(Duration::from_secs(30));
        f.connector.on_player_events(PlayerEvents::BUFFERED_POSITION_CHANGED);
        assert_eq!(f.session.metadata_writes(), 1);
        assert_eq!(f.session.playback_state_writes(), 2);

        player.seek_to_next();
        f.connector.on_player_events(PlayerEvents::MEDIA_ITEM_TRANSITION);
        assert_eq!(f.session.metadata_writes(), 2);
        assert_eq!(f.session.metadata().unwrap().title.as_deref(), Some("B"));
    }

    #[test]
    fn custom_comparator_controls_publishing() {
        struct TitleOnly;

        impl MetadataProvider for TitleOnly {
            fn metadata(&self, player: &dyn Player) -> MediaMetadata {
                let item = player.current_media_item().unwrap_or_default();
                MediaMetadata {
                    title: item.metadata.title,
                    media_uri: item.uri,
                    ..Default::default()
                }
            }

            fn same_as(&self, old: &MediaMetadata, new: &MediaMetadata) -> bool {
                old.title == new.title
            }
        }

        let f = fixture();
        let mut connector = f.connector.with_metadata_provider(TitleOnly);
        let player = player_with(
            f.context,
            vec![song("a", "Same"), MediaItem { uri: None, ..song("b", "Same") }],
        );
        connector.set_player(Some(player.clone())).unwrap();
        assert_eq!(f.session.metadata_writes(), 1);

        player.seek_to_next();
        connector.on_player_events(PlayerEvents::MEDIA_ITEM_TRANSITION);

        assert_eq!(f.session.metadata_writes(), 1);
    }
}

mod commands {
    use super::*;

    fn extras() -> Extras {
        let mut extras = Extras::new();
        extras.insert("source".to_string(), "lockscreen".into());
        extras
    }

    #[test]
    fn prepare_and_play_commands_reach_preparer_with_play_intent() {
        let mut f = fixture();

        let commands = vec![
            SessionCommand::Prepare,
            SessionCommand::Play,
            SessionCommand::PrepareFromMediaId {
                media_id: "a".to_string(),
                extras: extras(),
            },
            SessionCommand::PlayFromMediaId {
                media_id: "b".to_string(),
                extras: extras(),
            },
            SessionCommand::PrepareFromSearch {
                query: "jazz".to_string(),
                extras: extras(),
            },
            SessionCommand::PlayFromSearch {
                query: String::new(),
                extras: Extras::new(),
            },
            SessionCommand::PrepareFromUri {
                uri: "file:///x".to_string(),
                extras: Extras::new(),
            },
            SessionCommand::PlayFromUri {
                uri: "file:///y".to_string(),
                extras: extras(),
            },
        ];
        for command in commands {
            f.connector.handle_command(command);
        }

        assert_eq!(
            f.recorder.forwarded(),
            vec![
                Call::Prepare(false),
                Call::Prepare(true),
                Call::MediaId("a".to_string(), false, extras()),
                Call::MediaId("b".to_string(), true, extras()),
                Call::Search("jazz".to_string(), false, extras()),
                Call::Search(String::new(), true, Extras::new()),
                Call::Uri("file:///x".to_string(), false, Extras::new()),
                Call::Uri("file:///y".to_string(), true, extras()),
            ]
        );
    }

    #[test]
    fn extras_reach_preparer_unchanged() {
        let mut f = fixture();

        f.connector.handle_command(SessionCommand::PlayFromSearch {
            query: "rain".to_string(),
            extras: extras(),
        });
        f.connector.handle_command(SessionCommand::PrepareFromUri {
            uri: "file:///z".to_string(),
            extras: extras(),
        });

        let forwarded = f.recorder.forwarded();
        assert_eq!(forwarded.len(), 2);
        for call in forwarded {
            let extras = match call {
                Call::MediaId(_, _, extras) | Call::Search(_, _, extras) | Call::Uri(_, _, extras) => {
                    extras
                }
                other => panic!("unexpected call {other:?}"),
            };
            assert_eq!(extras.len(), 1);
            assert_eq!(extras["source"], "lockscreen");
        }
    }

    #[test]
    fn navigation_commands_reach_navigator() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "A")]);
        f.connector.set_player(Some(player)).unwrap();

        f.connector.handle_command(SessionCommand::SkipToNext);
        f.connector.handle_command(SessionCommand::SkipToPrevious);
        f.connector.handle_command(SessionCommand::SkipToQueueItem(7));

        assert_eq!(
            f.recorder.forwarded(),
            vec![Call::SkipNext, Call::SkipPrevious, Call::SkipToItem(7)]
        );
    }

    #[test]
    fn player_commands_without_player_are_ignored() {
        let mut f = fixture();

        f.connector.handle_command(SessionCommand::Pause);
        f.connector.handle_command(SessionCommand::Stop);
        f.connector.handle_command(SessionCommand::SkipToNext);
        f.connector
            .handle_command(SessionCommand::SeekTo(Duration::from_secs(3)));

        assert!(f.recorder.calls().is_empty());
    }

    #[test]
    fn pause_stop_and_seek_drive_the_player() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "A"), song("b", "B")]);
        player.seek_to(1, Duration::ZERO);
        player.prepare();
        player.play();
        f.connector.set_player(Some(player.clone())).unwrap();

        f.connector
            .handle_command(SessionCommand::SeekTo(Duration::from_secs(42)));
        assert_eq!(player.current_media_item_index(), 1);
        assert_eq!(player.current_position(), Duration::from_secs(42));

        f.connector.handle_command(SessionCommand::Pause);
        assert!(!player.play_when_ready());

        f.connector.handle_command(SessionCommand::Stop);
        assert_eq!(player.media_item_count(), 0);
        assert_eq!(player.playback_state(), PlayerState::Idle);
    }

    #[test]
    fn rating_and_custom_actions_are_no_ops() {
        let mut f = fixture();
        let player = player_with(f.context, vec![song("a", "A")]);
        f.connector.set_player(Some(player.clone())).unwrap();
        let writes = f.session.playback_state_writes();

        f.connector
            .handle_command(SessionCommand::SetRating(Rating::Heart(true)));
        f.connector.handle_command(SessionCommand::CustomAction {
            action: "thumbs".to_string(),
            extras: Extras::new(),
        });

        assert!(f.recorder.calls().is_empty());
        assert_eq!(f.session.playback_state_writes(), writes);
        assert_eq!(player.media_item_count(), 1);
    }
}
