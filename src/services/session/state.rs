use std::time::Instant;

use super::{PlaybackActions, PlaybackStateRecord, PlaybackStatus, Player, PlayerState, QueueNavigator};

/// Map engine state, play intent and liveness onto the published status.
///
/// Live content never reports `Paused`: a live stream that is not playing
/// cannot be resumed where it left off, so it reports `Stopped`.
pub fn derive_status(state: PlayerState, play_when_ready: bool, live: bool) -> PlaybackStatus {
    let idle_status = if live {
        PlaybackStatus::Stopped
    } else {
        PlaybackStatus::Paused
    };

    match state {
        PlayerState::Buffering if play_when_ready => PlaybackStatus::Buffering,
        PlayerState::Ready if play_when_ready => PlaybackStatus::Playing,
        PlayerState::Buffering | PlayerState::Ready | PlayerState::Ended => idle_status,
        PlayerState::Idle => PlaybackStatus::None,
    }
}

/// Actions to advertise for the attached player.
pub fn playback_actions(player: Option<&dyn Player>, navigator: &dyn QueueNavigator) -> PlaybackActions {
    let mut actions = PlaybackActions::BASE;
    let Some(player) = player else {
        return actions;
    };

    let live = player.is_current_item_live();

    let mut navigation = navigator.supported_actions(player) & PlaybackActions::QUEUE_NAVIGATION;
    if live {
        navigation.remove(PlaybackActions::SKIPS);
    } else {
        navigation |= PlaybackActions::SKIPS;
    }
    actions |= navigation;

    if player.playback_state() == PlayerState::Ready {
        actions |= match (player.play_when_ready(), live) {
            (true, true) => PlaybackActions::STOP,
            (true, false) => PlaybackActions::PAUSE,
            (false, _) => PlaybackActions::PLAY,
        };
    }

    actions
}

/// Build the full playback state projection for a player.
pub fn build_playback_state(player: &dyn Player, navigator: &dyn QueueNavigator) -> PlaybackStateRecord {
    let player_speed = player.playback_speed();
    let speed = if player.is_playing() { player_speed } else { 0.0 };

    let media_id = player
        .current_media_item()
        .filter(|item| item.has_media_id())
        .map(|item| item.media_id);

    PlaybackStateRecord {
        status: derive_status(
            player.playback_state(),
            player.play_when_ready(),
            player.is_current_item_live(),
        ),
        position: player.current_position(),
        speed,
        actions: playback_actions(Some(player), navigator),
        buffered_position: player.buffered_position(),
        active_queue_item_id: navigator.active_queue_item_id(player),
        media_id,
        player_speed,
        updated_at: Instant::now(),
    }
}
