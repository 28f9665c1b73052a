//! Game status tracking - the single source of truth for the game's
//! operational state.
//!
//! Three independent channels feed the tracker: manual operator commands,
//! inbound webhook pushes from the game servers, and the scheduled games-API
//! poll. Each channel mutates the record through its own method here, so the
//! precedence rules live in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Message used whenever the tracker transitions back to a healthy state.
pub const ALL_OPERATIONAL: &str = "All systems operational";

/// Operational state of the game. Closed enumeration; every consumer
/// matches exhaustively so a new state is a compile-time-visible change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poise::ChoiceParameter)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[name = "🟢 Online"]
    Online,
    #[name = "🔧 Maintenance"]
    Maintenance,
    #[name = "⚠️ Issues"]
    Issues,
}

/// Current game status record.
///
/// `last_updated` moves only on a status/message change (manual set, webhook
/// status push, or automatic recovery out of `Issues`) - never on a bare
/// player-count refresh. `last_game_update` moves only on successful data
/// ingestion (webhook or poll), independent of the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatus {
    pub status: GameState,
    pub message: String,
    pub last_updated: DateTime<Utc>,
    pub player_count: u64,
    pub active_servers: u64,
    pub last_game_update: DateTime<Utc>,
}

impl Default for GameStatus {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            status: GameState::Online,
            message: ALL_OPERATIONAL.to_string(),
            last_updated: now,
            player_count: 0,
            active_servers: 0,
            last_game_update: now,
        }
    }
}

/// Partially-populated status update pushed by the game process over the
/// webhook. Every field is optional and applied independently; decoding
/// fails closed on an unrecognized shape, so a malformed body never reaches
/// the tracker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WebhookUpdate {
    pub player_count: Option<u64>,
    pub status: Option<GameState>,
    pub message: Option<String>,
    /// Any value at all counts as a "fresh server data" marker.
    pub server_info: Option<serde_json::Value>,
}

/// Owner of the singleton [`GameStatus`] record.
///
/// All three update channels run from independent async callbacks, so the
/// record sits behind a `Mutex`. Every method locks, mutates synchronously,
/// and unlocks - nothing awaits while holding the lock, which is what makes
/// each update atomic and non-interleaved.
#[derive(Debug, Default)]
pub struct GameStatusTracker {
    inner: Mutex<GameStatus>,
}

impl GameStatusTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator-initiated status change. Replaces the status and message and
    /// stamps `last_updated`; player/server counts and `last_game_update`
    /// carry over from the prior record.
    ///
    /// Authorization is the dispatcher's job - by the time this is called
    /// the caller has already passed the privilege check.
    pub fn set_manual(&self, status: GameState, message: impl Into<String>) {
        let mut state = self.lock();
        state.status = status;
        state.message = message.into();
        state.last_updated = Utc::now();
        tracing::info!(status = ?state.status, "game status set manually");
    }

    /// Applies a decoded webhook payload. Each present field is applied
    /// independently; absent fields leave the record untouched.
    ///
    /// A bare `player_count` overwrites the count without touching
    /// `last_updated`. A present `status` updates status, message, and
    /// `last_updated` together (keeping the previous message when none was
    /// sent). A `server_info` marker of any shape stamps `last_game_update`.
    pub fn apply_webhook_update(&self, update: &WebhookUpdate) {
        let mut state = self.lock();
        if let Some(count) = update.player_count {
            state.player_count = count;
        }
        if let Some(status) = update.status {
            state.status = status;
            if let Some(ref message) = update.message {
                state.message = message.clone();
            }
            state.last_updated = Utc::now();
        }
        if update.server_info.is_some() {
            state.last_game_update = Utc::now();
        }
        tracing::info!(
            player_count = state.player_count,
            status = ?state.status,
            "game status updated via webhook"
        );
    }

    /// Ingests a successful poll of the external games API.
    ///
    /// Sets the player count, derives the active-server estimate
    /// (`ceil(n / 10)`, zero when nobody is online), and stamps
    /// `last_game_update`. If players are online while the status still says
    /// `Issues`, the tracker recovers to `Online` in the same locked update.
    /// This is the only automatic status transition in the system; a zero
    /// count is never treated as proof of an outage, so `Online` and
    /// `Maintenance` are never downgraded here.
    pub fn apply_poll_result(&self, total_players: u64) {
        let mut state = self.lock();
        state.player_count = total_players;
        state.active_servers = total_players.div_ceil(10);
        state.last_game_update = Utc::now();

        if total_players > 0 && state.status == GameState::Issues {
            state.status = GameState::Online;
            state.message = ALL_OPERATIONAL.to_string();
            state.last_updated = Utc::now();
            tracing::info!("players online again, recovered from issues");
        }
        tracing::debug!(total_players, "game data refreshed from poll");
    }

    /// Returns the current record by value. Reflects the most recently
    /// completed mutation; there is no way to observe a half-applied update.
    #[must_use]
    pub fn snapshot(&self) -> GameStatus {
        self.lock().clone()
    }

    #[allow(clippy::unwrap_used)] // no mutation path can panic while holding the lock
    fn lock(&self) -> std::sync::MutexGuard<'_, GameStatus> {
        self.inner.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn default_record_is_online_and_operational() {
        let status = GameStatusTracker::new().snapshot();
        assert_eq!(status.status, GameState::Online);
        assert_eq!(status.message, ALL_OPERATIONAL);
        assert_eq!(status.player_count, 0);
        assert_eq!(status.active_servers, 0);
    }

    #[test]
    fn manual_set_preserves_counts_and_bumps_last_updated() {
        let tracker = GameStatusTracker::new();
        tracker.apply_poll_result(37);
        let before = tracker.snapshot();

        tracker.set_manual(GameState::Maintenance, "Patch 2.1 rollout");
        let after = tracker.snapshot();

        assert_eq!(after.status, GameState::Maintenance);
        assert_eq!(after.message, "Patch 2.1 rollout");
        assert_eq!(after.player_count, 37);
        assert_eq!(after.active_servers, before.active_servers);
        assert_eq!(after.last_game_update, before.last_game_update);
        assert!(after.last_updated >= before.last_updated);
    }

    #[test]
    fn poll_sets_count_and_derived_server_estimate() {
        let tracker = GameStatusTracker::new();

        tracker.apply_poll_result(100);
        let status = tracker.snapshot();
        assert_eq!(status.player_count, 100);
        assert_eq!(status.active_servers, 10);

        tracker.apply_poll_result(101);
        assert_eq!(tracker.snapshot().active_servers, 11);

        tracker.apply_poll_result(0);
        let status = tracker.snapshot();
        assert_eq!(status.player_count, 0);
        assert_eq!(status.active_servers, 0);
    }

    #[test]
    fn poll_recovers_from_issues_when_players_online() {
        let tracker = GameStatusTracker::new();
        tracker.set_manual(GameState::Issues, "Server crashes reported");

        tracker.apply_poll_result(5);
        let status = tracker.snapshot();
        assert_eq!(status.status, GameState::Online);
        assert_eq!(status.message, ALL_OPERATIONAL);
    }

    #[test]
    fn poll_with_zero_players_never_changes_status() {
        let tracker = GameStatusTracker::new();
        tracker.set_manual(GameState::Issues, "Server crashes reported");
        let before = tracker.snapshot();

        tracker.apply_poll_result(0);
        let after = tracker.snapshot();
        assert_eq!(after.status, GameState::Issues);
        assert_eq!(after.message, "Server crashes reported");
        assert_eq!(after.last_updated, before.last_updated);
    }

    #[test]
    fn poll_never_downgrades_maintenance() {
        let tracker = GameStatusTracker::new();
        tracker.set_manual(GameState::Maintenance, "Patch 2.1 rollout");

        tracker.apply_poll_result(100);
        let status = tracker.snapshot();
        assert_eq!(status.status, GameState::Maintenance);
        assert_eq!(status.player_count, 100);
    }

    #[test]
    fn webhook_player_count_alone_leaves_status_untouched() {
        let tracker = GameStatusTracker::new();
        let before = tracker.snapshot();

        tracker.apply_webhook_update(&WebhookUpdate {
            player_count: Some(42),
            status: None,
            message: None,
            server_info: None,
        });

        let after = tracker.snapshot();
        assert_eq!(after.player_count, 42);
        assert_eq!(after.status, GameState::Online);
        assert_eq!(after.last_updated, before.last_updated);
        assert_eq!(after.last_game_update, before.last_game_update);
    }

    #[test]
    fn webhook_status_updates_message_and_timestamp_together() {
        let tracker = GameStatusTracker::new();
        let before = tracker.snapshot();

        tracker.apply_webhook_update(&WebhookUpdate {
            player_count: None,
            status: Some(GameState::Issues),
            message: Some("Datastore outage".to_string()),
            server_info: None,
        });

        let after = tracker.snapshot();
        assert_eq!(after.status, GameState::Issues);
        assert_eq!(after.message, "Datastore outage");
        assert!(after.last_updated >= before.last_updated);
    }

    #[test]
    fn webhook_status_without_message_keeps_previous_message() {
        let tracker = GameStatusTracker::new();
        tracker.set_manual(GameState::Online, "Running smoothly");

        tracker.apply_webhook_update(&WebhookUpdate {
            player_count: None,
            status: Some(GameState::Issues),
            message: None,
            server_info: None,
        });

        let after = tracker.snapshot();
        assert_eq!(after.status, GameState::Issues);
        assert_eq!(after.message, "Running smoothly");
    }

    #[test]
    fn webhook_server_info_marker_stamps_game_update_only() {
        let tracker = GameStatusTracker::new();
        let before = tracker.snapshot();

        tracker.apply_webhook_update(&WebhookUpdate {
            player_count: None,
            status: None,
            message: None,
            server_info: Some(serde_json::json!({"jobId": "abc"})),
        });

        let after = tracker.snapshot();
        assert!(after.last_game_update >= before.last_game_update);
        assert_eq!(after.last_updated, before.last_updated);
        assert_eq!(after.status, GameState::Online);
    }

    #[test]
    fn webhook_update_decodes_camel_case_payload() {
        let update: WebhookUpdate =
            serde_json::from_str(r#"{"playerCount": 12, "status": "maintenance"}"#)
                .expect("valid payload");
        assert_eq!(update.player_count, Some(12));
        assert_eq!(update.status, Some(GameState::Maintenance));
        assert!(update.message.is_none());
    }

    #[test]
    fn webhook_update_rejects_unknown_status_and_shape() {
        assert!(serde_json::from_str::<WebhookUpdate>(r#"{"status": "exploded"}"#).is_err());
        assert!(serde_json::from_str::<WebhookUpdate>(r#"{"playerCoutn": 3}"#).is_err());
        assert!(serde_json::from_str::<WebhookUpdate>("[1, 2, 3]").is_err());
    }
}
