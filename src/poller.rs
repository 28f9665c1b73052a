//! Scheduled poll of the Roblox games API for live player data.
//!
//! The poller is one of the three update channels feeding the status
//! tracker. It runs on a fixed interval for the whole process lifetime; a
//! failed fetch is logged and skipped, never escalated, so the schedule
//! survives API outages.

use crate::core::status::GameStatusTracker;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const GAMES_API_BASE: &str = "https://games.roblox.com/v1/games";

/// Fixed poll interval.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Deserialize)]
struct GamesResponse {
    #[serde(default)]
    data: Vec<GameRecord>,
}

/// Only the live player count is consumed; the API returns much more.
#[derive(Debug, Deserialize)]
struct GameRecord {
    #[serde(default)]
    playing: u64,
}

/// Fetches the first game record's player count for the universe.
/// Returns `None` when the API responds without any game records.
pub async fn fetch_player_count(
    client: &reqwest::Client,
    universe_id: &str,
) -> Result<Option<u64>> {
    let url = format!("{GAMES_API_BASE}?universeIds={universe_id}");
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(Error::ExternalCall {
            message: format!("games API returned {}", response.status()),
        });
    }
    let games: GamesResponse = response.json().await?;
    Ok(games.data.first().map(|game| game.playing))
}

/// One full poll cycle: fetch, then apply to the tracker. The fetch
/// completes before the tracker is touched, so the local mutation stays
/// atomic. An empty record list mutates nothing.
pub async fn poll_once(
    client: &reqwest::Client,
    universe_id: &str,
    tracker: &GameStatusTracker,
) -> Result<()> {
    match fetch_player_count(client, universe_id).await? {
        Some(total_players) => {
            tracker.apply_poll_result(total_players);
            tracing::info!(total_players, "game data updated");
        }
        None => tracing::warn!(universe_id, "games API returned no records"),
    }
    Ok(())
}

/// Runs the poll loop forever. First tick fires immediately, then every
/// [`POLL_INTERVAL`]. Spawned from `main` only when a universe ID is
/// configured; only process shutdown stops it.
pub async fn run(client: reqwest::Client, universe_id: String, tracker: Arc<GameStatusTracker>) {
    let mut interval = tokio::time::interval(POLL_INTERVAL);
    loop {
        interval.tick().await;
        if let Err(e) = poll_once(&client, &universe_id, &tracker).await {
            // Skip silently and retry next interval.
            tracing::warn!("poll failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    use super::*;
    use crate::core::status::GameState;

    #[test]
    fn games_response_parses_first_record_player_count() {
        let body = r#"{"data":[{"id":123,"name":"My Game","playing":57,"visits":10000}]}"#;
        let games: GamesResponse = serde_json::from_str(body).expect("valid response");
        assert_eq!(games.data.first().map(|g| g.playing), Some(57));
    }

    #[test]
    fn games_response_defaults_missing_playing_to_zero() {
        let body = r#"{"data":[{"id":123,"name":"My Game"}]}"#;
        let games: GamesResponse = serde_json::from_str(body).expect("valid response");
        assert_eq!(games.data.first().map(|g| g.playing), Some(0));
    }

    #[test]
    fn games_response_tolerates_empty_data() {
        let games: GamesResponse = serde_json::from_str(r#"{"data":[]}"#).expect("valid response");
        assert!(games.data.is_empty());
        let games: GamesResponse = serde_json::from_str("{}").expect("valid response");
        assert!(games.data.is_empty());
    }

    #[test]
    fn applied_poll_recovers_tracker_from_issues() {
        let tracker = GameStatusTracker::new();
        tracker.set_manual(GameState::Issues, "Crash loop reported");

        tracker.apply_poll_result(57);
        let status = tracker.snapshot();
        assert_eq!(status.status, GameState::Online);
        assert_eq!(status.player_count, 57);
        assert_eq!(status.active_servers, 6);
    }
}
