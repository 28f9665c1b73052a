//! Inbound webhook receiver for live game-status pushes.
//!
//! The game process POSTs JSON to `/game-status`; everything else is a 404.
//! Decoding fails closed: a body that does not match the expected shape is
//! rejected with a 400 and never touches the tracker.

use crate::core::status::{GameStatusTracker, WebhookUpdate};
use crate::errors::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
struct WebhookResponse {
    success: bool,
    message: &'static str,
}

fn reply(status: StatusCode, success: bool, message: &'static str) -> impl IntoResponse {
    (status, Json(WebhookResponse { success, message }))
}

fn decode_update(body: &[u8]) -> Result<WebhookUpdate> {
    serde_json::from_slice(body).map_err(Error::from)
}

async fn game_status(
    State(tracker): State<Arc<GameStatusTracker>>,
    body: Bytes,
) -> impl IntoResponse {
    match decode_update(&body) {
        Ok(update) => {
            tracker.apply_webhook_update(&update);
            reply(StatusCode::OK, true, "Status updated")
        }
        Err(e) => {
            tracing::warn!("rejecting malformed webhook body: {e}");
            reply(StatusCode::BAD_REQUEST, false, "Invalid JSON")
        }
    }
}

async fn not_found() -> impl IntoResponse {
    reply(StatusCode::NOT_FOUND, false, "Not found")
}

/// Builds the webhook router. Split from [`serve`] so tests can drive the
/// handlers directly.
pub fn router(tracker: Arc<GameStatusTracker>) -> Router {
    Router::new()
        .route("/game-status", post(game_status))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(tracker)
}

/// Binds the listener and serves the webhook until process shutdown.
pub async fn serve(tracker: Arc<GameStatusTracker>, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Webhook server running on port {port}");
    info!("Game can send updates to POST /game-status");
    axum::serve(listener, router(tracker)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    use super::*;
    use crate::core::status::GameState;
    use axum::response::Response;

    async fn response_parts(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body collects");
        let json = serde_json::from_slice(&bytes).expect("JSON body");
        (status, json)
    }

    #[tokio::test]
    async fn valid_payload_updates_tracker_and_returns_200() {
        let tracker = Arc::new(GameStatusTracker::new());
        let body = Bytes::from_static(br#"{"playerCount": 42}"#);

        let response = game_status(State(Arc::clone(&tracker)), body)
            .await
            .into_response();
        let (status, json) = response_parts(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Status updated"})
        );
        assert_eq!(tracker.snapshot().player_count, 42);
        assert_eq!(tracker.snapshot().status, GameState::Online);
    }

    #[tokio::test]
    async fn empty_object_is_still_a_success() {
        let tracker = Arc::new(GameStatusTracker::new());
        let before = tracker.snapshot();

        let response = game_status(State(Arc::clone(&tracker)), Bytes::from_static(b"{}"))
            .await
            .into_response();
        let (status, _) = response_parts(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(tracker.snapshot(), before);
    }

    #[tokio::test]
    async fn malformed_body_returns_400_without_mutating_state() {
        let tracker = Arc::new(GameStatusTracker::new());
        let before = tracker.snapshot();

        for body in [
            &b"not json at all"[..],
            br#"{"status": "exploded"}"#,
            br#"{"unexpectedField": 1}"#,
        ] {
            let response = game_status(State(Arc::clone(&tracker)), Bytes::copy_from_slice(body))
                .await
                .into_response();
            let (status, json) = response_parts(response).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                json,
                serde_json::json!({"success": false, "message": "Invalid JSON"})
            );
        }
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn decode_failures_surface_as_decode_errors() {
        let err = decode_update(b"[]").expect_err("array body must be rejected");
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn unknown_paths_get_the_404_body() {
        let (status, json) = response_parts(not_found().await.into_response()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Not found"})
        );
    }

    #[tokio::test]
    async fn router_serves_the_404_body_for_unknown_paths_and_wrong_methods() {
        let tracker = Arc::new(GameStatusTracker::new());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("ephemeral bind");
        let addr = listener.local_addr().expect("local addr");
        let app = router(tracker);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let client = reqwest::Client::new();
        let base = format!("http://{addr}");
        for request in [
            client.post(format!("{base}/nowhere")),
            client.get(format!("{base}/game-status")),
        ] {
            let response = request.send().await.expect("request");
            assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
            let json: serde_json::Value = response.json().await.expect("JSON body");
            assert_eq!(
                json,
                serde_json::json!({"success": false, "message": "Not found"})
            );
        }
    }

    #[tokio::test]
    async fn status_push_updates_message_and_timestamp() {
        let tracker = Arc::new(GameStatusTracker::new());
        let body = Bytes::from_static(
            br#"{"status": "maintenance", "message": "Patch rollout", "serverInfo": {"jobId": "x"}}"#,
        );

        let response = game_status(State(Arc::clone(&tracker)), body)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let status = tracker.snapshot();
        assert_eq!(status.status, GameState::Maintenance);
        assert_eq!(status.message, "Patch rollout");
    }
}
