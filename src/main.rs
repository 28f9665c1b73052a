use dotenvy::dotenv;
use patchwork_bot::bot::{self, BotData};
use patchwork_bot::core::status::GameStatusTracker;
use patchwork_bot::core::suggestions::SuggestionRegistry;
use patchwork_bot::errors::{Error, Result};
use patchwork_bot::{config, poller, webhook};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!("Successfully processed application configuration.");
    let app_config = Arc::new(app_config);

    // 4. Build the two state owners; both live for the process lifetime
    let status = Arc::new(GameStatusTracker::new());
    let suggestions = Arc::new(SuggestionRegistry::new());
    let http = reqwest::Client::new();

    // 5. Start the webhook receiver for game-side status pushes
    let webhook_tracker = Arc::clone(&status);
    let webhook_port = app_config.webhook_port;
    tokio::spawn(async move {
        if let Err(e) = webhook::serve(webhook_tracker, webhook_port).await {
            error!("Webhook server failed: {e}");
        }
    });

    // 6. Start the games-API poller when a universe is configured
    if let Some(universe_id) = app_config.universe_id.clone() {
        info!("Universe configured - starting live data polling");
        tokio::spawn(poller::run(
            http.clone(),
            universe_id,
            Arc::clone(&status),
        ));
    } else {
        info!("UNIVERSE_ID not configured - using manual status updates only");
    }

    // 7. Run the bot. DISCORD_BOT_TOKEN is read directly before use, not
    // stored in AppConfig.
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let data = BotData {
        config: Arc::clone(&app_config),
        status,
        suggestions,
        http,
    };
    bot::run_bot(token, data).await.map_err(Error::from)?;

    Ok(())
}
