//! Bot layer - Discord-specific interface and command handlers.

/// Slash command implementations, grouped by concern
pub mod commands;
/// Pure embed/formatting helpers
pub mod format;

use crate::config::AppConfig;
use crate::core::status::GameStatusTracker;
use crate::core::suggestions::SuggestionRegistry;
use crate::errors;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;

/// Shared data available to all command invocations.
pub struct BotData {
    pub config: Arc<AppConfig>,
    pub status: Arc<GameStatusTracker>,
    pub suggestions: Arc<SuggestionRegistry>,
    /// Client for on-demand polls triggered by `/gamestatus`.
    pub http: reqwest::Client,
}

pub(crate) type Error = errors::Error;
pub(crate) type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(format!("An error occurred: {error}"))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until shutdown.
pub async fn run_bot(token: String, data: BotData) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::general::ping(),
                commands::general::faq(),
                commands::general::links(),
                commands::announce::announce(),
                commands::announce::patchnotes(),
                commands::announce::maintenance(),
                commands::status::gamestatus(),
                commands::status::setstatus(),
                commands::suggestions::suggest(),
                commands::suggestions::suggestion_status(),
                commands::suggestions::suggestion_info(),
                commands::suggestions::suggestions_list(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await
}
