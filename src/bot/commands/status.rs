//! Game status commands - the live status embed and the manual override.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::bot::commands::{deny, ephemeral, invoker_is_staff};
    use crate::bot::format::{data_age, game_state_color, game_state_emoji};
    use crate::bot::Context;
    use crate::core::status::GameState;
    use crate::errors::Result;
    use crate::poller;
    use chrono::Utc;
    use poise::serenity_prelude as serenity;

    /// Check the current game status with live data.
    #[poise::command(slash_command)]
    pub async fn gamestatus(ctx: Context<'_>) -> Result<()> {
        ctx.defer().await?;

        // Best-effort refresh before rendering; a failed poll falls back to
        // the last known record.
        let data = ctx.data();
        if let Some(ref universe_id) = data.config.universe_id {
            if let Err(e) = poller::poll_once(&data.http, universe_id, &data.status).await {
                tracing::warn!("on-demand poll failed: {e}");
            }
        }

        let status = data.status.snapshot();

        let updated_at =
            serenity::Timestamp::from_unix_timestamp(status.last_updated.timestamp())
                .unwrap_or_else(|_| serenity::Timestamp::now());
        let mut embed = serenity::CreateEmbed::default()
            .title(format!("{} Game Status", game_state_emoji(status.status)))
            .description(&status.message)
            .color(game_state_color(status.status))
            .timestamp(updated_at)
            .footer(serenity::CreateEmbedFooter::new("Last updated"));

        if status.player_count > 0 || status.active_servers > 0 {
            embed = embed
                .field("👥 Players Online", status.player_count.to_string(), true)
                .field("🖥️ Active Servers", status.active_servers.to_string(), true);
        }
        embed = embed.field(
            "🔄 Game Data",
            data_age(status.last_game_update, Utc::now()),
            true,
        );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Update the game status (Admin only).
    #[poise::command(slash_command)]
    pub async fn setstatus(
        ctx: Context<'_>,
        #[description = "Game status"] status: GameState,
        #[description = "Status message"] message: String,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "update game status").await;
        }

        ctx.data().status.set_manual(status, message.clone());
        ephemeral(
            &ctx,
            format!(
                "Game status updated to: {} {status:?} - {message}",
                game_state_emoji(status)
            ),
        )
        .await
    }
}

pub use inner::*;
