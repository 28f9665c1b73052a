//! Announcement-channel commands - announce, patchnotes, maintenance.
//!
//! All three are privileged and post into the channels named in the
//! configuration. A failed send never rolls back local state; the status
//! record is the source of truth and the rendered channel view may lag it.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::bot::commands::{deny, ephemeral, invoker_is_staff};
    use crate::bot::format::{bullet_lines, parse_custom_section, parse_embed_color, BLURPLE};
    use crate::bot::Context;
    use crate::core::status::GameState;
    use crate::errors::Result;
    use chrono::NaiveDateTime;
    use poise::serenity_prelude as serenity;

    /// Make an announcement.
    #[poise::command(slash_command)]
    pub async fn announce(
        ctx: Context<'_>,
        #[description = "The announcement message"] message: String,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "make announcements").await;
        }

        let channel = serenity::ChannelId::new(ctx.data().config.announcement_channel_id);
        if channel.say(ctx.http(), &message).await.is_err() {
            return ephemeral(
                &ctx,
                "Announcement channel not found! Please contact an administrator.",
            )
            .await;
        }
        ephemeral(&ctx, "Announcement sent successfully!").await
    }

    /// Announce maintenance mode.
    #[poise::command(slash_command)]
    pub async fn maintenance(
        ctx: Context<'_>,
        #[description = "How long maintenance will last (e.g., \"30 minutes\", \"2 hours\")"]
        duration: String,
        #[description = "Reason for maintenance (e.g., \"Bug fixes\", \"Server updates\")"]
        reason: Option<String>,
        #[description = "When maintenance ends (format: YYYY-MM-DD HH:MM, UTC)"]
        end_time: Option<String>,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "announce maintenance").await;
        }

        let reason = reason.unwrap_or_else(|| "Scheduled maintenance".to_string());

        let mut embed = serenity::CreateEmbed::default()
            .title("🔧 Scheduled Maintenance")
            .description(format!(
                "**The game will be undergoing maintenance.**\n\n\
                 **Duration:** {duration}\n**Reason:** {reason}"
            ))
            .color(0x00FF_9500)
            .timestamp(serenity::Timestamp::now())
            .footer(serenity::CreateEmbedFooter::new(
                "We apologize for any inconvenience",
            ));

        // Unparseable end times are silently omitted from the embed.
        if let Some(raw) = end_time {
            if let Ok(end) = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M") {
                let unix = end.and_utc().timestamp();
                embed = embed.field(
                    "⏰ Maintenance Ends",
                    format!("<t:{unix}:F> (<t:{unix}:R>)"),
                    false,
                );
            } else {
                tracing::debug!(input = raw, "ignoring unparseable maintenance end time");
            }
        }

        // Local state first, then the external send.
        ctx.data().status.set_manual(
            GameState::Maintenance,
            format!("Maintenance in progress: {reason}"),
        );

        let channel = serenity::ChannelId::new(ctx.data().config.announcement_channel_id);
        let send = channel
            .send_message(ctx.http(), serenity::CreateMessage::new().embed(embed))
            .await;
        if send.is_err() {
            return ephemeral(
                &ctx,
                "Announcement channel not found! Please contact an administrator.",
            )
            .await;
        }
        ephemeral(&ctx, "Maintenance announcement sent successfully!").await
    }

    /// Create patch notes/update logs.
    #[allow(clippy::too_many_arguments)] // mirrors the slash command's option list
    #[poise::command(slash_command)]
    pub async fn patchnotes(
        ctx: Context<'_>,
        #[description = "Version number (e.g., v1.2.3)"] version: String,
        #[description = "Patch title (e.g., \"Major Update\", \"Bug Fixes\")"] title: Option<
            String,
        >,
        #[description = "Content & Systems changes (separate with | for new lines)"]
        content: Option<String>,
        #[description = "Balancing & Tweaks changes (separate with | for new lines)"]
        balance: Option<String>,
        #[description = "Bug Fixes (separate with | for new lines)"] bugfixes: Option<String>,
        #[description = "Other changes (format: SectionName::change1|change2)"] other: Option<
            String,
        >,
        #[description = "Embed color (hex code like #ff0000 or a color name)"] color: Option<
            String,
        >,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "create patch notes").await;
        }

        let embed_color = color.as_deref().map_or(BLURPLE, parse_embed_color);
        let title = title.unwrap_or_else(|| "Update".to_string());

        let mut embeds = vec![serenity::CreateEmbed::default()
            .title(format!("Update Log {version}"))
            .description(title)
            .color(embed_color)
            .timestamp(serenity::Timestamp::now())
            .footer(serenity::CreateEmbedFooter::new("Update Log"))];

        for (section_title, option) in [
            ("Content & Systems", content),
            ("Balancing & Tweaks", balance),
            ("Bug Fixes", bugfixes),
        ] {
            if let Some(items) = option {
                embeds.push(
                    serenity::CreateEmbed::default()
                        .title(section_title)
                        .description(bullet_lines(&items))
                        .color(embed_color),
                );
            }
        }
        if let Some((section_title, lines)) = other.as_deref().and_then(parse_custom_section) {
            embeds.push(
                serenity::CreateEmbed::default()
                    .title(section_title)
                    .description(lines)
                    .color(embed_color),
            );
        }

        let channel = serenity::ChannelId::new(ctx.data().config.patch_notes_channel_id);
        for embed in embeds {
            if channel
                .send_message(ctx.http(), serenity::CreateMessage::new().embed(embed))
                .await
                .is_err()
            {
                return ephemeral(
                    &ctx,
                    "Patch notes channel not found! Please contact an administrator.",
                )
                .await;
            }
            // Keep the sections ordered without tripping the rate limiter.
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }

        ephemeral(&ctx, "Patch notes sent successfully!").await
    }
}

pub use inner::*;
