//! Suggestion workflow commands.
//!
//! The registry owns the records; these commands own the rendered messages.
//! Vote counts live on the rendered message as reactions, so transitions
//! re-fetch the message, read the live totals, subtract the bot's seed
//! reaction per emoji, and hand the adjusted numbers to the registry.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::bot::commands::{deny, ephemeral, invoker_is_staff};
    use crate::bot::format::{
        adjust_seeded_count, category_emoji, category_label, list_entry, suggestion_status_color,
        suggestion_status_emoji, suggestion_status_label, BLURPLE,
    };
    use crate::bot::Context;
    use crate::core::suggestions::{
        Suggestion, SuggestionAuthor, SuggestionCategory, SuggestionStatus,
    };
    use crate::errors::{Error, Result};
    use poise::serenity_prelude as serenity;

    const UPVOTE: char = '👍';
    const DOWNVOTE: char = '👎';

    /// Listed suggestions are capped at a single page.
    const LIST_PAGE_SIZE: usize = 10;

    fn suggestions_channel(ctx: &Context<'_>) -> Option<serenity::ChannelId> {
        ctx.data()
            .config
            .suggestions_channel_id
            .map(serenity::ChannelId::new)
    }

    /// The embed posted to the suggestions channel, rebuilt on every
    /// status transition.
    fn suggestion_embed(suggestion: &Suggestion, updated_by: Option<&str>) -> serenity::CreateEmbed {
        let category = suggestion.category;
        let mut embed = serenity::CreateEmbed::default()
            .title(format!(
                "{} Suggestion #{}",
                category_emoji(category),
                suggestion.id
            ))
            .description(&suggestion.text)
            .color(suggestion_status_color(suggestion.status))
            .author(
                serenity::CreateEmbedAuthor::new(&suggestion.author.tag)
                    .icon_url(&suggestion.author.avatar_url),
            )
            .field(
                "📊 Status",
                format!(
                    "{} {}",
                    suggestion_status_emoji(suggestion.status),
                    suggestion_status_label(suggestion.status)
                ),
                true,
            )
            .field(
                "📂 Category",
                format!("{} {}", category_emoji(category), category_label(category)),
                true,
            )
            .field(
                "🗳️ Votes",
                format!("👍 {} | 👎 {}", suggestion.upvotes, suggestion.downvotes),
                true,
            );

        if let Some(ref reason) = suggestion.reason {
            embed = embed.field("📝 Staff Note", reason, false);
        }

        let created = serenity::Timestamp::from_unix_timestamp(suggestion.created_at.timestamp())
            .unwrap_or_else(|_| serenity::Timestamp::now());
        let footer = match updated_by {
            Some(tag) => format!("Suggestion ID: {} | Updated by {tag}", suggestion.id),
            None => format!("Suggestion ID: {}", suggestion.id),
        };
        embed
            .timestamp(created)
            .footer(serenity::CreateEmbedFooter::new(footer))
    }

    /// Reads the live totals for both vote emojis off a fetched message.
    /// Each emoji's own count is used; the raw totals still include the
    /// bot's seed reaction.
    fn raw_vote_counts(message: &serenity::Message) -> (u64, u64) {
        let count_of = |emoji: char| {
            message
                .reactions
                .iter()
                .find(|r| r.reaction_type == serenity::ReactionType::from(emoji))
                .map_or(0, |r| r.count)
        };
        (count_of(UPVOTE), count_of(DOWNVOTE))
    }

    /// Submit a suggestion for the game.
    #[poise::command(slash_command)]
    pub async fn suggest(
        ctx: Context<'_>,
        #[description = "Your suggestion (max 1000 characters)"] suggestion: String,
        #[description = "What category is your suggestion?"] category: Option<SuggestionCategory>,
    ) -> Result<()> {
        let Some(channel) = suggestions_channel(&ctx) else {
            return ephemeral(
                &ctx,
                "Suggestions channel not configured! Please contact an administrator.",
            )
            .await;
        };

        let user = ctx.author();
        let author = SuggestionAuthor {
            id: user.id.get(),
            tag: user.tag(),
            avatar_url: user.face(),
        };

        let record = match ctx.data().suggestions.create(
            suggestion,
            category.unwrap_or_default(),
            author,
        ) {
            Ok(record) => record,
            Err(Error::Validation { message }) => return ephemeral(&ctx, message).await,
            Err(e) => return Err(e),
        };

        // The record exists from here on; a failed send leaves it without a
        // rendered message rather than rolling the ID back.
        let message = match channel
            .send_message(
                ctx.http(),
                serenity::CreateMessage::new().embed(suggestion_embed(&record, None)),
            )
            .await
        {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(id = record.id, "failed to post suggestion embed: {e}");
                return ephemeral(
                    &ctx,
                    format!(
                        "Your suggestion was recorded (ID: #{}) but could not be posted. \
                         Please contact an administrator.",
                        record.id
                    ),
                )
                .await;
            }
        };

        // Seed the voting reactions; a failure here only costs the seeds.
        for emoji in [UPVOTE, DOWNVOTE] {
            if let Err(e) = message.react(ctx.http(), emoji).await {
                tracing::warn!(id = record.id, "failed to seed vote reaction: {e}");
            }
        }
        ctx.data()
            .suggestions
            .attach_message(record.id, message.id.get())?;

        ephemeral(
            &ctx,
            format!(
                "✅ Your suggestion has been submitted! (ID: #{})\n\
                 Others can now vote on it in <#{}>",
                record.id, channel
            ),
        )
        .await
    }

    /// Update the status of a suggestion (Staff only).
    #[poise::command(slash_command, rename = "suggestion-status")]
    pub async fn suggestion_status(
        ctx: Context<'_>,
        #[description = "Suggestion ID number"] id: u64,
        #[description = "New status for the suggestion"] status: SuggestionStatus,
        #[description = "Reason for status change (optional)"] reason: Option<String>,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "manage suggestions").await;
        }

        let suggestion = match ctx.data().suggestions.get(id) {
            Ok(s) => s,
            Err(Error::NotFound { .. }) => {
                return ephemeral(&ctx, format!("Suggestion #{id} not found!")).await;
            }
            Err(e) => return Err(e),
        };
        let Some(channel) = suggestions_channel(&ctx) else {
            return ephemeral(&ctx, "Suggestions channel not found!").await;
        };

        // Re-fetch the rendered message for live vote totals before touching
        // local state; if it is gone there is nothing to reconcile against.
        let Some(message_id) = suggestion.message_id else {
            return ephemeral(
                &ctx,
                "Error updating suggestion. The message may have been deleted.",
            )
            .await;
        };
        let Ok(rendered) = channel
            .message(ctx.http(), serenity::MessageId::new(message_id))
            .await
        else {
            return ephemeral(
                &ctx,
                "Error updating suggestion. The message may have been deleted.",
            )
            .await;
        };

        let (raw_up, raw_down) = raw_vote_counts(&rendered);
        let updated = ctx.data().suggestions.transition_status(
            id,
            status,
            reason,
            adjust_seeded_count(raw_up),
            adjust_seeded_count(raw_down),
        )?;

        // Local state is already committed; rendering failures only leave
        // the channel view behind.
        let edit = serenity::EditMessage::new()
            .embed(suggestion_embed(&updated, Some(&ctx.author().tag())));
        if let Err(e) = channel.edit_message(ctx.http(), rendered.id, edit).await {
            tracing::error!(id, "failed to re-render suggestion embed: {e}");
        }

        // Retire the voting surface once the outcome is final.
        if matches!(
            status,
            SuggestionStatus::Denied | SuggestionStatus::Implemented
        ) {
            if let Err(e) = rendered.delete_reactions(ctx.http()).await {
                tracing::warn!(id, "failed to clear reactions: {e}");
            }
        }

        ephemeral(
            &ctx,
            format!(
                "✅ Suggestion #{id} status updated to: {} {}",
                suggestion_status_emoji(status),
                suggestion_status_label(status)
            ),
        )
        .await
    }

    /// Get detailed info about a suggestion.
    #[poise::command(slash_command, rename = "suggestion-info")]
    pub async fn suggestion_info(
        ctx: Context<'_>,
        #[description = "Suggestion ID number"] id: u64,
    ) -> Result<()> {
        let suggestion = match ctx.data().suggestions.get(id) {
            Ok(s) => s,
            Err(Error::NotFound { .. }) => {
                return ephemeral(&ctx, format!("Suggestion #{id} not found!")).await;
            }
            Err(e) => return Err(e),
        };

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("📋 Suggestion #{id} Details"))
            .description(&suggestion.text)
            .color(BLURPLE)
            .field("👤 Author", &suggestion.author.tag, true)
            .field(
                "📊 Status",
                format!(
                    "{} {}",
                    suggestion_status_emoji(suggestion.status),
                    suggestion_status_label(suggestion.status)
                ),
                true,
            )
            .field(
                "🗳️ Votes",
                format!("👍 {} | 👎 {}", suggestion.upvotes, suggestion.downvotes),
                true,
            )
            .field(
                "📅 Created",
                format!("<t:{}:F>", suggestion.created_at.timestamp()),
                true,
            )
            .field(
                "🔄 Last Updated",
                format!("<t:{}:R>", suggestion.updated_at.timestamp()),
                true,
            );
        if let Some(ref reason) = suggestion.reason {
            embed = embed.field("📝 Staff Note", reason, false);
        }

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// List suggestions by status (Staff only).
    #[poise::command(slash_command, rename = "suggestions-list")]
    pub async fn suggestions_list(
        ctx: Context<'_>,
        #[description = "Filter by status"] status: Option<SuggestionStatus>,
    ) -> Result<()> {
        if !invoker_is_staff(&ctx).await {
            return deny(&ctx, "view the suggestions list").await;
        }

        let matching = ctx.data().suggestions.list(status);
        if matching.is_empty() {
            let message = match status {
                Some(filter) => format!(
                    "No suggestions found with status: {}",
                    suggestion_status_label(filter)
                ),
                None => "No suggestions found!".to_string(),
            };
            return ephemeral(&ctx, message).await;
        }

        let total_pages = matching.len().div_ceil(LIST_PAGE_SIZE);
        let rows = matching
            .iter()
            .take(LIST_PAGE_SIZE)
            .map(list_entry)
            .collect::<Vec<_>>()
            .join("\n\n");

        let title = match status {
            Some(filter) => format!("📋 Suggestions List ({})", suggestion_status_label(filter)),
            None => "📋 Suggestions List".to_string(),
        };
        let embed = serenity::CreateEmbed::default()
            .title(title)
            .description(rows)
            .color(BLURPLE)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Page 1/{total_pages} | Total: {}",
                matching.len()
            )));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }
}

pub use inner::*;
