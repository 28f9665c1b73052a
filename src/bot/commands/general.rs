//! General commands - ping, FAQ, and community links.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::bot::commands::ephemeral;
    use crate::bot::format::BLURPLE;
    use crate::bot::Context;
    use crate::errors::Result;
    use poise::serenity_prelude as serenity;

    /// Frequently asked questions, as a fixed choice list.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum FaqTopic {
        #[name = "Release Date"]
        ReleaseDate,
        #[name = "Report a Bug"]
        ReportBug,
        #[name = "Game Updates"]
        Updates,
        #[name = "Mobile Support"]
        MobileSupport,
        #[name = "Data Reset"]
        DataReset,
    }

    impl FaqTopic {
        pub const fn question(self) -> &'static str {
            match self {
                Self::ReleaseDate => "When is the game coming out?",
                Self::ReportBug => "How do I report a bug?",
                Self::Updates => "How often will you update?",
                Self::MobileSupport => "Does the game work on mobile?",
                Self::DataReset => "Will my data reset at any point?",
            }
        }

        pub const fn answer(self) -> &'static str {
            match self {
                Self::ReleaseDate => "We have no current release date.",
                Self::ReportBug => {
                    "You can report bugs in our #bug-reports channel or contact a staff member \
                     directly. Please include screenshots if possible!"
                }
                Self::Updates => "We have no current schedule for updates.",
                Self::MobileSupport => "Yes, we are planning on adding mobile support.",
                Self::DataReset => "Most likely no.",
            }
        }
    }

    /// Test if the bot is responding.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ephemeral(&ctx, "Pong! Bot is working correctly. 🏓").await
    }

    /// Get answers to frequently asked questions.
    #[poise::command(slash_command)]
    pub async fn faq(
        ctx: Context<'_>,
        #[description = "Select a topic"] topic: FaqTopic,
    ) -> Result<()> {
        let embed = serenity::CreateEmbed::default()
            .title(format!("❓ {}", topic.question()))
            .description(topic.answer())
            .color(BLURPLE)
            .timestamp(serenity::Timestamp::now())
            .footer(serenity::CreateEmbedFooter::new(
                "Frequently Asked Questions",
            ));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Get important links for the game and community.
    #[poise::command(slash_command)]
    pub async fn links(ctx: Context<'_>) -> Result<()> {
        let config = &ctx.data().config;

        let mut embed = serenity::CreateEmbed::default()
            .title("🔗 Important Links")
            .description("Here are all the important links for our community!")
            .color(BLURPLE)
            .timestamp(serenity::Timestamp::now());

        if let Some(ref link) = config.game_link {
            embed = embed.field("🎮 Play Game", format!("[Click here to play!]({link})"), true);
        }
        if let Some(ref link) = config.group_link {
            embed = embed.field("👥 Roblox Group", format!("[Join our group!]({link})"), true);
        }
        if let Some(ref link) = config.discord_invite {
            embed = embed.field("💬 Discord Server", format!("[Invite friends!]({link})"), true);
        }
        if config.game_link.is_none()
            || config.group_link.is_none()
            || config.discord_invite.is_none()
        {
            embed = embed.field(
                "⚙️ Setup Required",
                "Some links need to be configured in the .env file",
                false,
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
