//! Slash command implementations organized by concern.

/// Announcement channel commands: announce, patchnotes, maintenance
pub mod announce;

/// General utility commands: ping, faq, links
pub mod general;

/// Game status commands: gamestatus, setstatus
pub mod status;

/// Suggestion workflow commands
pub mod suggestions;

use crate::bot::Context;
use crate::core::permissions::{self, Actor};
use crate::errors::Result;

/// Builds the authorization snapshot for the invoking member and runs the
/// privilege predicate against the configured role allow-list.
///
/// Returns `false` outside a guild (DMs carry no roles or ownership).
pub(crate) async fn invoker_is_staff(ctx: &Context<'_>) -> bool {
    let Some(member) = ctx.author_member().await else {
        return false;
    };

    // The guild ref is a cache guard; gather what we need and drop it
    // before anything awaits again.
    let Some((owner_id, role_names)) = ctx.guild().map(|guild| {
        let names = member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id).map(|role| role.name.clone()))
            .collect::<Vec<_>>();
        (guild.owner_id.get(), names)
    }) else {
        return false;
    };

    let actor = Actor {
        id: member.user.id.get(),
        is_administrator: member.permissions.is_some_and(|p| p.administrator()),
        role_names,
    };
    permissions::is_privileged(&actor, owner_id, &ctx.data().config.allowed_roles)
}

/// Sends the standard ephemeral permission-denied response.
pub(crate) async fn deny(ctx: &Context<'_>, action: &str) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(format!("You don't have permission to {action}!"))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Ephemeral plain-text reply, the default response shape for command acks.
pub(crate) async fn ephemeral(ctx: &Context<'_>, content: impl Into<String>) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
