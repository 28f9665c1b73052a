//! Staff authorization predicate.
//!
//! A pure function over a snapshot of the acting member; the bot layer is
//! responsible for building the [`Actor`] from the Discord interaction and
//! for calling this before every privileged command.

/// Snapshot of the acting guild member, extracted from the interaction.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: u64,
    pub is_administrator: bool,
    pub role_names: Vec<String>,
}

/// True when the actor is the guild owner, holds the Administrator
/// permission, or carries one of the allow-listed role names.
///
/// Role names match exactly and case-sensitively.
#[must_use]
pub fn is_privileged(actor: &Actor, guild_owner_id: u64, allowed_roles: &[String]) -> bool {
    if actor.id == guild_owner_id {
        return true;
    }
    if actor.is_administrator {
        return true;
    }
    actor
        .role_names
        .iter()
        .any(|name| allowed_roles.iter().any(|allowed| allowed == name))
}
