//! Application configuration, sourced from environment variables.
//!
//! `main` loads `.env` via dotenvy before calling into here, so every value
//! can live in either the file or the real environment. The Discord bot
//! token is deliberately not part of [`AppConfig`]; it is read in `main`
//! directly before use and never stored.

use crate::errors::{Error, Result};
use std::env;

/// Default webhook listener port when `PORT` is unset.
const DEFAULT_WEBHOOK_PORT: u16 = 3000;

/// Role names allowed to run privileged commands when `ALLOWED_ROLES` is unset.
const DEFAULT_ALLOWED_ROLES: [&str; 3] = ["Owner", "Developer", "Admin"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Channel that receives `/announce` and `/maintenance` posts.
    pub announcement_channel_id: u64,
    /// Channel that receives `/patchnotes` embeds.
    pub patch_notes_channel_id: u64,
    /// Channel that receives rendered suggestions. Optional; the suggestion
    /// commands report a configuration problem to the user when unset.
    pub suggestions_channel_id: Option<u64>,
    /// Roblox universe to poll for live player data. Poller is disabled
    /// when unset.
    pub universe_id: Option<String>,
    /// Port for the inbound game-status webhook.
    pub webhook_port: u16,
    /// Role names that may run privileged commands (exact, case-sensitive).
    pub allowed_roles: Vec<String>,
    pub game_link: Option<String>,
    pub group_link: Option<String>,
    pub discord_invite: Option<String>,
}

/// Reads the full application configuration from the environment.
///
/// The two announcement channels are required, matching the startup checks
/// of the game's previous community tooling; everything else degrades
/// gracefully when absent.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config = AppConfig {
        announcement_channel_id: required_channel("ANNOUNCEMENT_CHANNEL_ID")?,
        patch_notes_channel_id: required_channel("PATCH_NOTES_CHANNEL_ID")?,
        suggestions_channel_id: optional_channel("SUGGESTIONS_CHANNEL_ID")?,
        universe_id: non_empty_var("UNIVERSE_ID"),
        webhook_port: webhook_port()?,
        allowed_roles: allowed_roles(),
        game_link: non_empty_var("GAME_LINK"),
        group_link: non_empty_var("GROUP_LINK"),
        discord_invite: non_empty_var("DISCORD_INVITE"),
    };
    tracing::debug!(?config, "application configuration loaded");
    Ok(config)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required_channel(name: &str) -> Result<u64> {
    let raw = non_empty_var(name).ok_or_else(|| Error::Config {
        message: format!("{name} is not set"),
    })?;
    parse_channel(name, &raw)
}

fn optional_channel(name: &str) -> Result<Option<u64>> {
    non_empty_var(name)
        .map(|raw| parse_channel(name, &raw))
        .transpose()
}

fn parse_channel(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| Error::Config {
        message: format!("{name} is not a valid channel ID: {raw:?}"),
    })
}

fn webhook_port() -> Result<u16> {
    match non_empty_var("PORT") {
        None => Ok(DEFAULT_WEBHOOK_PORT),
        Some(raw) => raw.trim().parse::<u16>().map_err(|_| Error::Config {
            message: format!("PORT is not a valid port number: {raw:?}"),
        }),
    }
}

fn allowed_roles() -> Vec<String> {
    match non_empty_var("ALLOWED_ROLES") {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        None => DEFAULT_ALLOWED_ROLES
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}
