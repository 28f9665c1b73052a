//! Pure rendering helpers shared by the command implementations.
//!
//! Everything here is plain string/number logic so it can be unit tested
//! without a Discord connection.

use crate::core::status::GameState;
use crate::core::suggestions::{Suggestion, SuggestionCategory, SuggestionStatus};
use chrono::{DateTime, Utc};

/// Discord blurple, the default embed colour.
pub const BLURPLE: u32 = 0x0058_65F2;

#[must_use]
pub const fn game_state_emoji(state: GameState) -> &'static str {
    match state {
        GameState::Online => "🟢",
        GameState::Maintenance => "🔧",
        GameState::Issues => "⚠️",
    }
}

#[must_use]
pub const fn game_state_color(state: GameState) -> u32 {
    match state {
        GameState::Online => 0x0000_FF00,
        GameState::Maintenance => 0x00FF_9500,
        GameState::Issues => 0x00FF_0000,
    }
}

#[must_use]
pub const fn category_emoji(category: SuggestionCategory) -> &'static str {
    match category {
        SuggestionCategory::Gameplay => "🎮",
        SuggestionCategory::Cosmetics => "🎨",
        SuggestionCategory::Features => "🔧",
        SuggestionCategory::Maps => "🌍",
        SuggestionCategory::Balance => "⚖️",
        SuggestionCategory::Bug => "🐛",
        SuggestionCategory::Other => "💡",
    }
}

#[must_use]
pub const fn category_label(category: SuggestionCategory) -> &'static str {
    match category {
        SuggestionCategory::Gameplay => "Gameplay",
        SuggestionCategory::Cosmetics => "Cosmetics",
        SuggestionCategory::Features => "Features",
        SuggestionCategory::Maps => "Maps",
        SuggestionCategory::Balance => "Balance",
        SuggestionCategory::Bug => "Bug Report",
        SuggestionCategory::Other => "Other",
    }
}

#[must_use]
pub const fn suggestion_status_emoji(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Pending => "⏳",
        SuggestionStatus::Approved => "✅",
        SuggestionStatus::Denied => "❌",
        SuggestionStatus::Reviewing => "🔄",
        SuggestionStatus::Implemented => "✨",
        SuggestionStatus::Planned => "📅",
    }
}

#[must_use]
pub const fn suggestion_status_label(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Pending => "Pending",
        SuggestionStatus::Approved => "Approved",
        SuggestionStatus::Denied => "Denied",
        SuggestionStatus::Reviewing => "Reviewing",
        SuggestionStatus::Implemented => "Implemented",
        SuggestionStatus::Planned => "Planned",
    }
}

#[must_use]
pub const fn suggestion_status_color(status: SuggestionStatus) -> u32 {
    match status {
        SuggestionStatus::Pending => BLURPLE,
        SuggestionStatus::Approved => 0x0000_FF00,
        SuggestionStatus::Denied => 0x00FF_0000,
        SuggestionStatus::Reviewing => 0x00FF_9500,
        SuggestionStatus::Implemented => 0x00FF_D700,
        SuggestionStatus::Planned => 0x0099_32CC,
    }
}

/// Reaction totals reported by Discord include the bot's own seed reaction.
/// Subtract exactly one from each emoji's own raw count, clamped at zero for
/// messages where the seed reaction was removed by hand.
#[must_use]
pub const fn adjust_seeded_count(raw: u64) -> u64 {
    raw.saturating_sub(1)
}

/// Parses a user-supplied embed colour: `#rrggbb` hex or a small set of
/// colour names. Falls back to blurple for anything unrecognized.
#[must_use]
pub fn parse_embed_color(input: &str) -> u32 {
    let trimmed = input.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(value) = u32::from_str_radix(hex, 16) {
                return value;
            }
        }
        return BLURPLE;
    }
    match trimmed.to_lowercase().as_str() {
        "red" => 0x00FF_0000,
        "green" => 0x0000_FF00,
        "blue" => 0x0000_00FF,
        "yellow" => 0x00FF_FF00,
        "purple" => 0x0080_0080,
        "orange" => 0x00FF_A500,
        "pink" => 0x00FF_C0CB,
        "cyan" => 0x0000_FFFF,
        "lime" => 0x0032_CD32,
        "magenta" => 0x00FF_00FF,
        "brown" => 0x00A5_2A2A,
        "grey" | "gray" => 0x0080_8080,
        "black" => 0x0000_0000,
        "white" => 0x00FF_FFFF,
        _ => BLURPLE,
    }
}

/// Turns a `|`-separated patch-note option into one bullet line per item.
#[must_use]
pub fn bullet_lines(input: &str) -> String {
    input
        .split('|')
        .map(|item| format!("• {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the free-form `other` patch-note option, `SectionName::item|item`.
/// Returns `None` when no `::` separator (and therefore no items) is present.
#[must_use]
pub fn parse_custom_section(input: &str) -> Option<(String, String)> {
    let (name, items) = input.split_once("::")?;
    if items.is_empty() {
        return None;
    }
    Some((name.trim().to_string(), bullet_lines(items)))
}

/// Trims a suggestion to a short preview for list output.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// One list row: `#id ✅ by tag` plus a truncated preview line.
#[must_use]
pub fn list_entry(suggestion: &Suggestion) -> String {
    format!(
        "**#{}** {} by {}\n└ {}",
        suggestion.id,
        suggestion_status_emoji(suggestion.status),
        suggestion.author.tag,
        preview(&suggestion.text, 80)
    )
}

/// Human description of how stale the polled game data is.
#[must_use]
pub fn data_age(last_game_update: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - last_game_update).num_minutes();
    if minutes < 1 {
        "Just updated".to_string()
    } else {
        format!("Updated {minutes} minutes ago")
    }
}
