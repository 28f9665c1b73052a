//! `PatchworkBot` - a community-management Discord bot for a Roblox game.
//!
//! The bot posts announcements and patch notes, tracks a live game-status
//! record fed by operator commands, a game-side webhook, and a scheduled
//! games-API poll, and runs a suggestion workflow with reaction-based
//! voting. All state is memory-resident for the process lifetime.

// Deny the lints that are almost always bugs
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,       // Will add gradually
    clippy::missing_panics_doc,       // Will add gradually
)]

// Note: `missing_docs` is `warn` rather than `deny` because macro-generated
// code (e.g. `poise::command`) doesn't include docs.

/// Discord bot interface - commands, formatting, and shared context
pub mod bot;
/// Environment-backed application configuration
pub mod config;
/// Core state owners - game status, suggestions, and the staff predicate
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Scheduled games-API poll
pub mod poller;
/// Inbound game-status webhook receiver
pub mod webhook;

#[cfg(test)]
pub mod test_utils;
