//! Unified error types and result handling.

use thiserror::Error;

/// All the ways a command, webhook request, or poll cycle can fail.
///
/// None of these are fatal to the process; handlers report them to the
/// immediate caller and the bot keeps running. Only missing required
/// startup configuration (surfaced as [`Error::Config`]) aborts startup.
#[derive(Debug, Error)]
pub enum Error {
    /// User input violated a stated constraint (e.g. suggestion text too long).
    #[error("{message}")]
    Validation { message: String },

    /// A referenced entity does not exist (unknown suggestion ID, missing channel).
    #[error("{what} not found")]
    NotFound { what: String },

    /// An inbound payload could not be decoded as the expected shape.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// An outbound call to an external system failed (games API, message send).
    #[error("External call failed: {message}")]
    ExternalCall { message: String },

    /// Configuration error during startup.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// I/O error (webhook listener bind, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serenity/Poise framework error.
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::ExternalCall {
            message: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Decode {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
