//! Core state and rules - framework-agnostic apart from parameter-choice
//! derives on the public enums.

/// Staff authorization predicate
pub mod permissions;

/// Game status record and its three update channels
pub mod status;

/// Suggestion table and lifecycle
pub mod suggestions;
