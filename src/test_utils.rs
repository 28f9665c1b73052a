//! Shared test fixtures.

use crate::core::suggestions::SuggestionAuthor;

/// An author snapshot with sensible defaults for registry tests.
#[must_use]
pub fn test_author() -> SuggestionAuthor {
    SuggestionAuthor {
        id: 123_456_789,
        tag: "player#0001".to_string(),
        avatar_url: "https://cdn.example.com/avatars/123456789.png".to_string(),
    }
}
