//! Suggestion tracking - create, transition, and query player suggestions.
//!
//! The registry owns the suggestion records and nothing else. Voting happens
//! on the rendered Discord message via reactions; the registry never counts
//! votes itself, it only ingests caller-observed totals at transition time.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Maximum length of a suggestion, in characters.
pub const MAX_SUGGESTION_LEN: usize = 1000;

/// Category chosen by the suggester. Defaults to `Other` when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poise::ChoiceParameter)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    #[name = "🎮 Gameplay"]
    Gameplay,
    #[name = "🎨 Cosmetics"]
    Cosmetics,
    #[name = "🔧 Features"]
    Features,
    #[name = "🌍 Maps"]
    Maps,
    #[name = "⚖️ Balance"]
    Balance,
    #[name = "🐛 Bug Report"]
    Bug,
    #[name = "💡 Other"]
    Other,
}

impl Default for SuggestionCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// Review state of a suggestion. Records are never deleted; `Denied` and
/// `Implemented` are terminal in practice because the dispatcher retires the
/// voting surface, but no transition is forbidden here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poise::ChoiceParameter)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[name = "⏳ Pending"]
    Pending,
    #[name = "✅ Approved"]
    Approved,
    #[name = "❌ Denied"]
    Denied,
    #[name = "🔄 Under Review"]
    Reviewing,
    #[name = "✨ Implemented"]
    Implemented,
    #[name = "📅 Planned"]
    Planned,
}

/// Point-in-time copy of the suggester's identity, captured at creation.
/// Not a live reference - it survives the author later changing their
/// profile or leaving the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionAuthor {
    pub id: u64,
    pub tag: String,
    pub avatar_url: String,
}

/// A single tracked suggestion.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Sequential ID starting at 1; never reused.
    pub id: u64,
    pub text: String,
    pub category: SuggestionCategory,
    pub author: SuggestionAuthor,
    pub status: SuggestionStatus,
    /// Optional staff note; overwritten (or cleared) on every transition.
    pub reason: Option<String>,
    /// Handle to the rendered Discord message, used to re-fetch live vote
    /// counts. Absent when the send failed after the record was stored.
    pub message_id: Option<u64>,
    pub upvotes: u64,
    pub downvotes: u64,
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent status transition, not vote reconciliation.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct RegistryInner {
    next_id: u64,
    entries: BTreeMap<u64, Suggestion>,
}

/// Owner of the suggestion table.
///
/// Same concurrency contract as the status tracker: every method locks,
/// mutates synchronously, and unlocks, so each operation is atomic. Two
/// staff transitioning the same suggestion near-simultaneously is
/// last-write-wins by design.
#[derive(Debug)]
pub struct SuggestionRegistry {
    inner: Mutex<RegistryInner>,
}

impl Default for SuggestionRegistry {
    fn default() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next_id: 1,
                entries: BTreeMap::new(),
            }),
        }
    }
}

impl SuggestionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new suggestion and returns it, ID assigned.
    ///
    /// Fails with a validation error when the text exceeds
    /// [`MAX_SUGGESTION_LEN`] characters; a rejected call consumes no ID.
    /// Once a record is stored its ID is never rolled back, even if the
    /// caller's downstream rendering fails - the record simply keeps an
    /// empty message handle.
    pub fn create(
        &self,
        text: impl Into<String>,
        category: SuggestionCategory,
        author: SuggestionAuthor,
    ) -> Result<Suggestion> {
        let text = text.into();
        if text.chars().count() > MAX_SUGGESTION_LEN {
            return Err(Error::Validation {
                message: format!(
                    "Suggestion is too long! Please keep it under {MAX_SUGGESTION_LEN} characters."
                ),
            });
        }

        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let suggestion = Suggestion {
            id,
            text,
            category,
            author,
            status: SuggestionStatus::Pending,
            reason: None,
            message_id: None,
            upvotes: 0,
            downvotes: 0,
            created_at: now,
            updated_at: now,
        };
        inner.entries.insert(id, suggestion.clone());
        tracing::info!(id, ?category, "suggestion created");
        Ok(suggestion)
    }

    /// Looks up a suggestion by ID.
    pub fn get(&self, id: u64) -> Result<Suggestion> {
        self.lock()
            .entries
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Records the rendered message handle once the dispatcher has posted
    /// the suggestion embed.
    pub fn attach_message(&self, id: u64, message_id: u64) -> Result<()> {
        let mut inner = self.lock();
        let suggestion = inner.entries.get_mut(&id).ok_or_else(|| not_found(id))?;
        suggestion.message_id = Some(message_id);
        Ok(())
    }

    /// Moves a suggestion to a new review state.
    ///
    /// Overwrites the staff note (clearing it when `reason` is `None`),
    /// stamps `updated_at`, and replaces both vote counts with the
    /// caller-observed totals. The registry trusts the caller's numbers;
    /// reading live reaction counts and subtracting the bot's own seed
    /// reaction is the dispatcher's job.
    pub fn transition_status(
        &self,
        id: u64,
        new_status: SuggestionStatus,
        reason: Option<String>,
        observed_upvotes: u64,
        observed_downvotes: u64,
    ) -> Result<Suggestion> {
        let mut inner = self.lock();
        let suggestion = inner.entries.get_mut(&id).ok_or_else(|| not_found(id))?;
        suggestion.status = new_status;
        suggestion.reason = reason;
        suggestion.upvotes = observed_upvotes;
        suggestion.downvotes = observed_downvotes;
        suggestion.updated_at = Utc::now();
        tracing::info!(id, status = ?new_status, "suggestion status updated");
        Ok(suggestion.clone())
    }

    /// Returns suggestions matching the filter (all of them when `None`),
    /// newest first. Callers wanting a single page slice the result
    /// themselves; the registry has no pagination cursor.
    #[must_use]
    pub fn list(&self, filter: Option<SuggestionStatus>) -> Vec<Suggestion> {
        let inner = self.lock();
        let mut matching: Vec<Suggestion> = inner
            .entries
            .values()
            .filter(|s| filter.is_none_or(|f| s.status == f))
            .cloned()
            .collect();
        // Newest first; IDs break ties for records created within the same tick.
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matching
    }

    #[allow(clippy::unwrap_used)] // no mutation path can panic while holding the lock
    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap()
    }
}

fn not_found(id: u64) -> Error {
    Error::NotFound {
        what: format!("Suggestion #{id}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::test_author;

    #[test]
    fn create_assigns_sequential_ids_starting_at_one() -> Result<()> {
        let registry = SuggestionRegistry::new();
        for expected in 1..=5 {
            let s = registry.create("Add more maps", SuggestionCategory::Maps, test_author())?;
            assert_eq!(s.id, expected);
        }
        Ok(())
    }

    #[test]
    fn create_initializes_pending_with_zero_votes() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let s = registry.create(
            "Add sprint mechanic",
            SuggestionCategory::Gameplay,
            test_author(),
        )?;
        assert_eq!(s.id, 1);
        assert_eq!(s.status, SuggestionStatus::Pending);
        assert_eq!(s.upvotes, 0);
        assert_eq!(s.downvotes, 0);
        assert!(s.reason.is_none());
        assert!(s.message_id.is_none());
        assert_eq!(s.created_at, s.updated_at);
        Ok(())
    }

    #[test]
    fn create_enforces_length_limit_at_exactly_1000() {
        let registry = SuggestionRegistry::new();

        let at_limit = "x".repeat(1000);
        assert!(registry
            .create(at_limit, SuggestionCategory::Other, test_author())
            .is_ok());

        let over_limit = "x".repeat(1001);
        let err = registry
            .create(over_limit, SuggestionCategory::Other, test_author())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn rejected_create_consumes_no_id() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let _ = registry.create("x".repeat(1001), SuggestionCategory::Other, test_author());
        let s = registry.create("short one", SuggestionCategory::Other, test_author())?;
        assert_eq!(s.id, 1);
        Ok(())
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let registry = SuggestionRegistry::new();
        assert!(matches!(registry.get(42), Err(Error::NotFound { .. })));
    }

    #[test]
    fn transition_updates_status_reason_votes_and_timestamp() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let created = registry.create(
            "Add sprint mechanic",
            SuggestionCategory::Gameplay,
            test_author(),
        )?;

        let updated = registry.transition_status(
            created.id,
            SuggestionStatus::Approved,
            Some("Great idea".to_string()),
            5,
            1,
        )?;

        assert_eq!(updated.status, SuggestionStatus::Approved);
        assert_eq!(updated.reason.as_deref(), Some("Great idea"));
        assert_eq!(updated.upvotes, 5);
        assert_eq!(updated.downvotes, 1);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        // The mutation is visible to later reads.
        assert_eq!(registry.get(created.id)?.status, SuggestionStatus::Approved);
        Ok(())
    }

    #[test]
    fn transition_with_no_reason_clears_a_previous_note() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let s = registry.create("Nerf the sword", SuggestionCategory::Balance, test_author())?;

        registry.transition_status(
            s.id,
            SuggestionStatus::Reviewing,
            Some("Checking numbers".to_string()),
            2,
            0,
        )?;
        let cleared =
            registry.transition_status(s.id, SuggestionStatus::Approved, None, 3, 0)?;
        assert!(cleared.reason.is_none());
        Ok(())
    }

    #[test]
    fn transition_unknown_id_is_not_found() {
        let registry = SuggestionRegistry::new();
        let result =
            registry.transition_status(7, SuggestionStatus::Approved, None, 0, 0);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn attach_message_sets_handle() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let s = registry.create("More hats", SuggestionCategory::Cosmetics, test_author())?;
        registry.attach_message(s.id, 999_888_777)?;
        assert_eq!(registry.get(s.id)?.message_id, Some(999_888_777));
        assert!(matches!(
            registry.attach_message(99, 1),
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn list_filters_by_status_and_sorts_newest_first() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let a = registry.create("first", SuggestionCategory::Other, test_author())?;
        let b = registry.create("second", SuggestionCategory::Other, test_author())?;
        let c = registry.create("third", SuggestionCategory::Other, test_author())?;

        registry.transition_status(a.id, SuggestionStatus::Approved, None, 0, 0)?;
        registry.transition_status(c.id, SuggestionStatus::Approved, None, 0, 0)?;

        let approved = registry.list(Some(SuggestionStatus::Approved));
        assert_eq!(
            approved.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![c.id, a.id]
        );
        assert!(approved
            .iter()
            .all(|s| s.status == SuggestionStatus::Approved));

        let everything = registry.list(None);
        assert_eq!(
            everything.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![c.id, b.id, a.id]
        );
        Ok(())
    }

    #[test]
    fn list_is_unaffected_by_transitions_on_other_ids() -> Result<()> {
        let registry = SuggestionRegistry::new();
        let a = registry.create("keep me", SuggestionCategory::Other, test_author())?;
        let b = registry.create("change me", SuggestionCategory::Other, test_author())?;
        registry.transition_status(a.id, SuggestionStatus::Approved, None, 0, 0)?;

        let before = registry.list(Some(SuggestionStatus::Approved));
        registry.transition_status(b.id, SuggestionStatus::Denied, None, 0, 2)?;
        let after = registry.list(Some(SuggestionStatus::Approved));

        assert_eq!(
            before.iter().map(|s| s.id).collect::<Vec<_>>(),
            after.iter().map(|s| s.id).collect::<Vec<_>>()
        );
        Ok(())
    }
}
