//! Persistence boundary
//!
//! Two narrow trait seams separate the core from storage:
//! - [`JournalStore`]: check-in records, the habit catalog, and settings
//! - [`PatternStore`]: detected patterns
//!
//! The bundled [`JsonJournalStore`] / [`JsonPatternStore`] keep one JSON file
//! per collection in a data directory. Callers that need different
//! persistence implement the traits themselves.

mod error;
mod json;

pub use error::{StorageError, StorageResult};
pub use json::{JsonJournalStore, JsonPatternStore};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::journal::{CheckIn, Habit, JournalSettings};
use crate::patterns::Pattern;

/// Read/write access to the user's journal
///
/// `get_all_check_ins` returns records descending by date by convention;
/// consumers that depend on order re-sort defensively.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// All check-in records
    async fn get_all_check_ins(&self) -> StorageResult<Vec<CheckIn>>;

    /// The record for one date, if any
    async fn get_check_in(&self, date: NaiveDate) -> StorageResult<Option<CheckIn>>;

    /// Insert or replace the record for `check_in.date`
    ///
    /// Keeps the one-record-per-date invariant: an existing record for the
    /// same date is replaced, never duplicated.
    async fn save_check_in(&self, check_in: CheckIn) -> StorageResult<()>;

    /// Records with `start <= date <= end`
    async fn check_ins_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<CheckIn>>;

    /// The habit catalog
    async fn get_habits(&self) -> StorageResult<Vec<Habit>>;

    /// Insert or replace a habit by id
    async fn save_habit(&self, habit: Habit) -> StorageResult<()>;

    /// Remove a habit by id
    async fn delete_habit(&self, habit_id: &str) -> StorageResult<()>;

    /// Journal settings (defaults if never saved)
    async fn get_settings(&self) -> StorageResult<JournalSettings>;

    /// Replace the journal settings
    async fn save_settings(&self, settings: JournalSettings) -> StorageResult<()>;
}

/// Read/write access to detected patterns
#[async_trait]
pub trait PatternStore: Send + Sync {
    /// All stored patterns, active or not, in store order
    async fn get_all_patterns(&self) -> StorageResult<Vec<Pattern>>;

    /// Insert or replace a pattern by id
    async fn upsert(&self, pattern: Pattern) -> StorageResult<()>;
}
