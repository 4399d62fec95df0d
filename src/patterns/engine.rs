//! Pattern engine
//!
//! Orchestrates one detection run: bulk-read history and stored patterns,
//! detect, reconcile, persist, return. Runs within one process are
//! serialized by an internal mutex held across the whole read-modify-write
//! cycle, so two concurrent callers cannot both miss the same match key and
//! double-create a pattern. Cross-process exclusion is the deployment's
//! concern.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::patterns::types::Pattern;
use crate::patterns::{detect, reconcile};
use crate::review::{weekly_summary, WeeklySummary};
use crate::store::{JournalStore, PatternStore, StorageResult};

/// Detection and query entry point over the two stores
pub struct PatternEngine {
    journal: Arc<dyn JournalStore>,
    patterns: Arc<dyn PatternStore>,
    run_guard: Mutex<()>,
}

impl PatternEngine {
    /// Create an engine over the given stores
    pub fn new(journal: Arc<dyn JournalStore>, patterns: Arc<dyn PatternStore>) -> Self {
        Self {
            journal,
            patterns,
            run_guard: Mutex::new(()),
        }
    }

    /// Run one detection pass and persist the results
    ///
    /// Returns every pattern that was created or refreshed, in detector
    /// order. Store failures propagate unmodified; nothing is retried here.
    pub async fn run_detection(&self) -> StorageResult<Vec<Pattern>> {
        let _guard = self.run_guard.lock().await;

        let history = self.journal.get_all_check_ins().await?;
        let existing = self.patterns.get_all_patterns().await?;

        tracing::debug!(
            history = history.len(),
            stored_patterns = existing.len(),
            "Starting detection run"
        );

        let candidates = detect(&history);
        let upserted = reconcile(candidates, &existing, Utc::now());

        for pattern in &upserted {
            self.patterns.upsert(pattern.clone()).await?;
        }

        tracing::info!(patterns = upserted.len(), "Detection run complete");
        Ok(upserted)
    }

    /// All active patterns, in store order
    ///
    /// A plain filter over stored state; no recomputation happens.
    pub async fn active_patterns(&self) -> StorageResult<Vec<Pattern>> {
        let patterns = self.patterns.get_all_patterns().await?;
        Ok(patterns.into_iter().filter(|p| p.active).collect())
    }

    /// Summary statistics for the week starting at `week_start`
    pub async fn weekly_review(&self, week_start: NaiveDate) -> StorageResult<WeeklySummary> {
        let week = self
            .journal
            .check_ins_in_range(week_start, week_start + Duration::days(6))
            .await?;
        Ok(weekly_summary(&week, week_start))
    }
}
