//! Pattern reconciliation (upsert semantics)
//!
//! Maps freshly detected candidates onto previously stored patterns. The
//! match key is the pattern kind for the singular kinds and (kind, category)
//! for mistake patterns. A hit refreshes title, description, and payload in
//! place, keeping identity, detection timestamp, last-notified timestamp,
//! and active flag. A miss mints a new identity. Nothing here deactivates
//! or removes a pattern.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::patterns::detector::PatternCandidate;
use crate::patterns::types::{Pattern, PatternKey};

/// Lookup of active patterns by reconciliation key
///
/// Built once per detection run so the matching rule stays auditable in one
/// place instead of being re-derived by linear scans.
#[derive(Debug, Default)]
pub struct PatternIndex {
    by_key: HashMap<PatternKey, Pattern>,
}

impl PatternIndex {
    /// Index the active patterns of a stored set
    ///
    /// Inactive patterns never match. If the store holds duplicate active
    /// patterns for one key, the earliest in store order wins.
    pub fn build(existing: &[Pattern]) -> Self {
        let mut by_key = HashMap::new();
        for pattern in existing.iter().filter(|p| p.active) {
            by_key
                .entry(pattern.key())
                .or_insert_with(|| pattern.clone());
        }
        Self { by_key }
    }

    /// Number of indexed patterns
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    fn take(&mut self, key: &PatternKey) -> Option<Pattern> {
        self.by_key.remove(key)
    }
}

/// Decide update-in-place vs. create-new for each candidate
///
/// Output order follows candidate order. `now` becomes the detection
/// timestamp of newly created patterns only; matched patterns keep theirs.
pub fn reconcile(
    candidates: Vec<PatternCandidate>,
    existing: &[Pattern],
    now: DateTime<Utc>,
) -> Vec<Pattern> {
    let mut index = PatternIndex::build(existing);

    candidates
        .into_iter()
        .map(|candidate| match index.take(&candidate.payload.key()) {
            Some(mut matched) => {
                tracing::debug!(id = %matched.id, kind = %matched.kind(), "Refreshing existing pattern");
                matched.title = candidate.title;
                matched.description = candidate.description;
                matched.payload = candidate.payload;
                matched
            }
            None => {
                let pattern =
                    Pattern::new(candidate.title, candidate.description, candidate.payload, now);
                tracing::info!(id = %pattern.id, kind = %pattern.kind(), "New pattern detected");
                pattern
            }
        })
        .collect()
}
