//! # Daybook
//!
//! Personal check-in journal - structured morning/evening self-observations
//! with behavioral pattern detection.
//!
//! ## Features
//!
//! - **Structured check-ins**: one record per calendar day, morning and
//!   evening entries with optional sub-records
//! - **Pattern detection**: five independent detectors (energy,
//!   overcommitment, mistakes, mood, sleep) over sliding windows
//! - **Idempotent upserts**: re-detection refreshes a pattern in place
//!   instead of duplicating it
//! - **Pluggable stores**: journal and pattern persistence behind narrow
//!   async traits, with JSON file implementations included
//!
//! ## Modules
//!
//! - [`journal`]: check-in data model, habits, and settings
//! - [`patterns`]: detectors, reconciler, and the pattern engine
//! - [`store`]: store traits and the JSON file stores
//! - [`review`]: weekly summary statistics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daybook::journal::{CheckIn, MorningEntry};
//! use daybook::patterns::PatternEngine;
//! use daybook::store::{JournalStore, JsonJournalStore, JsonPatternStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let journal = Arc::new(JsonJournalStore::new("./daybook_data")?);
//!     let patterns = Arc::new(JsonPatternStore::new("./daybook_data")?);
//!
//!     // Record this morning's check-in
//!     let today = chrono::Utc::now().date_naive();
//!     journal
//!         .save_check_in(CheckIn::new(today).morning(MorningEntry::new(7, 6)))
//!         .await?;
//!
//!     // Scan the history for recurring patterns
//!     let engine = PatternEngine::new(journal, patterns);
//!     for pattern in engine.run_detection().await? {
//!         println!("{}: {}", pattern.title, pattern.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod journal;
pub mod patterns;
pub mod review;
pub mod store;

// Re-export top-level types for convenience
pub use journal::{CheckIn, EveningEntry, Habit, JournalSettings, MorningEntry};

pub use patterns::{
    detect, reconcile, Pattern, PatternCandidate, PatternEngine, PatternKey, PatternKind,
    PatternPayload,
};

pub use store::{
    JournalStore, JsonJournalStore, JsonPatternStore, PatternStore, StorageError, StorageResult,
};

pub use review::{weekly_summary, WeeklySummary};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig};
