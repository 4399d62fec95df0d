//! JSON file stores
//!
//! One pretty-printed JSON file per collection inside a data directory:
//! `checkins.json`, `habits.json`, `patterns.json`, `settings.json`.
//! A missing or empty file reads as the empty collection, so a first launch
//! needs no setup step. Writes are read-modify-write over the whole file,
//! serialized per store by an async mutex so concurrent upserts within one
//! process cannot interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::journal::{CheckIn, Habit, JournalSettings};
use crate::patterns::Pattern;
use crate::store::error::StorageResult;
use crate::store::{JournalStore, PatternStore};

/// Read a JSON collection file, treating missing/blank files as empty
fn load_collection<T: serde::de::DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(&content)?)
}

/// Write a JSON collection file, creating the parent directory if needed
fn save_collection<T: serde::Serialize>(path: &Path, items: &[T]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(items)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// File-backed journal store
pub struct JsonJournalStore {
    check_ins_path: PathBuf,
    habits_path: PathBuf,
    settings_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonJournalStore {
    /// Open a journal store rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        tracing::debug!(data_dir = %data_dir.display(), "Opened journal store");

        Ok(Self {
            check_ins_path: data_dir.join("checkins.json"),
            habits_path: data_dir.join("habits.json"),
            settings_path: data_dir.join("settings.json"),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl JournalStore for JsonJournalStore {
    async fn get_all_check_ins(&self) -> StorageResult<Vec<CheckIn>> {
        let check_ins: Vec<CheckIn> = load_collection(&self.check_ins_path)?;
        tracing::debug!(count = check_ins.len(), "Loaded check-ins");
        Ok(check_ins)
    }

    async fn get_check_in(&self, date: NaiveDate) -> StorageResult<Option<CheckIn>> {
        let check_ins = self.get_all_check_ins().await?;
        Ok(check_ins.into_iter().find(|c| c.date == date))
    }

    async fn save_check_in(&self, check_in: CheckIn) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut check_ins: Vec<CheckIn> = load_collection(&self.check_ins_path)?;
        let date = check_in.date;
        check_ins.retain(|c| c.date != date);
        check_ins.push(check_in);
        check_ins.sort_by(|a, b| b.date.cmp(&a.date));

        save_collection(&self.check_ins_path, &check_ins)?;
        tracing::info!(date = %date, "Saved check-in");
        Ok(())
    }

    async fn check_ins_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<CheckIn>> {
        let check_ins = self.get_all_check_ins().await?;
        Ok(check_ins
            .into_iter()
            .filter(|c| c.date >= start && c.date <= end)
            .collect())
    }

    async fn get_habits(&self) -> StorageResult<Vec<Habit>> {
        if !self.habits_path.exists() {
            // First launch: seed the default catalog
            let defaults = Habit::defaults();
            let _guard = self.write_lock.lock().await;
            save_collection(&self.habits_path, &defaults)?;
            tracing::info!(count = defaults.len(), "Seeded default habits");
            return Ok(defaults);
        }

        load_collection(&self.habits_path)
    }

    async fn save_habit(&self, habit: Habit) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut habits: Vec<Habit> = load_collection(&self.habits_path)?;
        habits.retain(|h| h.id != habit.id);
        habits.push(habit);

        save_collection(&self.habits_path, &habits)
    }

    async fn delete_habit(&self, habit_id: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut habits: Vec<Habit> = load_collection(&self.habits_path)?;
        habits.retain(|h| h.id != habit_id);

        save_collection(&self.habits_path, &habits)
    }

    async fn get_settings(&self) -> StorageResult<JournalSettings> {
        if !self.settings_path.exists() {
            return Ok(JournalSettings::default());
        }

        let content = std::fs::read_to_string(&self.settings_path)?;
        if content.trim().is_empty() {
            return Ok(JournalSettings::default());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn save_settings(&self, settings: JournalSettings) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }
}

/// File-backed pattern store
pub struct JsonPatternStore {
    patterns_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonPatternStore {
    /// Open a pattern store rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self {
            patterns_path: data_dir.join("patterns.json"),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl PatternStore for JsonPatternStore {
    async fn get_all_patterns(&self) -> StorageResult<Vec<Pattern>> {
        load_collection(&self.patterns_path)
    }

    async fn upsert(&self, pattern: Pattern) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut patterns: Vec<Pattern> = load_collection(&self.patterns_path)?;

        // Replace in place to keep store order stable for unchanged patterns
        match patterns.iter_mut().find(|p| p.id == pattern.id) {
            Some(slot) => *slot = pattern,
            None => patterns.push(pattern),
        }

        save_collection(&self.patterns_path, &patterns)
    }
}
