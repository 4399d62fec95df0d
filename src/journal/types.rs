//! Core data types for the daily check-in journal
//!
//! This module defines the entities recorded twice a day:
//! - `CheckIn`: one calendar day's record, holding at most one morning and
//!   one evening entry
//! - `MorningEntry` / `EveningEntry`: the structured observations themselves
//! - Supporting sub-records (sleep, sensory, executive function, emotional
//!   state) and list entries (medications, triggers, coping, habits, mistakes)
//!
//! Every sub-record is optional. A skipped session or an absent field is an
//! expected state, not an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar day's check-in record
///
/// Keyed by date at day granularity: at most one record exists per date,
/// and time-of-day plays no part in identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckIn {
    /// Calendar date this record belongs to
    pub date: NaiveDate,
    /// Morning session, if the user completed one
    #[serde(default)]
    pub morning: Option<MorningEntry>,
    /// Evening session, if the user completed one
    #[serde(default)]
    pub evening: Option<EveningEntry>,
}

impl CheckIn {
    /// Create an empty record for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            morning: None,
            evening: None,
        }
    }

    /// Builder: attach a morning entry
    pub fn morning(mut self, entry: MorningEntry) -> Self {
        self.morning = Some(entry);
        self
    }

    /// Builder: attach an evening entry
    pub fn evening(mut self, entry: EveningEntry) -> Self {
        self.evening = Some(entry);
        self
    }
}

/// Morning self-observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MorningEntry {
    /// Energy level, 1-10
    pub energy_level: u8,
    /// Free-text "must do today" goal
    #[serde(default)]
    pub must_do_today: Option<String>,
    /// Felt capacity for the day, 1-10
    pub capacity_feeling: u8,
    /// Last night's sleep, if recorded
    #[serde(default)]
    pub sleep: Option<SleepRecord>,
    /// Medications taken
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    /// Sensory load, if recorded
    #[serde(default)]
    pub sensory: Option<SensoryState>,
    /// Executive-function state, if recorded
    #[serde(default)]
    pub executive_function: Option<ExecutiveFunctionState>,
    /// Emotional state, if recorded
    #[serde(default)]
    pub emotional_state: Option<EmotionalState>,
    /// Gratitude items
    #[serde(default)]
    pub gratitude: Vec<String>,
    /// Triggers encountered
    #[serde(default)]
    pub triggers: Vec<TriggerEntry>,
    /// Coping strategies used
    #[serde(default)]
    pub coping_strategies: Vec<CopingStrategy>,
    /// Habit completions
    #[serde(default)]
    pub habits: Vec<HabitEntry>,
    /// When the entry was completed
    pub recorded_at: DateTime<Utc>,
}

impl MorningEntry {
    /// Create a minimal morning entry with the two required ratings
    pub fn new(energy_level: u8, capacity_feeling: u8) -> Self {
        Self {
            energy_level,
            must_do_today: None,
            capacity_feeling,
            sleep: None,
            medications: Vec::new(),
            sensory: None,
            executive_function: None,
            emotional_state: None,
            gratitude: Vec::new(),
            triggers: Vec::new(),
            coping_strategies: Vec::new(),
            habits: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Builder: set the must-do goal
    pub fn must_do(mut self, goal: impl Into<String>) -> Self {
        self.must_do_today = Some(goal.into());
        self
    }

    /// Builder: attach a sleep record
    pub fn sleep(mut self, sleep: SleepRecord) -> Self {
        self.sleep = Some(sleep);
        self
    }

    /// Builder: attach an emotional state
    pub fn emotional_state(mut self, state: EmotionalState) -> Self {
        self.emotional_state = Some(state);
        self
    }
}

/// Evening self-observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EveningEntry {
    /// Whether the morning's must-do was completed; None = unanswered
    #[serde(default)]
    pub must_do_completed: Option<bool>,
    /// Energy level, 1-10
    pub energy_level: u8,
    /// Whether the day felt overcommitted; None = unanswered
    #[serde(default)]
    pub overcommitted: Option<bool>,
    /// Mistakes noticed during the day
    #[serde(default)]
    pub mistakes: Vec<MistakeEntry>,
    /// Emotional state, if recorded
    #[serde(default)]
    pub emotional_state: Option<EmotionalState>,
    /// Gratitude items
    #[serde(default)]
    pub gratitude: Vec<String>,
    /// Triggers encountered
    #[serde(default)]
    pub triggers: Vec<TriggerEntry>,
    /// Coping strategies used
    #[serde(default)]
    pub coping_strategies: Vec<CopingStrategy>,
    /// Habit completions
    #[serde(default)]
    pub habits: Vec<HabitEntry>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// When the entry was completed
    pub recorded_at: DateTime<Utc>,
}

impl EveningEntry {
    /// Create a minimal evening entry with the required energy rating
    pub fn new(energy_level: u8) -> Self {
        Self {
            must_do_completed: None,
            energy_level,
            overcommitted: None,
            mistakes: Vec::new(),
            emotional_state: None,
            gratitude: Vec::new(),
            triggers: Vec::new(),
            coping_strategies: Vec::new(),
            habits: Vec::new(),
            notes: None,
            recorded_at: Utc::now(),
        }
    }

    /// Builder: answer the overcommitted question
    pub fn overcommitted(mut self, value: bool) -> Self {
        self.overcommitted = Some(value);
        self
    }

    /// Builder: answer the must-do question
    pub fn must_do_completed(mut self, value: bool) -> Self {
        self.must_do_completed = Some(value);
        self
    }

    /// Builder: add a mistake entry
    pub fn mistake(mut self, entry: MistakeEntry) -> Self {
        self.mistakes.push(entry);
        self
    }

    /// Builder: attach an emotional state
    pub fn emotional_state(mut self, state: EmotionalState) -> Self {
        self.emotional_state = Some(state);
        self
    }
}

/// Last night's sleep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepRecord {
    /// Quality, 1-10
    pub quality: u8,
    /// Hours slept
    pub hours_slept: f32,
    /// Whether sleep was restless
    #[serde(default)]
    pub restless: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SleepRecord {
    pub fn new(quality: u8, hours_slept: f32) -> Self {
        Self {
            quality,
            hours_slept,
            restless: false,
            notes: None,
        }
    }
}

/// A medication taken during the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationEntry {
    pub name: String,
    pub time_taken: DateTime<Utc>,
    #[serde(default)]
    pub dosage: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sensory load state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensoryState {
    /// Overload level, 0-10 (0 = no issues)
    pub overload_level: u8,
    /// Trigger tags: noise, lighting, crowds, textures, ...
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Executive-function state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutiveFunctionState {
    /// Difficulty starting tasks, 0-10
    pub task_initiation_difficulty: u8,
    /// Difficulty switching tasks, 0-10
    pub transition_difficulty: u8,
    #[serde(default)]
    pub time_blindness: bool,
    #[serde(default)]
    pub hyperfocus_period: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Emotional state, recorded morning or evening
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionalState {
    /// Overall mood, 1-10
    pub overall_mood: u8,
    #[serde(default)]
    pub meltdown: bool,
    #[serde(default)]
    pub shutdown: bool,
    /// Overwhelm level, 0-10
    #[serde(default)]
    pub overwhelm_level: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EmotionalState {
    pub fn new(overall_mood: u8) -> Self {
        Self {
            overall_mood,
            meltdown: false,
            shutdown: false,
            overwhelm_level: 0,
            notes: None,
        }
    }
}

/// A trigger encountered during the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerEntry {
    pub description: String,
    /// Category: sensory, social, task-related, ...
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A coping strategy and whether it helped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CopingStrategy {
    pub strategy: String,
    pub effective: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A habit completion mark for the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitEntry {
    pub habit_name: String,
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A mistake noticed during the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MistakeEntry {
    /// Category from the configurable catalog (Overcommitted, Skipped Meals, ...)
    pub category: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MistakeEntry {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            tags: Vec::new(),
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_check_in_builder() {
        let check_in = CheckIn::new(date(2024, 1, 15))
            .morning(MorningEntry::new(7, 6).must_do("Ship the report"))
            .evening(EveningEntry::new(4).overcommitted(true));

        assert_eq!(check_in.date, date(2024, 1, 15));
        assert_eq!(check_in.morning.as_ref().unwrap().energy_level, 7);
        assert_eq!(
            check_in.morning.as_ref().unwrap().must_do_today.as_deref(),
            Some("Ship the report")
        );
        assert_eq!(check_in.evening.as_ref().unwrap().overcommitted, Some(true));
    }

    #[test]
    fn test_check_in_round_trips_through_json() {
        let check_in = CheckIn::new(date(2024, 1, 15)).morning(
            MorningEntry::new(8, 7)
                .sleep(SleepRecord::new(6, 7.5))
                .emotional_state(EmotionalState::new(5)),
        );

        let json = serde_json::to_string(&check_in).unwrap();
        let restored: CheckIn = serde_json::from_str(&json).unwrap();
        assert_eq!(check_in, restored);
    }

    #[test]
    fn test_missing_optional_fields_deserialize_as_absent() {
        // A record written by an older build, with only the required fields
        let json = r#"{
            "date": "2024-01-15",
            "morning": {
                "energy_level": 6,
                "capacity_feeling": 5,
                "recorded_at": "2024-01-15T08:12:00Z"
            }
        }"#;

        let check_in: CheckIn = serde_json::from_str(json).unwrap();
        let morning = check_in.morning.unwrap();
        assert!(morning.sleep.is_none());
        assert!(morning.emotional_state.is_none());
        assert!(morning.medications.is_empty());
        assert!(check_in.evening.is_none());
    }
}
