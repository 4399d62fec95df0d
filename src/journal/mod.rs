//! Journal data model
//!
//! The entities a user records: daily check-ins, the habit catalog, and
//! journal settings. Persistence lives in [`crate::store`]; pattern
//! detection over this data lives in [`crate::patterns`].

mod settings;
mod types;

pub use settings::{Habit, HabitCategory, JournalSettings};
pub use types::{
    CheckIn, CopingStrategy, EmotionalState, EveningEntry, ExecutiveFunctionState, HabitEntry,
    MedicationEntry, MistakeEntry, MorningEntry, SensoryState, SleepRecord, TriggerEntry,
};
