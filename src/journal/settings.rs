//! Habit catalog and journal settings
//!
//! Both entities are owned by the journal store. A fresh store is seeded
//! with the default habit list and the default mistake-category catalog.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A trackable habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    /// Stable identifier
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive habits stay in the catalog but are hidden from entry forms
    pub active: bool,
    pub category: HabitCategory,
    /// Whether the user created this habit (vs. the built-in defaults)
    #[serde(default)]
    pub custom: bool,
}

impl Habit {
    /// Create an active habit with a fresh identity
    pub fn new(name: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            active: true,
            category,
            custom: false,
        }
    }

    /// Builder: mark as user-created
    pub fn custom(mut self) -> Self {
        self.custom = true;
        self
    }

    /// The six habits a fresh journal starts with
    pub fn defaults() -> Vec<Habit> {
        vec![
            Habit::new("Exercise", HabitCategory::Exercise),
            Habit::new("Eat Breakfast", HabitCategory::Nutrition),
            Habit::new("Eat Lunch", HabitCategory::Nutrition),
            Habit::new("Eat Dinner", HabitCategory::Nutrition),
            Habit::new("Take Breaks", HabitCategory::SelfCare),
            Habit::new("Drink Water", HabitCategory::Nutrition),
        ]
    }
}

/// Habit classification for grouping and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Exercise,
    Nutrition,
    SelfCare,
    Social,
    Productivity,
    Sleep,
    Medication,
    Other,
}

/// User-level journal settings
///
/// Reminder scheduling and notification delivery happen outside this crate;
/// the settings are stored here because the journal store owns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalSettings {
    #[serde(default = "default_morning_reminder")]
    pub morning_reminder: NaiveTime,
    #[serde(default = "default_evening_reminder")]
    pub evening_reminder: NaiveTime,
    #[serde(default = "default_true")]
    pub system_notifications: bool,
    #[serde(default = "default_true")]
    pub in_app_notifications: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Names of user-added habits
    #[serde(default)]
    pub custom_habits: Vec<String>,
    /// Catalog of mistake categories offered on the evening form
    #[serde(default = "default_mistake_categories")]
    pub mistake_categories: Vec<String>,
}

fn default_morning_reminder() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

fn default_evening_reminder() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap()
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "Default".to_string()
}

fn default_mistake_categories() -> Vec<String> {
    [
        "Overcommitted",
        "Skipped Meals",
        "No Breaks",
        "Sensory Overload",
        "Time Blindness",
        "Task Avoidance",
        "Social Overwhelm",
        "Executive Function Difficulty",
        "Emotional Dysregulation",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            morning_reminder: default_morning_reminder(),
            evening_reminder: default_evening_reminder(),
            system_notifications: true,
            in_app_notifications: true,
            theme: default_theme(),
            custom_habits: Vec::new(),
            mistake_categories: default_mistake_categories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_habits_are_seeded_active() {
        let habits = Habit::defaults();
        assert_eq!(habits.len(), 6);
        assert!(habits.iter().all(|h| h.active && !h.custom));
        assert!(habits.iter().any(|h| h.name == "Drink Water"));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = JournalSettings::default();
        assert_eq!(
            settings.morning_reminder,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(settings.mistake_categories.len(), 10);
        assert!(settings
            .mistake_categories
            .contains(&"Sensory Overload".to_string()));
    }

    #[test]
    fn test_settings_deserialize_from_empty_object() {
        let settings: JournalSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, JournalSettings::default());
    }
}
