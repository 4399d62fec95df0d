//! Pattern record types
//!
//! A pattern is a recurring behavioral signal inferred from multiple
//! check-ins. The per-kind data rides in [`PatternPayload`], a tagged union
//! with one variant per kind, so the fields that exist for each kind are
//! checked at compile time instead of living in a stringly-keyed bag.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A detected recurring behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pattern {
    /// Stable identifier, preserved across re-detections
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Human-readable description, refreshed on every detection run
    pub description: String,
    /// When this pattern was first detected
    pub detected_at: DateTime<Utc>,
    /// When the user was last notified about it, if ever
    #[serde(default)]
    pub last_notified: Option<DateTime<Utc>>,
    /// Inactive patterns are kept for history but never matched or shown
    pub active: bool,
    /// Kind-specific data
    pub payload: PatternPayload,
}

impl Pattern {
    /// Create a fresh, active pattern with a new identity
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        payload: PatternPayload,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            detected_at,
            last_notified: None,
            active: true,
            payload,
        }
    }

    /// The pattern kind, derived from the payload variant
    pub fn kind(&self) -> PatternKind {
        self.payload.kind()
    }

    /// The reconciliation key for this pattern
    pub fn key(&self) -> PatternKey {
        self.payload.key()
    }
}

/// Classification of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Energy,
    Overcommitment,
    Mistake,
    Mood,
    Sleep,
    /// Free-form kind for externally created patterns
    Custom(String),
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Energy => write!(f, "energy"),
            PatternKind::Overcommitment => write!(f, "overcommitment"),
            PatternKind::Mistake => write!(f, "mistake"),
            PatternKind::Mood => write!(f, "mood"),
            PatternKind::Sleep => write!(f, "sleep"),
            PatternKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Kind-specific pattern data
///
/// Serialized with an internal `kind` tag so stored JSON stays
/// self-describing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternPayload {
    /// Morning energy differs meaningfully across days of the week
    Energy {
        highest_day: Weekday,
        lowest_day: Weekday,
        /// Mean over all qualifying morning energies in the window
        average_energy: f64,
    },
    /// One day of the week keeps ending up overcommitted
    Overcommitment {
        day_of_week: Weekday,
        /// Overcommitted-evening count for that single day
        frequency: usize,
    },
    /// One mistake category keeps recurring
    Mistake { category: String, frequency: usize },
    /// Mean morning mood is below the low-mood threshold
    Mood { average_mood: f64 },
    /// Mean sleep quality is below the poor-sleep threshold
    Sleep { average_sleep_quality: f64 },
    /// Open-ended payload for patterns created outside the detector
    Custom {
        name: String,
        #[serde(default)]
        data: serde_json::Map<String, serde_json::Value>,
    },
}

impl PatternPayload {
    /// The kind this payload belongs to
    pub fn kind(&self) -> PatternKind {
        match self {
            PatternPayload::Energy { .. } => PatternKind::Energy,
            PatternPayload::Overcommitment { .. } => PatternKind::Overcommitment,
            PatternPayload::Mistake { .. } => PatternKind::Mistake,
            PatternPayload::Mood { .. } => PatternKind::Mood,
            PatternPayload::Sleep { .. } => PatternKind::Sleep,
            PatternPayload::Custom { name, .. } => PatternKind::Custom(name.clone()),
        }
    }

    /// The reconciliation key for this payload
    ///
    /// Energy, overcommitment, mood, and sleep are singular: at most one
    /// active pattern each. Mistake patterns are singular per category.
    pub fn key(&self) -> PatternKey {
        match self {
            PatternPayload::Energy { .. } => PatternKey::Energy,
            PatternPayload::Overcommitment { .. } => PatternKey::Overcommitment,
            PatternPayload::Mistake { category, .. } => PatternKey::Mistake(category.clone()),
            PatternPayload::Mood { .. } => PatternKey::Mood,
            PatternPayload::Sleep { .. } => PatternKey::Sleep,
            PatternPayload::Custom { name, .. } => PatternKey::Custom(name.clone()),
        }
    }
}

/// Identity a pattern is matched on during reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternKey {
    Energy,
    Overcommitment,
    Mood,
    Sleep,
    /// Mistake patterns are keyed per category
    Mistake(String),
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_and_key() {
        let payload = PatternPayload::Mistake {
            category: "Skipped Meals".to_string(),
            frequency: 4,
        };
        assert_eq!(payload.kind(), PatternKind::Mistake);
        assert_eq!(payload.key(), PatternKey::Mistake("Skipped Meals".to_string()));

        let payload = PatternPayload::Mood { average_mood: 3.2 };
        assert_eq!(payload.key(), PatternKey::Mood);
    }

    #[test]
    fn test_pattern_serializes_with_kind_tag() {
        let pattern = Pattern::new(
            "Overcommitment Pattern",
            "You tend to overcommit on Mondays.",
            PatternPayload::Overcommitment {
                day_of_week: Weekday::Mon,
                frequency: 3,
            },
            Utc::now(),
        );

        let json = serde_json::to_string(&pattern).unwrap();
        assert!(json.contains("\"kind\":\"overcommitment\""));

        let restored: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, restored);
    }

    #[test]
    fn test_custom_payload_round_trips() {
        let mut data = serde_json::Map::new();
        data.insert("note".to_string(), serde_json::json!("added by hand"));

        let pattern = Pattern::new(
            "Sensory Pattern",
            "Noise-heavy days keep showing up.",
            PatternPayload::Custom {
                name: "sensory".to_string(),
                data,
            },
            Utc::now(),
        );

        assert_eq!(pattern.kind(), PatternKind::Custom("sensory".to_string()));

        let json = serde_json::to_string(&pattern).unwrap();
        let restored: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, restored);
    }

    #[test]
    fn test_new_pattern_is_active_with_fresh_identity() {
        let a = Pattern::new(
            "Low Mood Pattern",
            "desc",
            PatternPayload::Mood { average_mood: 4.0 },
            Utc::now(),
        );
        let b = Pattern::new(
            "Low Mood Pattern",
            "desc",
            PatternPayload::Mood { average_mood: 4.0 },
            Utc::now(),
        );

        assert!(a.active);
        assert!(a.last_notified.is_none());
        assert_ne!(a.id, b.id);
    }
}
