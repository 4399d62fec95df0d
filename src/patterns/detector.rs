//! Pattern detection
//!
//! Five independent detectors scan the same check-in history snapshot:
//! - Energy: day-of-week spread of morning energy
//! - Overcommitment: which weekday keeps ending up overcommitted
//! - Mistake frequency: recurring mistake categories (plural)
//! - Mood: sustained low morning mood
//! - Sleep: sustained poor sleep quality
//!
//! Each detector windows the most recent check-ins itself, requires a
//! minimum sample count for its metric, and yields zero or more candidates.
//! Too little data is normal control flow, never an error. Window sizes and
//! thresholds are fixed constants.

use chrono::{Datelike, Weekday};

use crate::journal::CheckIn;
use crate::patterns::types::PatternPayload;

/// No detection is attempted on less than a week of history
const MIN_HISTORY: usize = 7;
/// Window for the day-of-week and average-based detectors
const FORTNIGHT_WINDOW: usize = 14;
/// Window for the mistake-frequency detector
const MISTAKE_WINDOW: usize = 30;
/// Minimum samples a single metric needs inside its window
const MIN_SAMPLES: usize = 7;
/// Weekday-mean spread that counts as a real energy pattern
const ENERGY_SPREAD: f64 = 2.0;
/// Distinct weekdays required before the energy spread is meaningful
const MIN_DISTINCT_WEEKDAYS: usize = 3;
/// Overcommitted evenings required in the window
const MIN_OVERCOMMITTED: usize = 3;
/// Overcommitted evenings required on the single worst weekday
const MIN_OVERCOMMITTED_SAME_DAY: usize = 2;
/// Occurrences before a mistake category becomes a pattern
const MIN_MISTAKES: usize = 3;
/// Mean mood at or below this is a low-mood pattern (1-10 scale)
const LOW_MOOD: f64 = 4.0;
/// Mean sleep quality at or below this is a poor-sleep pattern (1-10 scale)
const POOR_SLEEP: f64 = 5.0;

/// Monday-first, used for deterministic tie-breaking
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A detected pattern before reconciliation
///
/// Candidates carry no identity; whether one updates an existing pattern or
/// becomes a new record is decided by [`crate::patterns::reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCandidate {
    pub title: String,
    pub description: String,
    pub payload: PatternPayload,
}

/// Run all five detectors over a check-in history
///
/// The history is re-sorted descending by date defensively; store ordering
/// is a convention, not a guarantee. Returns an empty vector for histories
/// shorter than a week.
pub fn detect(history: &[CheckIn]) -> Vec<PatternCandidate> {
    if history.len() < MIN_HISTORY {
        tracing::debug!(
            records = history.len(),
            "Skipping detection, less than a week of history"
        );
        return Vec::new();
    }

    let mut recent: Vec<&CheckIn> = history.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let fortnight = &recent[..recent.len().min(FORTNIGHT_WINDOW)];
    let month = &recent[..recent.len().min(MISTAKE_WINDOW)];

    let mut candidates = Vec::new();
    candidates.extend(energy_pattern(fortnight));
    candidates.extend(overcommitment_pattern(fortnight));
    candidates.extend(mistake_patterns(month));
    candidates.extend(mood_pattern(fortnight));
    candidates.extend(sleep_pattern(fortnight));

    tracing::debug!(candidates = candidates.len(), "Detection pass complete");
    candidates
}

/// Day-of-week energy spread over the last fortnight of check-ins
fn energy_pattern(window: &[&CheckIn]) -> Option<PatternCandidate> {
    let mornings: Vec<(Weekday, f64)> = window
        .iter()
        .filter_map(|c| {
            c.morning
                .as_ref()
                .map(|m| (c.date.weekday(), f64::from(m.energy_level)))
        })
        .collect();

    if mornings.len() < MIN_SAMPLES {
        return None;
    }

    let average_energy =
        mornings.iter().map(|(_, e)| e).sum::<f64>() / mornings.len() as f64;

    // Per-weekday mean, Monday-first slots
    let mut by_day = [(0.0_f64, 0_usize); 7];
    for (weekday, energy) in &mornings {
        let slot = &mut by_day[weekday.num_days_from_monday() as usize];
        slot.0 += energy;
        slot.1 += 1;
    }

    let means: Vec<(Weekday, f64)> = WEEKDAYS
        .iter()
        .zip(by_day.iter())
        .filter(|(_, (_, count))| *count > 0)
        .map(|(weekday, (sum, count))| (*weekday, sum / *count as f64))
        .collect();

    if means.len() < MIN_DISTINCT_WEEKDAYS {
        return None;
    }

    // Strict comparisons keep the earliest weekday on ties
    let mut highest = means[0];
    let mut lowest = means[0];
    for &(weekday, mean) in &means[1..] {
        if mean > highest.1 {
            highest = (weekday, mean);
        }
        if mean < lowest.1 {
            lowest = (weekday, mean);
        }
    }

    if highest.1 - lowest.1 < ENERGY_SPREAD {
        return None;
    }

    Some(PatternCandidate {
        title: "Energy Pattern Detected".to_string(),
        description: format!(
            "Your energy is typically highest on {} and lowest on {}.",
            weekday_name(highest.0),
            weekday_name(lowest.0)
        ),
        payload: PatternPayload::Energy {
            highest_day: highest.0,
            lowest_day: lowest.0,
            average_energy,
        },
    })
}

/// Which weekday keeps ending up overcommitted
fn overcommitment_pattern(window: &[&CheckIn]) -> Option<PatternCandidate> {
    let overcommitted: Vec<Weekday> = window
        .iter()
        .filter(|c| {
            c.evening
                .as_ref()
                .and_then(|e| e.overcommitted)
                .unwrap_or(false)
        })
        .map(|c| c.date.weekday())
        .collect();

    if overcommitted.len() < MIN_OVERCOMMITTED {
        return None;
    }

    let mut counts = [0_usize; 7];
    for weekday in &overcommitted {
        counts[weekday.num_days_from_monday() as usize] += 1;
    }

    // Strict comparison keeps the earliest weekday on ties
    let mut worst = (WEEKDAYS[0], counts[0]);
    for i in 1..7 {
        if counts[i] > worst.1 {
            worst = (WEEKDAYS[i], counts[i]);
        }
    }

    if worst.1 < MIN_OVERCOMMITTED_SAME_DAY {
        return None;
    }

    Some(PatternCandidate {
        title: "Overcommitment Pattern".to_string(),
        description: format!(
            "You tend to overcommit on {}s. Consider scheduling lighter days.",
            weekday_name(worst.0)
        ),
        payload: PatternPayload::Overcommitment {
            day_of_week: worst.0,
            frequency: worst.1,
        },
    })
}

/// Recurring mistake categories over the last month of check-ins
///
/// Unlike the other detectors this one is plural: every category over the
/// threshold yields its own candidate, in lexical category order.
fn mistake_patterns(window: &[&CheckIn]) -> Vec<PatternCandidate> {
    let mut by_category: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for check_in in window {
        if let Some(evening) = &check_in.evening {
            for mistake in &evening.mistakes {
                *by_category.entry(mistake.category.as_str()).or_default() += 1;
            }
        }
    }

    by_category
        .into_iter()
        .filter(|(_, frequency)| *frequency >= MIN_MISTAKES)
        .map(|(category, frequency)| PatternCandidate {
            title: format!("Frequent Mistake: {}", category),
            description: format!(
                "This mistake has occurred {} times in the last 30 days. \
                 Consider strategies to address this.",
                frequency
            ),
            payload: PatternPayload::Mistake {
                category: category.to_string(),
                frequency,
            },
        })
        .collect()
}

/// Sustained low morning mood
fn mood_pattern(window: &[&CheckIn]) -> Option<PatternCandidate> {
    let moods: Vec<f64> = window
        .iter()
        .filter_map(|c| c.morning.as_ref().and_then(|m| m.emotional_state.as_ref()))
        .map(|state| f64::from(state.overall_mood))
        .collect();

    if moods.len() < MIN_SAMPLES {
        return None;
    }

    let average_mood = moods.iter().sum::<f64>() / moods.len() as f64;
    if average_mood > LOW_MOOD {
        return None;
    }

    Some(PatternCandidate {
        title: "Low Mood Pattern".to_string(),
        description: format!(
            "Your average mood has been low ({:.1}/10) over the past 2 weeks. \
             Consider reviewing coping strategies.",
            average_mood
        ),
        payload: PatternPayload::Mood { average_mood },
    })
}

/// Sustained poor sleep quality
fn sleep_pattern(window: &[&CheckIn]) -> Option<PatternCandidate> {
    let qualities: Vec<f64> = window
        .iter()
        .filter_map(|c| c.morning.as_ref().and_then(|m| m.sleep.as_ref()))
        .map(|sleep| f64::from(sleep.quality))
        .collect();

    if qualities.len() < MIN_SAMPLES {
        return None;
    }

    let average_sleep_quality = qualities.iter().sum::<f64>() / qualities.len() as f64;
    if average_sleep_quality > POOR_SLEEP {
        return None;
    }

    Some(PatternCandidate {
        title: "Sleep Quality Pattern".to_string(),
        description: format!(
            "Your average sleep quality has been low ({:.1}/10). \
             Poor sleep may be affecting your daily functioning.",
            average_sleep_quality
        ),
        payload: PatternPayload::Sleep { average_sleep_quality },
    })
}

/// Full weekday name for descriptions
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{
        EmotionalState, EveningEntry, MistakeEntry, MorningEntry, SleepRecord,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_morning(day: NaiveDate, energy: u8) -> CheckIn {
        CheckIn::new(day).morning(MorningEntry::new(energy, 5))
    }

    fn with_mood(day: NaiveDate, mood: u8) -> CheckIn {
        CheckIn::new(day).morning(MorningEntry::new(5, 5).emotional_state(EmotionalState::new(mood)))
    }

    fn with_sleep(day: NaiveDate, quality: u8) -> CheckIn {
        CheckIn::new(day).morning(MorningEntry::new(5, 5).sleep(SleepRecord::new(quality, 7.0)))
    }

    fn with_overcommitted(day: NaiveDate, overcommitted: bool) -> CheckIn {
        CheckIn::new(day).evening(EveningEntry::new(5).overcommitted(overcommitted))
    }

    fn with_mistakes(day: NaiveDate, categories: &[&str]) -> CheckIn {
        let mut evening = EveningEntry::new(5);
        for category in categories {
            evening = evening.mistake(MistakeEntry::new(*category));
        }
        CheckIn::new(day).evening(evening)
    }

    fn refs(history: &[CheckIn]) -> Vec<&CheckIn> {
        history.iter().collect()
    }

    #[test]
    fn test_detect_requires_a_week_of_history() {
        // Six days of data that would trip the mood detector if allowed
        let history: Vec<CheckIn> = (1..=6).map(|d| with_mood(date(2024, 1, d), 2)).collect();
        assert!(detect(&history).is_empty());

        // The seventh record is only six mood samples away from the guard,
        // so extend to seven full records and the pattern appears
        let history: Vec<CheckIn> = (1..=7).map(|d| with_mood(date(2024, 1, d), 2)).collect();
        assert_eq!(detect(&history).len(), 1);
    }

    #[test]
    fn test_energy_pattern_at_spread_threshold() {
        // 2024-01-01 is a Monday. Monday mean 8.0, Tuesday mean 6.0,
        // Wednesday mean 7.0: spread exactly 2.0.
        let history = vec![
            with_morning(date(2024, 1, 1), 8),
            with_morning(date(2024, 1, 8), 8),
            with_morning(date(2024, 1, 15), 8),
            with_morning(date(2024, 1, 22), 8),
            with_morning(date(2024, 1, 2), 6),
            with_morning(date(2024, 1, 9), 6),
            with_morning(date(2024, 1, 3), 7),
            with_morning(date(2024, 1, 10), 7),
        ];

        let candidate = energy_pattern(&refs(&history)).expect("spread of 2.0 must emit");
        match candidate.payload {
            PatternPayload::Energy {
                highest_day,
                lowest_day,
                average_energy,
            } => {
                assert_eq!(highest_day, Weekday::Mon);
                assert_eq!(lowest_day, Weekday::Tue);
                // (4*8 + 2*6 + 2*7) / 8
                assert!((average_energy - 7.25).abs() < 1e-9);
            }
            other => panic!("expected energy payload, got {:?}", other),
        }
        assert!(candidate.description.contains("Monday"));
        assert!(candidate.description.contains("Tuesday"));
    }

    #[test]
    fn test_energy_pattern_below_spread_threshold() {
        // Monday mean 8.4 (8,8,9,8,9), Tuesday mean 6.5 (6,7): spread 1.9
        let history = vec![
            with_morning(date(2024, 1, 1), 8),
            with_morning(date(2024, 1, 8), 8),
            with_morning(date(2024, 1, 15), 9),
            with_morning(date(2024, 1, 22), 8),
            with_morning(date(2024, 1, 29), 9),
            with_morning(date(2024, 1, 2), 6),
            with_morning(date(2024, 1, 9), 7),
            with_morning(date(2024, 1, 3), 7),
        ];

        assert!(energy_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_energy_pattern_needs_three_distinct_weekdays() {
        // Spread is 2.0 but only Mondays and Tuesdays are represented
        let history = vec![
            with_morning(date(2024, 1, 1), 8),
            with_morning(date(2024, 1, 8), 8),
            with_morning(date(2024, 1, 15), 8),
            with_morning(date(2024, 1, 22), 8),
            with_morning(date(2024, 1, 2), 6),
            with_morning(date(2024, 1, 9), 6),
            with_morning(date(2024, 1, 16), 6),
        ];

        assert!(energy_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_energy_pattern_needs_seven_morning_samples() {
        // Eight records but only six carry a morning entry
        let mut history = vec![
            with_morning(date(2024, 1, 1), 8),
            with_morning(date(2024, 1, 8), 8),
            with_morning(date(2024, 1, 2), 6),
            with_morning(date(2024, 1, 9), 6),
            with_morning(date(2024, 1, 3), 7),
            with_morning(date(2024, 1, 10), 7),
        ];
        history.push(CheckIn::new(date(2024, 1, 4)));
        history.push(CheckIn::new(date(2024, 1, 5)));

        assert!(energy_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_energy_pattern_only_sees_the_fortnight_window() {
        // The low-energy Tuesdays sit beyond the 14 most recent check-ins,
        // so the remaining window has no 2.0 spread.
        let mut history: Vec<CheckIn> = (8..=21)
            .map(|d| with_morning(date(2024, 2, d), 7))
            .collect();
        history.push(with_morning(date(2024, 2, 6), 3));
        history.push(with_morning(date(2024, 2, 5), 3));

        assert!(detect(&history)
            .iter()
            .all(|c| !matches!(c.payload, PatternPayload::Energy { .. })));
    }

    #[test]
    fn test_overcommitment_pattern_with_repeat_weekday() {
        // Three overcommitted evenings, two of them Mondays
        let history = vec![
            with_overcommitted(date(2024, 1, 1), true),
            with_overcommitted(date(2024, 1, 8), true),
            with_overcommitted(date(2024, 1, 4), true),
            with_overcommitted(date(2024, 1, 2), false),
            with_overcommitted(date(2024, 1, 3), false),
        ];

        let candidate =
            overcommitment_pattern(&refs(&history)).expect("repeat weekday must emit");
        match candidate.payload {
            PatternPayload::Overcommitment {
                day_of_week,
                frequency,
            } => {
                assert_eq!(day_of_week, Weekday::Mon);
                assert_eq!(frequency, 2, "frequency counts the single worst day");
            }
            other => panic!("expected overcommitment payload, got {:?}", other),
        }
        assert!(candidate.description.contains("Mondays"));
    }

    #[test]
    fn test_overcommitment_pattern_needs_three_total() {
        // Two overcommitted Mondays alone are not enough
        let history = vec![
            with_overcommitted(date(2024, 1, 1), true),
            with_overcommitted(date(2024, 1, 8), true),
            with_overcommitted(date(2024, 1, 2), false),
        ];

        assert!(overcommitment_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_overcommitment_pattern_needs_a_repeat_weekday() {
        // Three overcommitted evenings on three different weekdays
        let history = vec![
            with_overcommitted(date(2024, 1, 1), true),
            with_overcommitted(date(2024, 1, 2), true),
            with_overcommitted(date(2024, 1, 3), true),
        ];

        assert!(overcommitment_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_overcommitment_ignores_unanswered_evenings() {
        // None (unanswered) is not the same as false, and neither counts
        let history = vec![
            CheckIn::new(date(2024, 1, 1)).evening(EveningEntry::new(5)),
            with_overcommitted(date(2024, 1, 8), true),
            with_overcommitted(date(2024, 1, 15), true),
            with_overcommitted(date(2024, 1, 4), true),
        ];

        let candidate = overcommitment_pattern(&refs(&history)).unwrap();
        match candidate.payload {
            PatternPayload::Overcommitment { frequency, .. } => assert_eq!(frequency, 2),
            other => panic!("expected overcommitment payload, got {:?}", other),
        }
    }

    #[test]
    fn test_mistake_pattern_at_threshold() {
        let history = vec![
            with_mistakes(date(2024, 1, 1), &["Skipped Meals"]),
            with_mistakes(date(2024, 1, 2), &["Skipped Meals", "No Breaks"]),
            with_mistakes(date(2024, 1, 3), &["Skipped Meals", "No Breaks"]),
        ];

        let candidates = mistake_patterns(&refs(&history));
        assert_eq!(candidates.len(), 1, "No Breaks is below threshold");
        match &candidates[0].payload {
            PatternPayload::Mistake {
                category,
                frequency,
            } => {
                assert_eq!(category, "Skipped Meals");
                assert_eq!(*frequency, 3);
            }
            other => panic!("expected mistake payload, got {:?}", other),
        }
        assert_eq!(candidates[0].title, "Frequent Mistake: Skipped Meals");
    }

    #[test]
    fn test_mistake_pattern_below_threshold() {
        let history = vec![
            with_mistakes(date(2024, 1, 1), &["Skipped Meals"]),
            with_mistakes(date(2024, 1, 2), &["Skipped Meals"]),
        ];

        assert!(mistake_patterns(&refs(&history)).is_empty());
    }

    #[test]
    fn test_two_mistake_categories_emit_two_candidates() {
        let history = vec![
            with_mistakes(date(2024, 1, 1), &["Time Blindness", "No Breaks"]),
            with_mistakes(date(2024, 1, 2), &["Time Blindness", "No Breaks"]),
            with_mistakes(date(2024, 1, 3), &["Time Blindness", "No Breaks"]),
        ];

        let candidates = mistake_patterns(&refs(&history));
        assert_eq!(candidates.len(), 2);
        // Lexical category order
        assert!(matches!(
            &candidates[0].payload,
            PatternPayload::Mistake { category, .. } if category == "No Breaks"
        ));
        assert!(matches!(
            &candidates[1].payload,
            PatternPayload::Mistake { category, .. } if category == "Time Blindness"
        ));
    }

    #[test]
    fn test_mistake_pattern_only_sees_the_month_window() {
        // 31 check-ins; the oldest carries the third occurrence, which falls
        // outside the 30-record window.
        let mut history: Vec<CheckIn> = Vec::new();
        history.push(with_mistakes(date(2024, 1, 1), &["Task Avoidance"]));
        for d in 2..=29 {
            history.push(with_mistakes(date(2024, 1, d), &[]));
        }
        history.push(with_mistakes(date(2024, 1, 30), &["Task Avoidance"]));
        history.push(with_mistakes(date(2024, 1, 31), &["Task Avoidance"]));

        assert!(detect(&history)
            .iter()
            .all(|c| !matches!(c.payload, PatternPayload::Mistake { .. })));
    }

    #[test]
    fn test_mood_pattern_at_threshold() {
        let history: Vec<CheckIn> = (1..=7).map(|d| with_mood(date(2024, 1, d), 4)).collect();

        let candidate = mood_pattern(&refs(&history)).expect("mean of exactly 4.0 must emit");
        match candidate.payload {
            PatternPayload::Mood { average_mood } => assert!((average_mood - 4.0).abs() < 1e-9),
            other => panic!("expected mood payload, got {:?}", other),
        }
        assert!(candidate.description.contains("4.0/10"));
    }

    #[test]
    fn test_mood_pattern_above_threshold() {
        let mut history: Vec<CheckIn> = (1..=6).map(|d| with_mood(date(2024, 1, d), 4)).collect();
        history.push(with_mood(date(2024, 1, 7), 5));

        assert!(mood_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_mood_pattern_needs_seven_samples() {
        // Seven mornings, but only six carry an emotional state
        let mut history: Vec<CheckIn> = (1..=6).map(|d| with_mood(date(2024, 1, d), 2)).collect();
        history.push(with_morning(date(2024, 1, 7), 5));

        assert!(mood_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_sleep_pattern_at_threshold() {
        let history: Vec<CheckIn> = (1..=7).map(|d| with_sleep(date(2024, 1, d), 5)).collect();

        let candidate = sleep_pattern(&refs(&history)).expect("mean of exactly 5.0 must emit");
        match candidate.payload {
            PatternPayload::Sleep {
                average_sleep_quality,
            } => assert!((average_sleep_quality - 5.0).abs() < 1e-9),
            other => panic!("expected sleep payload, got {:?}", other),
        }
    }

    #[test]
    fn test_sleep_pattern_above_threshold() {
        let history: Vec<CheckIn> = (1..=7).map(|d| with_sleep(date(2024, 1, d), 6)).collect();
        assert!(sleep_pattern(&refs(&history)).is_none());
    }

    #[test]
    fn test_detect_combines_independent_detectors() {
        // Seven days with low mood, poor sleep, and a recurring mistake
        let history: Vec<CheckIn> = (1..=7)
            .map(|d| {
                CheckIn::new(date(2024, 1, d))
                    .morning(
                        MorningEntry::new(5, 5)
                            .emotional_state(EmotionalState::new(3))
                            .sleep(SleepRecord::new(4, 6.0)),
                    )
                    .evening(EveningEntry::new(4).mistake(MistakeEntry::new("No Breaks")))
            })
            .collect();

        let candidates = detect(&history);
        assert_eq!(candidates.len(), 3);
        assert!(candidates
            .iter()
            .any(|c| matches!(c.payload, PatternPayload::Mood { .. })));
        assert!(candidates
            .iter()
            .any(|c| matches!(c.payload, PatternPayload::Sleep { .. })));
        assert!(candidates
            .iter()
            .any(|c| matches!(c.payload, PatternPayload::Mistake { .. })));
    }

    #[test]
    fn test_detect_resorts_unordered_history() {
        // Ascending input must behave identically to descending input
        let mut history: Vec<CheckIn> = (1..=7).map(|d| with_mood(date(2024, 1, d), 3)).collect();
        let ascending = detect(&history);
        history.reverse();
        let descending = detect(&history);

        assert_eq!(ascending, descending);
        assert_eq!(ascending.len(), 1);
    }
}
