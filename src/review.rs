//! Weekly review
//!
//! Aggregate statistics over one week of check-ins, plus a plain-text
//! report. Read-only: nothing here feeds back into pattern detection.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::journal::CheckIn;

/// Statistics for one week of check-ins
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    /// First day of the week (inclusive)
    pub week_start: NaiveDate,
    /// Last day of the week (inclusive)
    pub week_end: NaiveDate,
    /// Days with at least one entry recorded
    pub days_checked_in: usize,
    /// Mean morning energy, if any mornings were recorded
    pub average_energy: Option<f64>,
    /// Mean morning mood, if any morning emotional states were recorded
    pub average_mood: Option<f64>,
    /// Evenings where the must-do was marked completed
    pub must_dos_completed: usize,
    /// Evenings recorded at all
    pub evenings_recorded: usize,
    /// Evenings marked overcommitted
    pub overcommitted_days: usize,
    /// Mistake categories with counts, most frequent first
    pub mistake_counts: Vec<(String, usize)>,
}

impl WeeklySummary {
    /// Render the summary as the review-screen text report
    pub fn render(&self) -> String {
        let mut report = format!(
            "Weekly Review: {} - {}\n\n",
            self.week_start.format("%Y-%m-%d"),
            self.week_end.format("%Y-%m-%d")
        );

        report.push_str(&format!("  Days checked in: {}/7\n", self.days_checked_in));

        if let Some(energy) = self.average_energy {
            report.push_str(&format!("  Average Energy Level: {:.1}/10\n", energy));
        }
        if let Some(mood) = self.average_mood {
            report.push_str(&format!("  Average Mood: {:.1}/10\n", mood));
        }

        report.push_str(&format!(
            "  Must-dos completed: {} of {} evenings\n",
            self.must_dos_completed, self.evenings_recorded
        ));
        report.push_str(&format!(
            "  Days Overcommitted: {}\n",
            self.overcommitted_days
        ));

        if !self.mistake_counts.is_empty() {
            report.push_str("\nCommon mistakes:\n");
            for (category, count) in &self.mistake_counts {
                report.push_str(&format!("  - {}: {} times\n", category, count));
            }
        }

        report
    }
}

/// Summarize the week starting at `week_start`
///
/// Only check-ins inside `[week_start, week_start + 6]` contribute; callers
/// may pass a wider slice.
pub fn weekly_summary(check_ins: &[CheckIn], week_start: NaiveDate) -> WeeklySummary {
    let week_end = week_start + Duration::days(6);
    let week: Vec<&CheckIn> = check_ins
        .iter()
        .filter(|c| c.date >= week_start && c.date <= week_end)
        .collect();

    let energies: Vec<f64> = week
        .iter()
        .filter_map(|c| c.morning.as_ref())
        .map(|m| f64::from(m.energy_level))
        .collect();
    let average_energy = mean(&energies);

    let moods: Vec<f64> = week
        .iter()
        .filter_map(|c| c.morning.as_ref().and_then(|m| m.emotional_state.as_ref()))
        .map(|state| f64::from(state.overall_mood))
        .collect();
    let average_mood = mean(&moods);

    let evenings_recorded = week.iter().filter(|c| c.evening.is_some()).count();
    let must_dos_completed = week
        .iter()
        .filter(|c| {
            c.evening
                .as_ref()
                .and_then(|e| e.must_do_completed)
                .unwrap_or(false)
        })
        .count();
    let overcommitted_days = week
        .iter()
        .filter(|c| {
            c.evening
                .as_ref()
                .and_then(|e| e.overcommitted)
                .unwrap_or(false)
        })
        .count();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for check_in in &week {
        if let Some(evening) = &check_in.evening {
            for mistake in &evening.mistakes {
                *counts.entry(mistake.category.as_str()).or_default() += 1;
            }
        }
    }
    let mut mistake_counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    // Most frequent first; name order breaks ties
    mistake_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    WeeklySummary {
        week_start,
        week_end,
        days_checked_in: week.len(),
        average_energy,
        average_mood,
        must_dos_completed,
        evenings_recorded,
        overcommitted_days,
        mistake_counts,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EmotionalState, EveningEntry, MistakeEntry, MorningEntry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_week() -> Vec<CheckIn> {
        // Week of Monday 2024-01-01
        vec![
            CheckIn::new(date(2024, 1, 1))
                .morning(MorningEntry::new(8, 7).emotional_state(EmotionalState::new(7)))
                .evening(
                    EveningEntry::new(6)
                        .must_do_completed(true)
                        .overcommitted(false),
                ),
            CheckIn::new(date(2024, 1, 2))
                .morning(MorningEntry::new(6, 5).emotional_state(EmotionalState::new(5)))
                .evening(
                    EveningEntry::new(4)
                        .must_do_completed(false)
                        .overcommitted(true)
                        .mistake(MistakeEntry::new("No Breaks")),
                ),
            CheckIn::new(date(2024, 1, 3)).morning(MorningEntry::new(7, 6)),
            CheckIn::new(date(2024, 1, 4)).evening(
                EveningEntry::new(5)
                    .must_do_completed(true)
                    .overcommitted(true)
                    .mistake(MistakeEntry::new("No Breaks"))
                    .mistake(MistakeEntry::new("Skipped Meals")),
            ),
            // Next Monday, outside the week
            CheckIn::new(date(2024, 1, 8)).morning(MorningEntry::new(1, 1)),
        ]
    }

    #[test]
    fn test_weekly_summary_statistics() {
        let summary = weekly_summary(&sample_week(), date(2024, 1, 1));

        assert_eq!(summary.week_end, date(2024, 1, 7));
        assert_eq!(summary.days_checked_in, 4);
        // (8 + 6 + 7) / 3
        assert!((summary.average_energy.unwrap() - 7.0).abs() < 1e-9);
        // (7 + 5) / 2
        assert!((summary.average_mood.unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(summary.evenings_recorded, 3);
        assert_eq!(summary.must_dos_completed, 2);
        assert_eq!(summary.overcommitted_days, 2);
        assert_eq!(
            summary.mistake_counts,
            vec![
                ("No Breaks".to_string(), 2),
                ("Skipped Meals".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_empty_week_has_no_averages() {
        let summary = weekly_summary(&[], date(2024, 1, 1));

        assert_eq!(summary.days_checked_in, 0);
        assert!(summary.average_energy.is_none());
        assert!(summary.average_mood.is_none());
        assert!(summary.mistake_counts.is_empty());
    }

    #[test]
    fn test_render_includes_key_lines() {
        let report = weekly_summary(&sample_week(), date(2024, 1, 1)).render();

        assert!(report.contains("Weekly Review: 2024-01-01 - 2024-01-07"));
        assert!(report.contains("Days checked in: 4/7"));
        assert!(report.contains("Average Energy Level: 7.0/10"));
        assert!(report.contains("- No Breaks: 2 times"));
    }
}
