//! Completion accounting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required | sections × session quota |
//! | Scheduled | sessions in the timetable |
//! | Completion rate | round(scheduled / required × 100, 2) |
//! | Under-scheduled | sections below quota, in section order |
//! | Sessions by week | load per week, for comparing slot orderings |
//!
//! A rate below 100 means the calendar ran out of conflict-free capacity,
//! not that allocation failed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{SectionSet, Timetable};

/// Sessions received by one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCompletion {
    /// Section id.
    pub section_id: String,
    /// Sessions scheduled.
    pub scheduled: usize,
    /// Sessions required.
    pub required: usize,
}

/// Outcome of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    /// Sessions required (sections × quota).
    pub required_sessions: usize,
    /// Sessions scheduled.
    pub scheduled_sessions: usize,
    /// Percentage rounded to two decimals.
    pub completion_rate: f64,
    /// Per-section counts, in section creation order.
    pub by_section: Vec<SectionCompletion>,
    /// Sessions per week.
    pub sessions_by_week: BTreeMap<u32, usize>,
}

impl CompletionReport {
    /// Computes completion figures for a timetable.
    ///
    /// With nothing required the rate is reported as 100.
    pub fn calculate(timetable: &Timetable, sections: &SectionSet, quota: usize) -> Self {
        let required_sessions = sections.len() * quota;
        let scheduled_sessions = timetable.len();

        let counts: HashMap<&str, usize> = timetable.count_by_section();
        let by_section = sections
            .iter()
            .map(|s| SectionCompletion {
                section_id: s.id.clone(),
                scheduled: counts.get(s.id.as_str()).copied().unwrap_or(0),
                required: quota,
            })
            .collect();

        let mut sessions_by_week = BTreeMap::new();
        for s in &timetable.sessions {
            *sessions_by_week.entry(s.week).or_insert(0) += 1;
        }

        let report = Self {
            required_sessions,
            scheduled_sessions,
            completion_rate: completion_rate(scheduled_sessions, required_sessions),
            by_section,
            sessions_by_week,
        };

        if !report.is_complete() {
            warn!(
                required = report.required_sessions,
                scheduled = report.scheduled_sessions,
                rate = report.completion_rate,
                under_scheduled = report.under_scheduled().len(),
                "capacity constraints prevented full scheduling"
            );
        }
        report
    }

    /// Whether every required session was placed.
    pub fn is_complete(&self) -> bool {
        self.scheduled_sessions >= self.required_sessions
    }

    /// Sections that received fewer sessions than required.
    pub fn under_scheduled(&self) -> Vec<&SectionCompletion> {
        self.by_section
            .iter()
            .filter(|s| s.scheduled < s.required)
            .collect()
    }

    /// Sessions the calendar could not place.
    pub fn missing_sessions(&self) -> usize {
        self.required_sessions.saturating_sub(self.scheduled_sessions)
    }
}

/// `round(scheduled / required * 100, 2)` with ties to even; 100 when
/// nothing is required.
pub fn completion_rate(scheduled: usize, required: usize) -> f64 {
    if required == 0 {
        return 100.0;
    }
    let pct = scheduled as f64 / required as f64 * 100.0;
    (pct * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduledSession, Section, SectionSuffix, SlotCoordinate};

    fn sample_sections() -> SectionSet {
        SectionSet::new(vec![
            Section::new("A", SectionSuffix::A).with_students(["S1"]),
            Section::new("B", SectionSuffix::A).with_students(["S2"]),
            Section::new("C", SectionSuffix::A).with_students(["S3"]),
        ])
    }

    #[test]
    fn test_completion_rate_rounding() {
        assert!((completion_rate(1, 3) - 33.33).abs() < 1e-10);
        assert!((completion_rate(2, 3) - 66.67).abs() < 1e-10);
        assert!((completion_rate(20, 20) - 100.0).abs() < 1e-10);
        assert!((completion_rate(0, 0) - 100.0).abs() < 1e-10);
        assert!((completion_rate(0, 5)).abs() < 1e-10);
    }

    #[test]
    fn test_completion_rate_ties_round_to_even() {
        // 8 sections × 20 required
        assert_eq!(completion_rate(13, 160), 8.12);
        assert_eq!(completion_rate(1, 160), 0.62);
        assert_eq!(completion_rate(5, 160), 3.12);
        assert_eq!(completion_rate(3, 160), 1.88);
    }

    #[test]
    fn test_report_partial() {
        let sections = sample_sections();
        let mut t = Timetable::new();
        t.add_session(ScheduledSession::new("A_A", SlotCoordinate::new(1, 1, 1, 1)));
        t.add_session(ScheduledSession::new("A_A", SlotCoordinate::new(1, 1, 2, 1)));
        t.add_session(ScheduledSession::new("B_A", SlotCoordinate::new(5, 1, 1, 1)));

        let r = CompletionReport::calculate(&t, &sections, 2);
        assert_eq!(r.required_sessions, 6);
        assert_eq!(r.scheduled_sessions, 3);
        assert!((r.completion_rate - 50.0).abs() < 1e-10);
        assert!(!r.is_complete());
        assert_eq!(r.missing_sessions(), 3);

        let under: Vec<&str> = r.under_scheduled().iter().map(|s| s.section_id.as_str()).collect();
        assert_eq!(under, vec!["B_A", "C_A"]);
        assert_eq!(r.sessions_by_week[&1], 2);
        assert_eq!(r.sessions_by_week[&5], 1);
    }

    #[test]
    fn test_report_complete() {
        let sections = SectionSet::new(vec![Section::new("A", SectionSuffix::A)]);
        let mut t = Timetable::new();
        t.add_session(ScheduledSession::new("A_A", SlotCoordinate::new(1, 1, 1, 1)));
        let r = CompletionReport::calculate(&t, &sections, 1);
        assert!(r.is_complete());
        assert!(r.under_scheduled().is_empty());
        assert!((r.completion_rate - 100.0).abs() < 1e-10);
    }
}
