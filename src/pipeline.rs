//! End-to-end run: rosters → sections → timetable → report.
//!
//! Data flows one way. Sectioning never looks at allocation results and
//! nothing is carried over between runs.

use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::config::TimetableConfig;
use crate::models::{RosterBook, Timetable};
use crate::scheduler::{CompletionReport, GreedyAllocator};
use crate::sections::{SectionBuilder, SectionPlan};
use crate::validation::{validate_timetable, ValidationResult};

/// Everything produced by one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRun {
    /// Sections and per-course summary.
    pub plan: SectionPlan,
    /// Committed sessions.
    pub timetable: Timetable,
    /// Completion figures.
    pub report: CompletionReport,
}

impl TimetableRun {
    /// Re-checks the timetable against the hard constraints.
    pub fn validate(&self, config: &TimetableConfig) -> ValidationResult {
        validate_timetable(
            &self.timetable,
            &self.plan.sections,
            &config.calendar,
            config.sessions_per_section,
        )
    }
}

/// Builds sections from `book` and allocates sessions for them.
///
/// # Example
///
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::models::{CourseRoster, RosterBook};
/// use u_timetable::pipeline::run;
///
/// let book = RosterBook::new()
///     .with_roster(CourseRoster::from_cells("FIN101", ["S001", "S002"]))
///     .with_roster(CourseRoster::from_cells("MKT200", ["S002", "S003"]));
/// let config = TimetableConfig::default();
///
/// let result = run(&book, &config);
/// assert_eq!(result.report.required_sessions, 40);
/// assert!(result.report.is_complete());
/// assert!(result.validate(&config).is_ok());
/// ```
pub fn run(book: &RosterBook, config: &TimetableConfig) -> TimetableRun {
    let _span = info_span!("timetable_run", courses = book.len()).entered();

    let plan = SectionBuilder::from_config(config).build(book);
    let timetable = GreedyAllocator::from_config(config).allocate(&plan.sections);
    let report = CompletionReport::calculate(&timetable, &plan.sections, config.sessions_per_section);

    TimetableRun {
        plan,
        timetable,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::SectionOrdering;
    use crate::models::{CourseRoster, SlotCoordinate};
    use crate::scheduler::{ConflictPolicy, SlotOrdering};

    fn course(name: &str, ids: std::ops::Range<usize>) -> CourseRoster {
        CourseRoster::from_cells(name, ids.map(|i| format!("S{i:03}")))
    }

    #[test]
    fn test_fin101_scenario() {
        let book = RosterBook::new().with_roster(course("FIN101", 1..86));
        let config = TimetableConfig::default();
        let result = run(&book, &config);

        assert_eq!(result.plan.sections.ids(), vec!["FIN101_A", "FIN101_B"]);
        let a = result.timetable.sessions_for_section("FIN101_A");
        assert_eq!(a.len(), 20);
        assert_eq!(a[0].coordinate(), SlotCoordinate::new(1, 1, 1, 1));
        assert_eq!(a[1].coordinate(), SlotCoordinate::new(1, 1, 2, 1));
        assert!(a.iter().all(|s| s.week <= 4));

        // B has no students in common with A → shares A's times in room 2
        let b = result.timetable.sessions_for_section("FIN101_B");
        assert_eq!(b[0].coordinate(), SlotCoordinate::new(1, 1, 1, 2));
        assert!(result.report.is_complete());
        assert!(result.validate(&config).is_ok());
    }

    #[test]
    fn test_overloaded_cohort_under_schedules_without_failing() {
        // Every student is in every course → one session per time slot across the cohort
        let book: RosterBook = (0..12).map(|c| course(&format!("C{c}"), 0..10)).collect();
        let config = TimetableConfig::default();
        let result = run(&book, &config);

        // 10 weeks × 6 days × 6 slots = 360 distinct times, 12 × 20 = 240 required
        assert!(result.report.is_complete());

        let config = config.with_sessions_per_section(40);
        let result = run(&book, &config);
        assert_eq!(result.report.required_sessions, 480);
        assert_eq!(result.report.scheduled_sessions, 360);
        assert!((result.report.completion_rate - 75.0).abs() < 1e-10);
        assert!(result.validate(&config).is_ok());
    }

    #[test]
    fn test_every_policy_combination_is_valid_and_deterministic() {
        let book: RosterBook = (0..8)
            .map(|c| course(&format!("C{c}"), (c * 20)..(c * 20 + 90)))
            .collect();

        for slot_ordering in [SlotOrdering::FrontLoad, SlotOrdering::Spread] {
            for section_ordering in [
                SectionOrdering::Natural,
                SectionOrdering::LargestFirst,
                SectionOrdering::MostShared,
            ] {
                for conflicts in [
                    ConflictPolicy::Student,
                    ConflictPolicy::Block {
                        num_blocks: 3,
                        seed: 5,
                    },
                ] {
                    let config = TimetableConfig::default()
                        .with_slot_ordering(slot_ordering)
                        .with_section_ordering(section_ordering)
                        .with_conflicts(conflicts);
                    let first = run(&book, &config);
                    let second = run(&book, &config);
                    assert_eq!(first.timetable, second.timetable);
                    assert!(first.validate(&config).is_ok());

                    let expected = crate::scheduler::completion_rate(
                        first.timetable.len(),
                        first.plan.sections.len() * config.sessions_per_section,
                    );
                    assert!((first.report.completion_rate - expected).abs() < 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_empty_book() {
        let result = run(&RosterBook::new(), &TimetableConfig::default());
        assert!(result.plan.sections.is_empty());
        assert!(result.timetable.is_empty());
        assert!((result.report.completion_rate - 100.0).abs() < 1e-10);
    }
}
