//! Section builder.
//!
//! # Algorithm (per course)
//!
//! 1. Apply the dedup policy to the cleaned roster.
//! 2. Skip the course if no students remain.
//! 3. `n <= section_limit`: one section `{course}_A` with everyone.
//! 4. Otherwise two sections: the first `n / 2` students in `{course}_A`,
//!    the rest in `{course}_B` (71 students → 35 / 36).
//!
//! Under [`PartitionPolicy::ProgramHalves`] the split happens once over the
//! union of all students (first-seen order) and every course is intersected
//! with each half instead.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{DedupPolicy, PartitionPolicy};
use crate::config::TimetableConfig;
use crate::models::{CourseSummary, RosterBook, Section, SectionSet, SectionSuffix};

/// Sections produced from a roster book, with the per-course summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionPlan {
    /// Sections in creation order, with indices.
    pub sections: SectionSet,
    /// One entry per course that produced at least one section.
    pub summaries: Vec<CourseSummary>,
}

impl SectionPlan {
    /// Total effective enrollment across courses.
    pub fn total_enrollment(&self) -> usize {
        self.summaries.iter().map(|s| s.enrollment).sum()
    }
}

/// Builds sections from rosters.
///
/// # Example
///
/// ```
/// use u_timetable::models::{CourseRoster, RosterBook};
/// use u_timetable::sections::SectionBuilder;
///
/// let students: Vec<String> = (1..=85).map(|i| format!("S{i:03}")).collect();
/// let book = RosterBook::new().with_roster(CourseRoster::from_cells("FIN101", &students));
///
/// let plan = SectionBuilder::new().build(&book);
/// assert_eq!(plan.sections.ids(), vec!["FIN101_A", "FIN101_B"]);
/// assert_eq!(plan.sections.get("FIN101_A").unwrap().size(), 42);
/// assert_eq!(plan.sections.get("FIN101_B").unwrap().size(), 43);
/// ```
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    section_limit: usize,
    dedup: DedupPolicy,
    partition: PartitionPolicy,
}

impl SectionBuilder {
    /// Creates a builder with the default limit (70) and policies.
    pub fn new() -> Self {
        Self {
            section_limit: 70,
            dedup: DedupPolicy::default(),
            partition: PartitionPolicy::default(),
        }
    }

    /// Creates a builder from configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self {
            section_limit: config.section_limit,
            dedup: config.dedup,
            partition: config.partition,
        }
    }

    /// Sets the maximum size of an unsplit section.
    pub fn with_section_limit(mut self, limit: usize) -> Self {
        self.section_limit = limit;
        self
    }

    /// Sets the dedup policy.
    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Sets the partition policy.
    pub fn with_partition(mut self, partition: PartitionPolicy) -> Self {
        self.partition = partition;
        self
    }

    /// Builds sections for every course in the book.
    pub fn build(&self, book: &RosterBook) -> SectionPlan {
        let courses: Vec<(&str, Vec<String>)> = book
            .iter()
            .map(|r| (r.course.as_str(), self.dedup.apply(&r.students)))
            .collect();

        let mut sections = Vec::new();
        let mut summaries = Vec::new();

        match self.partition {
            PartitionPolicy::PerCourse => {
                for (course, students) in courses {
                    self.split_course(course, students, &mut sections, &mut summaries);
                }
            }
            PartitionPolicy::ProgramHalves => {
                program_halves(courses, &mut sections, &mut summaries);
            }
        }

        let plan = SectionPlan {
            sections: SectionSet::new(sections),
            summaries,
        };
        info!(
            courses = plan.summaries.len(),
            sections = plan.sections.len(),
            students = plan.sections.student_count(),
            partition = %self.partition,
            "sections created"
        );
        plan
    }

    fn split_course(
        &self,
        course: &str,
        students: Vec<String>,
        sections: &mut Vec<Section>,
        summaries: &mut Vec<CourseSummary>,
    ) {
        let n = students.len();
        if n == 0 {
            debug!(course, "no usable students, course skipped");
            return;
        }

        let before = sections.len();
        if n <= self.section_limit {
            sections.push(Section::new(course, SectionSuffix::A).with_students(students));
        } else {
            let mut first = students;
            let second = first.split_off(n / 2);
            if second.len() > self.section_limit {
                warn!(
                    course,
                    enrollment = n,
                    limit = self.section_limit,
                    "course exceeds two sections' worth of students, halves are oversized"
                );
            }
            sections.push(Section::new(course, SectionSuffix::A).with_students(first));
            sections.push(Section::new(course, SectionSuffix::B).with_students(second));
        }

        let created = sections.len() - before;
        debug!(course, enrollment = n, sections = created, "course sectioned");
        summaries.push(CourseSummary {
            course: course.to_string(),
            enrollment: n,
            sections_created: created,
        });
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the cohort once and intersects each course with both halves.
fn program_halves(
    courses: Vec<(&str, Vec<String>)>,
    sections: &mut Vec<Section>,
    summaries: &mut Vec<CourseSummary>,
) {
    let mut seen = HashSet::new();
    let union: Vec<&str> = courses
        .iter()
        .flat_map(|(_, students)| students.iter().map(String::as_str))
        .filter(|s| seen.insert(*s))
        .collect();
    let first_half: HashSet<&str> = union[..union.len() / 2].iter().copied().collect();
    debug!(
        cohort = union.len(),
        first_half = first_half.len(),
        "program split into halves"
    );

    for (course, students) in &courses {
        if students.is_empty() {
            debug!(course, "no usable students, course skipped");
            continue;
        }
        let (a, b): (Vec<String>, Vec<String>) = students
            .iter()
            .cloned()
            .partition(|s| first_half.contains(s.as_str()));

        let before = sections.len();
        for (suffix, members) in [(SectionSuffix::A, a), (SectionSuffix::B, b)] {
            if !members.is_empty() {
                sections.push(Section::new(*course, suffix).with_students(members));
            }
        }
        summaries.push(CourseSummary {
            course: course.to_string(),
            enrollment: students.len(),
            sections_created: sections.len() - before,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRoster;

    fn roster(course: &str, n: usize) -> CourseRoster {
        CourseRoster::from_cells(course, (1..=n).map(|i| format!("{course}-{i:03}")))
    }

    #[test]
    fn test_small_course_single_section() {
        let book = RosterBook::new().with_roster(roster("ACC", 70));
        let plan = SectionBuilder::new().build(&book);
        assert_eq!(plan.sections.ids(), vec!["ACC_A"]);
        assert_eq!(plan.sections.get("ACC_A").unwrap().size(), 70);
        assert_eq!(
            plan.summaries,
            vec![CourseSummary {
                course: "ACC".into(),
                enrollment: 70,
                sections_created: 1
            }]
        );
    }

    #[test]
    fn test_split_uses_floor_midpoint() {
        let book = RosterBook::new().with_roster(roster("ECO", 71));
        let plan = SectionBuilder::new().build(&book);
        let a = plan.sections.get("ECO_A").unwrap();
        let b = plan.sections.get("ECO_B").unwrap();
        assert_eq!(a.size(), 35);
        assert_eq!(b.size(), 36);
        // Contiguous halves in roster order
        assert_eq!(a.students[0], "ECO-001");
        assert_eq!(a.students[34], "ECO-035");
        assert_eq!(b.students[0], "ECO-036");
    }

    #[test]
    fn test_split_always_yields_both_halves() {
        // A zero limit is rejected by config validation but not by the builder
        let book = RosterBook::new().with_roster(roster("X", 1));
        let plan = SectionBuilder::new().with_section_limit(0).build(&book);
        assert_eq!(plan.sections.ids(), vec!["X_A", "X_B"]);
        assert!(plan.sections.get("X_A").unwrap().students.is_empty());
        assert_eq!(plan.sections.get("X_B").unwrap().size(), 1);
        assert_eq!(plan.summaries[0].sections_created, 2);
    }

    #[test]
    fn test_empty_course_skipped() {
        let book = RosterBook::new()
            .with_roster(CourseRoster::from_cells("EMPTY", ["", "  "]))
            .with_roster(roster("OPS", 3));
        let plan = SectionBuilder::new().build(&book);
        assert_eq!(plan.sections.ids(), vec!["OPS_A"]);
        assert_eq!(plan.summaries.len(), 1);
        assert_eq!(plan.total_enrollment(), 3);
    }

    #[test]
    fn test_custom_limit() {
        let book = RosterBook::new().with_roster(roster("HR", 11));
        let plan = SectionBuilder::new().with_section_limit(10).build(&book);
        assert_eq!(plan.sections.len(), 2);
        assert_eq!(plan.sections.get("HR_A").unwrap().size(), 5);
        assert_eq!(plan.sections.get("HR_B").unwrap().size(), 6);
    }

    #[test]
    fn test_dedup_changes_effective_count() {
        let mut cells: Vec<String> = (1..=40).map(|i| format!("S{i}")).collect();
        cells.extend((1..=40).map(|i| format!("S{i}")));
        let book = RosterBook::new().with_roster(CourseRoster::from_cells("MKT", &cells));

        let preserved = SectionBuilder::new().build(&book);
        assert_eq!(preserved.sections.len(), 2);
        assert_eq!(preserved.summaries[0].enrollment, 80);

        let unique = SectionBuilder::new()
            .with_dedup(DedupPolicy::Unique)
            .build(&book);
        assert_eq!(unique.sections.len(), 1);
        assert_eq!(unique.summaries[0].enrollment, 40);
        assert_eq!(unique.sections.get("MKT_A").unwrap().students[0], "S1");
    }

    #[test]
    fn test_student_index_follows_creation_order() {
        let book = RosterBook::new()
            .with_roster(CourseRoster::from_cells("A", ["S1", "S2"]))
            .with_roster(CourseRoster::from_cells("B", ["S2", "S3"]));
        let plan = SectionBuilder::new().build(&book);
        assert_eq!(plan.sections.sections_of("S2"), ["A_A", "B_A"]);
        assert_eq!(plan.sections.sections_of("S1"), ["A_A"]);
    }

    #[test]
    fn test_program_halves() {
        // Union in first-seen order: S1 S2 S3 S4 S5 S6 → first half {S1, S2, S3}
        let book = RosterBook::new()
            .with_roster(CourseRoster::from_cells("X", ["S1", "S2", "S3", "S4"]))
            .with_roster(CourseRoster::from_cells("Y", ["S3", "S5", "S6"]))
            .with_roster(CourseRoster::from_cells("Z", ["S5", "S6"]));
        let plan = SectionBuilder::new()
            .with_partition(PartitionPolicy::ProgramHalves)
            .build(&book);

        assert_eq!(plan.sections.ids(), vec!["X_A", "X_B", "Y_A", "Y_B", "Z_B"]);
        assert_eq!(plan.sections.get("X_A").unwrap().students, vec!["S1", "S2", "S3"]);
        assert_eq!(plan.sections.get("X_B").unwrap().students, vec!["S4"]);
        assert_eq!(plan.sections.get("Y_A").unwrap().students, vec!["S3"]);
        assert_eq!(plan.sections.get("Y_B").unwrap().students, vec!["S5", "S6"]);
        assert_eq!(plan.summaries[2].sections_created, 1);
        assert_eq!(plan.summaries[2].enrollment, 2);
    }

    #[test]
    fn test_from_config() {
        let config = TimetableConfig::default()
            .with_section_limit(2)
            .with_dedup(DedupPolicy::Unique);
        let book = RosterBook::new().with_roster(CourseRoster::from_cells("Q", ["1", "1", "2", "3"]));
        let plan = SectionBuilder::from_config(&config).build(&book);
        assert_eq!(plan.sections.get("Q_A").unwrap().students, vec!["1"]);
        assert_eq!(plan.sections.get("Q_B").unwrap().students, vec!["2", "3"]);
    }
}
