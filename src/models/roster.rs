//! Course rosters.
//!
//! A roster is the ordered list of student identifiers enrolled in one
//! course. Rosters arrive from an external reader (one spreadsheet sheet per
//! course) and are normalized here before sectioning.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Normalizes a raw student identifier cell.
///
/// Trims whitespace and drops blank or `NaN` cells. Integral numbers that
/// were read as floats (`"1001.0"`) are rendered without the fraction so the
/// same student keyed as text and as a number compares equal.
///
/// ```
/// use u_timetable::models::canonical_student_id;
///
/// assert_eq!(canonical_student_id("  S001 "), Some("S001".to_string()));
/// assert_eq!(canonical_student_id("1001.0"), Some("1001".to_string()));
/// assert_eq!(canonical_student_id("   "), None);
/// ```
pub fn canonical_student_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Some((int_part, frac)) = trimmed.split_once('.') {
        let integral = !int_part.is_empty()
            && int_part.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b == b'0');
        if integral {
            return Some(int_part.to_string());
        }
    }
    Some(trimmed.to_string())
}

/// The roster of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRoster {
    /// Course name (also the section id prefix).
    pub course: String,
    /// Student identifiers in roster order. May contain duplicates.
    pub students: Vec<String>,
}

impl CourseRoster {
    /// Creates an empty roster.
    pub fn new(course: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            students: Vec::new(),
        }
    }

    /// Builds a roster from raw cells, dropping cells that are not ids.
    pub fn from_cells<I, S>(course: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            course: course.into(),
            students: cells
                .into_iter()
                .filter_map(|c| canonical_student_id(c.as_ref()))
                .collect(),
        }
    }

    /// Adds a student (normalized; blanks are ignored).
    pub fn with_student(mut self, raw: impl AsRef<str>) -> Self {
        if let Some(id) = canonical_student_id(raw.as_ref()) {
            self.students.push(id);
        }
        self
    }

    /// Number of roster entries.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Insertion-ordered collection of course rosters keyed by course name.
///
/// Course names are not validated for uniqueness upstream. Inserting a
/// name that already exists replaces the earlier roster in its original
/// position (last definition wins) and logs a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterBook {
    rosters: Vec<CourseRoster>,
}

impl RosterBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a roster. Returns the roster it replaced, if any.
    pub fn insert(&mut self, roster: CourseRoster) -> Option<CourseRoster> {
        match self.rosters.iter_mut().find(|r| r.course == roster.course) {
            Some(existing) => {
                warn!(
                    course = %roster.course,
                    previous = existing.len(),
                    replacement = roster.len(),
                    "duplicate course name, later roster replaces earlier one"
                );
                Some(std::mem::replace(existing, roster))
            }
            None => {
                self.rosters.push(roster);
                None
            }
        }
    }

    /// Adds a roster (builder form of [`insert`](Self::insert)).
    pub fn with_roster(mut self, roster: CourseRoster) -> Self {
        self.insert(roster);
        self
    }

    /// Finds a roster by course name.
    pub fn get(&self, course: &str) -> Option<&CourseRoster> {
        self.rosters.iter().find(|r| r.course == course)
    }

    /// Rosters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CourseRoster> {
        self.rosters.iter()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.rosters.len()
    }

    /// Whether the book holds no courses.
    pub fn is_empty(&self) -> bool {
        self.rosters.is_empty()
    }
}

impl FromIterator<CourseRoster> for RosterBook {
    fn from_iter<T: IntoIterator<Item = CourseRoster>>(iter: T) -> Self {
        let mut book = Self::new();
        for roster in iter {
            book.insert(roster);
        }
        book
    }
}
