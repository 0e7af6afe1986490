//! Section model.
//!
//! A section is a bounded teaching group cut from one course's roster,
//! identified by course name and an `A`/`B` suffix. Membership is fixed at
//! creation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Section suffix within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionSuffix {
    /// First (or only) section.
    A,
    /// Second section of a split course.
    B,
}

impl fmt::Display for SectionSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionSuffix::A => f.write_str("A"),
            SectionSuffix::B => f.write_str("B"),
        }
    }
}

/// Formats a section id: `"{course}_{suffix}"`.
pub fn section_id(course: &str, suffix: SectionSuffix) -> String {
    format!("{course}_{suffix}")
}

/// A teaching section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section id (`"{course}_{suffix}"`).
    pub id: String,
    /// Owning course.
    pub course: String,
    /// Suffix within the course.
    pub suffix: SectionSuffix,
    /// Member student ids.
    pub students: Vec<String>,
}

impl Section {
    /// Creates an empty section for a course.
    pub fn new(course: impl Into<String>, suffix: SectionSuffix) -> Self {
        let course = course.into();
        Self {
            id: section_id(&course, suffix),
            course,
            suffix,
            students: Vec::new(),
        }
    }

    /// Sets the member list.
    pub fn with_students<I, S>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.students = students.into_iter().map(Into::into).collect();
        self
    }

    /// Member count.
    #[inline]
    pub fn size(&self) -> usize {
        self.students.len()
    }

    /// Whether `student` belongs to this section.
    pub fn contains(&self, student: &str) -> bool {
        self.students.iter().any(|s| s == student)
    }
}

/// Per-course sectioning outcome, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course name.
    pub course: String,
    /// Effective enrollment after cleaning and deduplication.
    pub enrollment: usize,
    /// Number of sections created for the course.
    pub sections_created: usize,
}

/// The ordered section list with its lookup indices.
///
/// Holds sections in creation order, an id → position index, and the
/// derived student → sections index. Both indices are built once in
/// [`SectionSet::new`] and never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionSet {
    sections: Vec<Section>,
    by_id: HashMap<String, usize>,
    student_sections: HashMap<String, Vec<String>>,
}

impl SectionSet {
    /// Builds the set and its indices from sections in creation order.
    pub fn new(sections: Vec<Section>) -> Self {
        let mut by_id = HashMap::with_capacity(sections.len());
        let mut student_sections: HashMap<String, Vec<String>> = HashMap::new();

        for (idx, section) in sections.iter().enumerate() {
            by_id.insert(section.id.clone(), idx);
            for student in &section.students {
                let list = student_sections.entry(student.clone()).or_default();
                // A student listed twice in one roster still maps to the section once
                if list.last() != Some(&section.id) {
                    list.push(section.id.clone());
                }
            }
        }

        Self {
            sections,
            by_id,
            student_sections,
        }
    }

    /// Sections in creation order.
    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates sections in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section ids in creation order.
    pub fn ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Looks up a section by id.
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.by_id.get(id).map(|&i| &self.sections[i])
    }

    /// Sections a student belongs to, in creation order.
    pub fn sections_of(&self, student: &str) -> &[String] {
        self.student_sections
            .get(student)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Full student → sections index.
    pub fn student_index(&self) -> &HashMap<String, Vec<String>> {
        &self.student_sections
    }

    /// Number of distinct students across all sections.
    pub fn student_count(&self) -> usize {
        self.student_sections.len()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl From<Vec<Section>> for SectionSet {
    fn from(sections: Vec<Section>) -> Self {
        Self::new(sections)
    }
}

impl From<SectionSet> for Vec<Section> {
    fn from(set: SectionSet) -> Self {
        set.sections
    }
}
