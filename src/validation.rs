//! Timetable validation.
//!
//! Checks a finished timetable against the hard constraints and the
//! inputs it was built from. Detects:
//! - Room double-booking (two sessions at one `(week, day, slot, room)`)
//! - Student double-booking (one student in two sessions at one time)
//! - Block clashes (two sessions of one block at one time)
//! - Quota overruns
//! - Sessions of unknown sections
//! - Coordinates outside the calendar or the week's room pool
//!
//! All issues are collected; validation never stops at the first one.

use std::collections::{HashMap, HashSet};

use crate::models::{SectionSet, SlotCoordinate, TermCalendar, TimeKey, Timetable};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two sessions share a room at the same time.
    RoomDoubleBooked,
    /// A student attends two sessions at the same time.
    StudentDoubleBooked,
    /// Two sections of one block meet at the same time.
    BlockClash,
    /// A section received more sessions than its quota.
    QuotaExceeded,
    /// A session references a section that doesn't exist.
    UnknownSection,
    /// A session lies outside the calendar or its week's room pool.
    OutsideCalendar,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a timetable.
///
/// Checks:
/// 1. Every session references a known section
/// 2. Every coordinate lies inside the calendar and its week's room pool
/// 3. No coordinate hosts two sessions
/// 4. No student meets twice at one `(week, day, slot)`
/// 5. No block hosts two sessions at one `(week, day, slot)`
/// 6. No section exceeds `quota`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_timetable(
    timetable: &Timetable,
    sections: &SectionSet,
    calendar: &TermCalendar,
    quota: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut rooms: HashMap<SlotCoordinate, &str> = HashMap::new();
    let mut student_times: HashMap<(&str, TimeKey), &str> = HashMap::new();
    let mut block_times: HashMap<(u32, TimeKey), &str> = HashMap::new();
    let mut reported_students: HashSet<(&str, TimeKey)> = HashSet::new();

    for session in &timetable.sessions {
        let at = session.coordinate();
        let key = session.time_key();
        let id = session.section_id.as_str();

        if !calendar.contains(&at) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutsideCalendar,
                format!("Section '{id}' scheduled outside the calendar at {at}"),
            ));
        }

        if let Some(prev) = rooms.insert(at, id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::RoomDoubleBooked,
                format!("Room slot {at} booked by both '{prev}' and '{id}'"),
            ));
        }

        if let Some(block) = session.block {
            if let Some(prev) = block_times.insert((block, key), id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BlockClash,
                    format!("Block {block} runs '{prev}' and '{id}' together at {key}"),
                ));
            }
        }

        let Some(section) = sections.get(id) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSection,
                format!("Session references unknown section '{id}'"),
            ));
            continue;
        };

        // Only the per-student model promises this; block timetables skip it.
        if session.block.is_none() {
            let members: HashSet<&str> = section.students.iter().map(String::as_str).collect();
            for student in members {
                let entry = (student, key);
                let Some(prev) = student_times.insert(entry, id) else {
                    continue;
                };
                if reported_students.insert(entry) {
                    let message = if prev == id {
                        format!("Student '{student}' attends '{id}' twice at {key}")
                    } else {
                        format!("Student '{student}' attends '{prev}' and '{id}' at {key}")
                    };
                    errors.push(ValidationError::new(
                        ValidationErrorKind::StudentDoubleBooked,
                        message,
                    ));
                }
            }
        }
    }

    for (id, count) in timetable.count_by_section() {
        if count > quota {
            errors.push(ValidationError::new(
                ValidationErrorKind::QuotaExceeded,
                format!("Section '{id}' has {count} sessions, quota is {quota}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
