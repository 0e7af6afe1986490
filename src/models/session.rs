//! Timetable (solution) model.
//!
//! A timetable is the ordered list of sessions committed during one
//! allocation run. Sessions are appended once and never revised.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{SlotCoordinate, TimeKey};

/// One scheduled meeting of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// Section id.
    pub section_id: String,
    /// Week of term.
    pub week: u32,
    /// Day of week.
    pub day: u32,
    /// Slot of day.
    pub slot: u32,
    /// Room number.
    pub room: u32,
    /// Elective block, when the block conflict model is in use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<u32>,
}

impl ScheduledSession {
    /// Creates a session at a coordinate.
    pub fn new(section_id: impl Into<String>, at: SlotCoordinate) -> Self {
        Self {
            section_id: section_id.into(),
            week: at.week,
            day: at.day,
            slot: at.slot,
            room: at.room,
            block: None,
        }
    }

    /// Sets the block id.
    pub fn with_block(mut self, block: Option<u32>) -> Self {
        self.block = block;
        self
    }

    /// The session's `(week, day, slot, room)`.
    #[inline]
    pub fn coordinate(&self) -> SlotCoordinate {
        SlotCoordinate::new(self.week, self.day, self.slot, self.room)
    }

    /// The session's `(week, day, slot)`.
    #[inline]
    pub fn time_key(&self) -> TimeKey {
        TimeKey::new(self.week, self.day, self.slot)
    }
}

/// Ordered list of scheduled sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Sessions in commit order.
    pub sessions: Vec<ScheduledSession>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a session.
    pub fn add_session(&mut self, session: ScheduledSession) {
        self.sessions.push(session);
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Whether any session carries a block id.
    pub fn uses_blocks(&self) -> bool {
        self.sessions.iter().any(|s| s.block.is_some())
    }

    /// Sessions of one section, in commit order.
    pub fn sessions_for_section(&self, section_id: &str) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| s.section_id == section_id)
            .collect()
    }

    /// The session occupying a coordinate.
    pub fn session_at(&self, at: &SlotCoordinate) -> Option<&ScheduledSession> {
        self.sessions.iter().find(|s| s.coordinate() == *at)
    }

    /// Session count per section id.
    pub fn count_by_section(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for s in &self.sessions {
            *counts.entry(s.section_id.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
