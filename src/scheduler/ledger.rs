//! Usage ledgers for one allocation run.
//!
//! Ledgers only grow: entries are added when a session is committed and
//! are never removed. A fresh set is created per run.

use std::collections::{HashMap, HashSet};

use crate::models::{SlotCoordinate, TimeKey};

/// Occupied `(week, day, slot, room)` coordinates and their section.
#[derive(Debug, Clone, Default)]
pub struct RoomLedger {
    occupied: HashMap<SlotCoordinate, String>,
}

impl RoomLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the coordinate is still free.
    #[inline]
    pub fn is_free(&self, at: &SlotCoordinate) -> bool {
        !self.occupied.contains_key(at)
    }

    /// The section occupying a coordinate.
    pub fn occupant(&self, at: &SlotCoordinate) -> Option<&str> {
        self.occupied.get(at).map(String::as_str)
    }

    /// Marks a coordinate as used by `section_id`.
    pub fn occupy(&mut self, at: SlotCoordinate, section_id: &str) {
        self.occupied.insert(at, section_id.to_string());
    }

    /// Number of occupied coordinates.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Whether nothing is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}

/// Times each student is already committed, room-independent.
#[derive(Debug, Clone, Default)]
pub struct StudentLedger {
    busy: HashMap<String, HashSet<TimeKey>>,
}

impl StudentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `student` already attends a session at `key`.
    #[inline]
    pub fn is_busy(&self, student: &str, key: TimeKey) -> bool {
        self.busy.get(student).is_some_and(|times| times.contains(&key))
    }

    /// Whether any of `students` is busy at `key`.
    pub fn any_busy<'a, I>(&self, students: I, key: TimeKey) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        students.into_iter().any(|s| self.is_busy(s, key))
    }

    /// Marks every student as busy at `key`.
    pub fn commit<'a, I>(&mut self, students: I, key: TimeKey)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for s in students {
            match self.busy.get_mut(s.as_str()) {
                Some(times) => {
                    times.insert(key);
                }
                None => {
                    self.busy.insert(s.clone(), HashSet::from([key]));
                }
            }
        }
    }

    /// Times committed for one student.
    pub fn times_of(&self, student: &str) -> Option<&HashSet<TimeKey>> {
        self.busy.get(student)
    }
}

/// Occupied `(week, day, slot, block)` cells and their section.
#[derive(Debug, Clone, Default)]
pub struct BlockLedger {
    occupied: HashMap<(TimeKey, u32), String>,
}

impl BlockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `block` has no section running at `key`.
    #[inline]
    pub fn is_free(&self, key: TimeKey, block: u32) -> bool {
        !self.occupied.contains_key(&(key, block))
    }

    /// The section holding `block` at `key`.
    pub fn occupant(&self, key: TimeKey, block: u32) -> Option<&str> {
        self.occupied.get(&(key, block)).map(String::as_str)
    }

    /// Marks `block` at `key` as used by `section_id`.
    pub fn occupy(&mut self, key: TimeKey, block: u32, section_id: &str) {
        self.occupied.insert((key, block), section_id.to_string());
    }
}
