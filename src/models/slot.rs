//! Time-slot coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(week, day, slot)` triple, independent of room.
///
/// Students and blocks conflict on this key: two sessions sharing it run
/// at the same time even when they sit in different rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeKey {
    /// Week of term (1-based).
    pub week: u32,
    /// Day of week (1-based).
    pub day: u32,
    /// Slot of day (1-based).
    pub slot: u32,
}

impl TimeKey {
    /// Creates a time key.
    pub fn new(week: u32, day: u32, slot: u32) -> Self {
        Self { week, day, slot }
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}D{}S{}", self.week, self.day, self.slot)
    }
}

/// A `(week, day, slot, room)` coordinate. One section may occupy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotCoordinate {
    /// Week of term (1-based).
    pub week: u32,
    /// Day of week (1-based).
    pub day: u32,
    /// Slot of day (1-based).
    pub slot: u32,
    /// Room number (1-based, week-dependent pool).
    pub room: u32,
}

impl SlotCoordinate {
    /// Creates a coordinate.
    pub fn new(week: u32, day: u32, slot: u32, room: u32) -> Self {
        Self {
            week,
            day,
            slot,
            room,
        }
    }

    /// The room-independent time of this coordinate.
    #[inline]
    pub fn time_key(&self) -> TimeKey {
        TimeKey::new(self.week, self.day, self.slot)
    }
}

impl fmt::Display for SlotCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}R{}", self.time_key(), self.room)
    }
}
