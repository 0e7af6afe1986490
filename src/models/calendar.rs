//! Term calendar and week-dependent room pools.
//!
//! A term is a grid of weeks × days × slots. Every week exposes a pool of
//! numbered rooms whose size is a step function of the week: the first
//! `peak_through_week` weeks offer `peak_rooms` rooms, later weeks drop to
//! `reduced_rooms`.
//!
//! # Candidate Order
//! [`TermCalendar::candidates`] enumerates coordinates nested as
//! week → day → slot → room, all ascending. Slot orderings re-sort this
//! list with a stable sort, so ties keep this nesting.

use serde::{Deserialize, Serialize};

use super::SlotCoordinate;

/// An inclusive range of 1-based indices `[first, last]`.
///
/// Empty when `first > last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// First index (inclusive).
    pub first: u32,
    /// Last index (inclusive).
    pub last: u32,
}

impl Span {
    /// Creates a new span.
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Span `1..=n`.
    pub fn one_to(n: u32) -> Self {
        Self::new(1, n)
    }

    /// Number of indices in the span.
    #[inline]
    pub fn len(&self) -> usize {
        if self.first > self.last {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    /// Whether the span contains no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `value` falls within the span.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.first && value <= self.last
    }

    /// Iterates the span in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// Room pool size as a step function of the week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCapacity {
    /// Rooms available while `week <= peak_through_week`.
    pub peak_rooms: u32,
    /// Last week with the peak room pool.
    pub peak_through_week: u32,
    /// Rooms available after `peak_through_week`.
    pub reduced_rooms: u32,
}

impl Default for RoomCapacity {
    fn default() -> Self {
        Self {
            peak_rooms: 10,
            peak_through_week: 4,
            reduced_rooms: 4,
        }
    }
}

impl RoomCapacity {
    /// Creates a step capacity.
    pub fn new(peak_rooms: u32, peak_through_week: u32, reduced_rooms: u32) -> Self {
        Self {
            peak_rooms,
            peak_through_week,
            reduced_rooms,
        }
    }

    /// Same room count in every week.
    pub fn uniform(rooms: u32) -> Self {
        Self::new(rooms, u32::MAX, rooms)
    }

    /// Number of rooms open in `week`.
    #[inline]
    pub fn room_count(&self, week: u32) -> u32 {
        if week <= self.peak_through_week {
            self.peak_rooms
        } else {
            self.reduced_rooms
        }
    }

    /// Room numbers open in `week` (`1..=room_count`).
    pub fn rooms_for_week(&self, week: u32) -> Span {
        Span::one_to(self.room_count(week))
    }
}

/// The teaching term: weeks, days, slots and the room pool per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermCalendar {
    /// Teaching weeks.
    pub weeks: Span,
    /// Teaching days within a week.
    pub days: Span,
    /// Slots within a day.
    pub slots: Span,
    /// Room pool per week.
    pub rooms: RoomCapacity,
}

impl Default for TermCalendar {
    fn default() -> Self {
        Self {
            weeks: Span::one_to(10),
            days: Span::one_to(6),
            slots: Span::one_to(6),
            rooms: RoomCapacity::default(),
        }
    }
}

impl TermCalendar {
    /// Creates a calendar with `weeks × days × slots` and the given rooms.
    pub fn new(weeks: u32, days: u32, slots: u32, rooms: RoomCapacity) -> Self {
        Self {
            weeks: Span::one_to(weeks),
            days: Span::one_to(days),
            slots: Span::one_to(slots),
            rooms,
        }
    }

    /// Sets the week range.
    pub fn with_weeks(mut self, weeks: Span) -> Self {
        self.weeks = weeks;
        self
    }

    /// Sets the day range.
    pub fn with_days(mut self, days: Span) -> Self {
        self.days = days;
        self
    }

    /// Sets the slot range.
    pub fn with_slots(mut self, slots: Span) -> Self {
        self.slots = slots;
        self
    }

    /// Sets the room capacity function.
    pub fn with_rooms(mut self, rooms: RoomCapacity) -> Self {
        self.rooms = rooms;
        self
    }

    /// Room numbers open in `week`.
    pub fn rooms_for_week(&self, week: u32) -> Span {
        self.rooms.rooms_for_week(week)
    }

    /// All `(week, day, slot, room)` coordinates in nesting order.
    pub fn candidates(&self) -> Vec<SlotCoordinate> {
        let mut out = Vec::with_capacity(self.room_slot_count());
        for week in self.weeks.iter() {
            let rooms = self.rooms_for_week(week);
            for day in self.days.iter() {
                for slot in self.slots.iter() {
                    for room in rooms.iter() {
                        out.push(SlotCoordinate::new(week, day, slot, room));
                    }
                }
            }
        }
        out
    }

    /// Total number of room-slots in the term.
    pub fn room_slot_count(&self) -> usize {
        let per_week = self.days.len() * self.slots.len();
        self.weeks
            .iter()
            .map(|w| per_week * self.rooms.room_count(w) as usize)
            .sum()
    }

    /// Whether a coordinate lies inside the term and its week's room pool.
    pub fn contains(&self, c: &SlotCoordinate) -> bool {
        self.weeks.contains(c.week)
            && self.days.contains(c.day)
            && self.slots.contains(c.slot)
            && self.rooms_for_week(c.week).contains(c.room)
    }
}
