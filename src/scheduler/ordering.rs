//! Candidate coordinate orderings.
//!
//! The allocator walks one ordered list of `(week, day, slot, room)`
//! candidates for every section. The order decides which sections get
//! starved when capacity runs out, so it is a first-class policy.
//!
//! | Ordering | Key | Effect |
//! |----------|-----|--------|
//! | Front-load | `week` | Fills the early, high-capacity weeks first |
//! | Spread | `(day, slot, week)` | Spreads each section across the term |
//!
//! Both sorts are stable over the calendar's week → day → slot → room
//! nesting, so ties keep that order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::config::ConfigError;
use crate::models::{SlotCoordinate, TermCalendar};

/// A comparator over candidate coordinates.
pub trait SlotOrder: Send + Sync + Debug {
    /// Ordering name.
    fn name(&self) -> &'static str;

    /// Compares two candidates; `Less` is visited first.
    fn compare(&self, a: &SlotCoordinate, b: &SlotCoordinate) -> Ordering;
}

/// Ascending by week only.
#[derive(Debug, Clone, Copy)]
pub struct FrontLoad;

impl SlotOrder for FrontLoad {
    fn name(&self) -> &'static str {
        "front-load"
    }

    fn compare(&self, a: &SlotCoordinate, b: &SlotCoordinate) -> Ordering {
        a.week.cmp(&b.week)
    }
}

/// Ascending by `(day, slot, week)`.
#[derive(Debug, Clone, Copy)]
pub struct Spread;

impl SlotOrder for Spread {
    fn name(&self) -> &'static str {
        "spread"
    }

    fn compare(&self, a: &SlotCoordinate, b: &SlotCoordinate) -> Ordering {
        (a.day, a.slot, a.week).cmp(&(b.day, b.slot, b.week))
    }
}

/// Slot orderings selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotOrdering {
    /// See [`FrontLoad`].
    #[default]
    FrontLoad,
    /// See [`Spread`].
    Spread,
}

impl SlotOrdering {
    /// The comparator implementing this ordering.
    pub fn comparator(&self) -> &'static dyn SlotOrder {
        match self {
            SlotOrdering::FrontLoad => &FrontLoad,
            SlotOrdering::Spread => &Spread,
        }
    }
}

impl FromStr for SlotOrdering {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "front-load" | "front_load" | "frontload" => Ok(SlotOrdering::FrontLoad),
            "spread" => Ok(SlotOrdering::Spread),
            other => Err(ConfigError::unknown_policy("slot ordering", other)),
        }
    }
}

impl fmt::Display for SlotOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.comparator().name())
    }
}

/// All calendar candidates, stably sorted by `order`.
pub fn ordered_candidates(calendar: &TermCalendar, order: &dyn SlotOrder) -> Vec<SlotCoordinate> {
    let mut candidates = calendar.candidates();
    candidates.sort_by(|a, b| order.compare(a, b));
    candidates
}
