//! Run configuration.
//!
//! Every tunable of a timetabling run lives in [`TimetableConfig`]. All
//! fields default, so a JSON file only needs the keys it overrides:
//!
//! ```json
//! {
//!   "section_limit": 60,
//!   "slot_ordering": "spread",
//!   "conflicts": { "model": "block", "num_blocks": 4, "seed": 7 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatching::SectionOrdering;
use crate::models::TermCalendar;
use crate::scheduler::{ConflictPolicy, SlotOrdering};
use crate::sections::{DedupPolicy, PartitionPolicy};

/// Default maximum size of an unsplit section.
pub const DEFAULT_SECTION_LIMIT: usize = 70;

/// Default number of sessions each section should receive.
pub const DEFAULT_SESSIONS_PER_SECTION: usize = 20;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown {kind} policy '{value}'")]
    UnknownPolicy { kind: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn unknown_policy(kind: &'static str, value: &str) -> Self {
        ConfigError::UnknownPolicy {
            kind,
            value: value.to_string(),
        }
    }
}

/// Tunables for sectioning and allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Largest section created without splitting.
    pub section_limit: usize,
    /// Session quota per section.
    pub sessions_per_section: usize,
    /// Weeks, days, slots and the room pool per week.
    pub calendar: TermCalendar,
    /// Candidate coordinate traversal order.
    pub slot_ordering: SlotOrdering,
    /// Section iteration order.
    pub section_ordering: SectionOrdering,
    /// Roster dedup policy.
    pub dedup: DedupPolicy,
    /// Student partition policy.
    pub partition: PartitionPolicy,
    /// Conflict model used by the allocator.
    pub conflicts: ConflictPolicy,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            section_limit: DEFAULT_SECTION_LIMIT,
            sessions_per_section: DEFAULT_SESSIONS_PER_SECTION,
            calendar: TermCalendar::default(),
            slot_ordering: SlotOrdering::default(),
            section_ordering: SectionOrdering::default(),
            dedup: DedupPolicy::default(),
            partition: PartitionPolicy::default(),
            conflicts: ConflictPolicy::default(),
        }
    }
}

impl TimetableConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file and validates it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that the configuration describes a usable term.
    ///
    /// A zero session quota is accepted (nothing gets scheduled).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.section_limit == 0 {
            return Err(ConfigError::Invalid("section_limit must be positive".into()));
        }
        let cal = &self.calendar;
        for (name, span) in [("weeks", cal.weeks), ("days", cal.days), ("slots", cal.slots)] {
            if span.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{name} range {}..={} is empty",
                    span.first, span.last
                )));
            }
            if span.first == 0 {
                return Err(ConfigError::Invalid(format!("{name} are numbered from 1")));
            }
        }
        if cal.rooms.peak_rooms == 0 && cal.rooms.reduced_rooms == 0 {
            return Err(ConfigError::Invalid("no rooms in any week".into()));
        }
        if let ConflictPolicy::Block { num_blocks, .. } = self.conflicts {
            if num_blocks == 0 {
                return Err(ConfigError::Invalid("num_blocks must be positive".into()));
            }
        }
        Ok(())
    }

    /// Sets the section limit.
    pub fn with_section_limit(mut self, limit: usize) -> Self {
        self.section_limit = limit;
        self
    }

    /// Sets the per-section session quota.
    pub fn with_sessions_per_section(mut self, quota: usize) -> Self {
        self.sessions_per_section = quota;
        self
    }

    /// Sets the term calendar.
    pub fn with_calendar(mut self, calendar: TermCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the slot ordering.
    pub fn with_slot_ordering(mut self, ordering: SlotOrdering) -> Self {
        self.slot_ordering = ordering;
        self
    }

    /// Sets the section ordering.
    pub fn with_section_ordering(mut self, ordering: SectionOrdering) -> Self {
        self.section_ordering = ordering;
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

    /// Sets the conflict model.
    pub fn with_conflicts(mut self, conflicts: ConflictPolicy) -> Self {
        self.conflicts = conflicts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoomCapacity, Span};

    #[test]
    fn test_defaults() {
        let c = TimetableConfig::default();
        assert_eq!(c.section_limit, 70);
        assert_eq!(c.sessions_per_section, 20);
        assert_eq!(c.calendar.weeks, Span::one_to(10));
        assert_eq!(c.calendar.rooms, RoomCapacity::new(10, 4, 4));
        assert_eq!(c.slot_ordering, SlotOrdering::FrontLoad);
        assert_eq!(c.section_ordering, SectionOrdering::Natural);
        assert_eq!(c.conflicts, ConflictPolicy::Student);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let c = TimetableConfig::from_json_str(
            r#"{
                "section_limit": 60,
                "slot_ordering": "spread",
                "section_ordering": "largest-first",
                "dedup": "unique",
                "conflicts": { "model": "block", "num_blocks": 4, "seed": 7 }
            }"#,
        )
        .unwrap();
        assert_eq!(c.section_limit, 60);
        assert_eq!(c.sessions_per_section, 20);
        assert_eq!(c.slot_ordering, SlotOrdering::Spread);
        assert_eq!(c.section_ordering, SectionOrdering::LargestFirst);
        assert_eq!(c.dedup, DedupPolicy::Unique);
        assert_eq!(
            c.conflicts,
            ConflictPolicy::Block {
                num_blocks: 4,
                seed: 7
            }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = TimetableConfig::from_json_str(r#"{"section_limit": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TimetableConfig::from_json_str(r#"{"calendar": {"days": {"first": 3, "last": 1}}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("days"));

        let err = TimetableConfig::from_json_str(
            r#"{"conflicts": {"model": "block", "num_blocks": 0, "seed": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = TimetableConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TimetableConfig::from_path("/nonexistent/timetable.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_round_trip_through_json() {
        let c = TimetableConfig::default().with_slot_ordering(SlotOrdering::Spread);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(TimetableConfig::from_json_str(&json).unwrap(), c);
    }
}
