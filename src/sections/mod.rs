//! Section building.
//!
//! Turns course rosters into bounded teaching sections plus the derived
//! student → sections index.
//!
//! # Policies
//!
//! | Policy | Options |
//! |--------|---------|
//! | [`DedupPolicy`] | `Preserve` keeps the roster as given, `Unique` drops repeats (first occurrence wins) |
//! | [`PartitionPolicy`] | `PerCourse` splits each oversized course in two, `ProgramHalves` splits the whole cohort once |
//!
//! Sectioning never fails: courses without usable students are skipped.

mod builder;

pub use builder::{SectionBuilder, SectionPlan};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// How repeated student ids within a roster are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Keep the roster as given, duplicates included.
    #[default]
    Preserve,
    /// Keep the first occurrence of each student, in roster order.
    Unique,
}

impl DedupPolicy {
    /// Applies the policy to a cleaned roster.
    pub fn apply(&self, students: &[String]) -> Vec<String> {
        match self {
            DedupPolicy::Preserve => students.to_vec(),
            DedupPolicy::Unique => {
                let mut seen = HashSet::with_capacity(students.len());
                students
                    .iter()
                    .filter(|s| seen.insert(s.as_str()))
                    .cloned()
                    .collect()
            }
        }
    }
}

impl FromStr for DedupPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "preserve" => Ok(DedupPolicy::Preserve),
            "unique" => Ok(DedupPolicy::Unique),
            other => Err(ConfigError::unknown_policy("dedup", other)),
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupPolicy::Preserve => f.write_str("preserve"),
            DedupPolicy::Unique => f.write_str("unique"),
        }
    }
}

/// How students are partitioned into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionPolicy {
    /// One section per course, split into two halves above the section limit.
    #[default]
    PerCourse,
    /// Split the union of all students into two program-wide halves, then
    /// intersect every course roster with each half.
    ProgramHalves,
}

impl FromStr for PartitionPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "per-course" | "per_course" => Ok(PartitionPolicy::PerCourse),
            "program-halves" | "program_halves" => Ok(PartitionPolicy::ProgramHalves),
            other => Err(ConfigError::unknown_policy("partition", other)),
        }
    }
}

impl fmt::Display for PartitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionPolicy::PerCourse => f.write_str("per-course"),
            PartitionPolicy::ProgramHalves => f.write_str("program-halves"),
        }
    }
}
