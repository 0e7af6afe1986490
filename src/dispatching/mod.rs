//! Section ordering rules and rule engine.
//!
//! The allocator is greedy: sections processed earlier claim slots that
//! later sections can no longer use. The order in which sections are
//! visited is therefore a policy, expressed here as composable rules.
//!
//! # Usage
//!
//! ```
//! use u_timetable::dispatching::{rules, RuleEngine, TieBreaker};
//! use u_timetable::models::{Section, SectionSet, SectionSuffix};
//!
//! let set = SectionSet::new(vec![
//!     Section::new("SMALL", SectionSuffix::A).with_students(["S1"]),
//!     Section::new("BIG", SectionSuffix::A).with_students(["S1", "S2", "S3"]),
//! ]);
//! let engine = RuleEngine::new()
//!     .with_rule(rules::LargestFirst)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! assert_eq!(engine.sort_indices(&set), vec![1, 0]);
//! ```

mod engine;
pub mod rules;

pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::config::ConfigError;
use crate::models::{Section, SectionSet};

/// Score returned by a section rule.
///
/// Lower scores = visited first.
pub type RuleScore = f64;

/// A rule that scores a section for visiting order.
///
/// # Score Convention
/// **Lower score = visited earlier.** Equal scores keep creation order.
pub trait SectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "LARGEST").
    fn name(&self) -> &'static str;

    /// Scores a section. `sections` is the full set, for rules that look
    /// at overlap with other sections.
    fn evaluate(&self, section: &Section, sections: &SectionSet) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Preconfigured section orderings selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionOrdering {
    /// Section creation order (course order, `A` before `B`).
    #[default]
    Natural,
    /// Descending enrollment, creation order on ties.
    LargestFirst,
    /// Most memberships shared with other sections first, then largest.
    MostShared,
}

impl SectionOrdering {
    /// Builds the rule engine implementing this ordering.
    pub fn engine(&self) -> RuleEngine {
        match self {
            SectionOrdering::Natural => RuleEngine::new().with_rule(rules::Natural),
            SectionOrdering::LargestFirst => RuleEngine::new().with_rule(rules::LargestFirst),
            SectionOrdering::MostShared => RuleEngine::new()
                .with_rule(rules::MostShared)
                .with_tie_breaker(rules::LargestFirst),
        }
    }
}

impl FromStr for SectionOrdering {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "natural" => Ok(SectionOrdering::Natural),
            "largest-first" | "largest_first" => Ok(SectionOrdering::LargestFirst),
            "most-shared" | "most_shared" => Ok(SectionOrdering::MostShared),
            other => Err(ConfigError::unknown_policy("section ordering", other)),
        }
    }
}

impl fmt::Display for SectionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionOrdering::Natural => f.write_str("natural"),
            SectionOrdering::LargestFirst => f.write_str("largest-first"),
            SectionOrdering::MostShared => f.write_str("most-shared"),
        }
    }
}
