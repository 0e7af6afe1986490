//! Built-in section ordering rules.
//!
//! # Categories
//!
//! - **Neutral**: NATURAL
//! - **Size-based**: LARGEST, SMALLEST
//! - **Overlap-based**: SHARED
//!
//! # Score Convention
//! All rules return lower scores for sections that should be visited first.

use super::{RuleScore, SectionRule};
use crate::models::{Section, SectionSet};

/// Creation order.
///
/// Scores every section equally; the engine's stable sort then keeps
/// course order with `A` before `B`.
#[derive(Debug, Clone, Copy)]
pub struct Natural;

impl SectionRule for Natural {
    fn name(&self) -> &'static str {
        "NATURAL"
    }

    fn evaluate(&self, _section: &Section, _sections: &SectionSet) -> RuleScore {
        0.0
    }

    fn description(&self) -> &'static str {
        "Section creation order"
    }
}

/// Largest enrollment first.
///
/// Large sections claim scarce early slots before smaller ones fragment
/// the calendar.
#[derive(Debug, Clone, Copy)]
pub struct LargestFirst;

impl SectionRule for LargestFirst {
    fn name(&self) -> &'static str {
        "LARGEST"
    }

    fn evaluate(&self, section: &Section, _sections: &SectionSet) -> RuleScore {
        -(section.size() as f64)
    }

    fn description(&self) -> &'static str {
        "Largest section first"
    }
}

/// Smallest enrollment first.
#[derive(Debug, Clone, Copy)]
pub struct SmallestFirst;

impl SectionRule for SmallestFirst {
    fn name(&self) -> &'static str {
        "SMALLEST"
    }

    fn evaluate(&self, section: &Section, _sections: &SectionSet) -> RuleScore {
        section.size() as f64
    }

    fn description(&self) -> &'static str {
        "Smallest section first"
    }
}

/// Most shared memberships first.
///
/// Counts, over the section's members, how many *other* sections each one
/// also attends. Sections whose students are spread over many courses are
/// the hardest to place and go first.
#[derive(Debug, Clone, Copy)]
pub struct MostShared;

impl SectionRule for MostShared {
    fn name(&self) -> &'static str {
        "SHARED"
    }

    fn evaluate(&self, section: &Section, sections: &SectionSet) -> RuleScore {
        let shared: usize = section
            .students
            .iter()
            .map(|s| {
                sections
                    .sections_of(s)
                    .iter()
                    .filter(|id| **id != section.id)
                    .count()
            })
            .sum();
        -(shared as f64)
    }

    fn description(&self) -> &'static str {
        "Most memberships shared with other sections first"
    }
}
