//! Elective block assignment.
//!
//! In the block conflict model every section is placed in one of
//! `num_blocks` elective baskets. Placement is random but driven by an
//! injected generator, so a fixed seed always yields the same blocks.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::SectionSet;

/// Section → block mapping. Block ids run `1..=num_blocks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAssignment {
    num_blocks: u32,
    by_section: HashMap<String, u32>,
}

impl BlockAssignment {
    /// Draws one block per section, in section creation order.
    ///
    /// `num_blocks` of zero leaves every section unassigned.
    pub fn assign<R: Rng>(sections: &SectionSet, num_blocks: u32, rng: &mut R) -> Self {
        let mut by_section = HashMap::with_capacity(sections.len());
        if num_blocks > 0 {
            for section in sections.iter() {
                by_section.insert(section.id.clone(), rng.random_range(1..=num_blocks));
            }
        }
        Self {
            num_blocks,
            by_section,
        }
    }

    /// Draws blocks from a `StdRng` seeded with `seed`.
    pub fn seeded(sections: &SectionSet, num_blocks: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::assign(sections, num_blocks, &mut rng)
    }

    /// Builds an assignment from explicit pairs.
    pub fn from_pairs<I, S>(num_blocks: u32, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            num_blocks,
            by_section: pairs.into_iter().map(|(s, b)| (s.into(), b)).collect(),
        }
    }

    /// Block of a section.
    pub fn block_of(&self, section_id: &str) -> Option<u32> {
        self.by_section.get(section_id).copied()
    }

    /// Size of the block pool.
    pub fn num_blocks(&self) -> u32 {
        self.num_blocks
    }

    /// Number of sections per block, ascending by block id.
    pub fn block_sizes(&self) -> Vec<(u32, usize)> {
        (1..=self.num_blocks)
            .map(|b| (b, self.by_section.values().filter(|&&v| v == b).count()))
            .collect()
    }
}
