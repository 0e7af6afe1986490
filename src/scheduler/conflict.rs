//! Conflict models.
//!
//! A conflict model decides whether a section may meet at a given
//! `(week, day, slot)` and records the decision once a session is
//! committed. Room occupancy is checked separately by the allocator and
//! applies under every model.
//!
//! | Model | Clash when |
//! |-------|-----------|
//! | [`StudentConflicts`] | Any member already attends a session at that time |
//! | [`BlockConflicts`] | Another section of the same elective block meets at that time |

use serde::{Deserialize, Serialize};

use super::{BlockAssignment, BlockLedger, StudentLedger};
use crate::models::{Section, SectionSet, TimeKey};

/// Conflict check used by the allocator.
pub trait ConflictModel {
    /// Model name.
    fn name(&self) -> &'static str;

    /// Whether `section` may meet at `key`.
    fn is_free(&self, section: &Section, key: TimeKey) -> bool;

    /// Records a committed session of `section` at `key`.
    fn commit(&mut self, section: &Section, key: TimeKey);

    /// Block tag to stamp on sessions of `section`, if the model uses blocks.
    fn block_of(&self, _section_id: &str) -> Option<u32> {
        None
    }
}

/// No student attends two sessions at the same time.
#[derive(Debug, Clone, Default)]
pub struct StudentConflicts {
    ledger: StudentLedger,
}

impl StudentConflicts {
    /// Creates the model with an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &StudentLedger {
        &self.ledger
    }
}

impl ConflictModel for StudentConflicts {
    fn name(&self) -> &'static str {
        "student"
    }

    fn is_free(&self, section: &Section, key: TimeKey) -> bool {
        !self.ledger.any_busy(&section.students, key)
    }

    fn commit(&mut self, section: &Section, key: TimeKey) {
        self.ledger.commit(&section.students, key);
    }
}

/// No two sections of one elective block meet at the same time.
///
/// Student membership is not consulted.
#[derive(Debug, Clone)]
pub struct BlockConflicts {
    blocks: BlockAssignment,
    ledger: BlockLedger,
}

impl BlockConflicts {
    /// Creates the model from a block assignment.
    pub fn new(blocks: BlockAssignment) -> Self {
        Self {
            blocks,
            ledger: BlockLedger::new(),
        }
    }

    /// The block assignment in use.
    pub fn blocks(&self) -> &BlockAssignment {
        &self.blocks
    }
}

impl ConflictModel for BlockConflicts {
    fn name(&self) -> &'static str {
        "block"
    }

    fn is_free(&self, section: &Section, key: TimeKey) -> bool {
        match self.blocks.block_of(&section.id) {
            Some(block) => self.ledger.is_free(key, block),
            None => true,
        }
    }

    fn commit(&mut self, section: &Section, key: TimeKey) {
        if let Some(block) = self.blocks.block_of(&section.id) {
            self.ledger.occupy(key, block, &section.id);
        }
    }

    fn block_of(&self, section_id: &str) -> Option<u32> {
        self.blocks.block_of(section_id)
    }
}

/// Conflict models selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// See [`StudentConflicts`].
    #[default]
    Student,
    /// See [`BlockConflicts`]; blocks drawn from `StdRng` seeded with `seed`.
    Block {
        /// Size of the block pool.
        num_blocks: u32,
        /// Generator seed.
        seed: u64,
    },
}

impl ConflictPolicy {
    /// Builds a fresh model for one run over `sections`.
    pub fn build(&self, sections: &SectionSet) -> Box<dyn ConflictModel> {
        match *self {
            ConflictPolicy::Student => Box::new(StudentConflicts::new()),
            ConflictPolicy::Block { num_blocks, seed } => Box::new(BlockConflicts::new(
                BlockAssignment::seeded(sections, num_blocks, seed),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionSuffix;

    #[test]
    fn test_student_model_blocks_shared_member() {
        let x = Section::new("X", SectionSuffix::A).with_students(["S001", "S002"]);
        let y = Section::new("Y", SectionSuffix::A).with_students(["S001", "S003"]);
        let z = Section::new("Z", SectionSuffix::A).with_students(["S004"]);

        let mut m = StudentConflicts::new();
        let key = TimeKey::new(2, 3, 4);
        assert!(m.is_free(&x, key));
        m.commit(&x, key);

        assert!(!m.is_free(&y, key));
        assert!(m.is_free(&y, TimeKey::new(2, 3, 5)));
        assert!(m.is_free(&z, key));
        assert_eq!(m.block_of("X_A"), None);
    }

    #[test]
    fn test_block_model_ignores_students() {
        let x = Section::new("X", SectionSuffix::A).with_students(["S001"]);
        let y = Section::new("Y", SectionSuffix::A).with_students(["S001"]);
        let z = Section::new("Z", SectionSuffix::A).with_students(["S002"]);
        let blocks = BlockAssignment::from_pairs(2, [("X_A", 1), ("Y_A", 2), ("Z_A", 1)]);

        let mut m = BlockConflicts::new(blocks);
        let key = TimeKey::new(1, 1, 1);
        m.commit(&x, key);

        // Y shares a student with X but sits in another block
        assert!(m.is_free(&y, key));
        // Z shares no student but sits in X's block
        assert!(!m.is_free(&z, key));
        assert!(m.is_free(&z, TimeKey::new(1, 1, 2)));
        assert_eq!(m.block_of("Z_A"), Some(1));
    }

    #[test]
    fn test_policy_build() {
        let set = SectionSet::new(vec![
            Section::new("X", SectionSuffix::A).with_students(["S1"]),
        ]);
        assert_eq!(ConflictPolicy::Student.build(&set).name(), "student");

        let model = ConflictPolicy::Block {
            num_blocks: 3,
            seed: 9,
        }
        .build(&set);
        assert_eq!(model.name(), "block");
        assert!(model.block_of("X_A").is_some());
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&ConflictPolicy::Student).unwrap();
        assert_eq!(json, r#"{"model":"student"}"#);
        let p: ConflictPolicy =
            serde_json::from_str(r#"{"model":"block","num_blocks":5,"seed":42}"#).unwrap();
        assert_eq!(
            p,
            ConflictPolicy::Block {
                num_blocks: 5,
                seed: 42
            }
        );
    }
}
