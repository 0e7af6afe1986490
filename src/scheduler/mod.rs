//! Greedy slot allocation and completion accounting.
//!
//! # Algorithm
//!
//! `GreedyAllocator` walks an ordered list of `(week, day, slot, room)`
//! candidates for each section and commits the first conflict-free ones
//! until the section's quota is met. It is not optimal and never
//! backtracks; it always terminates.
//!
//! # Policies
//!
//! - **Slot ordering** ([`SlotOrder`]): front-load or spread.
//! - **Conflict model** ([`ConflictModel`]): per-student or per-block.
//! - **Section ordering**: see [`crate::dispatching`].
//!
//! # KPI
//!
//! `CompletionReport` compares scheduled sessions with sections × quota.

mod allocator;
mod blocks;
mod conflict;
mod kpi;
mod ledger;
mod ordering;

pub use allocator::GreedyAllocator;
pub use blocks::BlockAssignment;
pub use conflict::{BlockConflicts, ConflictModel, ConflictPolicy, StudentConflicts};
pub use kpi::{completion_rate, CompletionReport, SectionCompletion};
pub use ledger::{BlockLedger, RoomLedger, StudentLedger};
pub use ordering::{ordered_candidates, FrontLoad, SlotOrder, SlotOrdering, Spread};
