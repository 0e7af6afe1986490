//! Greedy course timetabling.
//!
//! Turns per-course student rosters into bounded teaching sections and
//! places a fixed number of sessions for each section on a
//! `(week, day, slot, room)` grid without double-booking rooms or students.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CourseRoster`, `Section`, `SectionSet`,
//!   `TermCalendar`, `SlotCoordinate`, `ScheduledSession`, `Timetable`
//! - **`sections`**: Section builder with dedup and partition policies
//! - **`dispatching`**: Rule-based section ordering
//! - **`scheduler`**: Greedy allocator, slot orderings, conflict models, completion KPI
//! - **`validation`**: Hard-constraint checks on a finished timetable
//! - **`config`**: Run configuration (JSON) and defaults
//! - **`io`**: Excel roster reader and timetable exporter
//! - **`pipeline`**: One end-to-end run
//!
//! # Pipeline
//!
//! ```text
//! roster workbook → RosterBook → SectionBuilder → SectionSet
//!                → GreedyAllocator → Timetable → CompletionReport → Final_Timetable.xlsx
//! ```
//!
//! Allocation is greedy and never backtracks. When capacity runs out the
//! timetable is simply incomplete and the completion rate says by how much.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Carter & Laporte (1998), "Recent developments in practical course timetabling"

pub mod config;
pub mod dispatching;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod scheduler;
pub mod sections;
pub mod validation;
