//! Timetabling domain models.
//!
//! Provides the data types shared by sectioning, allocation and export.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | CourseRoster | Students enrolled in one course |
//! | Section | Bounded teaching group cut from a roster |
//! | TermCalendar | Weeks × days × slots with a week-dependent room pool |
//! | SlotCoordinate | One room at one time |
//! | Timetable | Sessions committed by one allocation run |

mod calendar;
mod roster;
mod section;
mod session;
mod slot;

pub use calendar::{RoomCapacity, Span, TermCalendar};
pub use roster::{canonical_student_id, CourseRoster, RosterBook};
pub use section::{section_id, CourseSummary, Section, SectionSet, SectionSuffix};
pub use session::{ScheduledSession, Timetable};
pub use slot::{SlotCoordinate, TimeKey};
