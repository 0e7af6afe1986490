//! Greedy slot allocator.
//!
//! # Algorithm
//!
//! 1. Enumerate every `(week, day, slot, room)` of the term and sort the
//!    list once with the configured slot ordering.
//! 2. Order sections with the section rule engine.
//! 3. For each section, walk the candidates once. Skip a candidate when
//!    its room is taken, when the section already meets at that time, or
//!    when the conflict model reports a clash. Otherwise commit it to the
//!    timetable and all ledgers.
//! 4. Move on once the section reaches its quota or the candidates run out.
//!
//! Nothing is ever revised: an early section may starve a later one.
//! Running short of capacity only lowers the completion rate.
//!
//! # Complexity
//! O(s · c · m) where s = sections, c = candidates, m = section size.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::{ordered_candidates, ConflictModel, ConflictPolicy, RoomLedger, SlotOrder, SlotOrdering};
use crate::config::{TimetableConfig, DEFAULT_SESSIONS_PER_SECTION};
use crate::dispatching::{RuleEngine, SectionOrdering};
use crate::models::{ScheduledSession, SectionSet, TermCalendar, Timetable};

/// Greedy, constraint-respecting session allocator.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Section, SectionSet, SectionSuffix, SlotCoordinate};
/// use u_timetable::scheduler::GreedyAllocator;
///
/// let sections = SectionSet::new(vec![
///     Section::new("FIN101", SectionSuffix::A).with_students(["S001", "S002"]),
/// ]);
/// let timetable = GreedyAllocator::new().allocate(&sections);
///
/// assert_eq!(timetable.len(), 20);
/// assert_eq!(timetable.sessions[0].coordinate(), SlotCoordinate::new(1, 1, 1, 1));
/// assert_eq!(timetable.sessions[1].coordinate(), SlotCoordinate::new(1, 1, 2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct GreedyAllocator {
    calendar: TermCalendar,
    sessions_per_section: usize,
    slot_order: Arc<dyn SlotOrder>,
    section_engine: RuleEngine,
    conflicts: ConflictPolicy,
}

impl GreedyAllocator {
    /// Creates an allocator with default calendar, quota and policies.
    pub fn new() -> Self {
        Self {
            calendar: TermCalendar::default(),
            sessions_per_section: DEFAULT_SESSIONS_PER_SECTION,
            slot_order: Arc::new(super::FrontLoad),
            section_engine: SectionOrdering::default().engine(),
            conflicts: ConflictPolicy::default(),
        }
    }

    /// Creates an allocator from configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self::new()
            .with_calendar(config.calendar.clone())
            .with_sessions_per_section(config.sessions_per_section)
            .with_slot_ordering(config.slot_ordering)
            .with_section_engine(config.section_ordering.engine())
            .with_conflicts(config.conflicts)
    }

    /// Sets the term calendar.
    pub fn with_calendar(mut self, calendar: TermCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the per-section session quota.
    pub fn with_sessions_per_section(mut self, quota: usize) -> Self {
        self.sessions_per_section = quota;
        self
    }

    /// Uses one of the built-in slot orderings.
    pub fn with_slot_ordering(mut self, ordering: SlotOrdering) -> Self {
        self.slot_order = match ordering {
            SlotOrdering::FrontLoad => Arc::new(super::FrontLoad),
            SlotOrdering::Spread => Arc::new(super::Spread),
        };
        self
    }

    /// Uses a custom candidate comparator.
    pub fn with_slot_order<O: SlotOrder + 'static>(mut self, order: O) -> Self {
        self.slot_order = Arc::new(order);
        self
    }

    /// Sets the section rule engine.
    pub fn with_section_engine(mut self, engine: RuleEngine) -> Self {
        self.section_engine = engine;
        self
    }

    /// Sets the conflict policy used by [`allocate`](Self::allocate).
    pub fn with_conflicts(mut self, conflicts: ConflictPolicy) -> Self {
        self.conflicts = conflicts;
        self
    }

    /// Session quota per section.
    pub fn sessions_per_section(&self) -> usize {
        self.sessions_per_section
    }

    /// The term calendar.
    pub fn calendar(&self) -> &TermCalendar {
        &self.calendar
    }

    /// Allocates sessions using a fresh model built from the conflict policy.
    pub fn allocate(&self, sections: &SectionSet) -> Timetable {
        let mut model = self.conflicts.build(sections);
        self.allocate_with(sections, model.as_mut())
    }

    /// Allocates sessions against a caller-supplied conflict model.
    ///
    /// The model should be fresh; anything it already holds is treated as
    /// prior commitments.
    pub fn allocate_with(&self, sections: &SectionSet, model: &mut dyn ConflictModel) -> Timetable {
        let candidates = ordered_candidates(&self.calendar, self.slot_order.as_ref());
        let order = self.section_engine.sort_indices(sections);
        let quota = self.sessions_per_section;

        let mut rooms = RoomLedger::new();
        let mut timetable = Timetable::new();

        for idx in order {
            let section = &sections.as_slice()[idx];
            let mut own_times = HashSet::with_capacity(quota);
            let block = model.block_of(&section.id);

            for at in &candidates {
                if own_times.len() >= quota {
                    break;
                }
                let key = at.time_key();
                if !rooms.is_free(at) || own_times.contains(&key) || !model.is_free(section, key) {
                    continue;
                }

                rooms.occupy(*at, &section.id);
                model.commit(section, key);
                own_times.insert(key);
                timetable.add_session(ScheduledSession::new(&section.id, *at).with_block(block));
            }

            debug!(
                section = %section.id,
                students = section.size(),
                scheduled = own_times.len(),
                quota,
                "section allocated"
            );
        }

        info!(
            sections = sections.len(),
            sessions = timetable.len(),
            ordering = self.slot_order.name(),
            conflicts = model.name(),
            "allocation finished"
        );
        timetable
    }
}

impl Default for GreedyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::{RoomCapacity, Section, SectionSuffix, SlotCoordinate, Span, TimeKey};
    use crate::scheduler::{BlockAssignment, BlockConflicts, StudentConflicts};
    use std::collections::HashMap;

    fn section(course: &str, students: &[&str]) -> Section {
        Section::new(course, SectionSuffix::A).with_students(students.iter().copied())
    }

    fn tiny_calendar(weeks: u32, rooms: u32) -> TermCalendar {
        TermCalendar::new(weeks, 1, 2, RoomCapacity::uniform(rooms))
    }

    #[test]
    fn test_single_section_front_load() {
        let set = SectionSet::new(vec![section("FIN101", &["S001"])]);
        let t = GreedyAllocator::new().allocate(&set);

        assert_eq!(t.len(), 20);
        // One section cannot use two rooms at once → next slot, same room
        let coords: Vec<SlotCoordinate> = t.sessions.iter().map(|s| s.coordinate()).collect();
        assert_eq!(coords[0], SlotCoordinate::new(1, 1, 1, 1));
        assert_eq!(coords[1], SlotCoordinate::new(1, 1, 2, 1));
        assert_eq!(coords[6], SlotCoordinate::new(1, 2, 1, 1));
        assert!(coords.iter().all(|c| c.week == 1));
    }

    #[test]
    fn test_disjoint_sections_share_time_in_different_rooms() {
        let set = SectionSet::new(vec![section("A", &["S1"]), section("B", &["S2"])]);
        let t = GreedyAllocator::new().allocate(&set);
        let b = t.sessions_for_section("B_A");
        assert_eq!(b[0].coordinate(), SlotCoordinate::new(1, 1, 1, 2));
    }

    #[test]
    fn test_shared_student_never_double_booked() {
        let set = SectionSet::new(vec![
            section("X", &["S001", "S002"]),
            section("Y", &["S001", "S003"]),
        ]);
        let t = GreedyAllocator::new().allocate(&set);

        let x_times: HashSet<TimeKey> = t.sessions_for_section("X_A").iter().map(|s| s.time_key()).collect();
        for s in t.sessions_for_section("Y_A") {
            assert!(!x_times.contains(&s.time_key()));
        }
        assert_eq!(t.len(), 40);
    }

    #[test]
    fn test_quota_respected_and_capacity_shortfall() {
        // 2 weeks × 1 day × 2 slots × 1 room = 4 room-slots
        let set = SectionSet::new(vec![section("A", &["S1"]), section("B", &["S2"])]);
        let t = GreedyAllocator::new()
            .with_calendar(tiny_calendar(2, 1))
            .with_sessions_per_section(3)
            .allocate(&set);

        let counts = t.count_by_section();
        assert_eq!(counts["A_A"], 3);
        assert_eq!(counts["B_A"], 1);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_zero_quota_schedules_nothing() {
        let set = SectionSet::new(vec![section("A", &["S1"])]);
        let t = GreedyAllocator::new().with_sessions_per_section(0).allocate(&set);
        assert!(t.is_empty());
    }

    #[test]
    fn test_empty_section_still_meets_once_per_time() {
        let set = SectionSet::new(vec![Section::new("GHOST", SectionSuffix::A)]);
        let t = GreedyAllocator::new()
            .with_calendar(tiny_calendar(1, 3))
            .with_sessions_per_section(5)
            .allocate(&set);
        // Only two distinct times exist
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_largest_first_claims_scarce_slots() {
        let set = SectionSet::new(vec![section("SMALL", &["S1"]), section("BIG", &["S2", "S3"])]);
        let t = GreedyAllocator::new()
            .with_calendar(tiny_calendar(1, 1))
            .with_sessions_per_section(2)
            .with_section_engine(RuleEngine::new().with_rule(rules::LargestFirst))
            .allocate(&set);

        assert_eq!(t.sessions_for_section("BIG_A").len(), 2);
        assert!(t.sessions_for_section("SMALL_A").is_empty());
        assert_eq!(t.sessions[0].section_id, "BIG_A");
    }

    #[test]
    fn test_spread_ordering_uses_later_weeks() {
        let set = SectionSet::new(vec![section("A", &["S1"])]);
        let t = GreedyAllocator::new()
            .with_slot_ordering(SlotOrdering::Spread)
            .with_sessions_per_section(10)
            .allocate(&set);
        let weeks: Vec<u32> = t.sessions.iter().map(|s| s.week).collect();
        assert_eq!(weeks, (1..=10).collect::<Vec<_>>());
        assert!(t.sessions.iter().all(|s| s.day == 1 && s.slot == 1 && s.room == 1));
    }

    #[test]
    fn test_block_model_tags_sessions() {
        let set = SectionSet::new(vec![
            section("E1", &["S1"]),
            section("E2", &["S1"]),
            section("E3", &["S2"]),
        ]);
        let blocks = BlockAssignment::from_pairs(2, [("E1_A", 1), ("E2_A", 2), ("E3_A", 1)]);
        let mut model = BlockConflicts::new(blocks);
        let t = GreedyAllocator::new()
            .with_sessions_per_section(1)
            .allocate_with(&set, &mut model);

        // E2 shares S1 with E1 but sits in another block → same time allowed
        assert_eq!(t.sessions[1].section_id, "E2_A");
        assert_eq!(t.sessions[1].time_key(), t.sessions[0].time_key());
        assert_eq!(t.sessions[1].block, Some(2));
        // E3 shares block 1 with E1 → next slot
        assert_eq!(t.sessions[2].time_key(), TimeKey::new(1, 1, 2));
        assert!(t.uses_blocks());
    }

    #[test]
    fn test_prior_commitments_in_model_are_respected() {
        let set = SectionSet::new(vec![section("A", &["S1"])]);
        let mut model = StudentConflicts::new();
        model.commit(&section("PRIOR", &["S1"]), TimeKey::new(1, 1, 1));
        let t = GreedyAllocator::new()
            .with_sessions_per_section(1)
            .allocate_with(&set, &mut model);
        assert_eq!(t.sessions[0].time_key(), TimeKey::new(1, 1, 2));
    }

    #[test]
    fn test_deterministic() {
        let set = SectionSet::new(
            (0..30)
                .map(|i| {
                    let students: Vec<String> = (i..i + 15).map(|s| format!("S{s}")).collect();
                    Section::new(format!("C{i}"), SectionSuffix::A).with_students(students)
                })
                .collect(),
        );
        let alloc = GreedyAllocator::new().with_conflicts(ConflictPolicy::Block {
            num_blocks: 4,
            seed: 11,
        });
        assert_eq!(alloc.allocate(&set), alloc.allocate(&set));

        let student = GreedyAllocator::new().with_slot_ordering(SlotOrdering::Spread);
        assert_eq!(student.allocate(&set), student.allocate(&set));
    }

    #[test]
    fn test_no_room_double_booking_under_load() {
        let set = SectionSet::new(
            (0..60)
                .map(|i| Section::new(format!("C{i}"), SectionSuffix::A).with_students([format!("S{i}")]))
                .collect(),
        );
        let t = GreedyAllocator::new()
            .with_calendar(TermCalendar::default().with_weeks(Span::one_to(5)))
            .allocate(&set);

        let mut seen: HashMap<SlotCoordinate, &str> = HashMap::new();
        for s in &t.sessions {
            assert!(seen.insert(s.coordinate(), &s.section_id).is_none());
        }
    }
}
