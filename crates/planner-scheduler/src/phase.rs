//! Bulk placement of a project phase.
//!
//! For each requested working day, every employee of the phase gets one
//! block of `hours_per_day`:
//!
//! 1. The cursor skips weekends; weekends do not use up a requested day.
//! 2. Employees on approved leave are skipped for that day.
//! 3. The first free slot on the cursor date is booked. If the day is full,
//!    the next business day with room (within the fallback horizon) is
//!    booked instead and the cursor moves there for the remaining employees
//!    and days.
//! 4. After all employees, the cursor moves one calendar day.
//!
//! Anything that could not be placed is reported, never raised.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use planner_models::{
    BlockStatus, BusinessDay, EmployeeId, PhaseId, ProjectId, ProjectPhase, TimeBlock, UserId,
};
use planner_persistence::TaskStore;

use crate::cursor::DateCursor;
use crate::discipline::{infer_discipline, Discipline};
use crate::leave::LeaveChecker;
use crate::slots::SlotFinder;

/// Why an employee/day pair got no block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Approved leave on the cursor date.
    OnLeave,
    /// No free slot on the cursor date nor within the fallback horizon.
    NoSlot,
    /// The task store rejected the block.
    InsertFailed(String),
}

/// Outcome of one employee/day step.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// A block was stored.
    Placed(TimeBlock),
    /// Nothing was stored.
    Skipped(SkipReason),
}

/// An employee/day pair that got no block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPlacement {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub reason: SkipReason,
}

/// Result of scheduling one phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    /// Phase name.
    pub phase: String,
    /// Discipline written on the placed blocks.
    pub discipline: Discipline,
    /// Employees × requested days.
    pub expected: usize,
    /// Stored blocks, in placement order.
    pub placed: Vec<TimeBlock>,
    /// Pairs that got no block.
    pub skipped: Vec<SkippedPlacement>,
}

impl PhaseReport {
    fn new(phase: &ProjectPhase, discipline: Discipline) -> Self {
        Self {
            phase: phase.name.clone(),
            discipline,
            expected: phase.expected_blocks(),
            placed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn record(&mut self, employee: &EmployeeId, date: NaiveDate, placement: Placement) {
        match placement {
            Placement::Placed(block) => self.placed.push(block),
            Placement::Skipped(reason) => self.skipped.push(SkippedPlacement {
                employee_id: employee.clone(),
                date,
                reason,
            }),
        }
    }

    /// Number of blocks stored.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// True when every expected block was stored.
    pub fn is_complete(&self) -> bool {
        self.placed.len() >= self.expected
    }
}

/// A phase to place, with the records its blocks should point to.
#[derive(Debug, Clone)]
pub struct PhaseRun {
    pub phase: ProjectPhase,
    pub created_by: UserId,
    pub project_id: Option<ProjectId>,
    pub phase_id: Option<PhaseId>,
}

impl PhaseRun {
    /// A run not linked to stored project or phase records.
    pub fn new(phase: ProjectPhase, created_by: impl Into<UserId>) -> Self {
        Self {
            phase,
            created_by: created_by.into(),
            project_id: None,
            phase_id: None,
        }
    }

    /// Links placed blocks to a stored project and phase.
    pub fn for_records(mut self, project_id: ProjectId, phase_id: PhaseId) -> Self {
        self.project_id = Some(project_id);
        self.phase_id = Some(phase_id);
        self
    }
}

/// Places the blocks of one phase.
#[derive(Clone)]
pub struct FaseScheduler {
    store: Arc<dyn TaskStore>,
    slots: SlotFinder,
    leave: LeaveChecker,
    fallback_horizon_days: u32,
}

impl FaseScheduler {
    /// Creates a scheduler.
    pub fn new(
        store: Arc<dyn TaskStore>,
        slots: SlotFinder,
        leave: LeaveChecker,
        fallback_horizon_days: u32,
    ) -> Self {
        Self {
            store,
            slots,
            leave,
            fallback_horizon_days,
        }
    }

    /// Walks the phase's days and employees, storing one concept block per
    /// employee per working day where possible.
    pub async fn schedule(&self, run: &PhaseRun) -> PhaseReport {
        let discipline = infer_discipline(&run.phase.name);
        let mut report = PhaseReport::new(&run.phase, discipline);
        let mut cursor = DateCursor::new(run.phase.start_date);

        for _ in 0..run.phase.duration_days {
            cursor = cursor.skip_weekend();
            for employee in &run.phase.employees {
                let (next, placement) = self.place(cursor, employee, run, discipline).await;
                cursor = next;
                report.record(employee, cursor.date(), placement);
            }
            cursor = cursor.next_day();
        }

        info!(
            phase = %run.phase.name,
            placed = report.placed_count(),
            expected = report.expected,
            "phase scheduled"
        );
        report
    }

    /// One employee/day step. Returns the cursor the next step must use.
    pub async fn place(
        &self,
        cursor: DateCursor,
        employee: &EmployeeId,
        run: &PhaseRun,
        discipline: Discipline,
    ) -> (DateCursor, Placement) {
        let hours = run.phase.hours_per_day;
        let date = cursor.date();

        if self.leave.is_on_leave(employee, date).await {
            debug!(employee = %employee, %date, "on leave, skipping");
            return (cursor, Placement::Skipped(SkipReason::OnLeave));
        }

        let (cursor, slot) = match self.slots.first_free_slot(employee, date, hours).await {
            Some(slot) => (cursor, slot),
            None => {
                let later = self
                    .slots
                    .next_available_business_day(employee, date, hours, self.fallback_horizon_days)
                    .await;
                match later {
                    Some((later_date, slot)) => {
                        debug!(
                            employee = %employee,
                            from = %date,
                            to = %later_date,
                            "day full, moving cursor"
                        );
                        (cursor.jump_to(later_date), slot)
                    }
                    None => {
                        warn!(employee = %employee, %date, hours, "no free slot within horizon");
                        return (cursor, Placement::Skipped(SkipReason::NoSlot));
                    }
                }
            }
        };

        let Some(day) = BusinessDay::from_date(cursor.date()) else {
            return (cursor, Placement::Skipped(SkipReason::NoSlot));
        };

        let mut builder = TimeBlock::builder(employee.clone(), day, slot, run.created_by.clone())
            .title(run.phase.name.clone())
            .category(discipline.label())
            .status(BlockStatus::Concept)
            .hard_lock(false);
        if let Some(project_id) = &run.project_id {
            builder = builder.project(project_id.clone());
        }
        if let Some(phase_id) = &run.phase_id {
            builder = builder.phase(phase_id.clone());
        }

        match self.store.insert(builder.build()).await {
            Ok(block) => {
                debug!(employee = %employee, date = %cursor.date(), %slot, "block placed");
                (cursor, Placement::Placed(block))
            }
            Err(e) => {
                warn!(
                    employee = %employee,
                    date = %cursor.date(),
                    error = %e,
                    "failed to store block"
                );
                (cursor, Placement::Skipped(SkipReason::InsertFailed(e.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::policy::ReadFailurePolicy;
    use crate::prober::AvailabilityProber;
    use planner_models::{LeaveRecord, TimeSlot};
    use planner_persistence::MemoryStore;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn scheduler(store: Arc<MemoryStore>) -> FaseScheduler {
        let policy = ReadFailurePolicy::default();
        let slots = SlotFinder::new(
            AvailabilityProber::new(store.clone(), policy),
            &SchedulerConfig::default(),
        );
        let leave = LeaveChecker::new(store.clone(), policy);
        FaseScheduler::new(store, slots, leave, 5)
    }

    async fn book(store: &MemoryStore, employee: &str, date: NaiveDate, start: u8, hours: u8) {
        let day = BusinessDay::from_date(date).unwrap();
        store
            .insert(TimeBlock::builder(employee, day, TimeSlot::new(start, hours), "t").build())
            .await
            .unwrap();
    }

    fn phase(name: &str, employees: &[&str], start: NaiveDate, days: u32, hours: u8) -> PhaseRun {
        PhaseRun::new(
            ProjectPhase::new(
                name,
                employees.iter().map(|e| EmployeeId::from(*e)).collect(),
                start,
                days,
                hours,
            ),
            "lead",
        )
    }

    #[tokio::test]
    async fn test_places_one_block_per_employee_per_day() {
        let store = Arc::new(MemoryStore::new());
        let report = scheduler(store.clone())
            .schedule(&phase("Conceptfase", &["anna", "bram"], d(11), 3, 4))
            .await;

        assert_eq!(report.expected, 6);
        assert_eq!(report.placed_count(), 6);
        assert!(report.is_complete());
        assert!(report.skipped.is_empty());
        for block in &report.placed {
            assert_eq!(block.status, BlockStatus::Concept);
            assert!(!block.hard_lock);
            assert_eq!(block.category, "Conceptontwikkeling");
            assert_eq!(block.start_hour, 9);
            assert_eq!(block.duration_hours, 4);
        }
        let dates: Vec<NaiveDate> = store
            .blocks_for(&"anna".into())
            .await
            .iter()
            .map(|b| b.date())
            .collect();
        assert_eq!(dates, vec![d(11), d(12), d(13)]);
    }

    #[tokio::test]
    async fn test_weekends_do_not_count_as_days() {
        let store = Arc::new(MemoryStore::new());
        // Thursday start, three working days: Thu, Fri, Mon.
        let report = scheduler(store.clone())
            .schedule(&phase("Productie", &["anna"], d(14), 3, 8))
            .await;

        let dates: Vec<NaiveDate> = report.placed.iter().map(|b| b.date()).collect();
        assert_eq!(dates, vec![d(14), d(15), d(18)]);
    }

    #[tokio::test]
    async fn test_start_on_weekend_moves_to_monday() {
        let store = Arc::new(MemoryStore::new());
        let report = scheduler(store)
            .schedule(&phase("Productie", &["anna"], d(16), 1, 2))
            .await;

        assert_eq!(report.placed[0].date(), d(18));
    }

    #[tokio::test]
    async fn test_second_block_fills_gap_after_first() {
        let store = Arc::new(MemoryStore::new());
        book(&store, "anna", d(11), 9, 2).await;

        let report = scheduler(store)
            .schedule(&phase("Montage", &["anna"], d(11), 1, 3))
            .await;

        assert_eq!(report.placed[0].start_hour, 11);
        assert_eq!(report.placed[0].category, "Postproductie");
    }

    #[tokio::test]
    async fn test_leave_skips_employee_for_that_day() {
        let store = Arc::new(MemoryStore::new());
        store.add_leave(LeaveRecord::approved("bram", d(12), d(12))).await;

        let report = scheduler(store)
            .schedule(&phase("Strategie", &["anna", "bram"], d(11), 2, 2))
            .await;

        assert_eq!(report.placed_count(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].employee_id.as_str(), "bram");
        assert_eq!(report.skipped[0].date, d(12));
        assert_eq!(report.skipped[0].reason, SkipReason::OnLeave);
    }

    #[tokio::test]
    async fn test_full_day_moves_shared_cursor() {
        let store = Arc::new(MemoryStore::new());
        // anna is fully booked on Monday; bram is free all week.
        book(&store, "anna", d(11), 9, 9).await;

        let report = scheduler(store)
            .schedule(&phase("Shoot", &["anna", "bram"], d(11), 2, 4))
            .await;

        let placed: Vec<(String, NaiveDate)> = report
            .placed
            .iter()
            .map(|b| (b.employee_id.to_string(), b.date()))
            .collect();
        // anna's fallback to Tuesday moves the cursor, so bram lands on
        // Tuesday too and the second day becomes Wednesday.
        assert_eq!(
            placed,
            vec![
                ("anna".to_string(), d(12)),
                ("bram".to_string(), d(12)),
                ("anna".to_string(), d(13)),
                ("bram".to_string(), d(13)),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_slot_within_horizon() {
        let store = Arc::new(MemoryStore::new());
        for day in [11, 12, 13, 14, 15] {
            book(&store, "anna", d(day), 9, 9).await;
        }

        let report = scheduler(store)
            .schedule(&phase("Shoot", &["anna"], d(11), 1, 1))
            .await;

        assert_eq!(report.placed_count(), 0);
        assert_eq!(report.skipped[0].reason, SkipReason::NoSlot);
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_oversized_day_places_nothing() {
        let store = Arc::new(MemoryStore::new());
        let report = scheduler(store)
            .schedule(&phase("Shoot", &["anna"], d(11), 2, 10))
            .await;

        assert_eq!(report.placed_count(), 0);
        assert_eq!(report.skipped.len(), 2);
    }

    #[tokio::test]
    async fn test_place_returns_jumped_cursor() {
        let store = Arc::new(MemoryStore::new());
        book(&store, "anna", d(15), 9, 9).await;
        let run = phase("Shoot", &["anna"], d(15), 1, 2);

        let (cursor, placement) = scheduler(store)
            .place(DateCursor::new(d(15)), &"anna".into(), &run, Discipline::Productie)
            .await;

        assert_eq!(cursor.date(), d(18));
        assert!(matches!(placement, Placement::Placed(ref b) if b.date() == d(18)));
    }
}
