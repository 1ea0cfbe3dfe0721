//! Availability probing against the task store.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use planner_models::{BusinessDay, EmployeeId, TimeSlot};
use planner_persistence::TaskStore;

use crate::policy::{DayAgenda, ProbeResult, ReadFailurePolicy};

/// Reads an employee's committed hours for a day and answers overlap questions.
#[derive(Clone)]
pub struct AvailabilityProber {
    store: Arc<dyn TaskStore>,
    policy: ReadFailurePolicy,
}

impl AvailabilityProber {
    /// Creates a prober over `store`.
    pub fn new(store: Arc<dyn TaskStore>, policy: ReadFailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Returns the read-failure policy in use.
    pub fn policy(&self) -> ReadFailurePolicy {
        self.policy
    }

    /// Reads the committed slots without applying any policy.
    pub async fn probe(&self, employee: &EmployeeId, date: NaiveDate) -> ProbeResult {
        let Some(day) = BusinessDay::from_date(date) else {
            debug!(employee = %employee, %date, "probe on a weekend");
            return ProbeResult::NotABusinessDay;
        };

        match self.store.query_day(employee, day.week_start, day.index).await {
            Ok(blocks) => {
                let mut slots: Vec<TimeSlot> = blocks.iter().map(|b| b.slot()).collect();
                slots.sort_by_key(|s| s.start_hour);
                ProbeResult::Committed(slots)
            }
            Err(e) => {
                warn!(
                    employee = %employee,
                    %date,
                    error = %e,
                    policy = %self.policy,
                    "task store read failed"
                );
                ProbeResult::StoreFailure(e.to_string())
            }
        }
    }

    /// The day as the slot search sees it, after the read-failure policy.
    pub async fn agenda(&self, employee: &EmployeeId, date: NaiveDate) -> DayAgenda {
        self.policy.resolve(self.probe(employee, date).await)
    }

    /// Committed slots sorted by start hour. A failed read yields an empty list.
    pub async fn committed_blocks(&self, employee: &EmployeeId, date: NaiveDate) -> Vec<TimeSlot> {
        match self.probe(employee, date).await {
            ProbeResult::Committed(slots) => slots,
            ProbeResult::StoreFailure(_) | ProbeResult::NotABusinessDay => Vec::new(),
        }
    }

    /// Returns true if no committed block overlaps `slot`.
    pub async fn is_slot_free(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> bool {
        self.agenda(employee, date).await.is_free(&slot)
    }
}
