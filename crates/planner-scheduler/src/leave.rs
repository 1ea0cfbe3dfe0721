//! Leave checks against the leave directory.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use planner_models::EmployeeId;
use planner_persistence::LeaveDirectory;

use crate::policy::{LeaveLookup, ReadFailurePolicy};

/// Answers whether an employee is on approved leave.
#[derive(Clone)]
pub struct LeaveChecker {
    directory: Arc<dyn LeaveDirectory>,
    policy: ReadFailurePolicy,
}

impl LeaveChecker {
    /// Creates a checker over `directory`.
    pub fn new(directory: Arc<dyn LeaveDirectory>, policy: ReadFailurePolicy) -> Self {
        Self { directory, policy }
    }

    /// Reads leave records without applying any policy.
    pub async fn lookup(&self, employee: &EmployeeId, date: NaiveDate) -> LeaveLookup {
        match self.directory.approved_leave(employee, date).await {
            Ok(records) => LeaveLookup::Records(records),
            Err(e) => {
                warn!(
                    employee = %employee,
                    %date,
                    error = %e,
                    policy = %self.policy,
                    "leave directory read failed"
                );
                LeaveLookup::StoreFailure(e.to_string())
            }
        }
    }

    /// True iff an approved leave record of `employee` contains `date`.
    pub async fn is_on_leave(&self, employee: &EmployeeId, date: NaiveDate) -> bool {
        self.policy.resolve_leave(self.lookup(employee, date).await, date)
    }
}
