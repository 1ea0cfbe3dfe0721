//! Leave records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{EmployeeId, LeaveId};

/// Approval status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Requested, not yet decided.
    #[default]
    Pending,
    /// Approved; the employee is unavailable.
    Approved,
    /// Rejected.
    Rejected,
}

/// A period of leave for one employee, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier for the record.
    pub id: LeaveId,
    /// Employee on leave.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start: NaiveDate,
    /// Last day of leave.
    pub end: NaiveDate,
    /// Approval status.
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Creates a pending leave record.
    pub fn new(employee_id: impl Into<EmployeeId>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: LeaveId::new(),
            employee_id: employee_id.into(),
            start,
            end,
            status: LeaveStatus::Pending,
        }
    }

    /// Creates an approved leave record.
    pub fn approved(employee_id: impl Into<EmployeeId>, start: NaiveDate, end: NaiveDate) -> Self {
        let mut record = Self::new(employee_id, start, end);
        record.status = LeaveStatus::Approved;
        record
    }

    /// Returns true if `start <= date <= end`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the record is approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}
