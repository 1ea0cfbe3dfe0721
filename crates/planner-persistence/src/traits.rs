//! Store contracts consumed by the scheduler.
//!
//! The scheduler only reads existing blocks and leave, and inserts new
//! records. Authorization (hard-lock ownership) and any overlap constraint
//! belong to the backend, not to these traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use planner_models::{EmployeeId, LeaveRecord, PhaseRecord, Project, TimeBlock};

use crate::error::Result;

/// Storage for time blocks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All blocks of `employee` on the given week and business index,
    /// sorted by start hour.
    async fn query_day(
        &self,
        employee: &EmployeeId,
        week_start: NaiveDate,
        day_index: u8,
    ) -> Result<Vec<TimeBlock>>;

    /// Stores a new block and returns it as stored.
    async fn insert(&self, block: TimeBlock) -> Result<TimeBlock>;
}

/// Source of leave records.
#[async_trait]
pub trait LeaveDirectory: Send + Sync {
    /// Approved leave records of `employee` whose range contains `date`.
    async fn approved_leave(&self, employee: &EmployeeId, date: NaiveDate)
        -> Result<Vec<LeaveRecord>>;
}

/// Storage for projects and their phases.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Stores a new project.
    async fn insert_project(&self, project: Project) -> Result<Project>;

    /// Stores a new phase. The owning project must exist.
    async fn insert_phase(&self, phase: PhaseRecord) -> Result<PhaseRecord>;
}
