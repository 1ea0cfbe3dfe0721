//! Core data models for the agency planner.
//!
//! This crate provides the fundamental data types used by the booking
//! scheduler: time blocks, leave records, projects and phases, typed IDs,
//! and the calendar arithmetic that maps dates onto weekly block addresses.

pub mod block;
pub mod builders;
pub mod calendar;
pub mod ids;
pub mod leave;
pub mod outcome;
pub mod project;

// Re-export main types
pub use block::{BlockStatus, TimeBlock, TimeSlot};
pub use builders::{TimeBlockBuilder, DEFAULT_CATEGORY};
pub use calendar::{
    business_index, enumerate_business_days, enumerate_days, is_weekend, week_start,
    weekday_index, BusinessDay, BUSINESS_DAYS_PER_WEEK,
};
pub use ids::{BlockId, EmployeeId, LeaveId, PhaseId, ProjectId, UserId};
pub use leave::{LeaveRecord, LeaveStatus};
pub use outcome::SchedulingOutcome;
pub use project::{PhaseRecord, Project, ProjectPhase, ProjectRequest};
