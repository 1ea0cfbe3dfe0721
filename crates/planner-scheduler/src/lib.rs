//! Booking scheduler for the agency planner.
//!
//! This crate places hour-granular time blocks in employees' weekly
//! calendars:
//! - Availability probing with an explicit read-failure policy
//! - First free slot, first common slot and next-business-day search
//! - Leave checks against approved leave
//! - Bulk placement of multi-day, multi-employee project phases
//! - Fixed, hard-locked meeting blocks
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use planner_models::{ProjectPhase, ProjectRequest};
//! use planner_persistence::FileStore;
//! use planner_scheduler::{Planner, SchedulerConfig};
//!
//! # async fn run() {
//! let store = Arc::new(FileStore::new("/tmp/agency-planner"));
//! let planner = Planner::from_store(store, SchedulerConfig::from_env());
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! let request = ProjectRequest::new("Lente campagne", "user-lead").with_phase(
//!     ProjectPhase::new("Productie", vec!["emp-anna".into()], start, 5, 4),
//! );
//!
//! let outcome = planner.create_project_and_schedule(&request).await;
//! println!("placed {} blocks", outcome.blocks_placed);
//! # }
//! ```

pub mod config;
pub mod cursor;
pub mod discipline;
pub mod error;
pub mod leave;
pub mod meeting;
pub mod phase;
pub mod planner;
pub mod policy;
pub mod prober;
pub mod slots;

pub use config::SchedulerConfig;
pub use cursor::DateCursor;
pub use discipline::{discipline_rules, infer_discipline, Discipline, DisciplineRule};
pub use error::{Result, SchedulerError};
pub use leave::LeaveChecker;
pub use meeting::{MeetingConflictPolicy, MeetingOutcome, MeetingPlacer, MeetingRequest};
pub use phase::{FaseScheduler, PhaseReport, PhaseRun, Placement, SkipReason, SkippedPlacement};
pub use planner::Planner;
pub use policy::{DayAgenda, LeaveLookup, ProbeResult, ReadFailurePolicy};
pub use prober::AvailabilityProber;
pub use slots::SlotFinder;
