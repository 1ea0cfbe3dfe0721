//! Time block types.
//!
//! A time block is one employee's commitment on one business day, starting
//! on a whole hour and lasting a whole number of hours.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::BusinessDay;
use crate::ids::{BlockId, EmployeeId, PhaseId, ProjectId, UserId};

/// An hour range within a day, half-open: `[start_hour, start_hour + duration_hours)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// First hour of the slot.
    pub start_hour: u8,
    /// Length in whole hours.
    pub duration_hours: u8,
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(start_hour: u8, duration_hours: u8) -> Self {
        Self {
            start_hour,
            duration_hours,
        }
    }

    /// Hour at which the slot ends (exclusive).
    pub fn end_hour(&self) -> u8 {
        self.start_hour.saturating_add(self.duration_hours)
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` overlap iff `a < d && b > c`.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_hour < other.end_hour() && self.end_hour() > other.start_hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start_hour, self.end_hour())
    }
}

/// Status of a time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    /// Provisional scheduler output.
    #[default]
    Concept,
    /// Committed, e.g. a meeting.
    Fixed,
}

/// An atomic scheduled commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Unique identifier for the block.
    pub id: BlockId,

    /// Employee the block is booked for.
    pub employee_id: EmployeeId,

    /// Project the block belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    /// Phase the block was scheduled for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<PhaseId>,

    /// Short description shown on the planning board.
    #[serde(default)]
    pub title: String,

    /// Monday of the week the block falls in.
    pub week_start: NaiveDate,

    /// Business index within the week (Monday = 0 … Friday = 4).
    pub day_index: u8,

    /// First hour of the block.
    pub start_hour: u8,

    /// Length in whole hours.
    pub duration_hours: u8,

    /// Discipline or category label.
    pub category: String,

    /// Concept or fixed.
    pub status: BlockStatus,

    /// Whether only the creator may change or delete the block.
    #[serde(default)]
    pub hard_lock: bool,

    /// Who created the block.
    pub created_by: UserId,

    /// When the block was created.
    pub created_at: DateTime<Utc>,
}

impl TimeBlock {
    /// The hour range this block occupies.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_hour, self.duration_hours)
    }

    /// The business day this block falls on.
    pub fn business_day(&self) -> BusinessDay {
        BusinessDay {
            week_start: self.week_start,
            index: self.day_index,
        }
    }

    /// The calendar date of this block.
    pub fn date(&self) -> NaiveDate {
        self.business_day().date()
    }

    /// Returns true if both blocks are on the same employee/day and their hours overlap.
    pub fn conflicts_with(&self, other: &TimeBlock) -> bool {
        self.employee_id == other.employee_id
            && self.week_start == other.week_start
            && self.day_index == other.day_index
            && self.slot().overlaps(&other.slot())
    }
}
