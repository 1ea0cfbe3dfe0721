//! What a failed read means for scheduling.
//!
//! Store reads come back as explicit results ([`ProbeResult`],
//! [`LeaveLookup`]). [`ReadFailurePolicy`] is the single place where a
//! failure is turned into an answer the slot search can use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use planner_models::{LeaveRecord, TimeSlot};

/// Raw result of reading one employee's committed hours for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The store answered; slots are sorted by start hour.
    Committed(Vec<TimeSlot>),
    /// The store failed to answer.
    StoreFailure(String),
    /// The date is a Saturday or Sunday and has no task-store address.
    NotABusinessDay,
}

/// Raw result of reading one employee's leave for one day.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveLookup {
    /// The directory answered.
    Records(Vec<LeaveRecord>),
    /// The directory failed to answer.
    StoreFailure(String),
}

/// A day as the slot search sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAgenda {
    /// Bookable; the listed hours are taken.
    Open(Vec<TimeSlot>),
    /// Nothing can be booked.
    Closed,
}

impl DayAgenda {
    /// Returns true if `slot` can be booked on this day.
    pub fn is_free(&self, slot: &TimeSlot) -> bool {
        match self {
            DayAgenda::Open(committed) => !committed.iter().any(|c| c.overlaps(slot)),
            DayAgenda::Closed => false,
        }
    }
}

/// How to treat a task-store or leave-directory read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReadFailurePolicy {
    /// A failed read counts as "nothing booked" and "not on leave".
    #[default]
    AssumeAvailable,
    /// A failed read closes the day and counts as "on leave".
    AssumeUnavailable,
}

impl ReadFailurePolicy {
    /// Turns a probe into an agenda.
    pub fn resolve(self, probe: ProbeResult) -> DayAgenda {
        match (probe, self) {
            (ProbeResult::Committed(slots), _) => DayAgenda::Open(slots),
            (ProbeResult::NotABusinessDay, _) => DayAgenda::Closed,
            (ProbeResult::StoreFailure(_), ReadFailurePolicy::AssumeAvailable) => {
                DayAgenda::Open(Vec::new())
            }
            (ProbeResult::StoreFailure(_), ReadFailurePolicy::AssumeUnavailable) => {
                DayAgenda::Closed
            }
        }
    }

    /// Turns a leave lookup into "is on leave".
    ///
    /// Only approved records whose range contains `date` count.
    pub fn resolve_leave(self, lookup: LeaveLookup, date: chrono::NaiveDate) -> bool {
        match lookup {
            LeaveLookup::Records(records) => {
                records.iter().any(|r| r.is_approved() && r.covers(date))
            }
            LeaveLookup::StoreFailure(_) => self == ReadFailurePolicy::AssumeUnavailable,
        }
    }
}

impl fmt::Display for ReadFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailurePolicy::AssumeAvailable => write!(f, "available"),
            ReadFailurePolicy::AssumeUnavailable => write!(f, "unavailable"),
        }
    }
}

impl FromStr for ReadFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "assume_available" | "assume-available" => {
                Ok(ReadFailurePolicy::AssumeAvailable)
            }
            "unavailable" | "assume_unavailable" | "assume-unavailable" => {
                Ok(ReadFailurePolicy::AssumeUnavailable)
            }
            other => Err(format!("unknown read failure policy: {}", other)),
        }
    }
}
