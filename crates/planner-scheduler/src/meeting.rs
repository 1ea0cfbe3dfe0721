//! Meeting placement.
//!
//! A meeting books the same fixed hours for every participant. Unlike phase
//! scheduling there is no search: the requester picked the time.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use planner_models::{
    BlockStatus, BusinessDay, EmployeeId, ProjectId, TimeBlock, TimeSlot, UserId,
};
use planner_persistence::TaskStore;

use crate::discipline::Discipline;
use crate::error::{Result, SchedulerError};
use crate::prober::AvailabilityProber;

/// Whether meeting placement looks at existing bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeetingConflictPolicy {
    /// Book every participant without checking; organizers clear the time.
    #[default]
    Trust,
    /// Skip participants whose requested hours are already taken.
    Reject,
}

impl fmt::Display for MeetingConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingConflictPolicy::Trust => write!(f, "trust"),
            MeetingConflictPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for MeetingConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(MeetingConflictPolicy::Trust),
            "reject" => Ok(MeetingConflictPolicy::Reject),
            other => Err(format!("unknown meeting conflict policy: {}", other)),
        }
    }
}

/// A meeting to put in participants' calendars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Meeting title.
    pub title: String,
    /// Day of the meeting; must be Monday–Friday.
    pub date: NaiveDate,
    /// First hour.
    pub start_hour: u8,
    /// End hour (exclusive).
    pub end_hour: u8,
    /// Employees to book.
    pub participants: Vec<EmployeeId>,
    /// Organizer; owns the hard lock.
    pub created_by: UserId,
    /// Project the meeting is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl MeetingRequest {
    /// Creates a meeting request without a project.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        participants: Vec<EmployeeId>,
        created_by: impl Into<UserId>,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_hour,
            end_hour,
            participants,
            created_by: created_by.into(),
            project_id: None,
        }
    }

    /// The booked hours: `end_hour - start_hour` starting at `start_hour`.
    pub fn slot(&self) -> Result<TimeSlot> {
        if self.end_hour <= self.start_hour || self.end_hour > 24 {
            return Err(SchedulerError::InvalidRequest(format!(
                "meeting hours {}-{} are not a valid range",
                self.start_hour, self.end_hour
            )));
        }
        Ok(TimeSlot::new(self.start_hour, self.end_hour - self.start_hour))
    }
}

/// Result of placing a meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingOutcome {
    /// Blocks created, one per booked participant.
    pub placed: Vec<TimeBlock>,
    /// Participants skipped because their hours were taken (only under `Reject`).
    pub conflicts: Vec<EmployeeId>,
    /// Participants whose block could not be stored.
    pub failed: Vec<(EmployeeId, String)>,
}

/// Places fixed, hard-locked meeting blocks.
#[derive(Clone)]
pub struct MeetingPlacer {
    store: Arc<dyn TaskStore>,
    prober: AvailabilityProber,
    policy: MeetingConflictPolicy,
}

impl MeetingPlacer {
    /// Creates a placer.
    pub fn new(
        store: Arc<dyn TaskStore>,
        prober: AvailabilityProber,
        policy: MeetingConflictPolicy,
    ) -> Self {
        Self {
            store,
            prober,
            policy,
        }
    }

    /// Books the meeting for every participant.
    ///
    /// Under [`MeetingConflictPolicy::Trust`] existing blocks are not
    /// consulted and overlapping bookings are created as requested.
    pub async fn place(&self, request: &MeetingRequest) -> Result<MeetingOutcome> {
        let slot = request.slot()?;
        let day = BusinessDay::from_date(request.date)
            .ok_or(SchedulerError::NotABusinessDay(request.date))?;

        let mut outcome = MeetingOutcome::default();
        for participant in &request.participants {
            if self.policy == MeetingConflictPolicy::Reject
                && !self.prober.is_slot_free(participant, request.date, slot).await
            {
                warn!(
                    employee = %participant,
                    date = %request.date,
                    %slot,
                    "meeting conflicts with existing booking"
                );
                outcome.conflicts.push(participant.clone());
                continue;
            }

            let mut builder = TimeBlock::builder(
                participant.clone(),
                day,
                slot,
                request.created_by.clone(),
            )
            .title(request.title.clone())
            .category(Discipline::Meeting.label())
            .status(BlockStatus::Fixed)
            .hard_lock(true);
            if let Some(project_id) = &request.project_id {
                builder = builder.project(project_id.clone());
            }

            match self.store.insert(builder.build()).await {
                Ok(block) => outcome.placed.push(block),
                Err(e) => {
                    warn!(employee = %participant, error = %e, "failed to store meeting block");
                    outcome.failed.push((participant.clone(), e.to_string()));
                }
            }
        }

        info!(
            title = %request.title,
            date = %request.date,
            placed = outcome.placed.len(),
            conflicts = outcome.conflicts.len(),
            "meeting placed"
        );
        Ok(outcome)
    }
}
