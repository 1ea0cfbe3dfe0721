//! Top-level scheduling entry points.

use std::sync::Arc;

use tracing::{error, info, warn};

use planner_models::{PhaseRecord, ProjectRequest, SchedulingOutcome};
use planner_persistence::{LeaveDirectory, ProjectStore, TaskStore};

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::leave::LeaveChecker;
use crate::meeting::{MeetingOutcome, MeetingPlacer, MeetingRequest};
use crate::phase::{FaseScheduler, PhaseReport, PhaseRun};
use crate::prober::AvailabilityProber;
use crate::slots::SlotFinder;

/// Wires the scheduler components to a set of stores.
#[derive(Clone)]
pub struct Planner {
    tasks: Arc<dyn TaskStore>,
    leave: Arc<dyn LeaveDirectory>,
    projects: Arc<dyn ProjectStore>,
    config: SchedulerConfig,
}

impl Planner {
    /// Creates a planner over separate stores.
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        leave: Arc<dyn LeaveDirectory>,
        projects: Arc<dyn ProjectStore>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            tasks,
            leave,
            projects,
            config,
        }
    }

    /// Creates a planner over one backend implementing every store.
    pub fn from_store<S>(store: Arc<S>, config: SchedulerConfig) -> Self
    where
        S: TaskStore + LeaveDirectory + ProjectStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Availability prober over the task store.
    pub fn prober(&self) -> AvailabilityProber {
        AvailabilityProber::new(self.tasks.clone(), self.config.read_failure_policy)
    }

    /// Slot finder using the configured work window.
    pub fn slot_finder(&self) -> SlotFinder {
        SlotFinder::new(self.prober(), &self.config)
    }

    /// Leave checker over the leave directory.
    pub fn leave_checker(&self) -> LeaveChecker {
        LeaveChecker::new(self.leave.clone(), self.config.read_failure_policy)
    }

    /// Phase scheduler.
    pub fn fase_scheduler(&self) -> FaseScheduler {
        FaseScheduler::new(
            self.tasks.clone(),
            self.slot_finder(),
            self.leave_checker(),
            self.config.fallback_horizon_days,
        )
    }

    /// Meeting placer.
    pub fn meeting_placer(&self) -> MeetingPlacer {
        MeetingPlacer::new(self.tasks.clone(), self.prober(), self.config.meeting_conflicts)
    }

    /// Creates the project, then schedules its phases in order.
    ///
    /// Only a failure to store the project is fatal. A phase whose record
    /// cannot be stored is skipped with a warning; blocks already placed are
    /// never rolled back.
    pub async fn create_project_and_schedule(&self, request: &ProjectRequest) -> SchedulingOutcome {
        let project = match self.projects.insert_project(request.to_project()).await {
            Ok(project) => project,
            Err(e) => {
                error!(project = %request.name, error = %e, "failed to create project");
                return SchedulingOutcome::failed(format!(
                    "could not create project '{}': {}",
                    request.name, e
                ));
            }
        };
        info!(
            project_id = %project.id,
            name = %project.name,
            phases = request.phases.len(),
            "project created"
        );

        let mut outcome = SchedulingOutcome::created(project.id.clone());
        let scheduler = self.fase_scheduler();

        for phase in &request.phases {
            if phase.expected_blocks() == 0 {
                warn!(phase = %phase.name, "phase has no employees or days");
                outcome.warn(format!("phase '{}' has nothing to schedule", phase.name));
            }

            let record = match self
                .projects
                .insert_phase(PhaseRecord::new(project.id.clone(), phase.clone()))
                .await
            {
                Ok(record) => record,
                Err(e) => {
                    warn!(phase = %phase.name, error = %e, "failed to create phase, skipping");
                    outcome.warn(format!("could not create phase '{}': {}", phase.name, e));
                    continue;
                }
            };

            let run = PhaseRun::new(phase.clone(), request.created_by.clone())
                .for_records(project.id.clone(), record.id);
            let report = scheduler.schedule(&run).await;
            outcome.blocks_placed += report.placed_count();
            if let Some(warning) = partial_placement_warning(&report) {
                outcome.warn(warning);
            }
        }

        info!(
            project_id = %project.id,
            blocks_placed = outcome.blocks_placed,
            warnings = outcome.warnings.len(),
            "project scheduled"
        );
        outcome
    }

    /// Books a meeting for every participant.
    pub async fn schedule_meeting(&self, request: &MeetingRequest) -> Result<MeetingOutcome> {
        self.meeting_placer().place(request).await
    }
}

fn partial_placement_warning(report: &PhaseReport) -> Option<String> {
    if report.is_complete() {
        return None;
    }
    Some(format!(
        "could not place every block for phase '{}' ({} of {} placed)",
        report.phase,
        report.placed_count(),
        report.expected
    ))
}
