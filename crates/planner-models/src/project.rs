//! Project and phase types.
//!
//! A project is split into phases; each phase asks for a number of working
//! days from a set of employees at a fixed number of hours per day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EmployeeId, PhaseId, ProjectId, UserId};

/// A project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: ProjectId,

    /// Name of the project.
    pub name: String,

    /// Client the project is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Who created the project.
    pub created_by: UserId,

    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project.
    pub fn new(name: impl Into<String>, created_by: impl Into<UserId>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            client: None,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets the client.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }
}

/// A phase as requested by the caller. Consumed once by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPhase {
    /// Phase name; also drives the discipline of placed blocks.
    pub name: String,

    /// Employees working on the phase, in placement order.
    pub employees: Vec<EmployeeId>,

    /// First day of the phase.
    pub start_date: NaiveDate,

    /// Number of working days requested (weekends do not count).
    pub duration_days: u32,

    /// Hours per employee per working day.
    pub hours_per_day: u8,
}

impl ProjectPhase {
    /// Creates a new phase request.
    pub fn new(
        name: impl Into<String>,
        employees: Vec<EmployeeId>,
        start_date: NaiveDate,
        duration_days: u32,
        hours_per_day: u8,
    ) -> Self {
        Self {
            name: name.into(),
            employees,
            start_date,
            duration_days,
            hours_per_day,
        }
    }

    /// Number of blocks a complete placement would produce.
    pub fn expected_blocks(&self) -> usize {
        self.employees.len() * self.duration_days as usize
    }
}

/// A persisted phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Unique identifier for the phase.
    pub id: PhaseId,

    /// Project the phase belongs to.
    pub project_id: ProjectId,

    /// The request the phase was created from.
    #[serde(flatten)]
    pub phase: ProjectPhase,

    /// When the phase was created.
    pub created_at: DateTime<Utc>,
}

impl PhaseRecord {
    /// Creates a phase record for a project.
    pub fn new(project_id: impl Into<ProjectId>, phase: ProjectPhase) -> Self {
        Self {
            id: PhaseId::new(),
            project_id: project_id.into(),
            phase,
            created_at: Utc::now(),
        }
    }
}

/// A request to create a project and schedule its phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Project name.
    pub name: String,

    /// Client the project is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Who is creating the project.
    pub created_by: UserId,

    /// Phases to schedule, in order.
    #[serde(default)]
    pub phases: Vec<ProjectPhase>,
}

impl ProjectRequest {
    /// Creates a request without phases.
    pub fn new(name: impl Into<String>, created_by: impl Into<UserId>) -> Self {
        Self {
            name: name.into(),
            client: None,
            created_by: created_by.into(),
            phases: Vec::new(),
        }
    }

    /// Adds a phase.
    pub fn with_phase(mut self, phase: ProjectPhase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Builds the project record for this request.
    pub fn to_project(&self) -> Project {
        let project = Project::new(self.name.clone(), self.created_by.clone());
        match &self.client {
            Some(client) => project.with_client(client.clone()),
            None => project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_blocks() {
        let phase = ProjectPhase::new(
            "Productie",
            vec!["a".into(), "b".into(), "c".into()],
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            5,
            4,
        );
        assert_eq!(phase.expected_blocks(), 15);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "name": "Lente campagne",
            "client": "Bakkerij Jansen",
            "created_by": "user-lead",
            "phases": [{
                "name": "Conceptfase",
                "employees": ["emp-anna", "emp-bram"],
                "start_date": "2024-03-11",
                "duration_days": 3,
                "hours_per_day": 4
            }]
        }"#;

        let request: ProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.phases.len(), 1);
        assert_eq!(request.phases[0].employees[1].as_str(), "emp-bram");

        let project = request.to_project();
        assert_eq!(project.client.as_deref(), Some("Bakkerij Jansen"));
        assert_eq!(project.created_by.as_str(), "user-lead");
    }

    #[test]
    fn test_phase_record_flattens_request() {
        let phase = ProjectPhase::new(
            "Shoot",
            vec!["a".into()],
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            1,
            8,
        );
        let record = PhaseRecord::new("proj-1", phase);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Shoot");
        assert_eq!(value["project_id"], "proj-1");
    }
}
