//! Result of a create-and-schedule run.

use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;

/// Aggregated outcome of creating a project and scheduling its phases.
///
/// `success` only reflects whether the project record exists; partial
/// placement shows up in `warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchedulingOutcome {
    /// True when the project record was created.
    pub success: bool,

    /// The created project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    /// Number of blocks placed across all phases.
    pub blocks_placed: usize,

    /// Non-fatal problems.
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Fatal problems; non-empty only when `success` is false.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SchedulingOutcome {
    /// Outcome for a created project; blocks are added as phases run.
    pub fn created(project_id: ProjectId) -> Self {
        Self {
            success: true,
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    /// Outcome for an aborted run.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![error.into()],
            ..Self::default()
        }
    }

    /// Records a warning.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns true if any warning was recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
