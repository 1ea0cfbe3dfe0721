//! In-memory backend for tests and embedding.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use planner_models::{
    EmployeeId, LeaveRecord, PhaseId, PhaseRecord, Project, ProjectId, TimeBlock,
};

use crate::error::{PersistenceError, Result};
use crate::traits::{LeaveDirectory, ProjectStore, TaskStore};

/// Implements every store contract over in-process maps.
///
/// Uses `tokio::sync::RwLock`: reads (availability probes) vastly outnumber
/// writes (inserts), and the scheduler probes several employees concurrently.
#[derive(Default)]
pub struct MemoryStore {
    blocks: RwLock<Vec<TimeBlock>>,
    leave: RwLock<Vec<LeaveRecord>>,
    projects: RwLock<HashMap<ProjectId, Project>>,
    phases: RwLock<HashMap<PhaseId, PhaseRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leave record.
    pub async fn add_leave(&self, record: LeaveRecord) {
        self.leave.write().await.push(record);
    }

    /// All stored blocks, in insertion order.
    pub async fn blocks(&self) -> Vec<TimeBlock> {
        self.blocks.read().await.clone()
    }

    /// Stored blocks of one employee, in date and hour order.
    pub async fn blocks_for(&self, employee: &EmployeeId) -> Vec<TimeBlock> {
        let mut blocks: Vec<TimeBlock> = self
            .blocks
            .read()
            .await
            .iter()
            .filter(|b| &b.employee_id == employee)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| (b.week_start, b.day_index, b.start_hour));
        blocks
    }

    /// Returns a stored project.
    pub async fn project(&self, id: &ProjectId) -> Option<Project> {
        self.projects.read().await.get(id).cloned()
    }

    /// Phases stored for a project.
    pub async fn phases_of(&self, project_id: &ProjectId) -> Vec<PhaseRecord> {
        self.phases
            .read()
            .await
            .values()
            .filter(|p| &p.project_id == project_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn query_day(
        &self,
        employee: &EmployeeId,
        week_start: NaiveDate,
        day_index: u8,
    ) -> Result<Vec<TimeBlock>> {
        let mut day: Vec<TimeBlock> = self
            .blocks
            .read()
            .await
            .iter()
            .filter(|b| {
                &b.employee_id == employee && b.week_start == week_start && b.day_index == day_index
            })
            .cloned()
            .collect();
        day.sort_by_key(|b| b.start_hour);
        Ok(day)
    }

    async fn insert(&self, block: TimeBlock) -> Result<TimeBlock> {
        debug!(block_id = %block.id, employee = %block.employee_id, "storing block in memory");
        self.blocks.write().await.push(block.clone());
        Ok(block)
    }
}

#[async_trait]
impl LeaveDirectory for MemoryStore {
    async fn approved_leave(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<LeaveRecord>> {
        Ok(self
            .leave
            .read()
            .await
            .iter()
            .filter(|l| &l.employee_id == employee && l.is_approved() && l.covers(date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert_project(&self, project: Project) -> Result<Project> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(PersistenceError::AlreadyExists {
                kind: "project".to_string(),
                id: project.id.to_string(),
            });
        }
        projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn insert_phase(&self, phase: PhaseRecord) -> Result<PhaseRecord> {
        if !self.projects.read().await.contains_key(&phase.project_id) {
            return Err(PersistenceError::NotFound {
                kind: "project".to_string(),
                id: phase.project_id.to_string(),
            });
        }
        self.phases
            .write()
            .await
            .insert(phase.id.clone(), phase.clone());
        Ok(phase)
    }
}
