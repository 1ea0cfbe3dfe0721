//! JSON file backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use planner_models::{EmployeeId, LeaveRecord, PhaseRecord, Project, ProjectId, TimeBlock};

use crate::atomic::{read_json, read_json_or_default, write_json_atomic};
use crate::error::{PersistenceError, Result};
use crate::traits::{LeaveDirectory, ProjectStore, TaskStore};

/// Stores blocks, leave, projects and phases as JSON files.
///
/// Layout:
/// ```text
/// base_path/
/// ├── blocks/
/// │   └── {employee_id}/
/// │       └── {week_start}.json     # all blocks of that week
/// ├── leave/
/// │   └── {employee_id}.json
/// └── projects/
///     └── {project_id}/
///         ├── project.json
///         └── phases/
///             └── {phase_id}.json
/// ```
///
/// Read-modify-write cycles on week and leave files are serialized by an
/// in-process lock. Separate processes sharing a directory are not
/// coordinated.
pub struct FileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a new FileStore rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the root directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn employee_blocks_dir(&self, employee: &EmployeeId) -> Result<PathBuf> {
        let segment = path_segment("employee", employee.as_str())?;
        Ok(self.base_path.join("blocks").join(segment))
    }

    fn week_path(&self, employee: &EmployeeId, week_start: NaiveDate) -> Result<PathBuf> {
        Ok(self
            .employee_blocks_dir(employee)?
            .join(format!("{}.json", week_start.format("%Y-%m-%d"))))
    }

    fn leave_path(&self, employee: &EmployeeId) -> Result<PathBuf> {
        let segment = path_segment("employee", employee.as_str())?;
        Ok(self.base_path.join("leave").join(format!("{}.json", segment)))
    }

    fn project_dir(&self, project_id: &ProjectId) -> Result<PathBuf> {
        let segment = path_segment("project", project_id.as_str())?;
        Ok(self.base_path.join("projects").join(segment))
    }

    /// Records a leave period for an employee.
    pub async fn record_leave(&self, record: LeaveRecord) -> Result<LeaveRecord> {
        let _guard = self.write_lock.lock().await;
        let path = self.leave_path(&record.employee_id)?;
        let mut records: Vec<LeaveRecord> = read_json_or_default(&path)?;
        records.push(record.clone());
        write_json_atomic(&path, &records)?;
        Ok(record)
    }

    /// All blocks of an employee, in date and hour order.
    ///
    /// Week files that fail to parse are skipped with a warning.
    pub fn list_blocks(&self, employee: &EmployeeId) -> Result<Vec<TimeBlock>> {
        let dir = self.employee_blocks_dir(employee)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let read_err = |source: std::io::Error| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        };

        let mut blocks = Vec::new();
        for entry in fs::read_dir(&dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match read_json::<Vec<TimeBlock>>(&path) {
                Ok(week) => blocks.extend(week),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable week file"
                    );
                }
            }
        }

        blocks.sort_by_key(|b| (b.week_start, b.day_index, b.start_hour));
        Ok(blocks)
    }

    /// Loads a project by ID.
    pub fn load_project(&self, project_id: &ProjectId) -> Result<Project> {
        let path = self.project_dir(project_id)?.join("project.json");
        if !path.exists() {
            return Err(PersistenceError::NotFound {
                kind: "project".to_string(),
                id: project_id.to_string(),
            });
        }
        read_json(&path)
    }
}

#[async_trait]
impl TaskStore for FileStore {
    async fn query_day(
        &self,
        employee: &EmployeeId,
        week_start: NaiveDate,
        day_index: u8,
    ) -> Result<Vec<TimeBlock>> {
        let week: Vec<TimeBlock> = read_json_or_default(&self.week_path(employee, week_start)?)?;
        let mut day: Vec<TimeBlock> = week
            .into_iter()
            .filter(|b| b.day_index == day_index)
            .collect();
        day.sort_by_key(|b| b.start_hour);
        Ok(day)
    }

    async fn insert(&self, block: TimeBlock) -> Result<TimeBlock> {
        let _guard = self.write_lock.lock().await;
        let path = self.week_path(&block.employee_id, block.week_start)?;
        let mut week: Vec<TimeBlock> = read_json_or_default(&path)?;
        week.push(block.clone());
        write_json_atomic(&path, &week)?;
        debug!(block_id = %block.id, path = %path.display(), "stored block");
        Ok(block)
    }
}

#[async_trait]
impl LeaveDirectory for FileStore {
    async fn approved_leave(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<LeaveRecord>> {
        let records: Vec<LeaveRecord> = read_json_or_default(&self.leave_path(employee)?)?;
        Ok(records
            .into_iter()
            .filter(|r| r.is_approved() && r.covers(date))
            .collect())
    }
}

#[async_trait]
impl ProjectStore for FileStore {
    async fn insert_project(&self, project: Project) -> Result<Project> {
        let path = self.project_dir(&project.id)?.join("project.json");
        if path.exists() {
            return Err(PersistenceError::AlreadyExists {
                kind: "project".to_string(),
                id: project.id.to_string(),
            });
        }
        write_json_atomic(&path, &project)?;
        Ok(project)
    }

    async fn insert_phase(&self, phase: PhaseRecord) -> Result<PhaseRecord> {
        let project_dir = self.project_dir(&phase.project_id)?;
        if !project_dir.join("project.json").exists() {
            return Err(PersistenceError::NotFound {
                kind: "project".to_string(),
                id: phase.project_id.to_string(),
            });
        }
        let segment = path_segment("phase", phase.id.as_str())?;
        let path = project_dir.join("phases").join(format!("{}.json", segment));
        write_json_atomic(&path, &phase)?;
        Ok(phase)
    }
}

/// Returns `id` if it names a single entry inside its parent directory.
fn path_segment<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    let traverses = id.is_empty()
        || id == "."
        || id.contains("..")
        || id.contains(['/', '\\', '\0']);
    if traverses {
        return Err(PersistenceError::InvalidId {
            kind: kind.to_string(),
            id: id.to_string(),
        });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_models::{BusinessDay, ProjectPhase, TimeSlot};
    use tempfile::tempdir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn block(employee: &str, date: NaiveDate, start: u8, hours: u8) -> TimeBlock {
        let day = BusinessDay::from_date(date).unwrap();
        TimeBlock::builder(employee, day, TimeSlot::new(start, hours), "tester").build()
    }

    #[tokio::test]
    async fn test_insert_and_query_day() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.insert(block("anna", d(12), 13, 2)).await.unwrap();
        store.insert(block("anna", d(12), 9, 2)).await.unwrap();
        store.insert(block("anna", d(14), 9, 8)).await.unwrap();

        let tuesday = store.query_day(&"anna".into(), d(11), 1).await.unwrap();
        assert_eq!(tuesday.len(), 2);
        assert_eq!(tuesday[0].start_hour, 9);
        assert_eq!(tuesday[1].start_hour, 13);

        assert!(dir.path().join("blocks/anna/2024-03-11.json").exists());
    }

    #[tokio::test]
    async fn test_query_missing_week_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let day = store.query_day(&"anna".into(), d(11), 0).await.unwrap();
        assert!(day.is_empty());
    }

    #[tokio::test]
    async fn test_list_blocks_across_weeks() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.insert(block("anna", d(19), 9, 1)).await.unwrap();
        store.insert(block("anna", d(12), 10, 1)).await.unwrap();
        store.insert(block("bram", d(12), 10, 1)).await.unwrap();

        let blocks = store.list_blocks(&"anna".into()).unwrap();
        let dates: Vec<NaiveDate> = blocks.iter().map(|b| b.date()).collect();
        assert_eq!(dates, vec![d(12), d(19)]);
    }

    #[tokio::test]
    async fn test_list_blocks_skips_corrupt_week() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.insert(block("anna", d(12), 10, 1)).await.unwrap();
        fs::write(dir.path().join("blocks/anna/2024-03-18.json"), b"garbage").unwrap();

        let blocks = store.list_blocks(&"anna".into()).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_week_fails_query() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::create_dir_all(dir.path().join("blocks/anna")).unwrap();
        fs::write(dir.path().join("blocks/anna/2024-03-11.json"), b"garbage").unwrap();

        let result = store.query_day(&"anna".into(), d(11), 0).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_leave_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .record_leave(LeaveRecord::approved("anna", d(11), d(15)))
            .await
            .unwrap();
        store
            .record_leave(LeaveRecord::new("anna", d(18), d(18)))
            .await
            .unwrap();

        let employee: EmployeeId = "anna".into();
        assert_eq!(store.approved_leave(&employee, d(13)).await.unwrap().len(), 1);
        assert!(store.approved_leave(&employee, d(18)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_project_and_phase_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let project = store
            .insert_project(Project::new("Lente", "lead").with_client("Jansen"))
            .await
            .unwrap();
        let phase = store
            .insert_phase(PhaseRecord::new(
                project.id.clone(),
                ProjectPhase::new("Shoot", vec!["anna".into()], d(11), 2, 8),
            ))
            .await
            .unwrap();

        let loaded = store.load_project(&project.id).unwrap();
        assert_eq!(loaded.client.as_deref(), Some("Jansen"));
        assert!(dir
            .path()
            .join("projects")
            .join(project.id.as_str())
            .join("phases")
            .join(format!("{}.json", phase.id))
            .exists());
    }

    #[tokio::test]
    async fn test_phase_for_unknown_project_fails() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let result = store
            .insert_phase(PhaseRecord::new(
                "proj-unknown",
                ProjectPhase::new("Shoot", vec!["anna".into()], d(11), 2, 8),
            ))
            .await;
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rejects_ids_that_leave_the_state_dir() {
        let root = tempdir().unwrap();
        let state = root.path().join("state");
        let store = FileStore::new(&state);

        let result = store.insert(block("../../outside", d(11), 9, 1)).await;
        assert!(matches!(result, Err(PersistenceError::InvalidId { .. })));
        assert!(!root.path().join("outside").exists());

        let result = store
            .record_leave(LeaveRecord::approved("../escape", d(11), d(11)))
            .await;
        assert!(matches!(result, Err(PersistenceError::InvalidId { .. })));
        assert!(!root.path().join("escape.json").exists());

        for id in ["", "a/b", "a\\b", ".."] {
            let employee: EmployeeId = id.into();
            assert!(store.query_day(&employee, d(11), 0).await.is_err(), "{:?}", id);
            assert!(store.list_blocks(&employee).is_err(), "{:?}", id);
        }
        assert!(store.load_project(&"../proj".into()).is_err());
    }

    #[test]
    fn test_path_segment_accepts_generated_ids() {
        assert_eq!(path_segment("employee", "emp-anna").unwrap(), "emp-anna");
        let id = ProjectId::new();
        assert_eq!(path_segment("project", id.as_str()).unwrap(), id.as_str());
    }
}
