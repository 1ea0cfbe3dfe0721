//! Builder patterns for complex types.

use chrono::Utc;

use crate::block::{BlockStatus, TimeBlock, TimeSlot};
use crate::calendar::BusinessDay;
use crate::ids::{BlockId, EmployeeId, PhaseId, ProjectId, UserId};

/// Default category for blocks that were not given one.
pub const DEFAULT_CATEGORY: &str = "Algemeen";

/// Builder for creating TimeBlock instances with a fluent API.
#[derive(Debug, Clone)]
pub struct TimeBlockBuilder {
    employee_id: EmployeeId,
    day: BusinessDay,
    slot: TimeSlot,
    created_by: UserId,
    project_id: Option<ProjectId>,
    phase_id: Option<PhaseId>,
    title: String,
    category: Option<String>,
    status: BlockStatus,
    hard_lock: bool,
}

impl TimeBlockBuilder {
    /// Creates a new TimeBlockBuilder with required fields.
    pub fn new(
        employee_id: impl Into<EmployeeId>,
        day: BusinessDay,
        slot: TimeSlot,
        created_by: impl Into<UserId>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            day,
            slot,
            created_by: created_by.into(),
            project_id: None,
            phase_id: None,
            title: String::new(),
            category: None,
            status: BlockStatus::Concept,
            hard_lock: false,
        }
    }

    /// Sets the owning project.
    pub fn project(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the owning phase.
    pub fn phase(mut self, phase_id: impl Into<PhaseId>) -> Self {
        self.phase_id = Some(phase_id.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the category label (defaults to [`DEFAULT_CATEGORY`]).
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the status.
    pub fn status(mut self, status: BlockStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the hard-lock flag.
    pub fn hard_lock(mut self, hard_lock: bool) -> Self {
        self.hard_lock = hard_lock;
        self
    }

    /// Builds the TimeBlock.
    pub fn build(self) -> TimeBlock {
        TimeBlock {
            id: BlockId::new(),
            employee_id: self.employee_id,
            project_id: self.project_id,
            phase_id: self.phase_id,
            title: self.title,
            week_start: self.day.week_start,
            day_index: self.day.index,
            start_hour: self.slot.start_hour,
            duration_hours: self.slot.duration_hours,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status: self.status,
            hard_lock: self.hard_lock,
            created_by: self.created_by,
            created_at: Utc::now(),
        }
    }
}

/// Convenience methods on TimeBlock for creating builders.
impl TimeBlock {
    /// Creates a builder for a new block.
    pub fn builder(
        employee_id: impl Into<EmployeeId>,
        day: BusinessDay,
        slot: TimeSlot,
        created_by: impl Into<UserId>,
    ) -> TimeBlockBuilder {
        TimeBlockBuilder::new(employee_id, day, slot, created_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tuesday() -> BusinessDay {
        BusinessDay::from_date(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let block = TimeBlock::builder("anna", tuesday(), TimeSlot::new(9, 2), "planner").build();

        assert_eq!(block.employee_id.as_str(), "anna");
        assert_eq!(block.day_index, 1);
        assert_eq!(block.start_hour, 9);
        assert_eq!(block.duration_hours, 2);
        assert_eq!(block.status, BlockStatus::Concept);
        assert!(!block.hard_lock);
        assert_eq!(block.category, DEFAULT_CATEGORY);
        assert!(block.project_id.is_none());
    }

    #[test]
    fn test_builder_all_fields() {
        let block = TimeBlock::builder("anna", tuesday(), TimeSlot::new(14, 1), "lead")
            .project("proj-1")
            .phase("fase-1")
            .title("Kick-off")
            .category("Meeting")
            .status(BlockStatus::Fixed)
            .hard_lock(true)
            .build();

        assert_eq!(block.project_id, Some(ProjectId::from("proj-1")));
        assert_eq!(block.phase_id, Some(PhaseId::from("fase-1")));
        assert_eq!(block.title, "Kick-off");
        assert_eq!(block.category, "Meeting");
        assert_eq!(block.status, BlockStatus::Fixed);
        assert!(block.hard_lock);
        assert_eq!(block.created_by.as_str(), "lead");
        assert_eq!(block.date(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
    }

    #[test]
    fn test_conflicts_with() {
        let a = TimeBlock::builder("anna", tuesday(), TimeSlot::new(9, 2), "p").build();
        let b = TimeBlock::builder("anna", tuesday(), TimeSlot::new(10, 1), "p").build();
        let c = TimeBlock::builder("bram", tuesday(), TimeSlot::new(10, 1), "p").build();
        let d = TimeBlock::builder("anna", tuesday(), TimeSlot::new(11, 1), "p").build();

        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        assert!(!a.conflicts_with(&d));
    }
}
