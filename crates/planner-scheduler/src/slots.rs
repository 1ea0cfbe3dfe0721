//! Free-slot search.
//!
//! Candidate slots start on whole hours inside the work window, earliest
//! first. With the default window (09:00–18:00) a two-hour slot can start at
//! 9 through 16.

use chrono::{Duration, NaiveDate};
use futures::future::join_all;
use tracing::debug;

use planner_models::{is_weekend, EmployeeId, TimeSlot};

use crate::config::SchedulerConfig;
use crate::policy::DayAgenda;
use crate::prober::AvailabilityProber;

/// Finds free slots for one or more employees.
#[derive(Clone)]
pub struct SlotFinder {
    prober: AvailabilityProber,
    day_start_hour: u8,
    day_end_hour: u8,
}

impl SlotFinder {
    /// Creates a finder using the work window from `config`.
    pub fn new(prober: AvailabilityProber, config: &SchedulerConfig) -> Self {
        Self {
            prober,
            day_start_hour: config.day_start_hour,
            day_end_hour: config.day_end_hour,
        }
    }

    /// Returns the prober used for availability reads.
    pub fn prober(&self) -> &AvailabilityProber {
        &self.prober
    }

    /// Candidate slots of `duration_hours`, earliest first.
    ///
    /// Empty when the duration is zero or longer than the work window.
    pub fn candidate_slots(&self, duration_hours: u8) -> impl Iterator<Item = TimeSlot> {
        let window = self.day_end_hour.saturating_sub(self.day_start_hour);
        let last_start = if duration_hours == 0 || duration_hours > window {
            None
        } else {
            Some(self.day_end_hour - duration_hours)
        };

        let first = self.day_start_hour;
        last_start
            .into_iter()
            .flat_map(move |last| first..=last)
            .map(move |start| TimeSlot::new(start, duration_hours))
    }

    fn first_open(&self, agenda: &DayAgenda, duration_hours: u8) -> Option<TimeSlot> {
        self.candidate_slots(duration_hours)
            .find(|slot| agenda.is_free(slot))
    }

    /// First slot of `duration_hours` on `date` that does not overlap any of
    /// the employee's committed blocks.
    pub async fn first_free_slot(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
        duration_hours: u8,
    ) -> Option<TimeSlot> {
        let agenda = self.prober.agenda(employee, date).await;
        let slot = self.first_open(&agenda, duration_hours);
        debug!(employee = %employee, %date, duration_hours, found = ?slot, "first free slot");
        slot
    }

    /// Earliest slot of `duration_hours` on `date` that is free for every employee.
    ///
    /// Each employee's day is read concurrently; the result is the first
    /// candidate hour free in all of them. An empty employee list has no
    /// common slot.
    pub async fn first_common_free_slot(
        &self,
        employees: &[EmployeeId],
        date: NaiveDate,
        duration_hours: u8,
    ) -> Option<TimeSlot> {
        if employees.is_empty() {
            return None;
        }

        let agendas = join_all(
            employees
                .iter()
                .map(|employee| self.prober.agenda(employee, date)),
        )
        .await;

        let slot = self
            .candidate_slots(duration_hours)
            .find(|slot| agendas.iter().all(|agenda| agenda.is_free(slot)));
        debug!(
            employees = employees.len(),
            %date,
            duration_hours,
            found = ?slot,
            "first common free slot"
        );
        slot
    }

    /// Walks forward from `start_date` (inclusive) to the first business day
    /// with a free slot.
    ///
    /// `max_days_to_search` counts calendar days examined, weekends included,
    /// so a horizon of 5 starting on a Thursday only reaches Thursday,
    /// Friday and Monday.
    pub async fn next_available_business_day(
        &self,
        employee: &EmployeeId,
        start_date: NaiveDate,
        duration_hours: u8,
        max_days_to_search: u32,
    ) -> Option<(NaiveDate, TimeSlot)> {
        for offset in 0..max_days_to_search {
            let date = start_date + Duration::days(i64::from(offset));
            if is_weekend(date) {
                continue;
            }
            if let Some(slot) = self.first_free_slot(employee, date, duration_hours).await {
                return Some((date, slot));
            }
        }

        debug!(
            employee = %employee,
            %start_date,
            max_days_to_search,
            "no business day with a free slot"
        );
        None
    }
}
