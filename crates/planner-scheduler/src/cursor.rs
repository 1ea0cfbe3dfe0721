//! The date cursor walked by phase scheduling.
//!
//! One cursor is shared by all employees of a phase. Each placement step
//! takes the cursor and hands back the one the next step must use, so a
//! fallback to a later day is visible in the return value.

use chrono::{Duration, NaiveDate};

use planner_models::is_weekend;

/// Current date of a phase walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateCursor(NaiveDate);

impl DateCursor {
    /// Starts a cursor at `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The date under the cursor.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Moves forward past Saturday and Sunday; a weekday stays put.
    pub fn skip_weekend(self) -> Self {
        let mut date = self.0;
        while is_weekend(date) {
            date += Duration::days(1);
        }
        Self(date)
    }

    /// Moves to `date`, found by a later-day search.
    pub fn jump_to(self, date: NaiveDate) -> Self {
        Self(date)
    }

    /// Moves one calendar day forward.
    pub fn next_day(self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}
