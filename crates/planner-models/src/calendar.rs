//! Calendar arithmetic for weekly scheduling.
//!
//! Blocks are addressed by the Monday of their week plus a business index
//! (Monday = 0 … Friday = 4). All functions work on civil dates; there is no
//! timezone handling below date granularity.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of business days in a scheduling week.
pub const BUSINESS_DAYS_PER_WEEK: u8 = 5;

/// Returns the Monday of the week containing `date`.
///
/// Sunday counts as the last day of its week, so a Sunday maps back six days
/// to the preceding Monday rather than forward to the next one.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_index(date)))
}

/// General weekday index: Monday = 0 … Saturday = 5, Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Business index used by time blocks: Monday = 0 … Friday = 4.
///
/// Weekends have no business index.
pub fn business_index(date: NaiveDate) -> Option<u8> {
    let index = weekday_index(date);
    (index < BUSINESS_DAYS_PER_WEEK).then_some(index)
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// All calendar days from `start` to `end`, both inclusive.
///
/// Returns an empty list when `end` is before `start`.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Like [`enumerate_days`], without Saturdays and Sundays.
pub fn enumerate_business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    enumerate_days(start, end)
        .into_iter()
        .filter(|day| !is_weekend(*day))
        .collect()
}

/// A weekday expressed the way the task store indexes it.
///
/// Can only be built from a Monday–Friday date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusinessDay {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Monday = 0 … Friday = 4.
    pub index: u8,
}

impl BusinessDay {
    /// Returns the business day for `date`, or `None` on a weekend.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        business_index(date).map(|index| Self {
            week_start: week_start(date),
            index,
        })
    }

    /// Converts back to a calendar date.
    pub fn date(&self) -> NaiveDate {
        self.week_start + Duration::days(i64::from(self.index))
    }
}
