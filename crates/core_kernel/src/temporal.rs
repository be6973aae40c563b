//! Calendar helpers
//!
//! This module provides the date arithmetic the customer rules depend on:
//! - `Clock`: where "today" comes from, injectable for tests
//! - `age_on`: whole years elapsed between a birth date and a reference date
//! - `DateRange`: an inclusive range of calendar dates

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Source of the current calendar date
///
/// Services hold a clock instead of reading the system time directly so that
/// age-dependent rules can be tested against a fixed day.
pub trait Clock: Send + Sync + 'static {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time in the host's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Computes age in whole years on `today`
///
/// Takes the naive difference of calendar years and subtracts one when the
/// birthday (month/day) has not yet been reached this year. A 29 February
/// birthday counts as reached on 1 March in non-leap years. Birth dates in
/// the future yield a negative age.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 23);
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 24);
/// ```
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}

/// Inclusive range of calendar dates
///
/// A range whose start is after its end is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if `date` lies within `[start, end]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}
