//! Dates, date ranges and the clock
//!
//! Accounting works on calendar dates. Operations that need "today" take a
//! [`Clock`] so tests can pin the date.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date range: start {start} must not be after end {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Source of the current date
pub trait Clock {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock that always returns the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidRange` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_contains_bounds() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2024, 6, 15));
        assert_eq!(clock.today(), date(2024, 6, 15));
    }
}
