//! Accounting periods

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CompanyId, DateRange, PeriodId, TemporalError};

/// An accounting period of a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier
    pub id: PeriodId,
    /// Company the period belongs to
    pub company: CompanyId,
    /// Period name (e.g., "2024-03")
    pub name: String,
    /// Days covered by the period
    pub range: DateRange,
}

impl AccountingPeriod {
    /// Creates a new period
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidRange` if `start` is after `end`
    pub fn new(
        company: CompanyId,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, TemporalError> {
        Ok(Self {
            id: PeriodId::new_v7(),
            company,
            name: name.into(),
            range: DateRange::new(start, end)?,
        })
    }

    /// Returns true if the period belongs to `company` and covers `date`
    pub fn covers(&self, company: CompanyId, date: NaiveDate) -> bool {
        self.company == company && self.range.contains(date)
    }
}
