//! Certifications and their lines

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AnalyticAccountId, CertificationId, CertificationLineId, MoveId, WorkId};

use crate::error::CertificationError;

/// Certification state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationState {
    /// Being prepared
    Draft,
    /// Approved, ledger postings made
    Confirmed,
    /// Withdrawn
    Cancelled,
}

impl fmt::Display for CertificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificationState::Draft => write!(f, "draft"),
            CertificationState::Confirmed => write!(f, "confirmed"),
            CertificationState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One certified quantity of a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationLine {
    pub id: CertificationLineId,
    pub certification: CertificationId,
    pub work: WorkId,
    pub quantity: Decimal,
    /// Analytic accounts the revenue is allocated to
    pub analytic_accounts: Vec<AnalyticAccountId>,
}

impl CertificationLine {
    pub fn with_analytic_accounts(mut self, accounts: impl IntoIterator<Item = AnalyticAccountId>) -> Self {
        self.analytic_accounts = accounts.into_iter().collect();
        self
    }
}

/// A progress-billing event for a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    /// Unique identifier
    pub id: CertificationId,
    /// Certified work
    pub work: WorkId,
    /// Accounting date of the postings
    pub date: NaiveDate,
    /// Current state
    pub state: CertificationState,
    /// Lines, in certification order
    pub lines: Vec<CertificationLine>,
    /// Move posted on confirmation
    pub account_move: Option<MoveId>,
}

impl Certification {
    /// Creates a draft certification
    pub fn new(work: WorkId, date: NaiveDate) -> Self {
        Self {
            id: CertificationId::new_v7(),
            work,
            date,
            state: CertificationState::Draft,
            lines: Vec::new(),
            account_move: None,
        }
    }

    /// Adds a line certifying `quantity` of `work` and returns it
    pub fn add_line(&mut self, work: WorkId, quantity: Decimal) -> &mut CertificationLine {
        self.lines.push(CertificationLine {
            id: CertificationLineId::new_v7(),
            certification: self.id,
            work,
            quantity,
            analytic_accounts: Vec::new(),
        });
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// Adds a line and returns the certification
    pub fn with_line(mut self, work: WorkId, quantity: Decimal) -> Self {
        self.add_line(work, quantity);
        self
    }

    /// Checks that the certification may move to `target`
    ///
    /// # Errors
    ///
    /// Returns `CertificationError::InvalidStateTransition` otherwise
    pub fn check_transition(&self, target: CertificationState) -> Result<(), CertificationError> {
        if !self.can_transition_to(target) {
            return Err(CertificationError::InvalidStateTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    /// Moves the certification to `target`
    pub fn transition(&mut self, target: CertificationState) -> Result<(), CertificationError> {
        self.check_transition(target)?;
        self.state = target;
        Ok(())
    }

    fn can_transition_to(&self, target: CertificationState) -> bool {
        use CertificationState::*;
        matches!(
            (self.state, target),
            (Draft, Confirmed) |
            (Draft, Cancelled) |
            (Confirmed, Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft() -> Certification {
        Certification::new(WorkId::new(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_new_certification_is_draft() {
        let cert = draft();
        assert_eq!(cert.state, CertificationState::Draft);
        assert!(cert.account_move.is_none());
    }

    #[test]
    fn test_lines_reference_certification() {
        let work = WorkId::new();
        let mut cert = draft();
        cert.add_line(work, dec!(2))
            .analytic_accounts
            .push(AnalyticAccountId::new());

        assert_eq!(cert.lines[0].certification, cert.id);
        assert_eq!(cert.lines[0].work, work);
        assert_eq!(cert.lines[0].analytic_accounts.len(), 1);
    }

    #[test]
    fn test_allowed_transitions() {
        let mut cert = draft();
        cert.transition(CertificationState::Confirmed).unwrap();
        cert.transition(CertificationState::Cancelled).unwrap();

        let mut other = draft();
        other.transition(CertificationState::Cancelled).unwrap();
    }

    #[test]
    fn test_rejected_transitions() {
        let mut cert = draft();
        cert.transition(CertificationState::Cancelled).unwrap();

        let err = cert.transition(CertificationState::Confirmed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid certification state transition from cancelled to confirmed"
        );
        assert!(draft().check_transition(CertificationState::Draft).is_err());
    }
}
