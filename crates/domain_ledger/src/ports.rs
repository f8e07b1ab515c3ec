//! Ledger Port
//!
//! The ledger is an external collaborator. Certification accounting only
//! needs the operations below; any general ledger can be adapted to them.
//!
//! # Access
//!
//! Moves derived from certifications are saved and posted by the system on
//! behalf of the user, so the caller passes [`Access::Trusted`] for exactly
//! those calls. Every other call uses [`Access::Standard`] and is subject to
//! the ledger's normal access checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CompanyId, DomainPort, JournalId, MoveId, MoveLineId, PeriodId, ReconciliationId};

use crate::account::Account;
use crate::error::LedgerError;
use crate::journal::JournalKind;
use crate::moves::{Move, MoveLine, MoveLineQuery};

/// Access level a ledger write runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Normal access checks apply
    Standard,
    /// Administrative access, bypasses access checks
    Trusted,
}

impl Access {
    /// Returns true for administrative access
    pub fn is_trusted(&self) -> bool {
        matches!(self, Access::Trusted)
    }
}

/// Operations certification accounting needs from the ledger
pub trait LedgerPort: DomainPort {
    /// Fetches an account from the chart of accounts
    fn account(&self, id: AccountId) -> Result<Account, LedgerError>;

    /// Resolves the accounting period of `company` covering `date`
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PeriodNotFound` if no period covers the date
    fn find_period(&self, company: CompanyId, date: NaiveDate) -> Result<PeriodId, LedgerError>;

    /// Finds the first journal of the given kind
    fn find_journal(&self, kind: JournalKind) -> Result<Option<JournalId>, LedgerError>;

    /// Fetches a saved move with its lines
    fn get_move(&self, id: MoveId) -> Result<Move, LedgerError>;

    /// Stores a new draft move and returns its identifier
    fn save(&mut self, draft: Move, access: Access) -> Result<MoveId, LedgerError>;

    /// Posts moves; each must be balanced
    fn post(&mut self, moves: &[MoveId], access: Access) -> Result<(), LedgerError>;

    /// Returns posted moves to draft
    fn draft(&mut self, moves: &[MoveId]) -> Result<(), LedgerError>;

    /// Deletes draft moves
    fn delete(&mut self, moves: &[MoveId]) -> Result<(), LedgerError>;

    /// Groups lines into one reconciliation
    fn reconcile(&mut self, lines: &[MoveLineId]) -> Result<ReconciliationId, LedgerError>;

    /// Searches lines of saved moves by exact-match criteria
    fn search_lines(&self, query: &MoveLineQuery) -> Result<Vec<MoveLine>, LedgerError>;
}
