//! Ledger domain errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Move not found
    #[error("Move not found: {0}")]
    MoveNotFound(String),

    /// Move line not found
    #[error("Move line not found: {0}")]
    LineNotFound(String),

    /// No accounting period covers the date
    #[error("No accounting period for company {company} on {date}")]
    PeriodNotFound {
        company: String,
        date: NaiveDate,
    },

    /// Move is not balanced
    #[error("Unbalanced move {name}: debits={debits}, credits={credits}")]
    UnbalancedMove {
        name: String,
        debits: Decimal,
        credits: Decimal,
    },

    /// Operation not allowed in the move's current state
    #[error("Move {name} is {state}, cannot {operation}")]
    InvalidMoveState {
        name: String,
        state: String,
        operation: String,
    },

    /// Line amounts are invalid
    #[error("Invalid line: {0}")]
    InvalidLine(String),

    /// Reconciled lines do not net to zero
    #[error("Lines to reconcile do not balance: debits={debits}, credits={credits}")]
    UnbalancedReconciliation {
        debits: Decimal,
        credits: Decimal,
    },

    /// Lines to reconcile are on different accounts
    #[error("Lines to reconcile are on different accounts")]
    MixedAccounts,

    /// Line already belongs to a reconciliation
    #[error("Line already reconciled: {0}")]
    AlreadyReconciled(String),

    /// Operation requires trusted access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failure in the backing system
    #[error(transparent)]
    Port(#[from] PortError),
}
