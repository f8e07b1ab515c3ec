//! Certification accounting errors

use thiserror::Error;

use core_kernel::PortError;
use domain_ledger::LedgerError;

/// Errors raised while posting, cancelling or reconciling certifications
#[derive(Debug, Error)]
pub enum CertificationError {
    /// The pending invoice clearing account is not configured
    #[error("Missing Pending Invoice Account in Certification Configuration")]
    ConfigurationMissing,

    /// The move's clearing line is already reconciled
    #[error("Unable to cancel current certification since the account move {move_name} is already reconciled")]
    ReconciledMoveConflict { move_name: String },

    /// The move does not have exactly one line on the clearing account
    #[error("Account move {move_name} has {matches} lines on the pending invoice account, expected exactly one")]
    AmbiguousClearingLine { move_name: String, matches: usize },

    #[error("Invalid certification state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    /// The product has no account for the requested side
    #[error("Product {product} has no {kind} account")]
    MissingProductAccount { product: String, kind: &'static str },

    /// Following parent links revisited a work
    #[error("Work hierarchy above {work} contains a cycle")]
    CyclicWorkHierarchy { work: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl CertificationError {
    /// Returns true for the configuration error
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, CertificationError::ConfigurationMissing)
    }
}
