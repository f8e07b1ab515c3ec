//! Certification configuration
//!
//! The pending invoice clearing account is the only setting. It is injected
//! into [`ProjectAccounting`](crate::ProjectAccounting) and read at the start
//! of every operation that posts or reconciles.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CoreError};

use crate::error::CertificationError;

/// Certification configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationConfig {
    /// Account holding certified value not yet invoiced
    #[serde(default)]
    pub pending_invoice_account: Option<AccountId>,
}

impl CertificationConfig {
    /// Creates a configuration with the given clearing account
    pub fn new(pending_invoice_account: AccountId) -> Self {
        Self {
            pending_invoice_account: Some(pending_invoice_account),
        }
    }

    /// Loads configuration from `CERTIFICATION_*` environment variables
    ///
    /// `CERTIFICATION_PENDING_INVOICE_ACCOUNT` holds the account UUID.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if a variable cannot be parsed
    pub fn from_env() -> Result<Self, CoreError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CERTIFICATION"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }

    /// Reads a `.env` file if present, then loads from the environment
    pub fn load() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Returns the configured clearing account
    ///
    /// # Errors
    ///
    /// Returns `CertificationError::ConfigurationMissing` when unset
    pub fn pending_invoice_account(&self) -> Result<AccountId, CertificationError> {
        self.pending_invoice_account
            .ok_or(CertificationError::ConfigurationMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        let config = CertificationConfig::default();
        assert!(config.pending_invoice_account().unwrap_err().is_configuration_missing());
    }

    #[test]
    fn test_configured_account() {
        let account = AccountId::new();
        assert_eq!(CertificationConfig::new(account).pending_invoice_account().unwrap(), account);
    }

    #[test]
    fn test_from_env() {
        let account = AccountId::new();
        std::env::set_var("CERTIFICATION_PENDING_INVOICE_ACCOUNT", account.as_uuid().to_string());
        let loaded = CertificationConfig::from_env();
        std::env::remove_var("CERTIFICATION_PENDING_INVOICE_ACCOUNT");

        assert_eq!(loaded.unwrap().pending_invoice_account, Some(account));

        std::env::set_var("CERTIFICATION_PENDING_INVOICE_ACCOUNT", "not-an-account");
        let invalid = CertificationConfig::from_env();
        std::env::remove_var("CERTIFICATION_PENDING_INVOICE_ACCOUNT");

        assert!(matches!(invalid, Err(CoreError::Configuration(_))));
    }
}
