//! Account types for the chart of accounts

use serde::{Deserialize, Serialize};

use core_kernel::AccountId;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Account code (e.g., "4300")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Whether lines on this account must name a party
    pub party_required: bool,
}

impl Account {
    /// Creates a new account that does not require a party
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `code` - Account code
    /// * `name` - Account name
    /// * `account_type` - Type of account
    pub fn new(id: AccountId, code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            account_type,
            party_required: false,
        }
    }

    /// Marks the account as requiring a party on its lines
    pub fn with_party_required(mut self) -> Self {
        self.party_required = true;
        self
    }
}
