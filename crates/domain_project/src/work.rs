//! Project works and the products they sell
//!
//! Works form a tree through their `parent` link. The invoicing method that
//! decides whether certifications post automatically is the one of the root
//! of that tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use core_kernel::{AccountId, CompanyId, PartyId, ProductId, WorkId, ZERO};

use crate::error::CertificationError;
use crate::ports::ProjectPort;

/// How a project (or milestone) is invoiced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceMethod {
    /// Invoiced by hand, certifications never post
    Manual,
    /// Bills what is left once certified amounts are reconciled
    Remainder,
    /// Any other method, handled by the generic invoicing step
    Other(String),
}

impl InvoiceMethod {
    /// Returns true for manual invoicing
    pub fn is_manual(&self) -> bool {
        matches!(self, InvoiceMethod::Manual)
    }

    /// Returns true for remainder invoicing
    pub fn is_remainder(&self) -> bool {
        matches!(self, InvoiceMethod::Remainder)
    }
}

impl fmt::Display for InvoiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceMethod::Manual => write!(f, "manual"),
            InvoiceMethod::Remainder => write!(f, "remainder"),
            InvoiceMethod::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A product with its revenue and expense accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub account_revenue: Option<AccountId>,
    pub account_expense: Option<AccountId>,
}

impl Product {
    /// Creates a product without accounts
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            account_revenue: None,
            account_expense: None,
        }
    }

    /// Sets the revenue account
    pub fn with_revenue_account(mut self, account: AccountId) -> Self {
        self.account_revenue = Some(account);
        self
    }

    /// Sets the expense account
    pub fn with_expense_account(mut self, account: AccountId) -> Self {
        self.account_expense = Some(account);
        self
    }

    /// Account credited when the product is certified
    ///
    /// # Errors
    ///
    /// Returns `CertificationError::MissingProductAccount` when unset
    pub fn account_revenue_used(&self) -> Result<AccountId, CertificationError> {
        self.account_revenue
            .ok_or_else(|| CertificationError::MissingProductAccount {
                product: self.name.clone(),
                kind: "revenue",
            })
    }

    /// Account used as counterpart when pending amounts are settled
    ///
    /// # Errors
    ///
    /// Returns `CertificationError::MissingProductAccount` when unset
    pub fn account_expense_used(&self) -> Result<AccountId, CertificationError> {
        self.account_expense
            .ok_or_else(|| CertificationError::MissingProductAccount {
                product: self.name.clone(),
                kind: "expense",
            })
    }
}

/// A project or task in the work tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Unique identifier
    pub id: WorkId,
    /// Name, also used to label analytic lines
    pub name: String,
    /// Company the work is accounted for
    pub company: CompanyId,
    /// Customer
    pub party: Option<PartyId>,
    /// Parent work, `None` for a root project
    pub parent: Option<WorkId>,
    /// Invoicing method
    pub invoice_method: InvoiceMethod,
    /// Unit price
    pub list_price: Option<Decimal>,
    /// Quantity certified but not yet posted
    pub certified_pending_quantity: Decimal,
    /// Product whose accounts drive the postings
    pub product: Option<Product>,
}

impl Work {
    /// Creates a root work with manual invoicing and no price
    pub fn new(name: impl Into<String>, company: CompanyId) -> Self {
        Self {
            id: WorkId::new_v7(),
            name: name.into(),
            company,
            party: None,
            parent: None,
            invoice_method: InvoiceMethod::Manual,
            list_price: None,
            certified_pending_quantity: ZERO,
            product: None,
        }
    }

    pub fn with_party(mut self, party: PartyId) -> Self {
        self.party = Some(party);
        self
    }

    pub fn with_parent(mut self, parent: WorkId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_invoice_method(mut self, method: InvoiceMethod) -> Self {
        self.invoice_method = method;
        self
    }

    pub fn with_list_price(mut self, price: Decimal) -> Self {
        self.list_price = Some(price);
        self
    }

    pub fn with_certified_pending_quantity(mut self, quantity: Decimal) -> Self {
        self.certified_pending_quantity = quantity;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    /// Returns true if the work has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Finds the root of the tree `work` belongs to
///
/// Follows parent links through `projects`. Each work may be visited once;
/// reaching one a second time means the hierarchy is cyclic.
///
/// # Errors
///
/// - `CertificationError::CyclicWorkHierarchy` if a work repeats
/// - `CertificationError::Port` if a parent cannot be loaded
pub fn invoicing_root<P>(projects: &P, work: &Work) -> Result<Work, CertificationError>
where
    P: ProjectPort + ?Sized,
{
    let mut visited = HashSet::from([work.id]);
    let mut current = work.clone();

    while let Some(parent) = current.parent {
        if !visited.insert(parent) {
            return Err(CertificationError::CyclicWorkHierarchy {
                work: work.id.to_string(),
            });
        }
        current = projects.work(parent)?;
    }

    Ok(current)
}
