//! Project Domain - Certification Accounting
//!
//! This crate turns progress certifications of project works into ledger
//! postings and settles them when remainder milestones are invoiced.
//!
//! # Components
//!
//! - **Line factory**: a certification line priced at the work's unit price
//!   becomes a revenue credit and a pending invoice debit
//! - **Certification workflow**: confirm posts those lines, cancel removes
//!   the move while its pending line is unreconciled
//! - **Remainder settlement**: clears the pending balance of a project and
//!   reconciles it before the milestone is invoiced
//! - **Merited revenue**: read-only figures over a work's ledger lines
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_project::{CertificationConfig, InMemoryProjectStore, ProjectAccounting};
//!
//! let mut accounting = ProjectAccounting::new(ledger, store, CertificationConfig::new(pending));
//! accounting.confirm(&mut certifications)?;
//!
//! let settlements = accounting.do_invoice(&milestones, &mut invoicer)?;
//! ```

pub mod work;
pub mod certification;
pub mod config;
pub mod ports;
pub mod adapters;
pub mod accounting;
pub mod factory;
pub mod workflow;
pub mod milestone;
pub mod accrual;
pub mod error;

pub use work::{Work, Product, InvoiceMethod, invoicing_root};
pub use certification::{Certification, CertificationLine, CertificationState};
pub use config::CertificationConfig;
pub use ports::{ProjectPort, MilestoneInvoicer};
pub use adapters::{InMemoryProjectStore, RecordingInvoicer};
pub use accounting::ProjectAccounting;
pub use factory::invoiced_amount;
pub use milestone::{InvoiceMilestone, RemainderAmounts, RemainderSettlement};
pub use accrual::MeritedAmounts;
pub use error::CertificationError;
