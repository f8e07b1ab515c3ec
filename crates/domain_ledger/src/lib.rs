//! Ledger Domain - Double-Entry Moves and Reconciliation
//!
//! This crate holds the ledger side of certification accounting: the chart
//! of accounts, journals, accounting periods, moves and their lines, and
//! reconciliation groups. The rest of the system reaches the ledger only
//! through [`LedgerPort`], which models the posting primitives the ledger
//! offers (save, post, draft, delete, reconcile, search).
//!
//! # Double-Entry Rules
//!
//! - A move can only be posted when its debits equal its credits
//! - A line carries an amount on one side only
//! - A reconciliation groups lines on one account whose net is zero
//! - Only draft moves can be deleted
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{Access, InMemoryLedger, LedgerPort, Move, MoveLine};
//!
//! let mut ledger = InMemoryLedger::new();
//! let mut entry = Move::new(company, period, date);
//! entry.push_line(MoveLine::new(revenue, Balance::credit(amount)));
//! entry.push_line(MoveLine::new(pending, Balance::debit(amount)));
//!
//! let id = ledger.save(entry, Access::Standard)?;
//! ledger.post(&[id], Access::Standard)?;
//! ```

pub mod account;
pub mod journal;
pub mod period;
pub mod moves;
pub mod reconciliation;
pub mod ports;
pub mod ledger;
pub mod error;

pub use account::{Account, AccountType};
pub use journal::{Journal, JournalKind};
pub use period::AccountingPeriod;
pub use moves::{Move, MoveLine, MoveState, MoveOrigin, AnalyticLine, MoveLineQuery};
pub use reconciliation::Reconciliation;
pub use ports::{LedgerPort, Access};
pub use ledger::InMemoryLedger;
pub use error::LedgerError;
