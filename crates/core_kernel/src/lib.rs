//! Core Kernel - Foundational types for certification accounting
//!
//! This crate provides the building blocks shared by the ledger and project
//! domains:
//! - Decimal amounts with debit/credit balances and quantization rules
//! - Dates, date ranges and an injectable clock
//! - Strongly-typed identifiers
//! - Port error contract for external collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Balance, ZERO, INVOICED_SCALE, MERITED_SCALE, quantize};
pub use temporal::{Clock, SystemClock, FixedClock, DateRange, TemporalError};
pub use identifiers::{
    WorkId, CertificationId, CertificationLineId, MilestoneId, ProductId,
    PartyId, CompanyId, AccountId, AnalyticAccountId, JournalId, PeriodId,
    MoveId, MoveLineId, ReconciliationId,
};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
