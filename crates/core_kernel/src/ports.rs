//! Port contracts for external collaborators
//!
//! Master data, the ledger and configuration storage live outside this
//! system. Each domain defines a port trait for what it needs from them;
//! adapters implement those traits against a database, another service or
//! in-memory state for tests.
//!
//! ```text
//!   certification / milestone services
//!                  │
//!                  ▼
//!        port traits (LedgerPort, ProjectPort, ...)
//!          ▲                         ▲
//!   in-memory adapter          persistent adapter
//! ```
//!
//! All port calls are synchronous and run inside the caller's unit of work.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Shared by every adapter so callers see the same failure shapes whatever
/// backs the port.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
pub trait DomainPort: Send + Sync + 'static {}
