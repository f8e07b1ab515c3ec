//! Reconciliation groups

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{MoveLineId, ReconciliationId};

/// A group of lines marked as mutually settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub id: ReconciliationId,
    pub lines: Vec<MoveLineId>,
    pub date: NaiveDate,
}

impl Reconciliation {
    /// Creates a reconciliation over `lines`
    pub fn new(lines: Vec<MoveLineId>, date: NaiveDate) -> Self {
        Self {
            id: ReconciliationId::new_v7(),
            lines,
            date,
        }
    }
}
