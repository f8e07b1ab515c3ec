//! Journals

use serde::{Deserialize, Serialize};

use core_kernel::JournalId;

/// Kind of journal, used to pick where a move is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    Revenue,
    Expense,
    General,
}

/// A journal moves are recorded in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: JournalId,
    pub name: String,
    pub kind: JournalKind,
}

impl Journal {
    /// Creates a new journal
    pub fn new(name: impl Into<String>, kind: JournalKind) -> Self {
        Self {
            id: JournalId::new_v7(),
            name: name.into(),
            kind,
        }
    }
}
