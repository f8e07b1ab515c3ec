//! Adapters for the project ports
//!
//! - **InMemoryProjectStore**: works and certifications held in memory
//! - **RecordingInvoicer**: milestone invoicer that records what it was asked to invoice

pub mod memory;

pub use memory::{InMemoryProjectStore, RecordingInvoicer};
