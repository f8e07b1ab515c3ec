//! Project Ports
//!
//! Work master data, certification storage and the generic milestone
//! invoicing step live outside this crate. [`ProjectPort`] and
//! [`MilestoneInvoicer`] are the narrow interfaces used to reach them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_project::{InMemoryProjectStore, ProjectPort};
//!
//! let mut store = InMemoryProjectStore::new();
//! store.add_work(work.clone());
//! assert_eq!(store.work(work.id)?.name, work.name);
//! ```

use core_kernel::{DomainPort, PortError, WorkId};

use crate::certification::Certification;
use crate::milestone::InvoiceMilestone;
use crate::work::Work;

/// Access to works and certification storage
pub trait ProjectPort: DomainPort {
    /// Loads a work
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the work does not exist
    fn work(&self, id: WorkId) -> Result<Work, PortError>;

    /// Persists the current state of a certification
    fn save_certification(&mut self, certification: &Certification) -> Result<(), PortError>;
}

/// The invoicing step run for every milestone once remainders are settled
pub trait MilestoneInvoicer {
    /// Invoices the milestones
    fn invoice(&mut self, milestones: &[InvoiceMilestone]) -> Result<(), PortError>;
}
