//! In-memory project adapters

use std::collections::HashMap;
use tracing::debug;

use core_kernel::{CertificationId, DomainPort, MilestoneId, PortError, WorkId};

use crate::certification::Certification;
use crate::milestone::InvoiceMilestone;
use crate::ports::{MilestoneInvoicer, ProjectPort};
use crate::work::Work;

/// Works and certifications held in memory
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    works: HashMap<WorkId, Work>,
    certifications: HashMap<CertificationId, Certification>,
    saves: usize,
}

impl InMemoryProjectStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with works
    pub fn with_works(works: impl IntoIterator<Item = Work>) -> Self {
        let mut store = Self::new();
        for work in works {
            store.add_work(work);
        }
        store
    }

    /// Adds or replaces a work
    pub fn add_work(&mut self, work: Work) {
        self.works.insert(work.id, work);
    }

    /// Last saved state of a certification
    pub fn certification(&self, id: CertificationId) -> Option<&Certification> {
        self.certifications.get(&id)
    }

    /// Number of times a certification was saved
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DomainPort for InMemoryProjectStore {}

impl ProjectPort for InMemoryProjectStore {
    fn work(&self, id: WorkId) -> Result<Work, PortError> {
        self.works
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Work", id))
    }

    fn save_certification(&mut self, certification: &Certification) -> Result<(), PortError> {
        self.saves += 1;
        debug!(
            certification_id = %certification.id,
            state = %certification.state,
            "Certification saved"
        );
        self.certifications.insert(certification.id, certification.clone());
        Ok(())
    }
}

/// Milestone invoicer that records the milestones it receives
#[derive(Debug, Default)]
pub struct RecordingInvoicer {
    invoiced: Vec<MilestoneId>,
}

impl RecordingInvoicer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milestones invoiced so far, in call order
    pub fn invoiced(&self) -> &[MilestoneId] {
        &self.invoiced
    }
}

impl MilestoneInvoicer for RecordingInvoicer {
    fn invoice(&mut self, milestones: &[InvoiceMilestone]) -> Result<(), PortError> {
        self.invoiced.extend(milestones.iter().map(|m| m.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::CompanyId;

    #[test]
    fn test_missing_work_is_not_found() {
        let store = InMemoryProjectStore::new();
        let err = store.work(WorkId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_certification_keeps_last_state() {
        let work = Work::new("Road", CompanyId::new());
        let mut store = InMemoryProjectStore::with_works([work.clone()]);
        let mut cert = Certification::new(work.id, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        store.save_certification(&cert).unwrap();
        cert.account_move = Some(core_kernel::MoveId::new());
        store.save_certification(&cert).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.certification(cert.id), Some(&cert));
    }
}
