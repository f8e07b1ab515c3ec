//! Project accounting service
//!
//! [`ProjectAccounting`] ties the collaborators together: the ledger, the
//! project store, the certification configuration and a clock. The
//! operations themselves are spread over the modules that own them:
//!
//! - [`factory`](crate::factory): ledger lines for a certification line
//! - [`workflow`](crate::workflow): confirm and cancel
//! - [`milestone`](crate::milestone): remainder reconciliation and invoicing
//! - [`accrual`](crate::accrual): merited revenue reporting

use core_kernel::{Clock, SystemClock};
use domain_ledger::LedgerPort;

use crate::config::CertificationConfig;
use crate::ports::ProjectPort;

/// Certification accounting over a ledger and a project store
#[derive(Debug)]
pub struct ProjectAccounting<L, P, C = SystemClock> {
    pub(crate) ledger: L,
    pub(crate) projects: P,
    pub(crate) config: CertificationConfig,
    pub(crate) clock: C,
}

impl<L, P> ProjectAccounting<L, P>
where
    L: LedgerPort,
    P: ProjectPort,
{
    /// Creates the service using the system clock
    ///
    /// # Arguments
    ///
    /// * `ledger` - Ledger the moves are posted to
    /// * `projects` - Work and certification storage
    /// * `config` - Certification configuration
    pub fn new(ledger: L, projects: P, config: CertificationConfig) -> Self {
        Self {
            ledger,
            projects,
            config,
            clock: SystemClock,
        }
    }
}

impl<L, P, C> ProjectAccounting<L, P, C>
where
    L: LedgerPort,
    P: ProjectPort,
    C: Clock,
{
    /// Replaces the clock used for "today"
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ProjectAccounting<L, P, C2> {
        ProjectAccounting {
            ledger: self.ledger,
            projects: self.projects,
            config: self.config,
            clock,
        }
    }

    /// Replaces the configuration
    pub fn set_config(&mut self, config: CertificationConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &CertificationConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn projects(&self) -> &P {
        &self.projects
    }

    pub fn projects_mut(&mut self) -> &mut P {
        &mut self.projects
    }

    /// Splits the service back into its collaborators
    pub fn into_parts(self) -> (L, P) {
        (self.ledger, self.projects)
    }
}
