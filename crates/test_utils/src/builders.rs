//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{AnalyticAccountId, CompanyId, FixedClock, PartyId, WorkId};
use domain_ledger::InMemoryLedger;
use domain_project::{
    Certification, CertificationConfig, InMemoryProjectStore, InvoiceMethod, Product,
    ProjectAccounting, Work,
};

use crate::fixtures::{AmountFixtures, DateFixtures, LedgerFixture, StringFixtures};

/// The accounting service as the tests use it
pub type TestAccounting = ProjectAccounting<InMemoryLedger, InMemoryProjectStore, FixedClock>;

/// Builder for constructing test works
pub struct TestWorkBuilder {
    name: String,
    company: CompanyId,
    party: Option<PartyId>,
    parent: Option<WorkId>,
    invoice_method: InvoiceMethod,
    list_price: Option<Decimal>,
    certified_pending_quantity: Decimal,
    product: Option<Product>,
}

impl TestWorkBuilder {
    /// Creates a remainder-invoiced project priced 1000.00, without product
    pub fn new(company: CompanyId) -> Self {
        Self {
            name: StringFixtures::project_name().to_string(),
            company,
            party: None,
            parent: None,
            invoice_method: InvoiceMethod::Remainder,
            list_price: Some(AmountFixtures::project_price()),
            certified_pending_quantity: AmountFixtures::zero(),
            product: None,
        }
    }

    /// Creates a project wired to the fixture's company, party and accounts
    pub fn for_ledger(fixture: &LedgerFixture) -> Self {
        let product = Product::new("Civil works")
            .with_revenue_account(fixture.revenue)
            .with_expense_account(fixture.expense);

        Self::new(fixture.company)
            .with_party(fixture.party)
            .with_product(product)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_party(mut self, party: PartyId) -> Self {
        self.party = Some(party);
        self
    }

    /// Makes the work a child of `parent`
    pub fn with_parent(mut self, parent: WorkId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_invoice_method(mut self, method: InvoiceMethod) -> Self {
        self.invoice_method = method;
        self
    }

    pub fn with_list_price(mut self, price: Decimal) -> Self {
        self.list_price = Some(price);
        self
    }

    pub fn without_list_price(mut self) -> Self {
        self.list_price = None;
        self
    }

    pub fn with_certified_pending_quantity(mut self, quantity: Decimal) -> Self {
        self.certified_pending_quantity = quantity;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn without_product(mut self) -> Self {
        self.product = None;
        self
    }

    /// Builds the work
    pub fn build(self) -> Work {
        let mut work = Work::new(self.name, self.company)
            .with_invoice_method(self.invoice_method)
            .with_certified_pending_quantity(self.certified_pending_quantity);
        work.party = self.party;
        work.parent = self.parent;
        work.list_price = self.list_price;
        work.product = self.product;
        work
    }
}

/// Builder for constructing test certifications
pub struct TestCertificationBuilder {
    work: WorkId,
    date: NaiveDate,
    lines: Vec<(WorkId, Decimal, Vec<AnalyticAccountId>)>,
}

impl TestCertificationBuilder {
    /// Creates a builder for a draft certification of `work`
    pub fn new(work: WorkId) -> Self {
        Self {
            work,
            date: DateFixtures::certification_date(),
            lines: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Adds a line certifying `quantity` of the certification's work
    pub fn with_line(mut self, quantity: Decimal) -> Self {
        self.lines.push((self.work, quantity, Vec::new()));
        self
    }

    /// Adds a line certifying `quantity` of another work
    pub fn with_line_for(mut self, work: WorkId, quantity: Decimal) -> Self {
        self.lines.push((work, quantity, Vec::new()));
        self
    }

    /// Adds a line allocated to analytic accounts
    pub fn with_analytic_line(mut self, quantity: Decimal, accounts: Vec<AnalyticAccountId>) -> Self {
        self.lines.push((self.work, quantity, accounts));
        self
    }

    /// Builds the certification
    pub fn build(self) -> Certification {
        let mut certification = Certification::new(self.work, self.date);
        for (work, quantity, accounts) in self.lines {
            certification.add_line(work, quantity).analytic_accounts = accounts;
        }
        certification
    }
}

/// Builder for the accounting service over a ledger fixture
pub struct TestAccountingBuilder {
    ledger: InMemoryLedger,
    config: CertificationConfig,
    works: Vec<Work>,
    clock: FixedClock,
}

impl TestAccountingBuilder {
    /// Takes the fixture's ledger and configures its pending account
    pub fn new(fixture: &mut LedgerFixture) -> Self {
        Self {
            ledger: std::mem::take(&mut fixture.ledger),
            config: CertificationConfig::new(fixture.pending),
            works: Vec::new(),
            clock: DateFixtures::clock(),
        }
    }

    pub fn with_work(mut self, work: Work) -> Self {
        self.works.push(work);
        self
    }

    /// Leaves the pending invoice account unset
    pub fn without_configuration(mut self) -> Self {
        self.config = CertificationConfig::default();
        self
    }

    /// Makes ledger writes require trusted access
    pub fn with_restricted_writes(mut self) -> Self {
        self.ledger = self.ledger.restrict_writes();
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.clock = FixedClock(today);
        self
    }

    /// Builds the service
    pub fn build(self) -> TestAccounting {
        let store = InMemoryProjectStore::with_works(self.works);
        ProjectAccounting::new(self.ledger, store, self.config).with_clock(self.clock)
    }
}
