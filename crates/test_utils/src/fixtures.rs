//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the certification accounting tests.
//! These fixtures are designed to be consistent and predictable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AccountId, CompanyId, FixedClock, JournalId, PartyId, PeriodId};
use domain_ledger::{Account, AccountType, AccountingPeriod, InMemoryLedger, Journal, JournalKind};

/// Fixture for dates used across the tests
pub struct DateFixtures;

impl DateFixtures {
    /// First day of the 2024 fiscal year
    pub fn fiscal_year_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Last day of the 2024 fiscal year
    pub fn fiscal_year_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Default certification date
    pub fn certification_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Date the tests consider "today"
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    /// A date no period covers
    pub fn outside_fiscal_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    /// Clock fixed on [`DateFixtures::today`]
    pub fn clock() -> FixedClock {
        FixedClock(Self::today())
    }
}

/// Fixture for amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// Price of the round-trip project
    pub fn project_price() -> Decimal {
        dec!(1000.00)
    }

    /// A unit price with three decimals
    pub fn fractional_price() -> Decimal {
        dec!(10.333)
    }

    /// A fractional quantity
    pub fn fractional_quantity() -> Decimal {
        dec!(2.5)
    }

    pub fn zero() -> Decimal {
        dec!(0)
    }
}

/// Fixture for the chart of accounts codes
pub struct StringFixtures;

impl StringFixtures {
    pub fn revenue_code() -> &'static str {
        "7000"
    }

    pub fn expense_code() -> &'static str {
        "6000"
    }

    pub fn pending_code() -> &'static str {
        "4300"
    }

    pub fn project_name() -> &'static str {
        "Harbour Bridge"
    }
}

/// A ledger with a chart of accounts, both journals and a 2024 period
pub struct LedgerFixture {
    pub ledger: InMemoryLedger,
    pub company: CompanyId,
    pub party: PartyId,
    pub period: PeriodId,
    pub revenue: AccountId,
    pub expense: AccountId,
    pub pending: AccountId,
    pub revenue_journal: Option<JournalId>,
    pub expense_journal: Option<JournalId>,
}

impl LedgerFixture {
    /// Creates the standard ledger
    pub fn new() -> Self {
        Self::build(false, true)
    }

    /// Standard ledger whose pending account requires a party
    pub fn with_party_required_pending() -> Self {
        Self::build(true, true)
    }

    /// Standard ledger without journals
    pub fn without_journals() -> Self {
        Self::build(false, false)
    }

    fn build(pending_party_required: bool, journals: bool) -> Self {
        let mut ledger = InMemoryLedger::new();
        let company = CompanyId::new();

        let revenue = Account::new(
            AccountId::new(),
            StringFixtures::revenue_code(),
            "Work revenue",
            AccountType::Revenue,
        );
        let expense = Account::new(
            AccountId::new(),
            StringFixtures::expense_code(),
            "Invoiced certifications",
            AccountType::Expense,
        );
        let mut pending = Account::new(
            AccountId::new(),
            StringFixtures::pending_code(),
            "Pending invoice",
            AccountType::Asset,
        );
        if pending_party_required {
            pending = pending.with_party_required();
        }

        let (revenue_id, expense_id, pending_id) = (revenue.id, expense.id, pending.id);
        ledger.add_account(revenue).unwrap();
        ledger.add_account(expense).unwrap();
        ledger.add_account(pending).unwrap();

        let (revenue_journal, expense_journal) = if journals {
            (
                Some(ledger.add_journal(Journal::new("Revenue", JournalKind::Revenue))),
                Some(ledger.add_journal(Journal::new("Expense", JournalKind::Expense))),
            )
        } else {
            (None, None)
        };

        let period = ledger.add_period(
            AccountingPeriod::new(
                company,
                "2024",
                DateFixtures::fiscal_year_start(),
                DateFixtures::fiscal_year_end(),
            )
            .unwrap(),
        );

        Self {
            ledger,
            company,
            party: PartyId::new(),
            period,
            revenue: revenue_id,
            expense: expense_id,
            pending: pending_id,
            revenue_journal,
            expense_journal,
        }
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}
