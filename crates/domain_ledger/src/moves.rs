//! Moves and move lines
//!
//! A move is a balanced set of lines sharing a date, period, journal and
//! origin. Lines carry an amount on one side only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{
    AccountId, AnalyticAccountId, Balance, CompanyId, JournalId, MoveId, MoveLineId,
    PartyId, PeriodId, ReconciliationId, WorkId,
};

/// State of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    /// Editable, can be deleted
    Draft,
    /// Recorded in the ledger
    Posted,
}

/// Document a move originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", content = "id", rename_all = "snake_case")]
pub enum MoveOrigin {
    /// A project work
    Work(WorkId),
}

/// Analytic allocation attached to a move line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticLine {
    pub id: Uuid,
    pub account: AnalyticAccountId,
    pub name: String,
    pub reference: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub journal: Option<JournalId>,
    pub date: NaiveDate,
    pub party: Option<PartyId>,
}

impl AnalyticLine {
    /// Creates an analytic line mirroring the amounts of a move line
    pub fn new(account: AnalyticAccountId, name: impl Into<String>, balance: Balance, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            name: name.into(),
            reference: None,
            debit: balance.debit,
            credit: balance.credit,
            journal: None,
            date,
            party: None,
        }
    }

    /// Sets the reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the analytic journal
    pub fn with_journal(mut self, journal: Option<JournalId>) -> Self {
        self.journal = journal;
        self
    }

    /// Sets the party
    pub fn with_party(mut self, party: Option<PartyId>) -> Self {
        self.party = party;
        self
    }
}

/// A single line of a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLine {
    /// Unique line identifier
    pub id: MoveLineId,
    /// Move the line belongs to, set when the line is attached
    pub move_id: Option<MoveId>,
    /// Account posted to
    pub account: AccountId,
    /// Debit amount
    pub debit: Decimal,
    /// Credit amount
    pub credit: Decimal,
    /// Party, when the account requires one
    pub party: Option<PartyId>,
    /// Project work the line is tagged with
    pub work: Option<WorkId>,
    /// Reconciliation group, once reconciled
    pub reconciliation: Option<ReconciliationId>,
    /// Analytic allocations
    pub analytic_lines: Vec<AnalyticLine>,
}

impl MoveLine {
    /// Creates a new unattached line
    ///
    /// # Arguments
    ///
    /// * `account` - Account to post to
    /// * `balance` - Debit/credit amounts of the line
    pub fn new(account: AccountId, balance: Balance) -> Self {
        Self {
            id: MoveLineId::new_v7(),
            move_id: None,
            account,
            debit: balance.debit,
            credit: balance.credit,
            party: None,
            work: None,
            reconciliation: None,
            analytic_lines: Vec::new(),
        }
    }

    /// Tags the line with a work
    pub fn for_work(mut self, work: WorkId) -> Self {
        self.work = Some(work);
        self
    }

    /// Sets the party
    pub fn with_party(mut self, party: Option<PartyId>) -> Self {
        self.party = party;
        self
    }

    /// Returns the line amounts as a balance
    pub fn balance(&self) -> Balance {
        Balance::new(self.debit, self.credit)
    }

    /// Returns true if the line belongs to a reconciliation group
    pub fn is_reconciled(&self) -> bool {
        self.reconciliation.is_some()
    }
}

/// A ledger move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Unique identifier
    pub id: MoveId,
    /// Human-readable number, assigned by the ledger on save
    pub number: Option<String>,
    /// Company the move is recorded for
    pub company: CompanyId,
    /// Accounting period
    pub period: PeriodId,
    /// Journal, if one was found
    pub journal: Option<JournalId>,
    /// Accounting date
    pub date: NaiveDate,
    /// Originating document
    pub origin: Option<MoveOrigin>,
    /// Current state
    pub state: MoveState,
    /// Lines, in insertion order
    pub lines: Vec<MoveLine>,
}

impl Move {
    /// Creates an empty draft move
    pub fn new(company: CompanyId, period: PeriodId, date: NaiveDate) -> Self {
        Self {
            id: MoveId::new_v7(),
            number: None,
            company,
            period,
            journal: None,
            date,
            origin: None,
            state: MoveState::Draft,
            lines: Vec::new(),
        }
    }

    /// Sets the journal
    pub fn in_journal(mut self, journal: Option<JournalId>) -> Self {
        self.journal = journal;
        self
    }

    /// Sets the origin
    pub fn with_origin(mut self, origin: MoveOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Attaches a line to the move
    pub fn push_line(&mut self, mut line: MoveLine) {
        line.move_id = Some(self.id);
        self.lines.push(line);
    }

    /// Attaches several lines, keeping their order
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = MoveLine>) -> Self {
        for line in lines {
            self.push_line(line);
        }
        self
    }

    /// Total debits and credits over all lines
    pub fn totals(&self) -> Balance {
        self.lines.iter().map(MoveLine::balance).sum()
    }

    /// Returns true if debits equal credits
    pub fn is_balanced(&self) -> bool {
        self.totals().is_balanced()
    }

    /// Lines posted to `account`
    pub fn lines_on(&self, account: AccountId) -> impl Iterator<Item = &MoveLine> {
        self.lines.iter().filter(move |l| l.account == account)
    }

    /// Name used when reporting on the move
    pub fn display_name(&self) -> String {
        match &self.number {
            Some(number) => number.clone(),
            None => self.id.to_string(),
        }
    }
}

/// Exact-match criteria for searching move lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLineQuery {
    /// Lines tagged with this work
    pub work: Option<WorkId>,
    /// Lines on this account
    pub account: Option<AccountId>,
    /// `Some(false)` keeps only unreconciled lines, `Some(true)` only reconciled ones
    pub reconciled: Option<bool>,
}

impl MoveLineQuery {
    /// Lines tagged with `work`
    pub fn for_work(work: WorkId) -> Self {
        Self {
            work: Some(work),
            ..Default::default()
        }
    }

    /// Restricts the query to `account`
    pub fn on_account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    /// Restricts the query to lines without a reconciliation
    pub fn unreconciled(mut self) -> Self {
        self.reconciled = Some(false);
        self
    }

    /// Returns true if the line satisfies every criterion
    pub fn matches(&self, line: &MoveLine) -> bool {
        self.work.map_or(true, |w| line.work == Some(w))
            && self.account.map_or(true, |a| line.account == a)
            && self.reconciled.map_or(true, |r| line.is_reconciled() == r)
    }
}
