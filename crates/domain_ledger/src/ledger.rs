//! In-memory ledger
//!
//! A complete [`LedgerPort`] implementation backed by process memory. It
//! enforces the same contracts a persistent ledger would (balanced posting,
//! draft-only deletion, net-zero reconciliation) and is the adapter used by
//! the test suites and by embedders that keep the ledger in memory.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info};

use core_kernel::{
    AccountId, Balance, CompanyId, DomainPort, JournalId, MoveId, MoveLineId, PeriodId,
    ReconciliationId, ZERO,
};

use crate::account::Account;
use crate::error::LedgerError;
use crate::journal::{Journal, JournalKind};
use crate::moves::{Move, MoveLine, MoveLineQuery, MoveState};
use crate::period::AccountingPeriod;
use crate::ports::{Access, LedgerPort};
use crate::reconciliation::Reconciliation;

/// Ledger held in memory
///
/// # Invariants
///
/// - Posted moves are balanced
/// - Every line references an account of the chart
/// - A line belongs to at most one reconciliation
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Chart of accounts
    accounts: HashMap<AccountId, Account>,
    /// Journals, in creation order
    journals: Vec<Journal>,
    /// Accounting periods
    periods: Vec<AccountingPeriod>,
    /// Saved moves, in save order
    moves: Vec<Move>,
    /// Reconciliation groups
    reconciliations: Vec<Reconciliation>,
    /// Last move number handed out
    sequence: u64,
    /// When set, writes need `Access::Trusted`
    trusted_writes_only: bool,
}

impl InMemoryLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes saving and posting require `Access::Trusted`
    pub fn restrict_writes(mut self) -> Self {
        self.trusted_writes_only = true;
        self
    }

    /// Adds an account to the chart of accounts
    ///
    /// # Errors
    ///
    /// Returns error if account already exists
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&account.id) {
            return Err(LedgerError::AccountAlreadyExists(account.id.to_string()));
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Adds a journal and returns its identifier
    pub fn add_journal(&mut self, journal: Journal) -> JournalId {
        let id = journal.id;
        self.journals.push(journal);
        id
    }

    /// Adds an accounting period and returns its identifier
    pub fn add_period(&mut self, period: AccountingPeriod) -> PeriodId {
        let id = period.id;
        self.periods.push(period);
        id
    }

    /// All saved moves, in save order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// All reconciliation groups
    pub fn reconciliations(&self) -> &[Reconciliation] {
        &self.reconciliations
    }

    /// Returns true if a move with this id is stored
    pub fn contains_move(&self, id: MoveId) -> bool {
        self.moves.iter().any(|m| m.id == id)
    }

    /// Debit and credit totals of posted lines on `account`
    pub fn account_balance(&self, account: AccountId) -> Balance {
        self.moves
            .iter()
            .filter(|m| m.state == MoveState::Posted)
            .flat_map(|m| m.lines_on(account))
            .map(MoveLine::balance)
            .sum()
    }

    fn check_access(&self, access: Access, operation: &str) -> Result<(), LedgerError> {
        if self.trusted_writes_only && !access.is_trusted() {
            return Err(LedgerError::Unauthorized(format!(
                "{} requires trusted access",
                operation
            )));
        }
        Ok(())
    }

    fn move_index(&self, id: MoveId) -> Result<usize, LedgerError> {
        self.moves
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| LedgerError::MoveNotFound(id.to_string()))
    }

    fn line_position(&self, id: MoveLineId) -> Result<(usize, usize), LedgerError> {
        self.moves
            .iter()
            .enumerate()
            .find_map(|(mi, m)| m.lines.iter().position(|l| l.id == id).map(|li| (mi, li)))
            .ok_or_else(|| LedgerError::LineNotFound(id.to_string()))
    }

    /// Checks line amounts and accounts
    fn validate_lines(&self, entry: &Move) -> Result<(), LedgerError> {
        for line in &entry.lines {
            if !self.accounts.contains_key(&line.account) {
                return Err(LedgerError::AccountNotFound(line.account.to_string()));
            }
            if line.debit < ZERO || line.credit < ZERO {
                return Err(LedgerError::InvalidLine(format!(
                    "negative amount on line {}",
                    line.id
                )));
            }
            if !line.debit.is_zero() && !line.credit.is_zero() {
                return Err(LedgerError::InvalidLine(format!(
                    "line {} has both debit and credit",
                    line.id
                )));
            }
        }
        Ok(())
    }

    /// Checks what posting needs: balance and required parties
    fn validate_posting(&self, entry: &Move) -> Result<(), LedgerError> {
        if entry.state == MoveState::Posted {
            return Err(LedgerError::InvalidMoveState {
                name: entry.display_name(),
                state: "posted".to_string(),
                operation: "post".to_string(),
            });
        }

        let totals = entry.totals();
        if !totals.is_balanced() {
            return Err(LedgerError::UnbalancedMove {
                name: entry.display_name(),
                debits: totals.debit,
                credits: totals.credit,
            });
        }

        for line in &entry.lines {
            let account = self
                .accounts
                .get(&line.account)
                .ok_or_else(|| LedgerError::AccountNotFound(line.account.to_string()))?;
            if account.party_required && line.party.is_none() {
                return Err(LedgerError::InvalidLine(format!(
                    "account {} requires a party",
                    account.code
                )));
            }
        }
        Ok(())
    }
}

impl DomainPort for InMemoryLedger {}

impl LedgerPort for InMemoryLedger {
    fn account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    fn find_period(&self, company: CompanyId, date: NaiveDate) -> Result<PeriodId, LedgerError> {
        self.periods
            .iter()
            .find(|p| p.covers(company, date))
            .map(|p| p.id)
            .ok_or_else(|| LedgerError::PeriodNotFound {
                company: company.to_string(),
                date,
            })
    }

    fn find_journal(&self, kind: JournalKind) -> Result<Option<JournalId>, LedgerError> {
        Ok(self.journals.iter().find(|j| j.kind == kind).map(|j| j.id))
    }

    fn get_move(&self, id: MoveId) -> Result<Move, LedgerError> {
        Ok(self.moves[self.move_index(id)?].clone())
    }

    fn save(&mut self, mut draft: Move, access: Access) -> Result<MoveId, LedgerError> {
        self.check_access(access, "save")?;
        self.validate_lines(&draft)?;

        self.sequence += 1;
        draft.number = Some(format!("M/{:05}", self.sequence));
        draft.state = MoveState::Draft;
        let id = draft.id;
        for line in &mut draft.lines {
            line.move_id = Some(id);
        }

        debug!(
            move_id = %id,
            number = %draft.display_name(),
            lines = draft.lines.len(),
            "Move saved"
        );
        self.moves.push(draft);
        Ok(id)
    }

    fn post(&mut self, moves: &[MoveId], access: Access) -> Result<(), LedgerError> {
        self.check_access(access, "post")?;

        let mut indexes = Vec::with_capacity(moves.len());
        for id in moves {
            let index = self.move_index(*id)?;
            self.validate_posting(&self.moves[index])?;
            indexes.push(index);
        }

        for index in indexes {
            let entry = &mut self.moves[index];
            entry.state = MoveState::Posted;
            info!(number = %entry.display_name(), totals = %entry.totals(), "Move posted");
        }
        Ok(())
    }

    fn draft(&mut self, moves: &[MoveId]) -> Result<(), LedgerError> {
        let mut indexes = Vec::with_capacity(moves.len());
        for id in moves {
            let index = self.move_index(*id)?;
            let entry = &self.moves[index];
            if let Some(line) = entry.lines.iter().find(|l| l.is_reconciled()) {
                return Err(LedgerError::AlreadyReconciled(line.id.to_string()));
            }
            indexes.push(index);
        }

        for index in indexes {
            let entry = &mut self.moves[index];
            entry.state = MoveState::Draft;
            debug!(number = %entry.display_name(), "Move set back to draft");
        }
        Ok(())
    }

    fn delete(&mut self, moves: &[MoveId]) -> Result<(), LedgerError> {
        for id in moves {
            let entry = &self.moves[self.move_index(*id)?];
            if entry.state != MoveState::Draft {
                return Err(LedgerError::InvalidMoveState {
                    name: entry.display_name(),
                    state: "posted".to_string(),
                    operation: "delete".to_string(),
                });
            }
        }

        self.moves.retain(|m| {
            let keep = !moves.contains(&m.id);
            if !keep {
                info!(number = %m.display_name(), "Move deleted");
            }
            keep
        });
        Ok(())
    }

    fn reconcile(&mut self, lines: &[MoveLineId]) -> Result<ReconciliationId, LedgerError> {
        if lines.is_empty() {
            return Err(LedgerError::InvalidLine("nothing to reconcile".to_string()));
        }

        let mut positions = Vec::with_capacity(lines.len());
        let mut account = None;
        let mut totals = Balance::zero();
        let mut date = NaiveDate::MIN;

        for id in lines {
            let (mi, li) = self.line_position(*id)?;
            let entry = &self.moves[mi];
            let line = &entry.lines[li];

            if line.is_reconciled() {
                return Err(LedgerError::AlreadyReconciled(line.id.to_string()));
            }
            if entry.state != MoveState::Posted {
                return Err(LedgerError::InvalidMoveState {
                    name: entry.display_name(),
                    state: "draft".to_string(),
                    operation: "reconcile".to_string(),
                });
            }
            match account {
                None => account = Some(line.account),
                Some(a) if a != line.account => return Err(LedgerError::MixedAccounts),
                Some(_) => {}
            }

            totals += line.balance();
            date = date.max(entry.date);
            positions.push((mi, li));
        }

        if !totals.is_balanced() {
            return Err(LedgerError::UnbalancedReconciliation {
                debits: totals.debit,
                credits: totals.credit,
            });
        }

        let reconciliation = Reconciliation::new(lines.to_vec(), date);
        let id = reconciliation.id;
        for (mi, li) in positions {
            self.moves[mi].lines[li].reconciliation = Some(id);
        }
        info!(reconciliation = %id, lines = lines.len(), total = %totals.debit, "Lines reconciled");
        self.reconciliations.push(reconciliation);

        Ok(id)
    }

    fn search_lines(&self, query: &MoveLineQuery) -> Result<Vec<MoveLine>, LedgerError> {
        Ok(self
            .moves
            .iter()
            .flat_map(|m| m.lines.iter())
            .filter(|l| query.matches(l))
            .cloned()
            .collect())
    }
}
