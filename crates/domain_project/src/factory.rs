//! Ledger lines for certification lines
//!
//! A certification line with a non-zero invoiced amount produces a balanced
//! pair: the product revenue account is credited and the pending invoice
//! clearing account is debited by the same amount. Everything else produces
//! nothing.
//!
//! ```text
//! Revenue (product)          Cr  price x quantity
//! Pending invoice clearing   Dr  price x quantity
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{quantize, Balance, Clock, JournalId, INVOICED_SCALE};
use domain_ledger::{AnalyticLine, JournalKind, LedgerPort, Move, MoveLine, MoveLineQuery, MoveOrigin};

use crate::accounting::ProjectAccounting;
use crate::certification::{Certification, CertificationLine};
use crate::error::CertificationError;
use crate::ports::ProjectPort;
use crate::work::Work;

/// Amount invoiced for `quantity` at `list_price`
///
/// A non-zero price is multiplied and quantized to two decimals. A zero or
/// missing price is returned as is.
pub fn invoiced_amount(list_price: Option<Decimal>, quantity: Decimal) -> Option<Decimal> {
    match list_price {
        Some(price) if !price.is_zero() => Some(quantize(price * quantity, INVOICED_SCALE)),
        other => other,
    }
}

/// Analytic children of a move line, one per analytic account
///
/// Each mirrors the amounts of the line and is labelled with the work name.
pub fn analytic_lines(
    line: &CertificationLine,
    work: &Work,
    balance: Balance,
    journal: Option<JournalId>,
    date: NaiveDate,
) -> Vec<AnalyticLine> {
    line.analytic_accounts
        .iter()
        .map(|account| {
            AnalyticLine::new(*account, work.name.clone(), balance, date)
                .with_reference(work.name.clone())
                .with_journal(journal)
                .with_party(work.party)
        })
        .collect()
}

impl<L, P, C> ProjectAccounting<L, P, C>
where
    L: LedgerPort,
    P: ProjectPort,
    C: Clock,
{
    /// Produces the ledger lines for one certification line
    ///
    /// Returns `[revenue, pending]`, or nothing when the work has no product
    /// or the invoiced amount is zero.
    ///
    /// # Errors
    ///
    /// - `CertificationError::ConfigurationMissing` if no clearing account is set
    /// - `CertificationError::MissingProductAccount` if the product has no revenue account
    pub fn produce_lines(
        &self,
        certification: &Certification,
        line: &CertificationLine,
    ) -> Result<Vec<MoveLine>, CertificationError> {
        let pending_account = self.config.pending_invoice_account()?;
        let work = self.projects.work(line.work)?;

        let product = match &work.product {
            Some(product) => product,
            None => return Ok(Vec::new()),
        };

        let lines_to_reconcile = self.ledger.search_lines(
            &MoveLineQuery::for_work(work.id)
                .on_account(pending_account)
                .unreconciled(),
        )?;
        let amount = invoiced_amount(work.list_price, line.quantity);

        if amount.map_or(true, |a| a.is_zero()) && lines_to_reconcile.is_empty() {
            debug!(work_id = %work.id, "No price and nothing pending, no lines produced");
            return Ok(Vec::new());
        }

        let amount = match amount {
            Some(amount) if !amount.is_zero() => amount,
            _ => return Ok(Vec::new()),
        };

        let revenue_account = self.ledger.account(product.account_revenue_used()?)?;
        let mut revenue_line = MoveLine::new(revenue_account.id, Balance::credit(amount))
            .for_work(work.id)
            .with_party(work.party.filter(|_| revenue_account.party_required));

        if !line.analytic_accounts.is_empty() {
            let journal = self.ledger.find_journal(JournalKind::Revenue)?;
            revenue_line.analytic_lines =
                analytic_lines(line, &work, revenue_line.balance(), journal, self.clock.today());
        }

        let pending = self.ledger.account(pending_account)?;
        let certified_party = if certification.work == work.id {
            work.party
        } else {
            self.projects.work(certification.work)?.party
        };
        let pending_line = MoveLine::new(pending.id, Balance::debit(amount))
            .for_work(work.id)
            .with_party(certified_party.filter(|_| pending.party_required));

        debug!(
            work_id = %work.id,
            line_id = %line.id,
            amount = %amount,
            "Certification line lines produced"
        );
        Ok(vec![revenue_line, pending_line])
    }

    /// Builds the move for one certification line, if it produces lines
    ///
    /// The move is dated at the certification date, in the first revenue
    /// journal (or none), with the work as origin.
    pub fn certification_move(
        &self,
        certification: &Certification,
        line: &CertificationLine,
    ) -> Result<Option<Move>, CertificationError> {
        let lines = self.produce_lines(certification, line)?;
        if lines.is_empty() {
            return Ok(None);
        }

        let work = self.projects.work(line.work)?;
        let period = self.ledger.find_period(work.company, certification.date)?;
        let journal = self.ledger.find_journal(JournalKind::Revenue)?;

        Ok(Some(
            Move::new(work.company, period, certification.date)
                .in_journal(journal)
                .with_origin(MoveOrigin::Work(work.id))
                .with_lines(lines),
        ))
    }
}
