//! Invoice milestones and remainder settlement
//!
//! Before a remainder milestone is invoiced, the certified amounts still
//! waiting on the pending invoice account are settled. A new move clears the
//! net pending balance against the product expense account, and the new
//! clearing line is reconciled with the previous ones.
//!
//! ```text
//! previous pending lines   Dr 1000.00
//! settlement move          pending Cr 1000.00 / expense Dr 1000.00
//! reconciliation           previous lines + settlement pending line (net 0)
//! ```
//!
//! The part of the project price not covered by that balance is reported as
//! the amount left to invoice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use core_kernel::{AccountId, Balance, Clock, MilestoneId, MoveId, ReconciliationId, WorkId, ZERO};
use domain_ledger::{Access, JournalKind, LedgerPort, Move, MoveLine, MoveLineQuery, MoveOrigin};

use crate::accounting::ProjectAccounting;
use crate::error::CertificationError;
use crate::ports::{MilestoneInvoicer, ProjectPort};
use crate::work::{InvoiceMethod, Work};

/// A billing milestone of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMilestone {
    pub id: MilestoneId,
    /// Project (root work) the milestone bills
    pub project: WorkId,
    pub invoice_method: InvoiceMethod,
}

impl InvoiceMilestone {
    pub fn new(project: WorkId, invoice_method: InvoiceMethod) -> Self {
        Self {
            id: MilestoneId::new_v7(),
            project,
            invoice_method,
        }
    }
}

/// Amounts of a remainder settlement, before anything is posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderAmounts {
    /// Project price left to invoice
    pub amount_to_invoice: Decimal,
    /// Net pending balance being cleared
    pub amount_to_reconcile: Decimal,
    /// Amounts of the new clearing line
    pub pending: Balance,
    /// Amounts of the expense counterpart
    pub counter: Balance,
}

impl RemainderAmounts {
    /// Computes the settlement of `previous` pending lines for a project priced `list_price`
    ///
    /// The clearing line takes the side opposite to the net of the previous
    /// lines, so that together they net to zero. The counterpart mirrors it.
    pub fn compute(list_price: Option<Decimal>, previous: Balance) -> Self {
        let amount_to_reconcile = previous.abs_net();
        let amount_to_invoice = list_price.unwrap_or(ZERO) - amount_to_reconcile;

        let pending = if previous.net_credit() > ZERO {
            Balance::debit(amount_to_reconcile)
        } else {
            Balance::credit(amount_to_reconcile)
        };

        Self {
            amount_to_invoice,
            amount_to_reconcile,
            pending,
            counter: pending.mirrored(),
        }
    }
}

/// Result of settling a remainder milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderSettlement {
    pub milestone: MilestoneId,
    pub amount_to_invoice: Decimal,
    pub amount_to_reconcile: Decimal,
    /// Settlement move, posted
    pub move_id: MoveId,
    /// Reconciliation of the pending lines, when there were previous ones
    pub reconciliation: Option<ReconciliationId>,
}

impl<L, P, C> ProjectAccounting<L, P, C>
where
    L: LedgerPort,
    P: ProjectPort,
    C: Clock,
{
    /// Invoices milestones, settling remainder milestones first
    ///
    /// # Arguments
    ///
    /// * `milestones` - Milestones to invoice
    /// * `invoicer` - Generic invoicing step, run for all milestones
    ///
    /// # Returns
    ///
    /// One settlement per remainder milestone, in input order
    #[instrument(skip(self, milestones, invoicer), fields(count = milestones.len()))]
    pub fn do_invoice<I>(
        &mut self,
        milestones: &[InvoiceMilestone],
        invoicer: &mut I,
    ) -> Result<Vec<RemainderSettlement>, CertificationError>
    where
        I: MilestoneInvoicer + ?Sized,
    {
        let mut settlements = Vec::new();
        for milestone in milestones.iter().filter(|m| m.invoice_method.is_remainder()) {
            settlements.push(self.check_certifications(milestone)?);
        }

        invoicer.invoice(milestones)?;
        Ok(settlements)
    }

    /// Settles the pending certified amounts of a milestone's project
    ///
    /// Posts a settlement move dated today and reconciles its clearing line
    /// with the previous unreconciled clearing lines of the project.
    ///
    /// # Errors
    ///
    /// - `CertificationError::ConfigurationMissing` if no clearing account is set
    /// - `CertificationError::MissingProductAccount` if the project product has
    ///   no expense account
    /// - `CertificationError::Ledger` if no period covers today
    pub fn check_certifications(
        &mut self,
        milestone: &InvoiceMilestone,
    ) -> Result<RemainderSettlement, CertificationError> {
        let pending_account = self.config.pending_invoice_account()?;
        let project = self.projects.work(milestone.project)?;
        let expense_account = project_expense_account(&project)?;

        let previous = self.previous_pending_lines(&project, pending_account)?;
        let totals: Balance = previous.iter().map(MoveLine::balance).sum();
        let amounts = RemainderAmounts::compute(project.list_price, totals);

        debug!(
            project_id = %project.id,
            previous = previous.len(),
            totals = %totals,
            amount_to_invoice = %amounts.amount_to_invoice,
            amount_to_reconcile = %amounts.amount_to_reconcile,
            "Remainder computed"
        );

        let pending = self.ledger.account(pending_account)?;
        let expense = self.ledger.account(expense_account)?;
        let today = self.clock.today();
        let period = self.ledger.find_period(project.company, today)?;
        let journal = self.ledger.find_journal(JournalKind::Expense)?;

        let entry = Move::new(project.company, period, today)
            .in_journal(journal)
            .with_origin(MoveOrigin::Work(project.id))
            .with_lines([
                MoveLine::new(pending.id, amounts.pending)
                    .with_party(project.party.filter(|_| pending.party_required)),
                MoveLine::new(expense.id, amounts.counter)
                    .with_party(project.party.filter(|_| expense.party_required)),
            ]);

        let move_id = self.ledger.save(entry, Access::Standard)?;
        self.ledger.post(&[move_id], Access::Standard)?;

        let reconciliation = if previous.is_empty() {
            None
        } else {
            let settled = self.ledger.get_move(move_id)?;
            let clearing = settled.lines_on(pending_account).next().ok_or_else(|| {
                CertificationError::AmbiguousClearingLine {
                    move_name: settled.display_name(),
                    matches: 0,
                }
            })?;

            let mut to_reconcile: Vec<_> = previous.iter().map(|l| l.id).collect();
            to_reconcile.push(clearing.id);
            Some(self.ledger.reconcile(&to_reconcile)?)
        };

        info!(
            milestone_id = %milestone.id,
            move_id = %move_id,
            reconciled = reconciliation.is_some(),
            amount_to_invoice = %amounts.amount_to_invoice,
            "Remainder milestone settled"
        );

        Ok(RemainderSettlement {
            milestone: milestone.id,
            amount_to_invoice: amounts.amount_to_invoice,
            amount_to_reconcile: amounts.amount_to_reconcile,
            move_id,
            reconciliation,
        })
    }

    /// Unreconciled clearing lines tagged with the project
    fn previous_pending_lines(
        &self,
        project: &Work,
        pending_account: AccountId,
    ) -> Result<Vec<MoveLine>, CertificationError> {
        Ok(self.ledger.search_lines(
            &MoveLineQuery::for_work(project.id)
                .on_account(pending_account)
                .unreconciled(),
        )?)
    }
}

fn project_expense_account(project: &Work) -> Result<AccountId, CertificationError> {
    match &project.product {
        Some(product) => product.account_expense_used(),
        None => Err(CertificationError::MissingProductAccount {
            product: format!("of project {}", project.name),
            kind: "expense",
        }),
    }
}
