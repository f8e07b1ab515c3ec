//! Merited revenue reporting
//!
//! Two read-only figures per work:
//!
//! - `revenue_merited`: net credit of the work's unreconciled ledger lines
//! - `revenue_pending_merited`: certified pending quantity at the work's
//!   price, quantized to three decimals
//!
//! Both are recomputed on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{quantize, Clock, WorkId, MERITED_SCALE, ZERO};
use domain_ledger::{LedgerPort, MoveLine, MoveLineQuery};

use crate::accounting::ProjectAccounting;
use crate::error::CertificationError;
use crate::ports::ProjectPort;
use crate::work::Work;

/// Merited figures of one work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeritedAmounts {
    pub revenue_merited: Decimal,
    pub revenue_pending_merited: Decimal,
}

/// Sum of `credit - debit` over the lines that are not reconciled
pub fn revenue_merited(lines: &[MoveLine]) -> Decimal {
    lines
        .iter()
        .filter(|l| !l.is_reconciled())
        .map(|l| l.balance().net_credit())
        .sum()
}

/// Certified pending quantity valued at the work's price
///
/// A work without price has nothing pending.
pub fn revenue_pending_merited(work: &Work) -> Decimal {
    let price = work.list_price.unwrap_or(ZERO);
    quantize(work.certified_pending_quantity * price, MERITED_SCALE)
}

impl<L, P, C> ProjectAccounting<L, P, C>
where
    L: LedgerPort,
    P: ProjectPort,
    C: Clock,
{
    /// Ledger lines tagged with a work
    pub fn revenue_moves(&self, work: WorkId) -> Result<Vec<MoveLine>, CertificationError> {
        Ok(self.ledger.search_lines(&MoveLineQuery::for_work(work))?)
    }

    /// Both merited figures for each work
    pub fn merited_amounts(
        &self,
        works: &[Work],
    ) -> Result<HashMap<WorkId, MeritedAmounts>, CertificationError> {
        let mut amounts = HashMap::with_capacity(works.len());
        for work in works {
            let lines = self.revenue_moves(work.id)?;
            amounts.insert(
                work.id,
                MeritedAmounts {
                    revenue_merited: revenue_merited(&lines),
                    revenue_pending_merited: revenue_pending_merited(work),
                },
            );
        }
        Ok(amounts)
    }

    /// `revenue_merited` for each work
    pub fn revenue_merited(&self, works: &[Work]) -> Result<HashMap<WorkId, Decimal>, CertificationError> {
        Ok(self
            .merited_amounts(works)?
            .into_iter()
            .map(|(id, a)| (id, a.revenue_merited))
            .collect())
    }

    /// `revenue_pending_merited` for each work
    pub fn revenue_pending_merited(&self, works: &[Work]) -> HashMap<WorkId, Decimal> {
        works
            .iter()
            .map(|w| (w.id, revenue_pending_merited(w)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{AccountId, Balance, CompanyId, ReconciliationId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_pending_merited_three_decimals() {
        let work = Work::new("Paving", CompanyId::new())
            .with_list_price(dec!(10.333))
            .with_certified_pending_quantity(dec!(2.5));

        let merited = revenue_pending_merited(&work);
        assert_eq!(merited, dec!(25.833));
        assert_eq!(merited.scale(), 3);
    }

    #[test]
    fn test_pending_merited_without_price() {
        let work = Work::new("Paving", CompanyId::new()).with_certified_pending_quantity(dec!(4));
        assert_eq!(revenue_pending_merited(&work), dec!(0));
    }

    #[test]
    fn test_merited_ignores_reconciled_lines() {
        let account = AccountId::new();
        let mut reconciled = MoveLine::new(account, Balance::debit(dec!(400)));
        reconciled.reconciliation = Some(ReconciliationId::new());

        let lines = vec![
            MoveLine::new(account, Balance::credit(dec!(400))),
            reconciled,
            MoveLine::new(account, Balance::debit(dec!(50))),
        ];

        assert_eq!(revenue_merited(&lines), dec!(350));
        assert_eq!(revenue_merited(&[]), dec!(0));
    }
}
