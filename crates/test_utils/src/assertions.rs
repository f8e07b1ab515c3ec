//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::{Balance, MoveId, ReconciliationId};
use domain_ledger::{InMemoryLedger, LedgerPort, Move, MoveLine, MoveLineQuery};

/// Asserts that two lines form a revenue/pending pair of `amount`
///
/// # Panics
///
/// Panics unless the first line is a pure credit and the second a pure debit
/// of the same amount
pub fn assert_balanced_pair(lines: &[MoveLine], amount: Decimal) {
    assert_eq!(lines.len(), 2, "Expected a pair of lines, got {}", lines.len());
    let (revenue, pending) = (&lines[0], &lines[1]);

    assert_eq!(revenue.credit, pending.debit, "Revenue credit differs from pending debit");
    assert!(revenue.debit.is_zero(), "Revenue line has a debit of {}", revenue.debit);
    assert!(pending.credit.is_zero(), "Pending line has a credit of {}", pending.credit);
    assert_eq!(revenue.credit, amount, "Pair amount mismatch");
}

/// Asserts that a move's debits equal its credits
pub fn assert_move_balanced(entry: &Move) {
    let totals = entry.totals();
    assert!(
        totals.is_balanced(),
        "Move {} is unbalanced: {}",
        entry.display_name(),
        totals
    );
}

/// Asserts that no line of `move_id` remains in the ledger
pub fn assert_move_removed(ledger: &InMemoryLedger, move_id: MoveId) {
    assert!(!ledger.contains_move(move_id), "Move {} still exists", move_id);

    let residual = ledger
        .search_lines(&MoveLineQuery::default())
        .unwrap()
        .into_iter()
        .filter(|l| l.move_id == Some(move_id))
        .count();
    assert_eq!(residual, 0, "Move {} left {} lines behind", move_id, residual);
}

/// Asserts that the lines of a reconciliation net to zero
pub fn assert_reconciliation_nets_to_zero(ledger: &InMemoryLedger, reconciliation: ReconciliationId) {
    let totals: Balance = ledger
        .search_lines(&MoveLineQuery::default())
        .unwrap()
        .iter()
        .filter(|l| l.reconciliation == Some(reconciliation))
        .map(MoveLine::balance)
        .sum();

    assert!(
        totals.is_balanced(),
        "Reconciliation {} does not net to zero: {}",
        reconciliation,
        totals
    );
}
