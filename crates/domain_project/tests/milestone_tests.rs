//! Comprehensive tests for remainder settlement and merited revenue

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Balance;
use domain_ledger::{LedgerError, LedgerPort, MoveLineQuery, MoveOrigin, MoveState};
use domain_project::{
    CertificationError, InvoiceMethod, InvoiceMilestone, Product, RecordingInvoicer,
    RemainderAmounts, Work,
};
use test_utils::*;

fn project_with(
    price: Option<Decimal>,
    configure: impl FnOnce(TestAccountingBuilder) -> TestAccountingBuilder,
) -> (LedgerFixture, Work, TestAccounting) {
    let mut fixture = LedgerFixture::new();
    let mut project = TestWorkBuilder::for_ledger(&fixture).build();
    project.list_price = price;
    let accounting = configure(TestAccountingBuilder::new(&mut fixture).with_work(project.clone())).build();
    (fixture, project, accounting)
}

fn certify(accounting: &mut TestAccounting, project: &Work, quantity: Decimal) {
    let mut certs = vec![TestCertificationBuilder::new(project.id).with_line(quantity).build()];
    accounting.confirm(&mut certs).unwrap();
}

fn remainder(project: &Work) -> InvoiceMilestone {
    InvoiceMilestone::new(project.id, InvoiceMethod::Remainder)
}

fn open_pending_lines(accounting: &TestAccounting, fixture: &LedgerFixture, project: &Work) -> usize {
    accounting
        .ledger()
        .search_lines(&MoveLineQuery::for_work(project.id).on_account(fixture.pending).unreconciled())
        .unwrap()
        .len()
}

// ============================================================================
// Remainder Settlement Tests
// ============================================================================

mod settlement_tests {
    use super::*;

    #[test]
    fn test_nothing_certified() {
        let (fixture, project, mut accounting) = project_with(Some(dec!(750)), |b| b);

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_invoice, dec!(750));
        assert_eq!(settlement.amount_to_reconcile, dec!(0));
        assert!(settlement.reconciliation.is_none());

        let entry = accounting.ledger().get_move(settlement.move_id).unwrap();
        assert_eq!(entry.state, MoveState::Posted);
        assert!(entry.lines.iter().all(|l| l.balance().is_zero()));
        assert_eq!(entry.lines[0].account, fixture.pending);
        assert_eq!(entry.lines[1].account, fixture.expense);
    }

    #[test]
    fn test_zero_price_posts_zero_move() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(0)), |b| b);

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_invoice, dec!(0));
        let entry = accounting.ledger().get_move(settlement.move_id).unwrap();
        assert_eq!(entry.lines.len(), 2);
        assert_eq!(entry.state, MoveState::Posted);
        assert!(entry.totals().is_zero());
    }

    #[test]
    fn test_full_round_trip() {
        let (fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        certify(&mut accounting, &project, dec!(1));
        assert_eq!(open_pending_lines(&accounting, &fixture, &project), 1);

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_invoice, dec!(0));
        assert_eq!(settlement.amount_to_reconcile, dec!(1000.00));

        let entry = accounting.ledger().get_move(settlement.move_id).unwrap();
        assert_eq!(entry.date, DateFixtures::today());
        assert_eq!(entry.period, fixture.period);
        assert_eq!(entry.journal, fixture.expense_journal);
        assert_eq!(entry.origin, Some(MoveOrigin::Work(project.id)));
        assert_move_balanced(&entry);

        let clearing = entry.lines_on(fixture.pending).next().unwrap();
        assert_eq!(clearing.balance(), Balance::credit(dec!(1000.00)));
        let counter = entry.lines_on(fixture.expense).next().unwrap();
        assert_eq!(counter.balance(), Balance::debit(dec!(1000.00)));

        let reconciliation = settlement.reconciliation.expect("pending lines reconciled");
        assert_reconciliation_nets_to_zero(accounting.ledger(), reconciliation);
        assert_eq!(open_pending_lines(&accounting, &fixture, &project), 0);
        assert!(accounting.ledger().account_balance(fixture.pending).is_balanced());
    }

    #[test]
    fn test_partial_certification() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        certify(&mut accounting, &project, dec!(0.4));

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_reconcile, dec!(400.00));
        assert_eq!(settlement.amount_to_invoice, dec!(600.00));
    }

    #[test]
    fn test_accumulated_certifications() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        certify(&mut accounting, &project, dec!(0.3));
        certify(&mut accounting, &project, dec!(0.2));

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_reconcile, dec!(500.00));
        assert_eq!(settlement.amount_to_invoice, dec!(500.00));

        let reconciliation = settlement.reconciliation.unwrap();
        let group = accounting
            .ledger()
            .reconciliations()
            .iter()
            .find(|r| r.id == reconciliation)
            .unwrap();
        assert_eq!(group.lines.len(), 3);
        assert_reconciliation_nets_to_zero(accounting.ledger(), reconciliation);
    }

    #[test]
    fn test_second_settlement_finds_nothing_pending() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        certify(&mut accounting, &project, dec!(1));
        accounting.check_certifications(&remainder(&project)).unwrap();

        let again = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(again.amount_to_reconcile, dec!(0));
        assert_eq!(again.amount_to_invoice, dec!(1000.00));
        assert!(again.reconciliation.is_none());
    }

    #[test]
    fn test_missing_price_leaves_negative_remainder() {
        let (_fixture, mut project, mut accounting) = project_with(Some(dec!(100)), |b| b);
        certify(&mut accounting, &project, dec!(0.4));
        project.list_price = None;
        accounting.projects_mut().add_work(project.clone());

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        assert_eq!(settlement.amount_to_reconcile, dec!(40.00));
        assert_eq!(settlement.amount_to_invoice, dec!(-40.00));
    }

    #[test]
    fn test_pending_party_when_required() {
        let mut fixture = LedgerFixture::with_party_required_pending();
        let project = TestWorkBuilder::for_ledger(&fixture).build();
        let mut accounting = TestAccountingBuilder::new(&mut fixture)
            .with_work(project.clone())
            .build();
        certify(&mut accounting, &project, dec!(1));

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        let entry = accounting.ledger().get_move(settlement.move_id).unwrap();
        let clearing = entry.lines_on(fixture.pending).next().unwrap();
        let counter = entry.lines_on(fixture.expense).next().unwrap();
        assert_eq!(clearing.party, Some(fixture.party));
        assert_eq!(counter.party, None);
        assert!(settlement.reconciliation.is_some());
    }

    #[test]
    fn test_without_expense_journal() {
        let mut fixture = LedgerFixture::without_journals();
        let project = TestWorkBuilder::for_ledger(&fixture).build();
        let mut accounting = TestAccountingBuilder::new(&mut fixture)
            .with_work(project.clone())
            .build();

        let settlement = accounting.check_certifications(&remainder(&project)).unwrap();

        let entry = accounting.ledger().get_move(settlement.move_id).unwrap();
        assert_eq!(entry.journal, None);
    }

    #[test]
    fn test_no_period_for_today() {
        let (_fixture, project, mut accounting) =
            project_with(Some(dec!(1000.00)), |b| b.with_today(DateFixtures::outside_fiscal_year()));

        assert!(matches!(
            accounting.check_certifications(&remainder(&project)),
            Err(CertificationError::Ledger(LedgerError::PeriodNotFound { .. }))
        ));
        assert!(accounting.ledger().moves().is_empty());
    }

    #[test]
    fn test_missing_expense_account() {
        let mut fixture = LedgerFixture::new();
        let project = TestWorkBuilder::for_ledger(&fixture)
            .with_product(Product::new("Revenue only").with_revenue_account(fixture.revenue))
            .build();
        let mut accounting = TestAccountingBuilder::new(&mut fixture)
            .with_work(project.clone())
            .build();

        assert!(matches!(
            accounting.check_certifications(&remainder(&project)),
            Err(CertificationError::MissingProductAccount { kind: "expense", .. })
        ));
    }

    #[test]
    fn test_project_without_product() {
        let mut fixture = LedgerFixture::new();
        let project = TestWorkBuilder::for_ledger(&fixture).without_product().build();
        let mut accounting = TestAccountingBuilder::new(&mut fixture)
            .with_work(project.clone())
            .build();

        assert!(matches!(
            accounting.check_certifications(&remainder(&project)),
            Err(CertificationError::MissingProductAccount { .. })
        ));
    }

    #[test]
    fn test_missing_configuration() {
        let (_fixture, project, mut accounting) =
            project_with(Some(dec!(1000.00)), |b| b.without_configuration());

        assert!(matches!(
            accounting.check_certifications(&remainder(&project)),
            Err(CertificationError::ConfigurationMissing)
        ));
    }
}

// ============================================================================
// Milestone Invoicing Tests
// ============================================================================

mod invoicing_tests {
    use super::*;

    #[test]
    fn test_only_remainder_milestones_are_settled() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        certify(&mut accounting, &project, dec!(0.5));
        let milestones = vec![
            remainder(&project),
            InvoiceMilestone::new(project.id, InvoiceMethod::Manual),
            InvoiceMilestone::new(project.id, InvoiceMethod::Other("percentage".to_string())),
        ];
        let mut invoicer = RecordingInvoicer::new();

        let settlements = accounting.do_invoice(&milestones, &mut invoicer).unwrap();

        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].milestone, milestones[0].id);
        assert_eq!(settlements[0].amount_to_invoice, dec!(500.00));

        let ids: Vec<_> = milestones.iter().map(|m| m.id).collect();
        assert_eq!(invoicer.invoiced(), ids.as_slice());
    }

    #[test]
    fn test_failed_settlement_skips_invoicing() {
        let (_fixture, project, mut accounting) =
            project_with(Some(dec!(1000.00)), |b| b.without_configuration());
        let mut invoicer = RecordingInvoicer::new();

        let result = accounting.do_invoice(&[remainder(&project)], &mut invoicer);

        assert!(matches!(result, Err(CertificationError::ConfigurationMissing)));
        assert!(invoicer.invoiced().is_empty());
    }

    #[test]
    fn test_manual_milestones_need_no_configuration() {
        let (_fixture, project, mut accounting) =
            project_with(Some(dec!(1000.00)), |b| b.without_configuration());
        let mut invoicer = RecordingInvoicer::new();
        let milestone = InvoiceMilestone::new(project.id, InvoiceMethod::Manual);

        let settlements = accounting.do_invoice(&[milestone.clone()], &mut invoicer).unwrap();

        assert!(settlements.is_empty());
        assert_eq!(invoicer.invoiced(), &[milestone.id]);
    }
}

// ============================================================================
// Merited Revenue Tests
// ============================================================================

mod accrual_tests {
    use super::*;

    #[test]
    fn test_revenue_merited_follows_reconciliation() {
        let (_fixture, project, mut accounting) = project_with(Some(dec!(1000.00)), |b| b);
        let works = [project.clone()];
        assert_eq!(accounting.revenue_merited(&works).unwrap()[&project.id], dec!(0));

        certify(&mut accounting, &project, dec!(1));
        assert_eq!(accounting.revenue_merited(&works).unwrap()[&project.id], dec!(0));

        accounting.check_certifications(&remainder(&project)).unwrap();
        assert_eq!(accounting.revenue_merited(&works).unwrap()[&project.id], dec!(1000.00));
    }

    #[test]
    fn test_revenue_pending_merited_scale() {
        let mut fixture = LedgerFixture::new();
        let work = TestWorkBuilder::for_ledger(&fixture)
            .with_list_price(AmountFixtures::fractional_price())
            .with_certified_pending_quantity(AmountFixtures::fractional_quantity())
            .build();
        let accounting = TestAccountingBuilder::new(&mut fixture).with_work(work.clone()).build();

        let merited = accounting.revenue_pending_merited(&[work.clone()]);

        assert_eq!(merited[&work.id], dec!(25.833));
        assert_eq!(merited[&work.id].scale(), 3);
    }

    #[test]
    fn test_merited_amounts_per_work() {
        let mut fixture = LedgerFixture::new();
        let priced = TestWorkBuilder::for_ledger(&fixture)
            .with_certified_pending_quantity(dec!(0.5))
            .build();
        let unpriced = TestWorkBuilder::for_ledger(&fixture)
            .with_name("Unpriced")
            .without_list_price()
            .with_certified_pending_quantity(dec!(3))
            .build();
        let accounting = TestAccountingBuilder::new(&mut fixture)
            .with_work(priced.clone())
            .with_work(unpriced.clone())
            .build();

        let amounts = accounting
            .merited_amounts(&[priced.clone(), unpriced.clone()])
            .unwrap();

        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts[&priced.id].revenue_pending_merited, dec!(500.000));
        assert_eq!(amounts[&unpriced.id].revenue_pending_merited, dec!(0));
        assert_eq!(amounts[&unpriced.id].revenue_merited, dec!(0));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clearing_line_nets_previous_to_zero(
            price in amount_strategy(),
            previous in balance_strategy(),
        ) {
            let amounts = RemainderAmounts::compute(Some(price), previous);

            prop_assert!((previous + amounts.pending).is_balanced());
            prop_assert_eq!(amounts.counter, amounts.pending.mirrored());
            prop_assert!(amounts.amount_to_reconcile >= Decimal::ZERO);
            prop_assert_eq!(amounts.amount_to_invoice + amounts.amount_to_reconcile, price);
            prop_assert!(amounts.pending.debit.is_zero() || amounts.pending.credit.is_zero());
        }
    }
}
