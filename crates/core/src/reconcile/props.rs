//! Property-based tests for the reconciler.
//!
//! Reports computed by the aggregator always reconcile; perturbing any single
//! view beyond the tolerance is always caught.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tahsilat_shared::types::{Currency, MethodName, ProjectKey};

use super::service::Reconciler;
use crate::payment::PaymentRecord;
use crate::reports::{ReportService, YearlyReport};

fn record_strategy() -> impl Strategy<Value = PaymentRecord> {
    (
        prop_oneof![Just("MKM"), Just("MSM")],
        prop_oneof![Just(MethodName::TRANSFER), Just(MethodName::CASH), Just(MethodName::CHECK)],
        1i64..10_000_000i64,
        1u32..=12,
        1u32..=28,
    )
        .prop_map(|(project, method, cents, month, day)| {
            let amount = Decimal::new(cents, 2);
            PaymentRecord {
                id: None,
                customer_name: "Müşteri".to_string(),
                payment_date: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
                payment_method: MethodName::from_static(method),
                account_name: "Ofis".to_string(),
                amount,
                currency: Currency::Usd,
                project: ProjectKey::new(project).unwrap(),
                amount_usd: amount,
                exchange_rate: None,
            }
        })
}

fn computed_report(records: &[PaymentRecord]) -> YearlyReport {
    ReportService::default().build_report(records, 2025).report
}

/// Strategy for a perturbation at least as large as the default tolerance.
fn delta_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![(1i64..1_000_000i64), (-1_000_000i64..=-1i64)]
        .prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 7: Perturbed general totals are detected.
    ///
    /// *For any* computed report, changing one general method field by at
    /// least the tolerance fails the method partition check for that method.
    #[test]
    fn prop_perturbed_general_fails(
        records in prop::collection::vec(record_strategy(), 1..40),
        delta in delta_strategy(),
        field in 0usize..3,
    ) {
        let mut report = computed_report(&records);
        let cash = MethodName::from_static(MethodName::CASH);
        let summary = report.payment_methods.entry(cash).or_default();
        let name = match field {
            0 => { summary.tl += delta; "tl" }
            1 => { summary.usd += delta; "usd" }
            _ => { summary.total_usd += delta; "total_usd" }
        };

        let result = Reconciler::new(Decimal::new(1, 2)).reconcile(&report);
        prop_assert!(!result.passed);
        let check_name = format!("method_partition[Nakit].{name}");
        let check = result.check(&check_name);
        prop_assert!(check.is_some_and(|c| !c.passed));
    }

    /// Property 8: Perturbed project totals are detected.
    ///
    /// *For any* computed report, changing one project total fails both the
    /// project and the location checks for that project.
    #[test]
    fn prop_perturbed_project_fails(
        records in prop::collection::vec(record_strategy(), 1..40),
        delta in delta_strategy(),
    ) {
        let mut report = computed_report(&records);
        let mkm = ProjectKey::new("MKM").unwrap();
        *report.project_summary.0.entry(mkm).or_default() += delta;

        let result = Reconciler::new(Decimal::new(1, 2)).reconcile(&report);
        prop_assert!(result.check("project_total[MKM]").is_some_and(|c| !c.passed));
        prop_assert!(result.check("location_vs_project[MKM]").is_some_and(|c| !c.passed));
        prop_assert!(result.check("grand_total").is_some_and(|c| !c.passed));
    }

    /// Property 9: Reordering months does not matter.
    ///
    /// *For any* computed report, the monthly checks pass regardless of the
    /// order monthly reports are listed in.
    #[test]
    fn prop_month_order_irrelevant(records in prop::collection::vec(record_strategy(), 0..40)) {
        let mut report = computed_report(&records);
        report.monthly_reports.reverse();
        let result = Reconciler::new(Decimal::new(1, 2)).reconcile(&report);
        prop_assert!(result.passed);
    }
}
