#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{LineItems, PeriodRecord};

fn march_record() -> PeriodRecord {
    PeriodRecord::new(
        "2024_March".into(),
        [("Salary", 1500), ("Blog", 250), ("Other Income", 300)]
            .into_iter()
            .collect(),
        [
            ("Rent", 600),
            ("Utilities", 150),
            ("Groceries", 110),
            ("Transportation", 200),
            ("Other Expenses", 50),
            ("Savings", 100),
        ]
        .into_iter()
        .collect(),
        "Some Comment".into(),
    )
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_march_scenario() {
    let totals = Totals::of(&march_record());
    assert_eq!(totals.income, 2050);
    assert_eq!(totals.expense, 1210);
    assert_eq!(totals.remaining, 840);
}

#[test]
fn test_totals_overspent_is_negative() {
    let record = PeriodRecord::new(
        "2024_April".into(),
        [("Salary", 100)].into_iter().collect(),
        [("Rent", 600), ("Groceries", 50)].into_iter().collect(),
        String::new(),
    );
    let totals = Totals::of(&record);
    assert_eq!(totals.remaining, -550);
    assert_eq!(
        totals.income as i64 - totals.expense as i64,
        totals.remaining
    );
}

#[test]
fn test_totals_empty_record() {
    let totals = Totals::of(&PeriodRecord::empty("2024_May".into()));
    assert_eq!(totals, Totals { income: 0, expense: 0, remaining: 0 });
}

// ── FlowDiagram ───────────────────────────────────────────────

#[test]
fn test_nodes_are_incomes_hub_expenses() {
    let diagram = FlowDiagram::from_record(&march_record(), ZeroAmounts::Keep);
    assert_eq!(
        diagram.nodes,
        vec![
            "Salary",
            "Blog",
            "Other Income",
            "Total Income",
            "Rent",
            "Utilities",
            "Groceries",
            "Transportation",
            "Other Expenses",
            "Savings",
        ]
    );
    assert_eq!(diagram.hub, 3);
}

#[test]
fn test_links_use_index_layout() {
    let diagram = FlowDiagram::from_record(&march_record(), ZeroAmounts::Keep);
    let sources: Vec<usize> = diagram.links.iter().map(|l| l.source).collect();
    let targets: Vec<usize> = diagram.links.iter().map(|l| l.target).collect();
    let values: Vec<u64> = diagram.links.iter().map(|l| l.value).collect();
    assert_eq!(sources, vec![0, 1, 2, 3, 3, 3, 3, 3, 3]);
    assert_eq!(targets, vec![3, 3, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(values, vec![1500, 250, 300, 600, 150, 110, 200, 50, 100]);
}

#[test]
fn test_edge_count_and_hub_invariants() {
    let record = march_record();
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::Keep);
    assert_eq!(
        diagram.links.len(),
        record.incomes.len() + record.expenses.len()
    );
    assert_eq!(diagram.inflows().count(), record.incomes.len());
    assert_eq!(diagram.outflows().count(), record.expenses.len());
    assert!(diagram.inflows().all(|l| l.target == diagram.hub));
    assert!(diagram.outflows().all(|l| l.source == diagram.hub));
}

#[test]
fn test_link_values_sum_to_totals() {
    let record = march_record();
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::Keep);
    let totals = Totals::of(&record);
    assert_eq!(diagram.inflows().map(|l| l.value).sum::<u64>(), totals.income);
    assert_eq!(diagram.outflows().map(|l| l.value).sum::<u64>(), totals.expense);
}

#[test]
fn test_zero_amounts_kept_by_default() {
    let record = PeriodRecord::empty("2024_June".into());
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::default());
    assert_eq!(diagram.links.len(), 9);
    assert!(diagram.links.iter().all(|l| l.value == 0));
}

#[test]
fn test_zero_amounts_skipped_keeps_nodes() {
    let mut record = march_record();
    record.incomes.set("Blog", 0);
    record.expenses.set("Savings", 0);
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::Skip);
    assert_eq!(diagram.nodes.len(), 10);
    assert_eq!(diagram.links.len(), 7);
    assert!(diagram.links.iter().all(|l| l.value > 0));
    // Indices still refer to the full node list
    assert!(diagram.links.iter().any(|l| l.source == 2 && l.target == 3));
}

#[test]
fn test_expense_sharing_income_name_gets_own_node() {
    let record = PeriodRecord::new(
        "2024_July".into(),
        [("Other", 10)].into_iter().collect(),
        [("Other", 4)].into_iter().collect(),
        String::new(),
    );
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::Keep);
    assert_eq!(diagram.links[1].source, 1);
    assert_eq!(diagram.links[1].target, 2);
}

#[test]
fn test_labeled_links() {
    let diagram = FlowDiagram::from_record(&march_record(), ZeroAmounts::Keep);
    let labeled = diagram.labeled_links();
    assert_eq!(labeled[0], ("Salary", "Total Income", 1500));
    assert_eq!(labeled[3], ("Total Income", "Rent", 600));
}

#[test]
fn test_record_without_categories() {
    let record = PeriodRecord::new(
        "2024_August".into(),
        LineItems::new(),
        LineItems::new(),
        String::new(),
    );
    let diagram = FlowDiagram::from_record(&record, ZeroAmounts::Keep);
    assert_eq!(diagram.nodes, vec!["Total Income"]);
    assert!(diagram.links.is_empty());
}

#[test]
fn test_period_view_toggle_recomputes() {
    let view = PeriodView::new(march_record(), ZeroAmounts::Keep);
    assert_eq!(view.totals.remaining, 840);
    let mut record = march_record();
    record.expenses.set("Rent", 0);
    let view = PeriodView::new(record, ZeroAmounts::Keep).with_zeros(ZeroAmounts::Skip);
    assert_eq!(view.diagram.links.len(), 8);
    assert_eq!(ZeroAmounts::Keep.toggled(), ZeroAmounts::Skip);
}
