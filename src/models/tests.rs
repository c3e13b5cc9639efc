#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::schema::{parse_amount, MAX_AMOUNT};
use super::*;

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_numbers() {
    assert_eq!(Month::from_number(1), Some(Month::January));
    assert_eq!(Month::from_number(12), Some(Month::December));
    assert_eq!(Month::from_number(3), Some(Month::March));
    assert_eq!(Month::from_number(0), None);
    assert_eq!(Month::from_number(13), None);
}

#[test]
fn test_month_parse() {
    assert_eq!(Month::parse("March"), Some(Month::March));
    assert_eq!(Month::parse("march"), Some(Month::March));
    assert_eq!(Month::parse("MAR"), Some(Month::March));
    assert_eq!(Month::parse("3"), Some(Month::March));
    assert_eq!(Month::parse(" september "), Some(Month::September));
    assert_eq!(Month::parse("Marc"), None);
    assert_eq!(Month::parse(""), None);
}

#[test]
fn test_month_roundtrip() {
    for (i, m) in Month::all().iter().enumerate() {
        assert_eq!(Month::parse(m.as_str()), Some(*m), "Roundtrip failed for {m}");
        assert_eq!(Month::from_number(i as u32 + 1), Some(*m));
    }
}

#[test]
fn test_month_succ_pred_wrap() {
    assert_eq!(Month::December.succ(), Month::January);
    assert_eq!(Month::January.pred(), Month::December);
    assert_eq!(Month::June.succ().pred(), Month::June);
}

// ── PeriodKey ─────────────────────────────────────────────────

#[test]
fn test_period_key_format() {
    assert_eq!(PeriodKey::new(2024, Month::March).to_string(), "2024_March");
}

#[test]
fn test_period_key_roundtrip_all_months() {
    for year in [1999, 2023, 2024, 2025] {
        for m in Month::all() {
            let key = PeriodKey::new(year, *m);
            let text = key.to_string();
            let (y, name) = text.rsplit_once('_').unwrap();
            assert_eq!(y, year.to_string());
            assert_eq!(name, m.as_str());
            assert_eq!(PeriodKey::parse(&text), Some(key));
        }
    }
}

#[test]
fn test_period_key_parse_rejects_noncanonical() {
    assert_eq!(PeriodKey::parse("2024_march"), None);
    assert_eq!(PeriodKey::parse("2024-March"), None);
    assert_eq!(PeriodKey::parse("24_March"), None);
    assert_eq!(PeriodKey::parse("2024_Smarch"), None);
    assert_eq!(PeriodKey::parse("2024_March_x"), None);
    assert_eq!(PeriodKey::parse(""), None);
}

#[test]
fn test_period_key_parse_input_canonicalizes() {
    let march = Some(PeriodKey::new(2024, Month::March));
    assert_eq!(PeriodKey::parse_input("2024_March"), march);
    assert_eq!(PeriodKey::parse_input("2024_march"), march);
    assert_eq!(PeriodKey::parse_input(" 2024_MAR "), march);
    assert_eq!(PeriodKey::parse_input("2024_3"), march);
    assert_eq!(
        PeriodKey::parse_input("2024_march").map(|k| k.to_string()),
        Some("2024_March".to_string())
    );
    assert_eq!(PeriodKey::parse_input("2024_13"), None);
    assert_eq!(PeriodKey::parse_input("24_March"), None);
    assert_eq!(PeriodKey::parse_input("March"), None);
    assert_eq!(PeriodKey::parse_input("2024_Smarch"), None);
}

#[test]
fn test_period_key_ordering_is_chronological() {
    let mut keys = vec![
        PeriodKey::new(2024, Month::March),
        PeriodKey::new(2023, Month::December),
        PeriodKey::new(2024, Month::January),
    ];
    keys.sort();
    let texts: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    assert_eq!(texts, vec!["2023_December", "2024_January", "2024_March"]);
}

#[test]
fn test_period_key_from_date() {
    let d = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
    assert_eq!(PeriodKey::from_date(d), PeriodKey::new(2024, Month::July));
}

#[test]
fn test_selectable_years() {
    let d = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    assert_eq!(selectable_years(d), [2025, 2026, 2027]);
}

// ── LineItems ─────────────────────────────────────────────────

#[test]
fn test_line_items_keep_insertion_order() {
    let items: LineItems = [("Rent", 600), ("Utilities", 150), ("Groceries", 110)]
        .into_iter()
        .collect();
    let names: Vec<&str> = items.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Rent", "Utilities", "Groceries"]);
}

#[test]
fn test_line_items_set_replaces_in_place() {
    let mut items = LineItems::zeroed(&["Salary", "Blog"]);
    items.set("Salary", 1500);
    items.set("Blog", 250);
    items.set("Salary", 1600);
    assert_eq!(items.len(), 2);
    assert_eq!(items.get("Salary"), Some(1600));
    assert_eq!(items.iter().next(), Some(("Salary", 1600)));
    assert_eq!(items.get("Rent"), None);
}

#[test]
fn test_line_items_total() {
    let items: LineItems = [("Salary", 1500), ("Blog", 250), ("Other Income", 300)]
        .into_iter()
        .collect();
    assert_eq!(items.total(), 2050);
    assert_eq!(LineItems::new().total(), 0);
}

#[test]
fn test_line_items_display() {
    let items: LineItems = [("Salary", 1500), ("Blog", 0)].into_iter().collect();
    assert_eq!(items.to_string(), "{Salary: 1500, Blog: 0}");
    assert_eq!(LineItems::new().to_string(), "{}");
}

#[test]
fn test_empty_record_covers_schema() {
    let record = PeriodRecord::empty("2024_March".into());
    assert_eq!(record.incomes.len(), EntryKind::Income.categories().len());
    assert_eq!(record.expenses.len(), EntryKind::Expense.categories().len());
    assert_eq!(record.incomes.total(), 0);
    assert!(record.comment.is_empty());
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_classify_category() {
    assert_eq!(
        EntryKind::classify("salary"),
        Some((EntryKind::Income, "Salary"))
    );
    assert_eq!(
        EntryKind::classify("Other Expenses"),
        Some((EntryKind::Expense, "Other Expenses"))
    );
    assert_eq!(EntryKind::classify("Lottery"), None);
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("0"), Some(0));
    assert_eq!(parse_amount(" 1500 "), Some(1500));
    assert_eq!(parse_amount(&MAX_AMOUNT.to_string()), Some(MAX_AMOUNT));
    assert_eq!(parse_amount(&(MAX_AMOUNT + 1).to_string()), None);
    assert_eq!(parse_amount("-5"), None);
    assert_eq!(parse_amount("+5"), None);
    assert_eq!(parse_amount("12.5"), None);
    assert_eq!(parse_amount(""), None);
}
