#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;
use crate::models::LineItems;

fn app() -> App {
    App::with_today("NGN".into(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

fn fill_march(app: &mut App) {
    for (name, amount) in [
        ("Salary", 1500),
        ("Blog", 250),
        ("Other Income", 300),
        ("Rent", 600),
        ("Utilities", 150),
        ("Groceries", 110),
        ("Transportation", 200),
        ("Other Expenses", 50),
        ("Savings", 100),
    ] {
        app.form.set_category(name, amount).unwrap();
    }
}

// ── Entry ─────────────────────────────────────────────────────

#[test]
fn test_save_new_period_resets_form() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    fill_march(&mut app);
    app.field_index = 4;

    app.request_save(&mut db);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status_message.starts_with("Data saved for 2024_March"));
    assert_eq!(app.form.incomes.total(), 0);
    assert_eq!(app.field_index, 0);
    assert_eq!(app.last_saved.as_ref().unwrap().key, "2024_March");
    assert_eq!(app.periods, vec!["2024_March"]);

    let stored = db.fetch_period("2024_March").unwrap().unwrap();
    assert_eq!(stored.incomes.total(), 2050);
    assert_eq!(stored.expenses.total(), 1210);
}

#[test]
fn test_save_existing_period_asks_first() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_period("2024_March", &LineItems::new(), &LineItems::new(), "old")
        .unwrap();
    let mut app = app();
    fill_march(&mut app);

    app.request_save(&mut db);

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::OverwritePeriod { ref key }) if key == "2024_March"
    ));
    // Nothing written yet
    assert_eq!(
        db.fetch_period("2024_March").unwrap().unwrap().comment,
        "old"
    );

    app.save_entry(&mut db);
    let stored = db.fetch_period("2024_March").unwrap().unwrap();
    assert_eq!(stored.incomes.get("Salary"), Some(1500));
    assert!(stored.comment.is_empty());
}

#[test]
fn test_current_field_follows_index() {
    let mut app = app();
    assert_eq!(app.current_field(), Field::Month);
    app.field_index = EntryForm::fields().len() - 1;
    assert_eq!(app.current_field(), Field::Comment);
}

fn on_disk_store(dir: &tempfile::TempDir, drop_table: &str) -> Database {
    let path = dir.path().join("monthflow.db");
    let db = Database::open(&path).unwrap();
    let other = rusqlite::Connection::open(&path).unwrap();
    other
        .execute_batch(&format!("DROP TABLE {drop_table};"))
        .unwrap();
    db
}

#[test]
fn test_failed_save_keeps_form_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = on_disk_store(&dir, "period_items");
    let mut app = app();
    fill_march(&mut app);

    app.request_save(&mut db);

    assert!(
        app.status_message.starts_with("Failed to save 2024_March"),
        "{}",
        app.status_message
    );
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.form.incomes.total(), 2050);
    assert!(app.last_saved.is_none());
    assert!(db.fetch_all_period_keys().unwrap().is_empty());
}

#[test]
fn test_existence_check_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = on_disk_store(&dir, "periods");
    let mut app = app();
    fill_march(&mut app);

    app.request_save(&mut db);

    assert!(app.status_message.starts_with("Error: "), "{}", app.status_message);
    assert!(app.pending_action.is_none());
    assert_eq!(app.form.incomes.total(), 2050);
}

// ── Visualization ─────────────────────────────────────────────

#[test]
fn test_refresh_sorts_chronologically() {
    let mut db = Database::open_in_memory().unwrap();
    for key in ["2024_March", "legacy", "2023_December", "2024_January"] {
        db.insert_period(key, &LineItems::new(), &LineItems::new(), "")
            .unwrap();
    }
    let mut app = app();
    app.refresh_periods(&db);
    assert_eq!(
        app.periods,
        vec!["2023_December", "2024_January", "2024_March", "legacy"]
    );
}

#[test]
fn test_plot_selected_period() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    fill_march(&mut app);
    app.save_entry(&mut db);

    app.refresh_periods(&db);
    app.plot_selected(&db);

    let view = app.shown_view().unwrap();
    assert_eq!(view.totals.income, 2050);
    assert_eq!(view.totals.expense, 1210);
    assert_eq!(view.totals.remaining, 840);
    assert_eq!(view.diagram.links.len(), 9);
}

#[test]
fn test_plot_missing_period_shows_no_data() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.plot_period(&db, "1999_January");
    assert!(matches!(app.plot, Plot::Missing(ref k) if k == "1999_January"));
    assert_eq!(app.status_message, "No data for 1999_January");
}

#[test]
fn test_plot_with_no_periods() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.refresh_periods(&db);
    app.plot_selected(&db);
    assert!(matches!(app.plot, Plot::Nothing));
}

#[test]
fn test_toggle_zero_amounts_rebuilds_plot() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.form.set_category("Salary", 100).unwrap();
    app.save_entry(&mut db);
    app.plot_period(&db, "2024_March");
    assert_eq!(app.shown_view().unwrap().diagram.links.len(), 9);

    app.toggle_zero_amounts();
    assert_eq!(app.zero_amounts, ZeroAmounts::Skip);
    assert_eq!(app.shown_view().unwrap().diagram.links.len(), 1);

    app.toggle_zero_amounts();
    assert_eq!(app.shown_view().unwrap().diagram.links.len(), 9);
}

#[test]
fn test_export_without_plot() {
    let mut app = app();
    let dir = tempfile::tempdir().unwrap();
    app.export_plot(&dir.path().join("x.csv")).unwrap();
    assert_eq!(app.status_message, "Nothing plotted to export");
    assert!(!dir.path().join("x.csv").exists());
}

#[test]
fn test_export_plotted_period() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    fill_march(&mut app);
    app.save_entry(&mut db);
    app.plot_period(&db, "2024_March");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("march.csv");
    app.export_plot(&path).unwrap();
    assert!(app.status_message.starts_with("Exported 9 flows for 2024_March"));
    assert!(path.exists());
}
