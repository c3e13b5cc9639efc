use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::shellexpand;
use crate::db::Database;
use crate::flow::{PeriodView, ZeroAmounts};
use crate::models::schema::parse_amount;
use crate::models::{PeriodKey, PeriodRecord};
use crate::ui::app::sort_periods;
use crate::ui::util::{format_amount, format_total};

pub(crate) fn as_cli(args: &[String], db: &mut Database, currency: &str) -> Result<()> {
    match args[1].as_str() {
        "periods" | "ls" => cli_periods(db),
        "show" => cli_show(&args[2..], db, currency),
        "add" => cli_add(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("monthflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("monthflow - monthly income and expense tracker");
    println!();
    println!("Usage: monthflow [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  periods                       List saved periods");
    println!("  show <YYYY_Month>             Print totals and flows for a period");
    println!("    --skip-zero                 Leave out zero-value flows");
    println!("  add <YYYY_Month>              Save a period (replaces any existing one)");
    println!("    --income \"<name>=<amount>\"  Income amount, repeatable");
    println!("    --expense \"<name>=<amount>\" Expense amount, repeatable");
    println!("    --comment <text>            Free-text comment");
    println!("  export <YYYY_Month> [path]    Write flows as CSV (source,target,value)");
    println!("    --skip-zero                 Leave out zero-value flows");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn zero_policy(args: &[String]) -> ZeroAmounts {
    if args.iter().any(|a| a == "--skip-zero") {
        ZeroAmounts::Skip
    } else {
        ZeroAmounts::Keep
    }
}

fn cli_periods(db: &Database) -> Result<()> {
    let mut keys = db.fetch_all_period_keys()?;
    if keys.is_empty() {
        println!("No saved periods");
        return Ok(());
    }
    sort_periods(&mut keys);
    for key in &keys {
        println!("{key}");
    }
    Ok(())
}

fn cli_show(args: &[String], db: &Database, currency: &str) -> Result<()> {
    let key = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: monthflow show <YYYY_Month> [--skip-zero]"))?;

    match db.fetch_period(key)? {
        Some(record) => {
            let view = PeriodView::new(record, zero_policy(args));
            for line in summary_lines(&view, currency) {
                println!("{line}");
            }
        }
        None => println!("No data for {key}"),
    }
    Ok(())
}

fn summary_lines(view: &PeriodView, currency: &str) -> Vec<String> {
    let totals = view.totals;
    let mut lines = vec![
        format!("monthflow - {}", view.record.key),
        "─".repeat(40),
        format!("  Total Income:     {}", format_total(totals.income, currency)),
        format!("  Total Expense:    {}", format_total(totals.expense, currency)),
        format!("  Remaining Budget: {}", format_amount(totals.remaining, currency)),
        format!("  Comment: {}", view.record.comment),
    ];

    if view.record.incomes.is_empty() && view.record.expenses.is_empty() {
        lines.push("  No categories recorded".into());
    } else if !view.diagram.links.is_empty() {
        lines.push(String::new());
        lines.push("Flows:".into());
        for (source, target, value) in view.diagram.labeled_links() {
            lines.push(format!(
                "  {source:<16} -> {target:<16} {}",
                format_total(value, currency)
            ));
        }
    }
    lines
}

/// Build a record from `add` arguments over the fixed category schema.
/// Categories not mentioned stay at zero.
fn parse_add_args(args: &[String]) -> Result<PeriodRecord> {
    let key = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: monthflow add <YYYY_Month> [--income Name=amount]... [--expense Name=amount]... [--comment text]"))?;
    let period = PeriodKey::parse_input(key)
        .ok_or_else(|| anyhow::anyhow!("Invalid period '{key}'. Expected e.g. 2024_March"))?;

    let mut record = PeriodRecord::empty(period.to_string());
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing value after {flag}"))?;
        match flag.as_str() {
            "--income" | "--expense" => {
                let (name, amount) = value
                    .rsplit_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Expected <name>=<amount>, got '{value}'"))?;
                let amount = parse_amount(amount)
                    .ok_or_else(|| anyhow::anyhow!("Invalid amount for {name}: '{amount}'"))?;
                let items = if flag == "--income" {
                    &mut record.incomes
                } else {
                    &mut record.expenses
                };
                let canonical = items
                    .iter()
                    .map(|(n, _)| n.to_string())
                    .find(|n| n.eq_ignore_ascii_case(name.trim()))
                    .ok_or_else(|| anyhow::anyhow!("Unknown {} category: {name}", &flag[2..]))?;
                items.set(&canonical, amount);
            }
            "--comment" => record.comment = value.clone(),
            other => anyhow::bail!("Unknown option: {other}"),
        }
    }
    Ok(record)
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let record = parse_add_args(args)?;
    db.insert_record(&record)
        .with_context(|| format!("Failed to save {}", record.key))?;
    println!("incomes: {}", record.incomes);
    println!("expenses: {}", record.expenses);
    println!("Data saved for {}", record.key);
    Ok(())
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    let key = positional
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: monthflow export <YYYY_Month> [path] [--skip-zero]"))?;
    let path = positional
        .get(1)
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| PathBuf::from(format!("monthflow-{key}.csv")));

    let Some(record) = db.fetch_period(key)? else {
        anyhow::bail!("No data for {key}");
    };
    let view = PeriodView::new(record, zero_policy(args));
    let count = crate::export::write_flow_csv(&path, &view.diagram)?;
    println!("Exported {count} flows to {}", path.display());
    Ok(())
}
