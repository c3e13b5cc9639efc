use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::config::shellexpand;
use crate::db::Database;
use crate::models::schema::parse_amount;
use crate::models::PeriodKey;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("e", "Go to Data Entry", cmd_entry, r);
    register_command!("entry", "Go to Data Entry", cmd_entry, r);
    register_command!("v", "Go to Data Visualization", cmd_visualize, r);
    register_command!("visualize", "Go to Data Visualization", cmd_visualize, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("w", "Save the entry form", cmd_save, r);
    register_command!("save", "Save the entry form", cmd_save, r);
    register_command!(
        "set",
        "Set a category amount (e.g. :set Rent 600)",
        cmd_set,
        r
    );
    register_command!(
        "period",
        "Choose the form period (e.g. :period 2024_March)",
        cmd_period,
        r
    );
    register_command!(
        "comment",
        "Set the form comment (e.g. :comment Bonus month)",
        cmd_comment,
        r
    );
    register_command!("clear", "Reset the entry form", cmd_clear, r);
    register_command!("p", "Plot a period (e.g. :plot 2024_March)", cmd_plot, r);
    register_command!(
        "plot",
        "Plot a period (e.g. :plot 2024_March)",
        cmd_plot,
        r
    );
    register_command!("periods", "Reload saved periods", cmd_periods, r);
    register_command!("zeros", "Show/hide zero-value flows", cmd_zeros, r);
    register_command!(
        "export",
        "Export plotted flows to CSV (e.g. :export ~/march.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// One help row per command: aliases joined as `:plot, :p`, sorted by the
/// long name.
pub(crate) fn help_entries() -> Vec<(String, &'static str)> {
    let mut names: Vec<&str> = COMMANDS.keys().copied().collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let mut groups: Vec<(Vec<&str>, &'static str)> = Vec::new();
    for name in names {
        let Some(cmd) = COMMANDS.get(name) else {
            continue;
        };
        match groups.iter_mut().find(|(_, desc)| *desc == cmd.description) {
            Some((aliases, _)) => aliases.push(name),
            None => groups.push((vec![name], cmd.description)),
        }
    }
    groups.sort_by(|a, b| a.0[0].cmp(b.0[0]));

    groups
        .into_iter()
        .map(|(aliases, desc)| {
            let joined: Vec<String> = aliases.iter().map(|a| format!(":{a}")).collect();
            (joined.join(", "), desc)
        })
        .collect()
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_entry(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Entry;
    Ok(())
}

fn cmd_visualize(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Visualization;
    app.refresh_periods(db);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Entry;
    app.request_save(db);
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    // Category names contain spaces, so the amount is the last word
    let Some((name, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :set <category> <amount>");
        return Ok(());
    };
    let Some(amount) = parse_amount(amount) else {
        app.set_status(format!("Invalid amount: {amount}"));
        return Ok(());
    };
    match app.form.set_category(name, amount) {
        Ok(canonical) => {
            app.screen = Screen::Entry;
            app.set_status(format!("{canonical} = {amount}"));
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_period(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(period) = PeriodKey::parse_input(args) else {
        app.set_status("Usage: :period <YYYY_Month> (e.g. 2024_March)");
        return Ok(());
    };
    match app.form.set_period(period) {
        Ok(()) => {
            app.screen = Screen::Entry;
            app.set_status(format!("Form period: {period}"));
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_comment(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.form.comment = args.to_string();
    app.screen = Screen::Entry;
    app.set_status(if args.is_empty() {
        "Comment cleared"
    } else {
        "Comment set"
    });
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.form.reset();
    app.field_index = 0;
    app.set_status("Form cleared");
    Ok(())
}

fn cmd_plot(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Visualization;
    app.refresh_periods(db);
    if args.is_empty() {
        app.plot_selected(db);
    } else {
        let key = PeriodKey::parse_input(args)
            .map(|k| k.to_string())
            .unwrap_or_else(|| args.to_string());
        app.plot_period(db, &key);
    }
    Ok(())
}

fn cmd_periods(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh_periods(db);
    let n = app.periods.len();
    app.set_status(format!(
        "{n} saved period{}",
        if n == 1 { "" } else { "s" }
    ));
    Ok(())
}

fn cmd_zeros(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.toggle_zero_amounts();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let Some(key) = app.shown_view().map(|v| v.record.key.clone()) else {
            app.set_status("Nothing plotted to export");
            return Ok(());
        };
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(format!("{home}/monthflow-{key}.csv"))
    } else {
        PathBuf::from(shellexpand(args))
    };
    if let Err(e) = app.export_plot(&path) {
        app.set_status(format!("Export failed: {e:#}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::NaiveDate;

    fn setup() -> (App, Database) {
        let app = App::with_today("NGN".into(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        (app, Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("plot", "plot"), 0);
        assert_eq!(levenshtein("plt", "plot"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let (mut app, mut db) = setup();
        handle_command("plto", &mut app, &mut db).unwrap();
        assert_eq!(
            app.status_message,
            "Unknown command: :plto. Did you mean :plot?"
        );
    }

    #[test]
    fn test_set_multiword_category() {
        let (mut app, mut db) = setup();
        handle_command("set Other Expenses 50", &mut app, &mut db).unwrap();
        assert_eq!(app.form.expenses.get("Other Expenses"), Some(50));
        handle_command("set Rent -3", &mut app, &mut db).unwrap();
        assert_eq!(app.status_message, "Invalid amount: -3");
        assert_eq!(app.form.expenses.get("Rent"), Some(0));
    }

    #[test]
    fn test_period_and_save_then_plot() {
        let (mut app, mut db) = setup();
        handle_command("period 2025_January", &mut app, &mut db).unwrap();
        handle_command("set Salary 900", &mut app, &mut db).unwrap();
        handle_command("comment first pay", &mut app, &mut db).unwrap();
        handle_command("save", &mut app, &mut db).unwrap();
        assert_eq!(
            db.fetch_period("2025_January").unwrap().unwrap().comment,
            "first pay"
        );

        handle_command("plot 2025_january", &mut app, &mut db).unwrap();
        assert_eq!(app.screen, Screen::Visualization);
        assert_eq!(app.shown_view().unwrap().totals.remaining, 900);
    }

    #[test]
    fn test_period_accepts_loose_month_names() {
        let (mut app, mut db) = setup();
        handle_command("period 2024_march", &mut app, &mut db).unwrap();
        assert_eq!(app.status_message, "Form period: 2024_March");
        handle_command("period 2023_dec", &mut app, &mut db).unwrap();
        assert_eq!(app.form.period().to_string(), "2023_December");
    }

    #[test]
    fn test_period_rejects_bad_key() {
        let (mut app, mut db) = setup();
        handle_command("period March", &mut app, &mut db).unwrap();
        assert!(app.status_message.starts_with("Usage: :period"));
    }

    #[test]
    fn test_clear_resets_form() {
        let (mut app, mut db) = setup();
        handle_command("set Blog 250", &mut app, &mut db).unwrap();
        handle_command("clear", &mut app, &mut db).unwrap();
        assert_eq!(app.form.incomes.total(), 0);
    }

    #[test]
    fn test_help_entries_group_aliases() {
        let entries = help_entries();
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&":plot, :p"));
        assert!(names.contains(&":quit, :q"));
        assert!(names.contains(&":export"));
        assert_eq!(names.first(), Some(&":clear"));
        assert_eq!(entries.len(), 13);
    }

    #[test]
    fn test_every_command_has_description() {
        for (name, cmd) in COMMANDS.iter() {
            assert!(!cmd.description.is_empty(), "{name} has no description");
        }
    }
}
