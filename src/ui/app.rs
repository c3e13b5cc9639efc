use chrono::{Local, NaiveDate};
use std::path::Path;

use super::form::{EntryForm, Field};
use crate::db::Database;
use crate::flow::{PeriodView, ZeroAmounts};
use crate::models::{PeriodKey, PeriodRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Entry,
    Visualization,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Entry, Self::Visualization]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "Data Entry"),
            Self::Visualization => write!(f, "Data Visualization"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    OverwritePeriod { key: String },
}

/// What the visualization pane currently shows.
#[derive(Debug, Clone)]
pub(crate) enum Plot {
    Nothing,
    Missing(String),
    Shown(Box<PeriodView>),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,

    // Entry
    pub(crate) form: EntryForm,
    pub(crate) field_index: usize,
    pub(crate) last_saved: Option<PeriodRecord>,

    // Visualization
    pub(crate) periods: Vec<String>,
    pub(crate) period_index: usize,
    pub(crate) period_scroll: usize,
    pub(crate) plot: Plot,
    pub(crate) zero_amounts: ZeroAmounts,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency: String) -> Self {
        Self::with_today(currency, Local::now().date_naive())
    }

    pub(crate) fn with_today(currency: String, today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Entry,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency,

            form: EntryForm::new(today),
            field_index: 0,
            last_saved: None,

            periods: Vec::new(),
            period_index: 0,
            period_scroll: 0,
            plot: Plot::Nothing,
            zero_amounts: ZeroAmounts::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Entry ─────────────────────────────────────────────────

    pub(crate) fn current_field(&self) -> Field {
        let fields = EntryForm::fields();
        fields
            .get(self.field_index)
            .copied()
            .unwrap_or(Field::Month)
    }

    /// Submit the form. Asks first when the period already has a record.
    pub(crate) fn request_save(&mut self, db: &mut Database) {
        let key = self.form.period().to_string();
        match db.period_exists(&key) {
            Ok(true) => {
                self.confirm_message = format!("Overwrite saved data for {key}?");
                self.pending_action = Some(PendingAction::OverwritePeriod { key });
                self.input_mode = InputMode::Confirm;
            }
            Ok(false) => self.save_entry(db),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "existence check failed");
                self.set_status(format!("Error: {e}"));
            }
        }
    }

    /// Write the form to the store. On success the form resets; on failure
    /// the entered values stay so the save can be retried.
    pub(crate) fn save_entry(&mut self, db: &mut Database) {
        let record = self.form.to_record();
        match db.insert_record(&record) {
            Ok(()) => {
                self.set_status(format!(
                    "Data saved for {}: incomes: {} expenses: {}",
                    record.key, record.incomes, record.expenses
                ));
                self.form.reset();
                self.field_index = 0;
                if !self.periods.contains(&record.key) {
                    self.periods.push(record.key.clone());
                    sort_periods(&mut self.periods);
                }
                self.last_saved = Some(record);
            }
            Err(e) => {
                tracing::error!(key = %record.key, error = %e, "save failed");
                self.set_status(format!("Failed to save {}: {e}", record.key));
            }
        }
    }

    // ── Visualization ─────────────────────────────────────────

    pub(crate) fn refresh_periods(&mut self, db: &Database) {
        match db.fetch_all_period_keys() {
            Ok(mut keys) => {
                sort_periods(&mut keys);
                self.periods = keys;
                if self.period_index >= self.periods.len() {
                    self.period_index = self.periods.len().saturating_sub(1);
                }
                if self.period_scroll > self.period_index {
                    self.period_scroll = self.period_index;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing periods failed");
                self.set_status(format!("Could not load periods: {e}"));
            }
        }
    }

    pub(crate) fn selected_period(&self) -> Option<&str> {
        self.periods.get(self.period_index).map(String::as_str)
    }

    pub(crate) fn plot_period(&mut self, db: &Database, key: &str) {
        match db.fetch_period(key) {
            Ok(Some(record)) => {
                self.plot = Plot::Shown(Box::new(PeriodView::new(record, self.zero_amounts)));
                if let Some(idx) = self.periods.iter().position(|k| k == key) {
                    self.period_index = idx;
                }
                self.set_status(format!("Plotted {key}"));
            }
            Ok(None) => {
                self.plot = Plot::Missing(key.to_string());
                self.set_status(format!("No data for {key}"));
            }
            Err(e) => {
                tracing::error!(key, error = %e, "fetch failed");
                self.set_status(format!("Failed to load {key}: {e}"));
            }
        }
    }

    pub(crate) fn plot_selected(&mut self, db: &Database) {
        match self.selected_period().map(str::to_string) {
            Some(key) => self.plot_period(db, &key),
            None => self.set_status("No saved periods yet. Enter data first"),
        }
    }

    pub(crate) fn toggle_zero_amounts(&mut self) {
        self.zero_amounts = self.zero_amounts.toggled();
        if let Some(view) = self.shown_view().map(|v| v.with_zeros(self.zero_amounts)) {
            self.plot = Plot::Shown(Box::new(view));
        }
        let msg = self.zero_amounts.to_string();
        self.set_status(msg);
    }

    pub(crate) fn shown_view(&self) -> Option<&PeriodView> {
        match &self.plot {
            Plot::Shown(view) => Some(&**view),
            _ => None,
        }
    }

    pub(crate) fn export_plot(&mut self, path: &Path) -> anyhow::Result<()> {
        let Some((key, diagram)) = self
            .shown_view()
            .map(|v| (v.record.key.clone(), v.diagram.clone()))
        else {
            self.set_status("Nothing plotted to export");
            return Ok(());
        };
        let count = crate::export::write_flow_csv(path, &diagram)?;
        self.set_status(format!(
            "Exported {count} flows for {key} to {}",
            path.display()
        ));
        Ok(())
    }
}

/// Chronological order; keys that are not `YYYY_Month` go last, by text.
pub(crate) fn sort_periods(keys: &mut [String]) {
    keys.sort_by(|a, b| {
        let (pa, pb) = (PeriodKey::parse(a), PeriodKey::parse(b));
        match (pa, pb) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
