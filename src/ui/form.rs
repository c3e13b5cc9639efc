use chrono::NaiveDate;

use crate::models::schema::{parse_amount, AMOUNT_STEP, MAX_AMOUNT};
use crate::models::{selectable_years, EntryKind, LineItems, Month, PeriodKey, PeriodRecord};

/// One row of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Month,
    Year,
    Amount(EntryKind, usize),
    Comment,
}

impl Field {
    pub(crate) fn is_amount(&self) -> bool {
        matches!(self, Self::Amount(..))
    }

    /// Fields whose value is typed rather than picked from a list.
    pub(crate) fn is_typed(&self) -> bool {
        matches!(self, Self::Amount(..) | Self::Comment)
    }
}

/// The data entry form. Amounts and comment start empty; the period
/// starts at the current month.
#[derive(Debug, Clone)]
pub(crate) struct EntryForm {
    years: [i32; 3],
    default_period: PeriodKey,
    pub(crate) year: i32,
    pub(crate) month: Month,
    pub(crate) incomes: LineItems,
    pub(crate) expenses: LineItems,
    pub(crate) comment: String,
}

impl EntryForm {
    pub(crate) fn new(today: NaiveDate) -> Self {
        let default_period = PeriodKey::from_date(today);
        Self {
            years: selectable_years(today),
            default_period,
            year: default_period.year,
            month: default_period.month,
            incomes: LineItems::zeroed(EntryKind::Income.categories()),
            expenses: LineItems::zeroed(EntryKind::Expense.categories()),
            comment: String::new(),
        }
    }

    pub(crate) fn fields() -> Vec<Field> {
        let mut fields = vec![Field::Month, Field::Year];
        for kind in [EntryKind::Income, EntryKind::Expense] {
            fields.extend((0..kind.categories().len()).map(|i| Field::Amount(kind, i)));
        }
        fields.push(Field::Comment);
        fields
    }

    pub(crate) fn years(&self) -> &[i32; 3] {
        &self.years
    }

    pub(crate) fn period(&self) -> PeriodKey {
        PeriodKey::new(self.year, self.month)
    }

    pub(crate) fn set_period(&mut self, period: PeriodKey) -> Result<(), String> {
        if !self.years.contains(&period.year) {
            return Err(format!(
                "Year must be one of {}, {}, {}",
                self.years[0], self.years[1], self.years[2]
            ));
        }
        self.year = period.year;
        self.month = period.month;
        Ok(())
    }

    pub(crate) fn label(&self, field: Field) -> String {
        match field {
            Field::Month => "Month".into(),
            Field::Year => "Year".into(),
            Field::Amount(kind, i) => kind.categories().get(i).copied().unwrap_or("?").into(),
            Field::Comment => "Comment".into(),
        }
    }

    pub(crate) fn value_text(&self, field: Field) -> String {
        match field {
            Field::Month => self.month.to_string(),
            Field::Year => self.year.to_string(),
            Field::Amount(..) => self.amount(field).unwrap_or(0).to_string(),
            Field::Comment => self.comment.clone(),
        }
    }

    pub(crate) fn amount(&self, field: Field) -> Option<u64> {
        let Field::Amount(kind, i) = field else {
            return None;
        };
        let name = kind.categories().get(i)?;
        self.items(kind).get(name)
    }

    fn items(&self, kind: EntryKind) -> &LineItems {
        match kind {
            EntryKind::Income => &self.incomes,
            EntryKind::Expense => &self.expenses,
        }
    }

    fn items_mut(&mut self, kind: EntryKind) -> &mut LineItems {
        match kind {
            EntryKind::Income => &mut self.incomes,
            EntryKind::Expense => &mut self.expenses,
        }
    }

    /// Set a category by name (case-insensitive). Returns the canonical name.
    pub(crate) fn set_category(&mut self, name: &str, amount: u64) -> Result<&'static str, String> {
        let (kind, canonical) =
            EntryKind::classify(name).ok_or_else(|| format!("Unknown category: {name}"))?;
        if amount > MAX_AMOUNT {
            return Err(format!("Amount too large (max {MAX_AMOUNT})"));
        }
        self.items_mut(kind).set(canonical, amount);
        Ok(canonical)
    }

    /// Step a field by `delta` notches: months and years cycle, amounts move
    /// by the step size and stop at zero.
    pub(crate) fn adjust(&mut self, field: Field, delta: i32) {
        match field {
            Field::Month => {
                self.month = if delta >= 0 {
                    self.month.succ()
                } else {
                    self.month.pred()
                };
            }
            Field::Year => {
                let idx = self.years.iter().position(|y| *y == self.year).unwrap_or(1);
                let len = self.years.len() as i32;
                let next = (idx as i32 + delta.signum()).rem_euclid(len) as usize;
                self.year = self.years[next];
            }
            Field::Amount(kind, i) => {
                let Some(name) = kind.categories().get(i) else {
                    return;
                };
                let current = self.items(kind).get(name).unwrap_or(0);
                let step = AMOUNT_STEP.saturating_mul(u64::from(delta.unsigned_abs()));
                let next = if delta >= 0 {
                    current.saturating_add(step).min(MAX_AMOUNT)
                } else {
                    current.saturating_sub(step)
                };
                self.items_mut(kind).set(name, next);
            }
            Field::Comment => {}
        }
    }

    /// Apply typed input to an amount or the comment.
    pub(crate) fn commit_input(&mut self, field: Field, input: &str) -> Result<(), String> {
        match field {
            Field::Amount(kind, i) => {
                let name = kind.categories().get(i).ok_or("No such field")?;
                let amount = parse_amount(input)
                    .ok_or_else(|| format!("'{input}' is not a whole number up to {MAX_AMOUNT}"))?;
                self.items_mut(kind).set(name, amount);
                Ok(())
            }
            Field::Comment => {
                self.comment = input.to_string();
                Ok(())
            }
            Field::Month | Field::Year => Err("Use +/- to choose a value".into()),
        }
    }

    /// The record the form currently describes.
    pub(crate) fn to_record(&self) -> PeriodRecord {
        PeriodRecord::new(
            self.period().to_string(),
            self.incomes.clone(),
            self.expenses.clone(),
            self.comment.clone(),
        )
    }

    pub(crate) fn reset(&mut self) {
        self.year = self.default_period.year;
        self.month = self.default_period.month;
        self.incomes = LineItems::zeroed(EntryKind::Income.categories());
        self.expenses = LineItems::zeroed(EntryKind::Expense.categories());
        self.comment.clear();
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
