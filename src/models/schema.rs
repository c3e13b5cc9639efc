//! The fixed category schema shared by data entry and visualization.
//!
//! Records carry plain name/amount pairs; which names exist, and in what
//! order they are shown, is decided here and nowhere else.

pub(crate) const INCOME_CATEGORIES: &[&str] = &["Salary", "Blog", "Other Income"];

pub(crate) const EXPENSE_CATEGORIES: &[&str] = &[
    "Rent",
    "Utilities",
    "Groceries",
    "Transportation",
    "Other Expenses",
    "Savings",
];

/// Label of the aggregate node every flow passes through.
pub(crate) const TOTAL_INCOME_NODE: &str = "Total Income";

/// `+`/`-` increment in the entry form.
pub(crate) const AMOUNT_STEP: u64 = 10;

/// Upper bound for a single line item, keeps every total inside `i64`.
pub(crate) const MAX_AMOUNT: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Find which side of the schema a category belongs to (case-insensitive).
    /// Returns the canonical spelling alongside the kind.
    pub fn classify(name: &str) -> Option<(Self, &'static str)> {
        let lower = name.trim().to_lowercase();
        [Self::Income, Self::Expense].into_iter().find_map(|kind| {
            kind.categories()
                .iter()
                .find(|c| c.to_lowercase() == lower)
                .map(|c| (kind, *c))
        })
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a user-typed amount: plain decimal digits, at most [`MAX_AMOUNT`].
pub(crate) fn parse_amount(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u64>().ok().filter(|v| *v <= MAX_AMOUNT)
}
