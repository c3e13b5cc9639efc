use super::schema::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};

/// Ordered category -> amount mapping. Setting an existing name replaces its
/// amount in place, so order is the order names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItems(Vec<(String, u64)>);

impl LineItems {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Every name in `names` at zero.
    pub fn zeroed(names: &[&str]) -> Self {
        names.iter().map(|n| (*n, 0)).collect()
    }

    pub fn set(&mut self, name: &str, amount: u64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = amount,
            None => self.0.push((name.to_string(), amount)),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, a)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(n, a)| (n.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, (_, a)| acc.saturating_add(*a))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LineItems {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut items = Self::new();
        for (name, amount) in iter {
            items.set(&name.into(), amount);
        }
        items
    }
}

impl std::fmt::Display for LineItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, amount)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {amount}")?;
        }
        write!(f, "}}")
    }
}

/// Everything recorded for one period. Stored and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRecord {
    pub key: String,
    pub incomes: LineItems,
    pub expenses: LineItems,
    pub comment: String,
}

impl PeriodRecord {
    pub fn new(key: String, incomes: LineItems, expenses: LineItems, comment: String) -> Self {
        Self {
            key,
            incomes,
            expenses,
            comment,
        }
    }

    /// A record over the full category schema with every amount at zero.
    pub fn empty(key: String) -> Self {
        Self::new(
            key,
            LineItems::zeroed(INCOME_CATEGORIES),
            LineItems::zeroed(EXPENSE_CATEGORIES),
            String::new(),
        )
    }
}
