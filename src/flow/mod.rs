//! Turns a period record into the numbers and the node/link description the
//! visualization draws. Nothing here knows about terminals.

use crate::models::schema::TOTAL_INCOME_NODE;
use crate::models::PeriodRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: u64,
    pub(crate) expense: u64,
    /// Income minus expense. Negative when overspent.
    pub(crate) remaining: i64,
}

impl Totals {
    pub(crate) fn of(record: &PeriodRecord) -> Self {
        let income = record.incomes.total();
        let expense = record.expenses.total();
        Self {
            income,
            expense,
            remaining: to_signed(income).saturating_sub(to_signed(expense)),
        }
    }
}

fn to_signed(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Whether zero-amount categories produce zero-value links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ZeroAmounts {
    #[default]
    Keep,
    Skip,
}

impl ZeroAmounts {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Keep => Self::Skip,
            Self::Skip => Self::Keep,
        }
    }
}

impl std::fmt::Display for ZeroAmounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "showing zero flows"),
            Self::Skip => write!(f, "hiding zero flows"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlowLink {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) value: u64,
}

/// Sankey-style description: node labels plus index-based links.
///
/// Node order is every income category, then the total node, then every
/// expense category. Income links all target the total node; expense links
/// all originate from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlowDiagram {
    pub(crate) nodes: Vec<String>,
    pub(crate) links: Vec<FlowLink>,
    pub(crate) hub: usize,
}

impl FlowDiagram {
    pub(crate) fn from_record(record: &PeriodRecord, zeros: ZeroAmounts) -> Self {
        let hub = record.incomes.len();

        let nodes: Vec<String> = record
            .incomes
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(std::iter::once(TOTAL_INCOME_NODE.to_string()))
            .chain(record.expenses.iter().map(|(name, _)| name.to_string()))
            .collect();

        // Expense nodes are addressed by position so a name shared with an
        // income category still gets its own node.
        let inflows = record
            .incomes
            .iter()
            .enumerate()
            .map(|(i, (_, value))| FlowLink {
                source: i,
                target: hub,
                value,
            });
        let outflows = record
            .expenses
            .iter()
            .enumerate()
            .map(|(i, (_, value))| FlowLink {
                source: hub,
                target: hub + 1 + i,
                value,
            });

        let links = inflows
            .chain(outflows)
            .filter(|l| zeros == ZeroAmounts::Keep || l.value > 0)
            .collect();

        Self { nodes, links, hub }
    }

    pub(crate) fn label(&self, index: usize) -> &str {
        self.nodes.get(index).map(String::as_str).unwrap_or("?")
    }

    pub(crate) fn inflows(&self) -> impl Iterator<Item = &FlowLink> + '_ {
        self.links.iter().filter(|l| l.target == self.hub)
    }

    pub(crate) fn outflows(&self) -> impl Iterator<Item = &FlowLink> + '_ {
        self.links.iter().filter(|l| l.source == self.hub)
    }

    /// `(source label, target label, value)` per link, in link order.
    pub(crate) fn labeled_links(&self) -> Vec<(&str, &str, u64)> {
        self.links
            .iter()
            .map(|l| (self.label(l.source), self.label(l.target), l.value))
            .collect()
    }
}

/// A fetched period ready for display.
#[derive(Debug, Clone)]
pub(crate) struct PeriodView {
    pub(crate) record: PeriodRecord,
    pub(crate) totals: Totals,
    pub(crate) diagram: FlowDiagram,
}

impl PeriodView {
    pub(crate) fn new(record: PeriodRecord, zeros: ZeroAmounts) -> Self {
        let totals = Totals::of(&record);
        let diagram = FlowDiagram::from_record(&record, zeros);
        Self {
            record,
            totals,
            diagram,
        }
    }

    pub(crate) fn with_zeros(&self, zeros: ZeroAmounts) -> Self {
        Self::new(self.record.clone(), zeros)
    }
}

#[cfg(test)]
mod tests;
