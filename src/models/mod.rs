mod period;
mod record;
pub(crate) mod schema;

pub use period::{selectable_years, Month, PeriodKey};
pub use record::{LineItems, PeriodRecord};
pub use schema::EntryKind;

#[cfg(test)]
mod tests;
