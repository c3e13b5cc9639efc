use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static PERIOD_KEY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})_([A-Za-z]+)$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn all() -> &'static [Month] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    pub fn from_number(n: u32) -> Option<Self> {
        Self::all().get(n.checked_sub(1)? as usize).copied()
    }

    /// Accepts full names, three-letter abbreviations (any case) and 1-12.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Self::from_number(n);
        }
        let lower = s.to_lowercase();
        Self::all().iter().copied().find(|m| {
            let name = m.as_str().to_lowercase();
            name == lower || (lower.len() == 3 && name.starts_with(&lower))
        })
    }

    /// Next month in the calendar, wrapping December to January.
    pub fn succ(&self) -> Self {
        Self::all()[(*self as usize + 1) % 12]
    }

    pub fn pred(&self) -> Self {
        Self::all()[(*self as usize + 11) % 12]
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One calendar month of one year; the unit records are stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: Month,
}

impl PeriodKey {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let month = Month::from_number(date.month()).unwrap_or(Month::January);
        Self::new(date.year(), month)
    }

    /// Parse a store key of the form `2024_March`.
    ///
    /// Only canonical keys are accepted, so `parse(k).to_string() == k` for
    /// every key this returns `Some` for.
    pub fn parse(key: &str) -> Option<Self> {
        let re = PERIOD_KEY_RE.as_ref()?;
        let caps = re.captures(key)?;
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let name = caps.get(2)?.as_str();
        let month = Month::all().iter().copied().find(|m| m.as_str() == name)?;
        Some(Self::new(year, month))
    }

    /// Parse a period typed by a user: `2024_march`, `2024_Mar` and `2024_3`
    /// all give `2024_March`. Store keys still go through [`PeriodKey::parse`].
    pub fn parse_input(input: &str) -> Option<Self> {
        let (year, month) = input.trim().rsplit_once('_')?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(year.parse().ok()?, Month::parse(month)?))
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.year, self.month)
    }
}

/// Years offered by the entry form: last year, this year and next year.
pub fn selectable_years(today: NaiveDate) -> [i32; 3] {
    let year = today.year();
    [year - 1, year, year + 1]
}
