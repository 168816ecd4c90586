//! Catalog query building
//!
//! A [`CatalogQuery`] is an ordered list of filter pairs that the remote
//! client forwards verbatim as URL query parameters. The canned constructors
//! reproduce the slices each view asks for.

use chrono::{Months, NaiveDate};
use std::fmt;

use crate::time::format_api_date;

/// Page size used by the latest/popular news views before filtering
pub const NEWS_PAGE_SIZE: u32 = 40;
/// Page size used by upcoming, platform and search queries
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Page size used by the critic list
pub const CRITIC_PAGE_SIZE: u32 = 15;

/// Sort directive understood by the catalog API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ordering {
    /// Highest rated first (`-rating`)
    RatingDesc,
    /// Newest release first (`-released`)
    ReleasedDesc,
    /// Soonest release first (`released`)
    ReleasedAsc,
    /// Highest critic score first (`-metacritic`)
    MetacriticDesc,
    /// Any other directive, passed through as-is
    Custom(String),
}

impl Ordering {
    pub fn as_str(&self) -> &str {
        match self {
            Ordering::RatingDesc => "-rating",
            Ordering::ReleasedDesc => "-released",
            Ordering::ReleasedAsc => "released",
            Ordering::MetacriticDesc => "-metacritic",
            Ordering::Custom(directive) => directive,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive critic-score band, rendered as `min,max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
}

impl ScoreBand {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// Inclusive release-date band, rendered as `YYYY-MM-DD,YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window ending today and starting `months` calendar months earlier
    ///
    /// Day-of-month overflow clamps to the last day of the target month.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Window starting today and ending `months` calendar months later
    pub fn upcoming_months(today: NaiveDate, months: u32) -> Self {
        let end = today
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            format_api_date(self.start),
            format_api_date(self.end)
        )
    }
}

/// Ordered set of filter parameters for a catalog listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pairs: Vec<(String, String)>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw key/value pair
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn ordering(self, ordering: Ordering) -> Self {
        self.param("ordering", ordering.as_str())
    }

    pub fn page_size(self, size: u32) -> Self {
        self.param("page_size", size.to_string())
    }

    pub fn dates(self, range: DateRange) -> Self {
        self.param("dates", range.to_string())
    }

    /// Platform filter; the identifier is forwarded without interpretation
    pub fn platforms(self, platform_id: impl Into<String>) -> Self {
        self.param("platforms", platform_id)
    }

    pub fn metacritic(self, band: ScoreBand) -> Self {
        self.param("metacritic", band.to_string())
    }

    pub fn search(self, term: impl Into<String>) -> Self {
        self.param("search", term)
    }

    /// Pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first pair with the given key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Newest releases of the trailing three months
    pub fn latest(today: NaiveDate) -> Self {
        Self::new()
            .ordering(Ordering::ReleasedDesc)
            .page_size(NEWS_PAGE_SIZE)
            .dates(DateRange::trailing_months(today, 3))
    }

    /// Highest rated games with a strong critic score
    pub fn popular() -> Self {
        Self::new()
            .ordering(Ordering::RatingDesc)
            .page_size(NEWS_PAGE_SIZE)
            .metacritic(ScoreBand::new(80, 100))
    }

    /// Releases scheduled over the next twelve months, soonest first
    pub fn upcoming(today: NaiveDate) -> Self {
        Self::new()
            .dates(DateRange::upcoming_months(today, 12))
            .ordering(Ordering::ReleasedAsc)
            .page_size(DEFAULT_PAGE_SIZE)
    }

    /// Games with any critic score, best first
    pub fn critics() -> Self {
        Self::new()
            .ordering(Ordering::MetacriticDesc)
            .metacritic(ScoreBand::new(1, 100))
            .page_size(CRITIC_PAGE_SIZE)
    }

    /// Highest rated games on one platform
    pub fn platform(platform_id: impl Into<String>) -> Self {
        Self::new()
            .platforms(platform_id)
            .ordering(Ordering::RatingDesc)
            .page_size(DEFAULT_PAGE_SIZE)
    }

    /// Free-text search
    pub fn search_term(term: impl Into<String>) -> Self {
        Self::new().search(term).page_size(DEFAULT_PAGE_SIZE)
    }
}
