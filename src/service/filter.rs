use crate::core::{Status, Ticket, Urgency};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Value that disables a filter
pub const ALL: &str = "all";

/// Structured filters applied after the text query
///
/// Each set field narrows the result; unset fields do not restrict it. The
/// date range only applies when both ends are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub status: Option<Status>,
    pub category: Option<String>,
    pub urgency: Option<Urgency>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SearchFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Restrict to tickets created on `from` through the end of `to`
    #[must_use]
    pub const fn created_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Build filters from raw strings, treating `"all"` and blanks as unset
    pub fn from_raw(
        status: Option<&str>,
        category: Option<&str>,
        urgency: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            status: restricted(status).map(str::parse).transpose()?,
            category: restricted(category).map(str::to_string),
            urgency: restricted(urgency).map(str::parse).transpose()?,
            date_from: restricted(date_from)
                .map(|d| parse_filter_date(d, today))
                .transpose()?,
            date_to: restricted(date_to)
                .map(|d| parse_filter_date(d, today))
                .transpose()?,
        })
    }

    /// Inclusive creation-time bounds, if both ends are set
    fn created_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (from, to) = (self.date_from?, self.date_to?);
        let start = from.and_hms_opt(0, 0, 0)?.and_utc();
        // Last millisecond of the `to` day
        let end = to.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
        Some((start, end))
    }

    /// Whether `ticket` passes every set filter
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if self.status.is_some_and(|s| ticket.status != s) {
            return false;
        }
        if self
            .category
            .as_ref()
            .is_some_and(|c| &ticket.issue_type != c)
        {
            return false;
        }
        if self.urgency.is_some_and(|u| ticket.urgency != u) {
            return false;
        }
        if let Some((start, end)) = self.created_window() {
            if ticket.created_at < start || ticket.created_at > end {
                return false;
            }
        }
        true
    }
}

fn restricted(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

/// Parse a date given to a search filter
///
/// Accepts `today`, `yesterday`, `last-N` (the first day of the trailing N
/// days) or an ISO `YYYY-MM-DD` date.
pub fn parse_filter_date(value: &str, today: NaiveDate) -> Result<NaiveDate> {
    let value = value.trim();
    let invalid = || {
        HelpdeskError::InvalidInput(format!(
            "Invalid date '{value}'. Use 'today', 'yesterday', 'last-7' or '2024-01-15'"
        ))
    };
    let days_before = |days: u64| today.checked_sub_days(Days::new(days)).ok_or_else(invalid);

    match value {
        "today" => return Ok(today),
        "yesterday" => return days_before(1),
        _ => {},
    }

    if let Some(days) = value.strip_prefix("last-").and_then(|d| d.parse::<u64>().ok()) {
        if days > 0 {
            return days_before(days - 1);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Text query followed by the structured filters
///
/// The query matches id, name, mobile or description, case-insensitively.
/// An empty query matches everything. Stored order is preserved.
#[must_use]
pub fn search(tickets: &[Ticket], query: &str, filters: &SearchFilters) -> Vec<Ticket> {
    let needle = query.trim().to_lowercase();
    tickets
        .iter()
        .filter(|t| needle.is_empty() || t.matches_query(&needle))
        .filter(|t| filters.matches(t))
        .cloned()
        .collect()
}
