//! Aggregate statistics derived from the ticket set
//!
//! [`Statistics`] is the persisted summary refreshed on every save. The
//! grouping and trend helpers are computed on demand and never persisted.

use super::{Status, Ticket};
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for the average when nothing has been resolved yet
pub const NOT_AVAILABLE: &str = "N/A";

/// Persisted summary of the ticket set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_tickets: usize,
    pub pending_tickets: usize,
    pub in_progress_tickets: usize,
    pub resolved_tickets: usize,
    /// Human readable average resolution time, e.g. `"4.5 hours"`
    pub average_resolution_time: String,
    pub last_updated: DateTime<Utc>,
}

impl Statistics {
    /// Compute the summary for `tickets`
    #[must_use]
    pub fn compute(tickets: &[Ticket], now: DateTime<Utc>) -> Self {
        let count = |status: Status| tickets.iter().filter(|t| t.status == status).count();

        Self {
            total_tickets: tickets.len(),
            pending_tickets: count(Status::Pending),
            in_progress_tickets: count(Status::InProgress),
            resolved_tickets: count(Status::Resolved),
            average_resolution_time: average_resolution_hours(tickets)
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_resolution_time),
            last_updated: now,
        }
    }
}

/// Mean hours from creation to resolution over tickets with a `resolved_at`
///
/// Tickets reopened after resolution still count, since `resolved_at` is
/// never cleared.
#[must_use]
pub fn average_resolution_hours(tickets: &[Ticket]) -> Option<f64> {
    let spans: Vec<Duration> = tickets.iter().filter_map(Ticket::resolution_span).collect();
    if spans.is_empty() {
        return None;
    }

    let total_ms: i64 = spans.iter().map(Duration::num_milliseconds).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_ms = total_ms as f64 / spans.len() as f64;
    Some(avg_ms / 3_600_000.0)
}

/// Format an average in hours as minutes, hours or days by magnitude
///
/// Below one hour the value is whole minutes; below 24 hours it is hours to
/// one decimal; otherwise days to one decimal. Exactly 1.0 hours is
/// `"1.0 hours"` and exactly 24.0 hours is `"1.0 days"`.
#[must_use]
pub fn format_resolution_time(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round())
    } else if hours < 24.0 {
        format!("{hours:.1} hours")
    } else {
        format!("{:.1} days", hours / 24.0)
    }
}

/// Per-group ticket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
}

/// Group tickets by a raw field value
///
/// Keys are used exactly as stored; no normalization or "other" bucket.
pub fn group_stats<F>(tickets: &[Ticket], key: F) -> BTreeMap<String, GroupStats>
where
    F: Fn(&Ticket) -> &str,
{
    let mut groups: BTreeMap<String, GroupStats> = BTreeMap::new();
    for ticket in tickets {
        let entry = groups.entry(key(ticket).to_string()).or_default();
        entry.total += 1;
        match ticket.status {
            Status::Pending => entry.pending += 1,
            Status::Resolved => entry.resolved += 1,
            Status::InProgress => {},
        }
    }
    groups
}

/// New and resolved counts for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendCounts {
    pub new: usize,
    pub resolved: usize,
}

/// Longest trend window, in days
pub const MAX_TREND_DAYS: u32 = 3660;

/// Per-day counts for the trailing `days` UTC calendar days ending `today`
///
/// Every day in the window is present, zero-initialised. A ticket counts once
/// towards `new` on its creation day and once towards `resolved` on its
/// resolution day, independently. The window is capped at [`MAX_TREND_DAYS`]
/// and stops at the earliest representable date.
#[must_use]
pub fn daily_trends(
    tickets: &[Ticket],
    today: NaiveDate,
    days: u32,
) -> BTreeMap<NaiveDate, TrendCounts> {
    let mut trends: BTreeMap<NaiveDate, TrendCounts> = (0..u64::from(days.min(MAX_TREND_DAYS)))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| (day, TrendCounts::default()))
        .collect();

    for ticket in tickets {
        if let Some(day) = trends.get_mut(&ticket.created_at.date_naive()) {
            day.new += 1;
        }
        if let Some(resolved_at) = ticket.resolved_at {
            if let Some(day) = trends.get_mut(&resolved_at.date_naive()) {
                day.resolved += 1;
            }
        }
    }

    trends
}
