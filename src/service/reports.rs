use super::TicketService;
use crate::core::{
    Clock, GroupStats, MAX_TREND_DAYS, Statistics, TrendCounts, daily_trends, group_stats,
};
use crate::error::{HelpdeskError, Result};
use crate::storage::DocumentBackend;
use chrono::NaiveDate;
use std::collections::BTreeMap;

impl<B: DocumentBackend, C: Clock> TicketService<B, C> {
    /// Counters as of the last save
    pub fn statistics(&self) -> Result<Statistics> {
        Ok(self.store.load()?.statistics)
    }

    /// Ticket counts per department
    pub fn department_stats(&self) -> Result<BTreeMap<String, GroupStats>> {
        let document = self.store.load()?;
        Ok(group_stats(&document.tickets, |t| t.department.as_str()))
    }

    /// Ticket counts per issue category
    pub fn category_stats(&self) -> Result<BTreeMap<String, GroupStats>> {
        let document = self.store.load()?;
        Ok(group_stats(&document.tickets, |t| t.issue_type.as_str()))
    }

    /// New and resolved counts for the trailing `days` days, today included
    pub fn daily_trends(&self, days: u32) -> Result<BTreeMap<NaiveDate, TrendCounts>> {
        if days > MAX_TREND_DAYS {
            return Err(HelpdeskError::InvalidInput(format!(
                "Trend window of {days} days is too long (at most {MAX_TREND_DAYS})"
            )));
        }
        let document = self.store.load()?;
        let today = self.store.now().date_naive();
        Ok(daily_trends(&document.tickets, today, days))
    }
}
