//! Handler for the `stats` command

use super::common::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::GroupStats;
use crate::error::Result;
use std::collections::BTreeMap;

/// Handler for the `stats` command
///
/// Always shows the overall counters; breakdowns and trends are opt-in.
pub fn handle_stats_command(
    departments: bool,
    categories: bool,
    trends: Option<u32>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let service = ctx.service();
    let statistics = service.statistics()?;
    let by_department = departments.then(|| service.department_stats()).transpose()?;
    let by_category = categories.then(|| service.category_stats()).transpose()?;
    let daily = trends.map(|days| service.daily_trends(days)).transpose()?;

    if output.is_json() {
        return output.print_json(&serde_json::json!({
            "statistics": statistics,
            "departments": by_department,
            "categories": by_category,
            "trends": daily,
        }));
    }

    output.info(&format!("Total tickets:   {}", statistics.total_tickets));
    output.info(&format!("Pending:         {}", statistics.pending_tickets));
    output.info(&format!("In progress:     {}", statistics.in_progress_tickets));
    output.info(&format!("Resolved:        {}", statistics.resolved_tickets));
    output.info(&format!(
        "Avg resolution:  {}",
        statistics.average_resolution_time
    ));

    if let Some(groups) = &by_department {
        print_groups("By department", groups, output);
    }
    if let Some(groups) = &by_category {
        print_groups("By category", groups, output);
    }
    if let Some(daily) = &daily {
        output.info("");
        output.info("Daily trends (new / resolved):");
        for (day, counts) in daily {
            output.info(&format!("  {day}  {:>3} / {:>3}", counts.new, counts.resolved));
        }
    }
    Ok(())
}

fn print_groups(title: &str, groups: &BTreeMap<String, GroupStats>, output: &OutputFormatter) {
    output.info("");
    output.info(&format!("{title}:"));
    if groups.is_empty() {
        output.info("  (no tickets)");
    }
    for (name, stats) in groups {
        output.info(&format!(
            "  {name:<12} total {:>3}  pending {:>3}  resolved {:>3}",
            stats.total, stats.pending, stats.resolved
        ));
    }
}
