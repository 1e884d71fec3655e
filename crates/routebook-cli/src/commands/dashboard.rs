use routebook_core::dashboard::{render_bar_chart, DashboardSummary};
use routebook_core::VisitStatus;

use crate::commands::common::AppContext;
use crate::error::CliError;

const CHART_WIDTH: usize = 30;

pub async fn run_dashboard(as_json: bool, ctx: &AppContext) -> Result<(), CliError> {
    let service = ctx.open_service().await?;
    let customers = service.list_customers().await?;
    let summary = DashboardSummary::from_customers(&customers);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_dashboard(&summary));
    }

    Ok(())
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let statuses = vec![
        (VisitStatus::Done.label().to_string(), summary.done),
        (VisitStatus::Postponed.label().to_string(), summary.postponed),
        (VisitStatus::NotDone.label().to_string(), summary.not_done),
    ];
    let regions = summary
        .regions
        .iter()
        .map(|entry| {
            let label = if entry.region.is_empty() {
                "(none)".to_string()
            } else {
                entry.region.clone()
            };
            (label, entry.count)
        })
        .collect::<Vec<_>>();

    let mut output = format!(
        "Customers: {}  visited: {} ({}%)\n\nBy status\n",
        summary.total,
        summary.done,
        summary.done_percent()
    );
    output.push_str(&render_bar_chart(&statuses, CHART_WIDTH));
    if !regions.is_empty() {
        output.push_str("\nBy region\n");
        output.push_str(&render_bar_chart(&regions, CHART_WIDTH));
    }
    output
}
