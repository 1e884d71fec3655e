//! Visit progress summary.

use std::fmt::Write as _;

use serde::Serialize;

use crate::models::{Customer, VisitStatus};

/// Customer count for one main region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Totals shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub done: usize,
    pub postponed: usize,
    pub not_done: usize,
    /// Per-region counts in first-seen order
    pub regions: Vec<RegionCount>,
}

impl DashboardSummary {
    pub fn from_customers(customers: &[Customer]) -> Self {
        let mut summary = Self {
            total: customers.len(),
            ..Self::default()
        };

        for customer in customers {
            match customer.visit_status {
                VisitStatus::Done => summary.done += 1,
                VisitStatus::Postponed => summary.postponed += 1,
                VisitStatus::NotDone => summary.not_done += 1,
            }

            match summary
                .regions
                .iter_mut()
                .find(|entry| entry.region == customer.main_region)
            {
                Some(entry) => entry.count += 1,
                None => summary.regions.push(RegionCount {
                    region: customer.main_region.clone(),
                    count: 1,
                }),
            }
        }

        summary
    }

    /// Share of visited customers, in whole percent
    pub fn done_percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.done * 100 / self.total
        }
    }
}

/// Render `(label, value)` pairs as a horizontal ASCII bar chart.
///
/// The largest value spans `max_width` cells; any non-zero value gets at
/// least one cell.
#[must_use]
pub fn render_bar_chart(rows: &[(String, usize)], max_width: usize) -> String {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let largest = rows.iter().map(|(_, value)| *value).max().unwrap_or(0);

    let mut output = String::new();
    for (label, value) in rows {
        let cells = if largest == 0 || *value == 0 {
            0
        } else {
            (value * max_width / largest).max(1)
        };
        let padding = label_width - label.chars().count();
        let _ = writeln!(
            output,
            "{label}{} | {} {value}",
            " ".repeat(padding),
            "#".repeat(cells)
        );
    }
    output
}
