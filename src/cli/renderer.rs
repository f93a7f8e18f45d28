use colored::{control, Colorize};

use crate::core::formatter::{format_amount, format_optional_amount, pad_right, NOT_AVAILABLE};
use crate::core::models::forecast::Forecast;
use crate::core::stats::ServiceSummary;

const SERVICE_HEADER: &str = "Service";
const COLUMNS: [&str; 5] = ["Est. Monthly", "Running Total", "Average", "Variance", "Yesterday"];
const SEPARATOR: &str = "---------";

/// Render the per-service table followed by the forecast summary.
///
/// Layout:
/// ```text
/// Per Service Report
/// Service || Est. Monthly | Running Total | Average | Variance | Yesterday
/// ---------
/// EC2 || 337.50       | 22.50         | 11.25   | 3.13     | 12.50
///
/// Account Forecast
/// Monthly Total: 1234.56
///   Lower Bound: 1100.00
///   Upper Bound: 1369.12
/// ```
pub fn render_report(rows: &[ServiceSummary], forecast: &Forecast, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push("Per Service Report".bold().to_string());
    lines.extend(render_table(rows));
    lines.push(String::new());
    lines.extend(render_forecast(forecast));
    lines.join("\n")
}

/// Header, separator and one line per service.
pub fn render_table(rows: &[ServiceSummary]) -> Vec<String> {
    let name_width = rows
        .iter()
        .map(|r| r.service.chars().count())
        .max()
        .unwrap_or(0);

    let header = join_row(
        &pad_right(SERVICE_HEADER, name_width),
        COLUMNS.map(str::to_string),
    );

    let mut lines = vec![header.bold().to_string(), SEPARATOR.to_string()];
    for row in rows {
        let cells = [
            format_amount(row.monthly_estimate),
            format_amount(row.running_total),
            format_amount(row.mean),
            format_optional_amount(row.variance),
            format_amount(row.latest),
        ];
        let padded = std::array::from_fn(|i| pad_right(&cells[i], COLUMNS[i].len()));
        lines.push(join_row(&pad_right(&row.service, name_width), padded));
    }
    lines
}

fn join_row(name: &str, cells: [String; 5]) -> String {
    format!("{} || {}", name, cells.join(" | "))
}

pub fn render_forecast(forecast: &Forecast) -> Vec<String> {
    let or_na = |v: Option<&str>| v.unwrap_or(NOT_AVAILABLE).to_string();
    vec![
        "Account Forecast".bold().to_string(),
        format!("Monthly Total: {}", or_na(forecast.mean())),
        format!("  Lower Bound: {}", or_na(forecast.lower_bound())),
        format!("  Upper Bound: {}", or_na(forecast.upper_bound())),
    ]
}
