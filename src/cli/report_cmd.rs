use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::aggregate;
use crate::core::billing::aws::CostExplorerApi;
use crate::core::billing::{BillingApi, BillingClient, REPORT_METRIC};
use crate::core::config::AwsSettings;
use crate::core::models::forecast::Forecast;
use crate::core::stats::ServiceSummary;
use crate::core::window::DateWindow;

#[derive(Debug, Serialize)]
pub struct Report {
    pub window: DateWindow,
    pub services: Vec<ServiceSummary>,
    pub forecast: Forecast,
}

/// Query both endpoints and assemble the ranked service rows and forecast.
pub async fn build_report<A: BillingApi>(
    client: &BillingClient<A>,
    window: &DateWindow,
) -> Result<Report> {
    let month_to_date = client.get_month_to_date(window).await?;
    let services = aggregate::summarize(&month_to_date, REPORT_METRIC, window.days_in_month)?;
    let forecast = client.get_forecast(window).await?;

    Ok(Report {
        window: *window,
        services,
        forecast,
    })
}

pub fn render(report: &Report, opts: &OutputOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(renderer::render_report(
            &report.services,
            &report.forecast,
            opts.use_color,
        )),
        OutputFormat::Json => {
            let json = if opts.pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            Ok(json)
        }
    }
}

pub async fn run(now: NaiveDateTime, aws: &AwsSettings, opts: &OutputOptions) -> Result<()> {
    let window = DateWindow::from_now(now);
    tracing::debug!(?window, "date window");

    let client = BillingClient::new(CostExplorerApi::new(aws).await);
    let report = build_report(&client, &window).await?;

    println!("{}", render(&report, opts)?);
    Ok(())
}
