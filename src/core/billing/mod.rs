pub mod aws;
#[cfg(test)]
pub mod fixture;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::aggregate;
use crate::core::models::forecast::Forecast;
use crate::core::models::series::MonthToDate;
use crate::core::window::DateWindow;

/// Metric names requested from the cost-and-usage endpoint.
pub const COST_METRICS: &[&str] = &["AmortizedCost"];
/// The metric the per-service report is built from.
pub const REPORT_METRIC: &str = "AmortizedCost";
pub const FORECAST_METRIC: &str = "AMORTIZED_COST";
pub const SERVICE_DIMENSION: &str = "SERVICE";
pub const PREDICTION_INTERVAL: i32 = 80;

#[derive(Error, Debug, PartialEq)]
pub enum BillingError {
    #[error("Response is missing {0}")]
    MissingField(&'static str),
    #[error("Invalid amount for {field}: '{value}'")]
    InvalidAmount { field: String, value: String },
    #[error("Forecast response contained no results")]
    EmptyForecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Monthly => "MONTHLY",
        }
    }
}

/// Parameters of a cost-and-usage request. `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub metrics: Vec<String>,
    pub group_by_dimension: Option<String>,
}

/// Parameters of a cost-forecast request. `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub metric: String,
    pub prediction_interval_level: i32,
}

/// One service's amounts within a result bucket, keyed by metric name.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGroup {
    pub service: String,
    pub amounts: HashMap<String, f64>,
}

/// One time period of a cost-and-usage response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBucket {
    pub start: String,
    pub groups: Vec<ServiceGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastBucket {
    pub mean: String,
    pub lower_bound: String,
    pub upper_bound: String,
}

/// The two read-only billing operations the report needs.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Buckets in chronological order.
    async fn cost_and_usage(&self, query: &CostQuery) -> Result<Vec<ResultBucket>>;

    async fn cost_forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastBucket>>;
}

pub fn parse_amount(field: &str, value: &str) -> Result<f64, BillingError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| BillingError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Turns a [`DateWindow`] into the month-to-date and forecast queries.
pub struct BillingClient<A> {
    api: A,
}

impl<A: BillingApi> BillingClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn month_to_date_query(window: &DateWindow) -> CostQuery {
        CostQuery {
            start: window.start_of_month,
            end: window.today,
            granularity: Granularity::Daily,
            metrics: COST_METRICS.iter().map(|m| m.to_string()).collect(),
            group_by_dimension: Some(SERVICE_DIMENSION.to_string()),
        }
    }

    pub fn forecast_query(window: &DateWindow) -> ForecastQuery {
        ForecastQuery {
            start: window.tomorrow,
            end: window.start_of_next_month,
            granularity: Granularity::Monthly,
            metric: FORECAST_METRIC.to_string(),
            prediction_interval_level: PREDICTION_INTERVAL,
        }
    }

    /// Daily per-service amortized cost from the start of the month up to today.
    pub async fn get_month_to_date(&self, window: &DateWindow) -> Result<MonthToDate> {
        let query = Self::month_to_date_query(window);
        tracing::debug!(start = %query.start, end = %query.end, "querying month-to-date cost");

        let buckets = self.api.cost_and_usage(&query).await?;
        let month_to_date = aggregate::build_month_to_date(&buckets, COST_METRICS);

        if month_to_date.get(REPORT_METRIC).map_or(true, |s| s.is_empty()) {
            tracing::warn!("month-to-date response has no per-service cost");
        }
        tracing::info!(
            buckets = buckets.len(),
            first = buckets.first().map_or("-", |b| b.start.as_str()),
            last = buckets.last().map_or("-", |b| b.start.as_str()),
            services = month_to_date.get(REPORT_METRIC).map_or(0, |s| s.len()),
            "month-to-date cost loaded"
        );
        Ok(month_to_date)
    }

    /// Forecast for tomorrow through the end of the month.
    ///
    /// On the last day of the month the range would be empty, so no request is
    /// made and [`Forecast::Unavailable`] is returned.
    pub async fn get_forecast(&self, window: &DateWindow) -> Result<Forecast> {
        if window.is_last_day_of_month() {
            tracing::info!(today = %window.today, "last day of the month, skipping forecast");
            return Ok(Forecast::Unavailable);
        }

        let query = Self::forecast_query(window);
        tracing::debug!(start = %query.start, end = %query.end, "querying cost forecast");

        let buckets = self.api.cost_forecast(&query).await?;
        let first = buckets.into_iter().next().ok_or(BillingError::EmptyForecast)?;

        Ok(Forecast::Projected {
            mean: first.mean,
            lower_bound: first.lower_bound,
            upper_bound: first.upper_bound,
        })
    }
}
