use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_costexplorer::types::{
    DateInterval, ForecastResult, Granularity as CeGranularity, GroupDefinition,
    GroupDefinitionType, Metric, ResultByTime,
};
use aws_sdk_costexplorer::Client;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::core::billing::{
    parse_amount, BillingApi, BillingError, CostQuery, ForecastBucket, ForecastQuery,
    ResultBucket, ServiceGroup,
};
use crate::core::config::AwsSettings;
use crate::core::window::format_date;

/// [`BillingApi`] backed by AWS Cost Explorer.
pub struct CostExplorerApi {
    client: Client,
}

impl CostExplorerApi {
    /// Build a client from the standard AWS credential chain, with optional
    /// profile and region overrides.
    pub async fn new(settings: &AwsSettings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let config = loader.load().await;
        tracing::debug!(
            region = config.region().map_or("default", |r| r.as_ref()),
            "loaded AWS configuration"
        );
        Self {
            client: Client::new(&config),
        }
    }
}

/// Convert Cost Explorer result buckets, keeping the service from the group's
/// first key and one parsed amount per requested metric.
pub fn buckets_from_results(
    results: &[ResultByTime],
    metrics: &[String],
) -> Result<Vec<ResultBucket>, BillingError> {
    let mut buckets = Vec::new();
    for result in results {
        let start = result
            .time_period()
            .map(|tp| tp.start().to_string())
            .ok_or(BillingError::MissingField("TimePeriod"))?;

        let mut groups = Vec::new();
        for group in result.groups() {
            let service = group
                .keys()
                .first()
                .cloned()
                .ok_or(BillingError::MissingField("Keys"))?;
            let values = group.metrics().ok_or(BillingError::MissingField("Metrics"))?;

            let mut amounts = HashMap::new();
            for metric in metrics {
                let amount = values
                    .get(metric)
                    .and_then(|m| m.amount())
                    .ok_or(BillingError::MissingField("Amount"))?;
                amounts.insert(metric.clone(), parse_amount(metric, amount)?);
            }
            groups.push(ServiceGroup { service, amounts });
        }
        buckets.push(ResultBucket { start, groups });
    }
    Ok(buckets)
}

/// Forecast amounts are passed through as returned.
pub fn forecast_buckets(results: &[ForecastResult]) -> Result<Vec<ForecastBucket>, BillingError> {
    results
        .iter()
        .map(|r| -> Result<ForecastBucket, BillingError> {
            Ok(ForecastBucket {
                mean: r
                    .mean_value()
                    .ok_or(BillingError::MissingField("MeanValue"))?
                    .to_string(),
                lower_bound: r
                    .prediction_interval_lower_bound()
                    .ok_or(BillingError::MissingField("PredictionIntervalLowerBound"))?
                    .to_string(),
                upper_bound: r
                    .prediction_interval_upper_bound()
                    .ok_or(BillingError::MissingField("PredictionIntervalUpperBound"))?
                    .to_string(),
            })
        })
        .collect()
}

fn date_interval(start: NaiveDate, end: NaiveDate) -> Result<DateInterval> {
    DateInterval::builder()
        .start(format_date(start))
        .end(format_date(end))
        .build()
        .context("Failed to build date interval")
}

#[async_trait]
impl BillingApi for CostExplorerApi {
    async fn cost_and_usage(&self, query: &CostQuery) -> Result<Vec<ResultBucket>> {
        let mut request = self
            .client
            .get_cost_and_usage()
            .time_period(date_interval(query.start, query.end)?)
            .granularity(CeGranularity::from(query.granularity.as_str()));
        for metric in &query.metrics {
            request = request.metrics(metric);
        }
        if let Some(dimension) = &query.group_by_dimension {
            request = request.group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key(dimension)
                    .build(),
            );
        }

        let response = request
            .send()
            .await
            .context("Failed to query AWS Cost Explorer")?;

        let buckets = buckets_from_results(response.results_by_time(), &query.metrics)?;

        if response.next_page_token().is_some() {
            tracing::warn!("cost-and-usage response is paginated; only the first page is reported");
        }
        Ok(buckets)
    }

    async fn cost_forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastBucket>> {
        let response = self
            .client
            .get_cost_forecast()
            .time_period(date_interval(query.start, query.end)?)
            .granularity(CeGranularity::from(query.granularity.as_str()))
            .metric(Metric::from(query.metric.as_str()))
            .prediction_interval_level(query.prediction_interval_level)
            .send()
            .await
            .context("Failed to query AWS Cost Explorer forecast")?;

        Ok(forecast_buckets(response.forecast_results_by_time())?)
    }
}
