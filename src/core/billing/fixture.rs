use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::billing::{
    BillingApi, CostQuery, ForecastBucket, ForecastQuery, ResultBucket, ServiceGroup,
    REPORT_METRIC,
};

/// Replays canned responses and records every request.
#[derive(Default)]
pub struct FixtureApi {
    pub buckets: Vec<ResultBucket>,
    pub forecast: Vec<ForecastBucket>,
    pub cost_calls: Mutex<Vec<CostQuery>>,
    pub forecast_calls: Mutex<Vec<ForecastQuery>>,
}

impl FixtureApi {
    /// One bucket per day, each holding `(service, amount)` pairs in API order.
    pub fn with_days(days: &[&[(&str, f64)]]) -> Self {
        let buckets = days
            .iter()
            .enumerate()
            .map(|(i, groups)| ResultBucket {
                start: format!("2024-03-{:02}", i + 1),
                groups: groups
                    .iter()
                    .map(|(service, amount)| ServiceGroup {
                        service: service.to_string(),
                        amounts: HashMap::from([(REPORT_METRIC.to_string(), *amount)]),
                    })
                    .collect(),
            })
            .collect();
        Self {
            buckets,
            ..Default::default()
        }
    }

    pub fn with_forecast(mut self, mean: &str, lower: &str, upper: &str) -> Self {
        self.forecast = vec![ForecastBucket {
            mean: mean.to_string(),
            lower_bound: lower.to_string(),
            upper_bound: upper.to_string(),
        }];
        self
    }
}

#[async_trait]
impl BillingApi for FixtureApi {
    async fn cost_and_usage(&self, query: &CostQuery) -> Result<Vec<ResultBucket>> {
        self.cost_calls.lock().unwrap().push(query.clone());
        Ok(self.buckets.clone())
    }

    async fn cost_forecast(&self, query: &ForecastQuery) -> Result<Vec<ForecastBucket>> {
        self.forecast_calls.lock().unwrap().push(query.clone());
        Ok(self.forecast.clone())
    }
}
