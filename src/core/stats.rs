use serde::Serialize;

use crate::core::models::series::ServiceSeries;

/// Round half away from zero to 2 fractional digits. Never returns -0.0.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). Undefined below two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(squares / (values.len() - 1) as f64)
}

/// Per-service figures shown in one report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub service: String,
    pub monthly_estimate: f64,
    pub running_total: f64,
    pub mean: f64,
    pub variance: Option<f64>,
    pub latest: f64,
}

impl ServiceSummary {
    /// Returns `None` for an empty series.
    pub fn from_series(series: &ServiceSeries, days_in_month: u32) -> Option<Self> {
        let latest = round2(*series.values.last()?);
        let mean = round2(mean(&series.values)?);
        Some(Self {
            service: series.service.clone(),
            // The estimate projects the rounded daily mean, as shown in the row
            monthly_estimate: round2(f64::from(days_in_month) * mean),
            running_total: round2(series.total()),
            mean,
            variance: sample_variance(&series.values).map(round2),
            latest,
        })
    }
}
