use thiserror::Error;

use crate::core::billing::ResultBucket;
use crate::core::models::series::{MonthToDate, SeriesMap, ServiceSeries};
use crate::core::stats::{round2, ServiceSummary};

#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("No service has a positive month-to-date cost")]
    NoBilledServices,
    #[error("No {0} data in the month-to-date response")]
    MissingMetric(String),
}

/// Fold time-ordered buckets into per-service daily series for `metric`.
///
/// Services missing from a day are simply absent; nothing is zero-filled.
pub fn build_series(buckets: &[ResultBucket], metric: &str) -> SeriesMap {
    let mut map = SeriesMap::new();
    for bucket in buckets {
        for group in &bucket.groups {
            if let Some(amount) = group.amounts.get(metric) {
                map.push(&group.service, round2(*amount));
            }
        }
    }
    map
}

pub fn build_month_to_date(buckets: &[ResultBucket], metrics: &[&str]) -> MonthToDate {
    metrics
        .iter()
        .map(|metric| (metric.to_string(), build_series(buckets, metric)))
        .collect()
}

/// Highest spend first; ties keep API order. Services with nothing billed are dropped.
pub fn rank_services(series: Vec<ServiceSeries>) -> Vec<ServiceSeries> {
    let mut ranked = series;
    ranked.sort_by(|a, b| b.total().total_cmp(&a.total()));
    ranked.retain(|s| s.total() > 0.0);
    ranked
}

/// Ranked report rows for one metric of the month-to-date data.
pub fn summarize(
    month_to_date: &MonthToDate,
    metric: &str,
    days_in_month: u32,
) -> Result<Vec<ServiceSummary>, ReportError> {
    let series = month_to_date
        .get(metric)
        .ok_or_else(|| ReportError::MissingMetric(metric.to_string()))?
        .clone()
        .into_series();

    let rows: Vec<ServiceSummary> = rank_services(series)
        .iter()
        .filter_map(|s| ServiceSummary::from_series(s, days_in_month))
        .collect();

    if rows.is_empty() {
        return Err(ReportError::NoBilledServices);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::billing::{ResultBucket, ServiceGroup};
    use std::collections::HashMap;

    const METRIC: &str = "AmortizedCost";

    fn group(service: &str, amount: f64) -> ServiceGroup {
        ServiceGroup {
            service: service.to_string(),
            amounts: HashMap::from([(METRIC.to_string(), amount)]),
        }
    }

    fn bucket(start: &str, groups: Vec<ServiceGroup>) -> ResultBucket {
        ResultBucket {
            start: start.to_string(),
            groups,
        }
    }

    fn series(service: &str, values: &[f64]) -> ServiceSeries {
        ServiceSeries {
            service: service.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn build_series_keeps_chronological_order() {
        let buckets = vec![
            bucket("2024-03-01", vec![group("EC2", 10.0), group("S3", 0.0)]),
            bucket("2024-03-02", vec![group("EC2", 12.5), group("S3", 0.0)]),
        ];
        let map = build_series(&buckets, METRIC);
        assert_eq!(map.get("EC2").unwrap().values, vec![10.0, 12.5]);
        assert_eq!(map.get("S3").unwrap().values, vec![0.0, 0.0]);
    }

    #[test]
    fn build_series_does_not_zero_fill() {
        let buckets = vec![
            bucket("2024-03-01", vec![group("EC2", 1.0)]),
            bucket("2024-03-02", vec![group("EC2", 2.0), group("Lambda", 0.3)]),
        ];
        let map = build_series(&buckets, METRIC);
        assert_eq!(map.get("EC2").unwrap().values.len(), 2);
        assert_eq!(map.get("Lambda").unwrap().values, vec![0.3]);
    }

    #[test]
    fn build_series_rounds_each_value() {
        let buckets = vec![bucket("2024-03-01", vec![group("EC2", 1.23456)])];
        let map = build_series(&buckets, METRIC);
        assert_eq!(map.get("EC2").unwrap().values, vec![1.23]);
    }

    #[test]
    fn build_month_to_date_keys_by_metric() {
        let buckets = vec![bucket("2024-03-01", vec![group("EC2", 1.0)])];
        let mtd = build_month_to_date(&buckets, &[METRIC]);
        assert_eq!(mtd.len(), 1);
        assert!(mtd[METRIC].get("EC2").is_some());
    }

    #[test]
    fn rank_sorts_descending_and_drops_zero() {
        let ranked = rank_services(vec![
            series("S3", &[0.0, 0.0]),
            series("Lambda", &[1.0]),
            series("EC2", &[10.0, 12.5]),
            series("Credits", &[-3.0]),
        ]);
        let names: Vec<&str> = ranked.iter().map(|s| s.service.as_str()).collect();
        assert_eq!(names, vec!["EC2", "Lambda"]);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let ranked = rank_services(vec![
            series("B", &[2.0]),
            series("A", &[1.0, 1.0]),
            series("C", &[5.0]),
        ]);
        let names: Vec<&str> = ranked.iter().map(|s| s.service.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn summarize_filters_and_computes_rows() {
        let buckets = vec![
            bucket("2024-03-01", vec![group("EC2", 10.0), group("S3", 0.0)]),
            bucket("2024-03-02", vec![group("EC2", 12.5), group("S3", 0.0)]),
        ];
        let mtd = build_month_to_date(&buckets, &[METRIC]);
        let rows = summarize(&mtd, METRIC, 30).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].service, "EC2");
        assert_eq!(rows[0].running_total, 22.5);
        assert_eq!(rows[0].monthly_estimate, 337.5);
        assert_eq!(rows[0].variance, Some(3.13));
        assert_eq!(rows[0].latest, 12.5);
    }

    #[test]
    fn summarize_fails_when_nothing_billed() {
        let buckets = vec![bucket("2024-03-01", vec![group("S3", 0.0)])];
        let mtd = build_month_to_date(&buckets, &[METRIC]);
        assert_eq!(summarize(&mtd, METRIC, 30), Err(ReportError::NoBilledServices));
    }

    #[test]
    fn summarize_fails_on_missing_metric() {
        let mtd = MonthToDate::new();
        assert_eq!(
            summarize(&mtd, METRIC, 30),
            Err(ReportError::MissingMetric(METRIC.to_string()))
        );
    }
}
