use serde::Serialize;
use std::collections::HashMap;

/// Daily amortized cost for one service, oldest day first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSeries {
    pub service: String,
    pub values: Vec<f64>,
}

impl ServiceSeries {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Service name -> daily series, kept in the order services first appear in
/// the API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMap {
    series: Vec<ServiceSeries>,
    index: HashMap<String, usize>,
}

impl SeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one day's value to a service, creating the series on first sight.
    pub fn push(&mut self, service: &str, value: f64) {
        match self.index.get(service) {
            Some(&i) => self.series[i].values.push(value),
            None => {
                self.index.insert(service.to_string(), self.series.len());
                self.series.push(ServiceSeries {
                    service: service.to_string(),
                    values: vec![value],
                });
            }
        }
    }

    pub fn get(&self, service: &str) -> Option<&ServiceSeries> {
        self.index.get(service).map(|&i| &self.series[i])
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn into_series(self) -> Vec<ServiceSeries> {
        self.series
    }
}

/// Month-to-date series keyed by Cost Explorer metric name.
pub type MonthToDate = HashMap<String, SeriesMap>;
