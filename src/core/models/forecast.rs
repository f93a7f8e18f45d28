use serde::Serialize;

/// End-of-month forecast for the remaining days of the month.
///
/// Amounts are kept exactly as Cost Explorer returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Forecast {
    /// Today is the last day of the month; nothing left to forecast.
    Unavailable,
    Projected {
        mean: String,
        lower_bound: String,
        upper_bound: String,
    },
}

impl Forecast {
    pub fn mean(&self) -> Option<&str> {
        match self {
            Self::Projected { mean, .. } => Some(mean),
            Self::Unavailable => None,
        }
    }

    pub fn lower_bound(&self) -> Option<&str> {
        match self {
            Self::Projected { lower_bound, .. } => Some(lower_bound),
            Self::Unavailable => None,
        }
    }

    pub fn upper_bound(&self) -> Option<&str> {
        match self {
            Self::Projected { upper_bound, .. } => Some(upper_bound),
            Self::Unavailable => None,
        }
    }
}
