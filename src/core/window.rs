use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Query boundaries for one report run.
///
/// Every field is derived from the same captured instant so the month-to-date
/// query, the forecast query and the monthly estimate always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// First day of the month that contains *yesterday*. Billing data lags by
    /// roughly a day, so on the 1st this points at the previous month.
    pub start_of_month: NaiveDate,
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub start_of_next_month: NaiveDate,
    pub days_in_month: u32,
}

impl DateWindow {
    pub fn from_now(now: NaiveDateTime) -> Self {
        let today = now.date();
        Self {
            start_of_month: start_of_month_from_yesterday(today),
            today,
            tomorrow: tomorrow(today),
            start_of_next_month: start_of_next_month(today),
            days_in_month: days_in_month(today),
        }
    }

    /// True when there are no days left in the month to forecast.
    pub fn is_last_day_of_month(&self) -> bool {
        self.tomorrow.month() != self.today.month()
    }
}

/// Yesterday, truncated to the first of its month.
pub fn start_of_month_from_yesterday(today: NaiveDate) -> NaiveDate {
    first_of_month(today - Duration::days(1))
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

/// Day 28 plus four days always lands in the following month.
pub fn start_of_next_month(today: NaiveDate) -> NaiveDate {
    let day_28 = today.with_day(28).unwrap_or(today);
    first_of_month(day_28 + Duration::days(4))
}

pub fn days_in_month(today: NaiveDate) -> u32 {
    let span = start_of_next_month(today) - first_of_month(today);
    span.num_days() as u32
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Cost Explorer date format.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
