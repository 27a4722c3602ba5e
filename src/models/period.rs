//! Calendar month a report covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A calendar month (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportPeriod {
    first_day: NaiveDate,
}

impl ReportPeriod {
    /// Build a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    pub fn start_date(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month.
    pub fn end_date(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first_day)
    }

    /// Move by a signed number of months (-1 = previous month).
    pub fn shift(&self, offset: i32) -> Self {
        let shifted = if offset >= 0 {
            self.first_day.checked_add_months(Months::new(offset.unsigned_abs()))
        } else {
            self.first_day.checked_sub_months(Months::new(offset.unsigned_abs()))
        };
        Self {
            first_day: shifted.unwrap_or(self.first_day),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for ReportPeriod {
    type Err = AppError;

    /// Accepts `YYYY-MM`, `YYYY/MM` and `YYYY.MM`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input
            .trim()
            .split(['-', '/', '.'])
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(AppError::parse(format!("Invalid month '{input}', expected YYYY-MM")));
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| AppError::parse(format!("Invalid year in '{input}'")))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| AppError::parse(format!("Invalid month in '{input}'")))?;

        Self::new(year, month).ok_or_else(|| AppError::parse(format!("Month out of range: '{input}'")))
    }
}

impl TryFrom<String> for ReportPeriod {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportPeriod> for String {
    fn from(period: ReportPeriod) -> Self {
        period.to_string()
    }
}
