//! Weekly gross earnings as stored by the budget store.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, date_format::iso_date};

/// The week numbers a month is split into.
pub const WEEK_NUMBERS: RangeInclusive<u8> = 1..=5;

/// Gross income attributed to a numbered week of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEarning {
    /// The store's identifier for the earning.
    #[serde(rename = "_id")]
    pub id: String,
    /// The week of the month, normally 1 to 5.
    pub week_number: u8,
    pub gross_amount: f64,
    /// The first day of the week, inclusive.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// The last day of the week, inclusive.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    #[serde(default)]
    pub description: String,
}

impl WeeklyEarning {
    /// Whether `date` falls within this earning's week, bounds included.
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A new weekly earning to send to the budget store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeeklyEarning {
    pub week_number: u8,
    pub gross_amount: f64,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub description: String,
}

impl NewWeeklyEarning {
    /// Create a weekly earning.
    ///
    /// # Errors
    /// Returns an error if `week_number` is not in [WEEK_NUMBERS], if
    /// `gross_amount` is not a positive number, if `start_date` is after
    /// `end_date`, or if `description` is blank.
    pub fn new(
        week_number: u8,
        gross_amount: f64,
        start_date: Date,
        end_date: Date,
        description: &str,
    ) -> Result<Self, Error> {
        if !WEEK_NUMBERS.contains(&week_number) {
            return Err(Error::InvalidWeekNumber(week_number));
        }

        if !gross_amount.is_finite() || gross_amount <= 0.0 {
            return Err(Error::InvalidAmount(gross_amount));
        }

        if start_date > end_date {
            return Err(Error::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            week_number,
            gross_amount,
            start_date,
            end_date,
            description: description.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::{NewWeeklyEarning, WeeklyEarning};

    fn earning() -> WeeklyEarning {
        WeeklyEarning {
            id: "1".to_owned(),
            week_number: 1,
            gross_amount: 1000.0,
            start_date: date!(2024 - 01 - 01),
            end_date: date!(2024 - 01 - 07),
            description: "Salary".to_owned(),
        }
    }

    #[test]
    fn covers_includes_both_bounds() {
        let earning = earning();

        assert!(earning.covers(date!(2024 - 01 - 01)));
        assert!(earning.covers(date!(2024 - 01 - 04)));
        assert!(earning.covers(date!(2024 - 01 - 07)));
        assert!(!earning.covers(date!(2023 - 12 - 31)));
        assert!(!earning.covers(date!(2024 - 01 - 08)));
    }

    #[test]
    fn deserializes_store_record() {
        let json = r#"{
            "_id": "1",
            "weekNumber": 1,
            "grossAmount": 1000,
            "startDate": "2024-01-01T00:00:00.000Z",
            "endDate": "2024-01-07T00:00:00.000Z",
            "description": "Salary"
        }"#;

        let got: WeeklyEarning = serde_json::from_str(json).unwrap();

        assert_eq!(got, earning());
    }

    #[test]
    fn serializes_request_body_with_camel_case_keys() {
        let earning = NewWeeklyEarning::new(
            2,
            800.0,
            date!(2024 - 01 - 08),
            date!(2024 - 01 - 14),
            "Salary",
        )
        .unwrap();

        let json = serde_json::to_value(&earning).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "weekNumber": 2,
                "grossAmount": 800.0,
                "startDate": "2024-01-08T00:00:00.000Z",
                "endDate": "2024-01-14T00:00:00.000Z",
                "description": "Salary"
            })
        );
    }

    #[test]
    fn rejects_week_outside_month() {
        let result = NewWeeklyEarning::new(
            6,
            800.0,
            date!(2024 - 01 - 29),
            date!(2024 - 01 - 31),
            "Salary",
        );

        assert_eq!(result, Err(Error::InvalidWeekNumber(6)));
    }

    #[test]
    fn rejects_start_after_end() {
        let result = NewWeeklyEarning::new(
            1,
            800.0,
            date!(2024 - 01 - 07),
            date!(2024 - 01 - 01),
            "Salary",
        );

        assert_eq!(
            result,
            Err(Error::InvalidDateRange {
                start: date!(2024 - 01 - 07),
                end: date!(2024 - 01 - 01),
            })
        );
    }

    #[test]
    fn rejects_non_positive_amount() {
        let result = NewWeeklyEarning::new(
            1,
            -1.0,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 07),
            "Salary",
        );

        assert_eq!(result, Err(Error::InvalidAmount(-1.0)));
    }
}
