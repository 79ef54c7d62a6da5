//! The month selected in the UI, written as `YYYY-MM`.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::Error;

/// A calendar month, e.g. `2024-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first_day: Date,
}

impl Month {
    /// Create a month from a year and a month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the year is outside 1 to 9999.
    pub fn new(year: i32, month: time::Month) -> Result<Self, Error> {
        if !(1..=9999).contains(&year) {
            return Err(Error::InvalidMonth(format!("{year}-{:02}", u8::from(month))));
        }

        Date::from_calendar_date(year, month, 1)
            .map(|first_day| Self { first_day })
            .map_err(|_| Error::InvalidMonth(format!("{year}-{:02}", u8::from(month))))
    }

    /// The month that contains `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date - time::Duration::days(i64::from(date.day()) - 1),
        }
    }

    /// The current month at `local_offset`.
    pub fn current(local_offset: UtcOffset) -> Self {
        Self::containing(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> time::Month {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// A heading for the month, e.g. "January 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month(), self.year())
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;

        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = time::Month::try_from(month).map_err(|_| invalid())?;

        Month::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
