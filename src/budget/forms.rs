//! The form data posted by the budget page.
//!
//! Dates and months are kept as strings until [TransactionForm::into_new_transaction]
//! and friends so that malformed values are reported as alerts instead of
//! extractor rejections.

use serde::Deserialize;

use crate::{
    Error,
    category::Category,
    date_format::parse_date,
    earning::NewWeeklyEarning,
    month::Month,
    session::Tab,
    transaction::NewTransaction,
};

/// Form data for selecting the month.
#[derive(Debug, Deserialize)]
pub struct MonthForm {
    /// The month as `YYYY-MM`.
    pub month: String,
}

impl MonthForm {
    /// Parse the selected month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the month is not `YYYY-MM`.
    pub fn month(&self) -> Result<Month, Error> {
        self.month.parse()
    }
}

/// Form data for switching tabs.
#[derive(Debug, Deserialize)]
pub struct TabForm {
    pub tab: Tab,
}

/// Form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub date: String,
    /// The amount as a positive number, it is stored as a negative amount.
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
}

impl TransactionForm {
    /// Validate the form and build the expense to send to the store.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the date cannot be parsed, or any of the
    /// validation errors of [NewTransaction::new].
    pub fn into_new_transaction(self) -> Result<NewTransaction, Error> {
        if self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let date = parse_date(&self.date)?;

        NewTransaction::new(date, self.amount, &self.description, self.category)
    }
}

/// Form data for adding a weekly earning.
#[derive(Debug, Deserialize)]
pub struct EarningForm {
    pub week_number: u8,
    pub start_date: String,
    pub end_date: String,
    pub gross_amount: f64,
    #[serde(default)]
    pub description: String,
}

impl EarningForm {
    /// Validate the form and build the earning to send to the store.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if either date cannot be parsed, or any of
    /// the validation errors of [NewWeeklyEarning::new].
    pub fn into_new_earning(self) -> Result<NewWeeklyEarning, Error> {
        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;

        NewWeeklyEarning::new(
            self.week_number,
            self.gross_amount,
            start_date,
            end_date,
            &self.description,
        )
    }
}
