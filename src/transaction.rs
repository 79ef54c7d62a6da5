//! Expense transactions as stored by the budget store.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::Category, date_format::iso_date};

/// A single dated expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The store's identifier for the transaction.
    #[serde(rename = "_id")]
    pub id: String,
    /// The day the expense happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The signed value of the transaction, negative for expenses.
    pub amount: f64,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    pub category: Category,
}

/// A new expense to send to the budget store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Always negative.
    pub amount: f64,
    pub description: String,
    pub category: Category,
}

impl NewTransaction {
    /// Create an expense of `amount` on `date`.
    ///
    /// The store records expenses as negative amounts, so the sign of `amount`
    /// is ignored and it is always sent as `-|amount|`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `amount` is zero or not finite, and
    /// [Error::EmptyDescription] if `description` is blank.
    pub fn new(
        date: Date,
        amount: f64,
        description: &str,
        category: Category,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount == 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            date,
            amount: -amount.abs(),
            description: description.to_owned(),
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, category::Category};

    use super::{NewTransaction, Transaction};

    #[test]
    fn deserializes_store_record() {
        let json = r#"{
            "_id": "65a1",
            "date": "2024-01-03T00:00:00.000Z",
            "amount": -50,
            "description": "Cinema",
            "category": "Lazer"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(
            transaction,
            Transaction {
                id: "65a1".to_owned(),
                date: date!(2024 - 01 - 03),
                amount: -50.0,
                description: "Cinema".to_owned(),
                category: Category::Leisure,
            }
        );
    }

    #[test]
    fn new_transaction_amount_is_always_negative() {
        let positive =
            NewTransaction::new(date!(2024 - 01 - 03), 12.5, "Bus", Category::Transport).unwrap();
        let negative =
            NewTransaction::new(date!(2024 - 01 - 03), -12.5, "Bus", Category::Transport).unwrap();

        assert_eq!(positive.amount, -12.5);
        assert_eq!(negative.amount, -12.5);
    }

    #[test]
    fn new_transaction_rejects_zero_amount() {
        let result = NewTransaction::new(date!(2024 - 01 - 03), 0.0, "Bus", Category::Transport);

        assert_eq!(result, Err(Error::InvalidAmount(0.0)));
    }

    #[test]
    fn new_transaction_rejects_blank_description() {
        let result = NewTransaction::new(date!(2024 - 01 - 03), 3.0, "  ", Category::Transport);

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn serializes_request_body() {
        let transaction =
            NewTransaction::new(date!(2024 - 01 - 03), 50.0, "Cinema", Category::Leisure).unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-01-03T00:00:00.000Z",
                "amount": -50.0,
                "description": "Cinema",
                "category": "Lazer"
            })
        );
    }
}
