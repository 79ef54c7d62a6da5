//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The category of an expense.
///
/// The serialized form is the value the budget store uses, which is also
/// the value submitted by the expense form. The declaration order is the
/// order categories are listed in the UI and in summaries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// Groceries and eating out.
    #[default]
    #[serde(rename = "Alimentação")]
    Food,
    /// Public transport, fuel, ride sharing.
    #[serde(rename = "Transporte")]
    Transport,
    /// Rent, mortgage and home maintenance.
    #[serde(rename = "Moradia")]
    Housing,
    /// Courses, books and tuition.
    #[serde(rename = "Educação")]
    Education,
    /// Entertainment and hobbies.
    #[serde(rename = "Lazer")]
    Leisure,
    /// Recurring bills and general expenses.
    #[serde(rename = "Despesas")]
    Bills,
    /// Anything else.
    #[serde(rename = "Outros")]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Education,
        Category::Leisure,
        Category::Bills,
        Category::Other,
    ];

    /// The value used by the budget store and the expense form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Housing => "Moradia",
            Category::Education => "Educação",
            Category::Leisure => "Lazer",
            Category::Bills => "Despesas",
            Category::Other => "Outros",
        }
    }

    /// The human readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Education => "Education",
            Category::Leisure => "Leisure",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}
