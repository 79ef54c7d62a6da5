//! The state of the budget page and the transitions between states.
//!
//! Each user event (changing the month, switching tabs, saving a record) maps
//! to one transition function on [BudgetSession]. Network calls happen outside
//! of the session: [refresh] fetches a [MonthSnapshot] and the caller applies it
//! with [BudgetSession::apply_refresh].

use serde::Deserialize;

use crate::{
    Error,
    earning::{WEEK_NUMBERS, WeeklyEarning},
    month::Month,
    store::StoreClient,
    summary::{FinancialSummary, compute_summary},
    transaction::Transaction,
};

/// The data entry tab shown below the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// The form for adding an expense.
    #[default]
    Transactions,
    /// The form for adding a weekly earning.
    Earnings,
}

/// Everything loaded from the store for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSnapshot {
    pub month: Month,
    pub transactions: Vec<Transaction>,
    pub earnings: Vec<WeeklyEarning>,
    pub summary: FinancialSummary,
}

/// Fetch the transactions and earnings for `month` concurrently and compute
/// their summary.
///
/// # Errors
/// Returns the first error from either request. Nothing is returned for the
/// other request in that case.
pub async fn refresh(store: &StoreClient, month: Month) -> Result<MonthSnapshot, Error> {
    let (transactions, earnings) =
        tokio::try_join!(store.get_transactions(month), store.get_earnings(month))?;

    let summary = compute_summary(&transactions, &earnings);

    tracing::debug!(
        "refreshed {month}: {} transactions, {} earnings",
        transactions.len(),
        earnings.len()
    );

    Ok(MonthSnapshot {
        month,
        transactions,
        earnings,
        summary,
    })
}

/// The server-side state of the budget page.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSession {
    /// The month whose records are displayed.
    pub month: Month,
    pub tab: Tab,
    /// The month the loaded records belong to, `None` until the first refresh succeeds.
    pub loaded_month: Option<Month>,
    pub transactions: Vec<Transaction>,
    pub earnings: Vec<WeeklyEarning>,
    pub summary: FinancialSummary,
    /// The week number preselected in the earning form.
    pub next_week_number: u8,
}

impl BudgetSession {
    /// A session showing `month` with nothing loaded yet.
    pub fn new(month: Month) -> Self {
        Self {
            month,
            tab: Tab::default(),
            loaded_month: None,
            transactions: Vec::new(),
            earnings: Vec::new(),
            summary: FinancialSummary::default(),
            next_week_number: *WEEK_NUMBERS.start(),
        }
    }

    /// The user picked a different month. The loaded records stay until the
    /// next refresh replaces them.
    pub fn select_month(&mut self, month: Month) {
        self.month = month;
    }

    /// The user switched the data entry tab.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Replace the loaded records with `snapshot` and return the new summary.
    ///
    /// The latest snapshot always wins, even if it was requested for a month
    /// that is no longer selected.
    pub fn apply_refresh(&mut self, snapshot: MonthSnapshot) -> &FinancialSummary {
        self.loaded_month = Some(snapshot.month);
        self.transactions = snapshot.transactions;
        self.earnings = snapshot.earnings;
        self.summary = snapshot.summary;

        &self.summary
    }

    /// An expense was saved. The expense form has no state to carry over.
    pub fn transaction_saved(&mut self) {
        self.tab = Tab::Transactions;
    }

    /// A weekly earning was saved for `week_number`; preselect the next week.
    pub fn earning_saved(&mut self, week_number: u8) {
        self.tab = Tab::Earnings;
        self.next_week_number = week_number.saturating_add(1).min(*WEEK_NUMBERS.end());
    }
}
