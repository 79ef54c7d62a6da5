//! Budget page module
//!
//! The single page of the app: a month selector, the monthly and weekly
//! summaries, the forms for adding expenses and weekly earnings, the weekly
//! chart and a link to export the month's report.

mod forms;
mod handlers;
mod page;

pub use handlers::{
    BudgetState, create_earning, create_transaction, export_report, get_budget_page,
    select_month, select_tab,
};
