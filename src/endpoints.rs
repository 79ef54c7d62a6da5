//! The URIs of the pages and API endpoints served by the budget tracker.
//!
//! For the export link of a specific month use [format_export_endpoint].

use crate::month::Month;

/// The budget page.
pub const ROOT: &str = "/";
/// The route for redirecting to the budget store's report.
pub const EXPORT: &str = "/export";

/// The route for selecting the month.
pub const MONTH_API: &str = "/api/month";
/// The route for switching between the expense and earning forms.
pub const TAB_API: &str = "/api/tab";
/// The route for adding an expense.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for adding a weekly earning.
pub const EARNINGS_API: &str = "/api/earnings";

/// The export route with `month` as its query string.
pub fn format_export_endpoint(month: Month) -> String {
    format!("{EXPORT}?month={month}")
}
