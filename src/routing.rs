//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    budget::{
        create_earning, create_transaction, export_report, get_budget_page, select_month,
        select_tab,
    },
    endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_budget_page))
        .route(endpoints::EXPORT, get(export_report))
        .route(endpoints::MONTH_API, post(select_month))
        .route(endpoints::TAB_API, post(select_tab))
        .route(endpoints::TRANSACTIONS_API, post(create_transaction))
        .route(endpoints::EARNINGS_API, post(create_earning))
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_404_not_found)
        .with_state(state)
}
