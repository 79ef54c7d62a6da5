//! Route handlers for the budget page.
//!
//! Each handler maps one user event to a [BudgetSession] transition. The
//! session lock is only held while reading or updating the session, never
//! while waiting on the budget store.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    alert::Alert,
    budget::{
        forms::{EarningForm, MonthForm, TabForm, TransactionForm},
        page::{budget_content, budget_content_with_alert, budget_page},
    },
    month::Month,
    session::{BudgetSession, refresh},
    store::StoreClient,
    timezone::get_local_offset,
};

/// The state needed by the budget page handlers.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// The client for the REST budget store.
    pub store: StoreClient,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The state of the budget page.
    pub session: Arc<Mutex<BudgetSession>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            session: state.session.clone(),
        }
    }
}

/// Query parameters for the export redirect.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// The month to export, defaults to the selected month.
    pub month: Option<Month>,
}

fn lock_session(session: &Mutex<BudgetSession>) -> Result<MutexGuard<'_, BudgetSession>, Error> {
    session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)
}

fn get_today(local_timezone: &str) -> Result<Date, Error> {
    let local_offset = get_local_offset(local_timezone)
        .inspect_err(|_| tracing::error!("Invalid timezone {local_timezone}"))?;

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

/// Display the budget page for the selected month.
///
/// If the budget store cannot be reached the page is still rendered with the
/// last loaded data and an alert describing the error.
pub async fn get_budget_page(State(state): State<BudgetState>) -> Response {
    let today = match get_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let month = match lock_session(&state.session) {
        Ok(session) => session.month,
        Err(error) => return error.into_response(),
    };

    let refreshed = refresh(&state.store, month).await;

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_response(),
    };

    let alert = match refreshed {
        Ok(snapshot) => {
            session.apply_refresh(snapshot);
            None
        }
        Err(error) => {
            tracing::error!("could not load the budget for {month}: {error}");
            Some(error.into_alert().1)
        }
    };

    budget_page(&session, today, alert).into_response()
}

/// Select the month to display and return the refreshed page content.
pub async fn select_month(
    State(state): State<BudgetState>,
    Form(form): Form<MonthForm>,
) -> Response {
    let month = match form.month() {
        Ok(month) => month,
        Err(error) => {
            tracing::error!("invalid month: {error}");
            return error.into_alert_response();
        }
    };

    match lock_session(&state.session) {
        Ok(mut session) => session.select_month(month),
        Err(error) => return error.into_alert_response(),
    }

    refresh_content(&state, month, None).await
}

/// Switch between the expense and earning forms.
///
/// The records already loaded are rendered as is.
pub async fn select_tab(State(state): State<BudgetState>, Form(form): Form<TabForm>) -> Response {
    let today = match get_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    session.select_tab(form.tab);

    budget_content(&session, today).into_response()
}

/// Save an expense and return the refreshed page content.
pub async fn create_transaction(
    State(state): State<BudgetState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.into_new_transaction() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("invalid expense: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.create_transaction(&transaction).await {
        tracing::error!("could not save expense: {error}");
        return error.into_alert_response();
    }

    let month = match lock_session(&state.session) {
        Ok(mut session) => {
            session.transaction_saved();
            session.month
        }
        Err(error) => return error.into_alert_response(),
    };

    let alert = Alert::SuccessSimple {
        message: "Expense saved".to_owned(),
    };

    refresh_content(&state, month, Some(alert)).await
}

/// Save a weekly earning and return the refreshed page content.
pub async fn create_earning(
    State(state): State<BudgetState>,
    Form(form): Form<EarningForm>,
) -> Response {
    let earning = match form.into_new_earning() {
        Ok(earning) => earning,
        Err(error) => {
            tracing::error!("invalid weekly earning: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.create_earning(&earning).await {
        tracing::error!("could not save weekly earning: {error}");
        return error.into_alert_response();
    }

    let month = match lock_session(&state.session) {
        Ok(mut session) => {
            session.earning_saved(earning.week_number);
            session.month
        }
        Err(error) => return error.into_alert_response(),
    };

    let alert = Alert::SuccessSimple {
        message: format!("Earning for week {} saved", earning.week_number),
    };

    refresh_content(&state, month, Some(alert)).await
}

/// Redirect to the budget store's report for the requested or selected month.
pub async fn export_report(
    State(state): State<BudgetState>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let month = match query.month {
        Some(month) => month,
        None => match lock_session(&state.session) {
            Ok(session) => session.month,
            Err(error) => return error.into_response(),
        },
    };

    let export_url = state.store.export_url(month);
    tracing::info!("exporting report for {month} from {export_url}");

    Redirect::to(&export_url).into_response()
}

/// Refresh the records for `month` and render the page content.
///
/// On failure the session keeps its last loaded data and only an error alert
/// is returned.
async fn refresh_content(state: &BudgetState, month: Month, alert: Option<Alert>) -> Response {
    let today = match get_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let snapshot = match refresh(&state.store, month).await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::error!("could not refresh the budget for {month}: {error}");
            return error.into_alert_response();
        }
    };

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    session.apply_refresh(snapshot);

    match alert {
        Some(alert) => budget_content_with_alert(&session, today, alert).into_response(),
        None => budget_content(&session, today).into_response(),
    }
}
