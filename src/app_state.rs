//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use crate::{
    Error, month::Month, session::BudgetSession, store::StoreClient, timezone::get_local_offset,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the REST budget store.
    pub store: StoreClient,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The state of the budget page.
    pub session: Arc<Mutex<BudgetSession>>,
}

impl AppState {
    /// Create a new [AppState] that talks to the budget store at `store_url`.
    ///
    /// The session starts on the current month in `local_timezone`, which
    /// should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(store_url: &str, local_timezone: &str) -> Result<Self, Error> {
        let local_offset = get_local_offset(local_timezone)
            .inspect_err(|_| tracing::error!("Invalid timezone {local_timezone}"))?;

        let session = BudgetSession::new(Month::current(local_offset));
        let store = StoreClient::new(store_url);
        tracing::info!("Using the budget store at {}", store.base_url());

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
            session: Arc::new(Mutex::new(session)),
        })
    }
}
