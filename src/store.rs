//! HTTP client for the REST budget store that holds transactions and weekly earnings.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Error,
    earning::{NewWeeklyEarning, WeeklyEarning},
    month::Month,
    transaction::{NewTransaction, Transaction},
};

/// The base URL used when none is configured.
pub const DEFAULT_STORE_URL: &str = "http://localhost:5000/api";

/// The JSON body the store sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct MonthQuery {
    month: Month,
}

/// A client for the budget store's REST API.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client for the store at `base_url`, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the transactions recorded in `month`.
    ///
    /// # Errors
    /// Returns [Error::NetworkFailure] if the store could not be reached,
    /// [Error::ApiError] if it responded with a non-2xx status, and
    /// [Error::UnknownError] if the response could not be decoded.
    pub async fn get_transactions(&self, month: Month) -> Result<Vec<Transaction>, Error> {
        self.get_for_month("/transactions", month).await
    }

    /// Get the weekly earnings recorded in `month`.
    ///
    /// # Errors
    /// See [StoreClient::get_transactions].
    pub async fn get_earnings(&self, month: Month) -> Result<Vec<WeeklyEarning>, Error> {
        self.get_for_month("/earnings", month).await
    }

    /// Save a new expense.
    ///
    /// # Errors
    /// See [StoreClient::get_transactions].
    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), Error> {
        self.post("/transactions", transaction).await
    }

    /// Save a new weekly earning.
    ///
    /// # Errors
    /// See [StoreClient::get_transactions].
    pub async fn create_earning(&self, earning: &NewWeeklyEarning) -> Result<(), Error> {
        self.post("/earnings", earning).await
    }

    /// The URL of the store's report for `month`.
    pub fn export_url(&self, month: Month) -> String {
        format!("{}?month={month}", self.url("/export"))
    }

    async fn get_for_month<T>(&self, path: &str, month: Month) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("GET {url}?month={month}");

        let response = self
            .client
            .get(&url)
            .query(&MonthQuery { month })
            .send()
            .await
            .inspect_err(|error| tracing::error!("GET {url} failed: {error}"))?;

        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    async fn post<T>(&self, path: &str, body: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .inspect_err(|error| tracing::error!("POST {url} failed: {error}"))?;

        check_status(response).await?;

        Ok(())
    }
}

/// Turns a non-2xx response into [Error::ApiError] using the `message` field of its body.
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("the request failed with status {status}"));

    tracing::error!("budget store returned {status} for {url}: {message}");

    Err(Error::ApiError {
        status: status.as_u16(),
        message,
    })
}
