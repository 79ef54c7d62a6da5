//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the budget store could not be completed, e.g. the
    /// store is not running or the connection timed out.
    #[error("could not reach the budget store: {0}")]
    NetworkFailure(String),

    /// The budget store responded with a non-2xx status code.
    ///
    /// `message` is the `message` field of the JSON error body, or a generic
    /// description if the body did not have one.
    #[error("the budget store returned {status}: {message}")]
    ApiError {
        /// The HTTP status code of the response.
        status: u16,
        /// The reason given by the store.
        message: String,
    },

    /// Any other failure while talking to the budget store, e.g. a response
    /// body that could not be decoded.
    #[error("an unknown error occurred: {0}")]
    UnknownError(String),

    /// A month string that is not in the `YYYY-MM` format.
    #[error("\"{0}\" is not a valid month, expected YYYY-MM")]
    InvalidMonth(String),

    /// A date string that is neither `YYYY-MM-DD` nor an RFC 3339 timestamp.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// A category that is not one of the fixed expense categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// An amount that is zero, negative (for earnings) or not a finite number.
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A week number outside of 1 to 5.
    #[error("week {0} is not a week of the month, expected 1 to 5")]
    InvalidWeekNumber(u8),

    /// A weekly earning that ends before it starts.
    #[error("the start date {start} is after the end date {end}")]
    InvalidDateRange {
        /// The first day of the week.
        start: Date,
        /// The last day of the week.
        end: Date,
    },

    /// A record was submitted without a description.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the session lock.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            tracing::error!("could not decode the budget store response: {error}");
            Error::UnknownError(format!("could not read the budget store response: {error}"))
        } else if error.is_connect() || error.is_timeout() || error.is_request() {
            Error::NetworkFailure(error.to_string())
        } else {
            tracing::error!("an unhandled HTTP client error occurred: {error}");
            Error::UnknownError(error.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = self.into_alert();

        (status_code, alert.into_html()).into_response()
    }

    /// The status code and alert that describe the error to the user.
    pub fn into_alert(self) -> (StatusCode, Alert) {
        match self {
            Error::NetworkFailure(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the budget store".to_owned(),
                    details: "Check that the budget store is running and try again. \
                        Your last loaded data is still shown."
                        .to_owned(),
                },
            ),
            Error::ApiError { message, .. } => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The budget store rejected the request".to_owned(),
                    details: message,
                },
            ),
            Error::UnknownError(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Unknown error".to_owned(),
                    details: "The budget store sent a response that could not be read, \
                        check the server logs for more details."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error @ (Error::InvalidMonth(_)
            | Error::InvalidDate(_)
            | Error::InvalidCategory(_)
            | Error::InvalidWeekNumber(_)
            | Error::InvalidDateRange { .. }) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid form data".to_owned(),
                    details: capitalise(&error.to_string()),
                },
            ),
            Error::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: "Enter an amount of at least 0.01.".to_owned(),
                },
            ),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Enter a description".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        }
    }
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
