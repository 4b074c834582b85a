//! paytrack is a JSON REST server for personal finance bookkeeping.
//!
//! It serves four independent resource groups, each mapped directly onto a
//! SQLite table: users, bank accounts, payment reminders and financial
//! transactions. The reminder list supports optional equality filters with a
//! choice of ordering, and transactions can be summarised per user into
//! income, expense and balance totals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use serde_json::json;
use time::Date;
use tokio::signal;

mod account;
mod app_state;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod not_found;
mod reminder;
mod routing;
mod test_data;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use account::seed_sample_accounts;
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use test_data::{TEST_USER_EMAIL, TEST_USER_PASSWORD, seed_test_data};
pub use timezone::get_local_offset;
pub use user::{CredentialScheme, PlainTextCredentials, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A reminder was created or updated with a due date before today.
    ///
    /// Reminders describe obligations that are still outstanding, so the due
    /// date may be today or later but never in the past.
    #[error("{0} is a date in the past, which is not allowed")]
    PastDueDate(Date),

    /// An amount could not be stored as a currency value with two decimal
    /// places and at most eight digits before the decimal point.
    #[error("the amount {0} is out of range")]
    InvalidAmount(Decimal),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The credential scheme failed to encode or verify a password.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("the credential scheme failed: {0}")]
    CredentialError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

/// The client-facing messages an endpoint responds with when it fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorMessages {
    /// Sent with a 404 status when the identified row does not exist.
    pub not_found: &'static str,
    /// Sent with a 500 status for any failure not shown to the client.
    pub failure: &'static str,
}

impl Error {
    /// Convert the error into a JSON response of the form `{"error": "..."}`.
    ///
    /// Validation errors are explained to the client. Everything else is
    /// logged and replaced with the endpoint's generic failure message.
    pub(crate) fn into_json_response(self, messages: ErrorMessages) -> Response {
        let (status, message) = match self {
            Error::PastDueDate(_) => (
                StatusCode::BAD_REQUEST,
                "Due date cannot be in the past".to_owned(),
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "The amount {amount} must have at most 8 digits before the decimal point"
                ),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, messages.not_found.to_owned()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages.failure.to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{Error, ErrorMessages};

    const MESSAGES: ErrorMessages = ErrorMessages {
        not_found: "Thing not found",
        failure: "Failed to do the thing",
    };

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn past_due_date_is_bad_request() {
        let response = Error::PastDueDate(date!(2024 - 01 - 01)).into_json_response(MESSAGES);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_amount_is_bad_request() {
        let response =
            Error::InvalidAmount(Decimal::new(1_000_000_000, 0)).into_json_response(MESSAGES);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_not_found() {
        let response = Error::NotFound.into_json_response(MESSAGES);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_are_internal_server_errors() {
        let response = Error::DatabaseLockError.into_json_response(MESSAGES);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
