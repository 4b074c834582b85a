//! Defines the route handler for checking a user's email and password.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, db::lock_connection};

use super::{endpoints::UserState, get_user_credentials_by_email};

const MISSING_CREDENTIALS_MSG: &str = "Missing email or password.";
const INVALID_CREDENTIALS_MSG: &str = "Invalid username or password.";
const SERVER_ERROR_MSG: &str = "Server error.";

/// The credentials submitted in a log-in request.
///
/// Both fields are optional so that a request missing one of them can be
/// answered with a 400 rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogInData {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Handler for log-in requests via the POST method.
///
/// Responds with a greeting for the user if the email is registered and the
/// password matches. No session is created.
///
/// Unknown emails and wrong passwords get the same 401 response.
pub async fn post_log_in(
    State(state): State<UserState>,
    Json(log_in_data): Json<LogInData>,
) -> Response {
    let (email, password) = match (log_in_data.email, log_in_data.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return message_response(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS_MSG),
    };

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_user_credentials_by_email(&email, &connection))
        .and_then(|credentials| {
            state
                .credentials
                .verify(&password, &credentials.stored_password)
                .map(|is_match| (credentials.user, is_match))
        });

    match result {
        Ok((user, true)) => {
            tracing::debug!("User {} logged in", user.id);
            message_response(StatusCode::OK, &format!("Welcome, {}!", user.username))
        }
        Ok((_, false)) | Err(Error::NotFound) => {
            message_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_MSG)
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MSG)
        }
    }
}
