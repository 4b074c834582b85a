//! The route handlers for bank accounts.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, ErrorMessages, db::lock_connection};

use super::{AccountData, AccountId, create_account, delete_account, get_accounts, update_account};

/// The state needed to manage accounts.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing every account.
pub async fn get_accounts_endpoint(State(state): State<AccountState>) -> Response {
    let result =
        lock_connection(&state.db_connection).and_then(|connection| get_accounts(&connection));

    match result {
        Ok(accounts) => Json(accounts).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "Account not found",
            failure: "Failed to fetch accounts",
        }),
    }
}

/// A route handler for creating a new account.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Json(data): Json<AccountData>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| create_account(&data, &connection));

    match result {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "Account not found",
            failure: "Failed to create account",
        }),
    }
}

/// A route handler for replacing the balances of an account.
pub async fn update_account_endpoint(
    State(state): State<AccountState>,
    Path(c_id): Path<AccountId>,
    Json(data): Json<AccountData>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| update_account(c_id, &data, &connection));

    match result {
        Ok(account) => Json(account).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "Account not found",
            failure: "Failed to update account",
        }),
    }
}

/// A route handler for deleting an account.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    Path(c_id): Path<AccountId>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_account(c_id, &connection));

    match result {
        Ok(()) => Json(json!({ "message": "Account deleted successfully" })).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "Account not found",
            failure: "Failed to delete account",
        }),
    }
}
