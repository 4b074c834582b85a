//! The route handlers for financial transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, ErrorMessages, db::lock_connection, user::UserID};

use super::{
    TransactionData, TransactionId, create_transaction, delete_transaction,
    get_transaction_summary, get_transactions, update_transaction,
};

const TRANSACTION_ERRORS: ErrorMessages = ErrorMessages {
    not_found: "Transaction not found",
    failure: "Internal Server Error",
};

/// The state needed to manage transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing every transaction, most recent first.
pub async fn get_transactions_endpoint(State(state): State<TransactionState>) -> Response {
    let result =
        lock_connection(&state.db_connection).and_then(|connection| get_transactions(&connection));

    match result {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_json_response(TRANSACTION_ERRORS),
    }
}

/// A route handler for a user's income, expense and balance totals.
///
/// Responds with 404 if the user has no transactions.
pub async fn get_transaction_summary_endpoint(
    State(state): State<TransactionState>,
    Path(user_id): Path<UserID>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_transaction_summary(user_id, &connection));

    match result {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "No transactions found for this user.",
            failure: "Internal Server Error",
        }),
    }
}

/// A route handler for creating a new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(data): Json<TransactionData>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| create_transaction(&data, &connection));

    match result {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_json_response(TRANSACTION_ERRORS),
    }
}

/// A route handler for replacing a transaction.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| update_transaction(transaction_id, &data, &connection));

    match result {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_json_response(TRANSACTION_ERRORS),
    }
}

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_transaction(transaction_id, &connection));

    match result {
        Ok(()) => Json(json!({ "message": "Transaction deleted successfully" })).into_response(),
        Err(error) => error.into_json_response(TRANSACTION_ERRORS),
    }
}
