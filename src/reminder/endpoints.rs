//! The route handlers for payment reminders.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, ErrorMessages, db::lock_connection, timezone::local_today};

use super::{
    ReminderData, ReminderFilter, ReminderId, ReminderQuery, complete_reminder, create_reminder,
    delete_reminder, get_reminders, update_reminder, validate_due_date,
};

const REMINDER_NOT_FOUND: &str = "Payment reminder not found";

/// The state needed to manage payment reminders.
#[derive(Debug, Clone)]
pub struct ReminderState {
    /// The database connection for managing reminders.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReminderState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new payment reminder.
///
/// Responds with 201 and the stored reminder, or 400 if the due date is in the past.
pub async fn create_reminder_endpoint(
    State(state): State<ReminderState>,
    Json(data): Json<ReminderData>,
) -> Response {
    let result = local_today(&state.local_timezone)
        .and_then(|today| validate_due_date(data.due_date, today))
        .and_then(|()| {
            let connection = lock_connection(&state.db_connection)?;
            create_reminder(&data, &connection)
        });

    match result {
        Ok(reminder) => (StatusCode::CREATED, Json(reminder)).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: REMINDER_NOT_FOUND,
            failure: "Failed to create payment reminder",
        }),
    }
}

/// A route handler for listing payment reminders.
///
/// The optional query parameters `due_date`, `status` and `priority` narrow
/// the list by exact match, and `sort_by=priority` changes the order from
/// due date to priority.
pub async fn get_reminders_endpoint(
    State(state): State<ReminderState>,
    Query(filter): Query<ReminderFilter>,
) -> Response {
    let query = ReminderQuery::from_filter(&filter);
    tracing::debug!("Listing reminders ordered by {:?}", query.order());

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_reminders(&query, &connection));

    match result {
        Ok(reminders) => Json(reminders).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: REMINDER_NOT_FOUND,
            failure: "Failed to fetch payment reminders",
        }),
    }
}

/// A route handler for replacing a payment reminder.
///
/// The same due date rule as creation applies.
pub async fn update_reminder_endpoint(
    State(state): State<ReminderState>,
    Path(reminder_id): Path<ReminderId>,
    Json(data): Json<ReminderData>,
) -> Response {
    let result = local_today(&state.local_timezone)
        .and_then(|today| validate_due_date(data.due_date, today))
        .and_then(|()| {
            let connection = lock_connection(&state.db_connection)?;
            update_reminder(reminder_id, &data, &connection)
        });

    match result {
        Ok(reminder) => Json(reminder).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: REMINDER_NOT_FOUND,
            failure: "Failed to update payment reminder",
        }),
    }
}

/// A route handler for marking a payment reminder as completed.
pub async fn complete_reminder_endpoint(
    State(state): State<ReminderState>,
    Path(reminder_id): Path<ReminderId>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| complete_reminder(reminder_id, &connection));

    match result {
        Ok(_) => Json(json!({ "message": "Payment reminder marked as completed" })).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: REMINDER_NOT_FOUND,
            failure: "Failed to mark payment reminder as completed",
        }),
    }
}

/// A route handler for deleting a payment reminder.
pub async fn delete_reminder_endpoint(
    State(state): State<ReminderState>,
    Path(reminder_id): Path<ReminderId>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_reminder(reminder_id, &connection));

    match result {
        Ok(()) => Json(json!({ "message": "Payment reminder deleted successfully" })).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: REMINDER_NOT_FOUND,
            failure: "Failed to delete payment reminder",
        }),
    }
}
