//! The payment reminder model and the SQL that stores it.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::{Error, database_id::DatabaseId};

/// The ID of a payment reminder.
pub type ReminderId = DatabaseId;

/// How urgent a reminder is.
///
/// Stored as lower case text. Note that the text values do not sort by
/// urgency: "high" < "low" < "medium".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Should be paid on time.
    Medium,
    /// Must be paid on time.
    High,
}

impl Priority {
    /// The text stored in the database and used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Whether a reminder still needs to be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    /// Not paid yet.
    Pending,
    /// Paid.
    Completed,
}

impl ReminderStatus {
    /// The text stored in the database and used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// The text did not name a known enum value.
#[derive(Debug, thiserror::Error)]
#[error("unknown value \"{0}\"")]
pub struct UnknownVariant(String);

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl FromStr for ReminderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for ReminderStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for ReminderStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

// SQLite's CURRENT_TIMESTAMP is UTC with whole seconds, so this is valid RFC 3339.
time::serde::format_description!(
    utc_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
);

/// A scheduled payment with a due date, priority and completion status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// The ID of the reminder.
    pub id: ReminderId,
    /// A short description of what needs to be paid.
    pub title: String,
    /// The day the payment is due.
    pub due_date: Date,
    /// How urgent the payment is.
    pub priority: Priority,
    /// Whether the payment has been made.
    pub status: ReminderStatus,
    /// When the reminder was created (UTC), e.g. "2025-06-01T09:30:00Z".
    #[serde(with = "utc_timestamp")]
    pub created_at: PrimitiveDateTime,
    /// When the reminder was last changed (UTC).
    #[serde(with = "utc_timestamp")]
    pub updated_at: PrimitiveDateTime,
}

/// The client supplied fields for creating or replacing a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderData {
    /// A short description of what needs to be paid.
    pub title: String,
    /// The day the payment is due, no earlier than today.
    pub due_date: Date,
    /// How urgent the payment is.
    pub priority: Priority,
    /// Whether the payment has been made.
    pub status: ReminderStatus,
}

const REMINDER_COLUMNS: &str = "id, title, due_date, priority, status, created_at, updated_at";

pub fn create_reminder_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS payment_reminder (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            due_date TEXT NOT NULL,
            priority TEXT NOT NULL CHECK (priority IN ('low', 'medium', 'high')),
            status TEXT NOT NULL CHECK (status IN ('pending', 'completed')),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_reminder(row: &Row) -> Result<Reminder, rusqlite::Error> {
    Ok(Reminder {
        id: row.get(0)?,
        title: row.get(1)?,
        due_date: row.get(2)?,
        priority: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Insert a new reminder.
///
/// The caller is responsible for checking the due date, see
/// [validate_due_date](super::validate_due_date).
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_reminder(data: &ReminderData, connection: &Connection) -> Result<Reminder, Error> {
    let reminder = connection.query_one(
        &format!(
            "INSERT INTO payment_reminder (title, due_date, priority, status)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {REMINDER_COLUMNS}"
        ),
        params![data.title, data.due_date, data.priority, data.status],
        map_row_to_reminder,
    )?;

    Ok(reminder)
}

/// Replace every client supplied field of the reminder `id` and refresh its
/// `updated_at` timestamp.
///
/// # Errors
/// Returns an:
/// - [Error::NotFound] if `id` does not refer to a reminder,
/// - [Error::SqlError] if there is some other SQL error.
pub fn update_reminder(
    id: ReminderId,
    data: &ReminderData,
    connection: &Connection,
) -> Result<Reminder, Error> {
    let reminder = connection.query_one(
        &format!(
            "UPDATE payment_reminder
             SET title = ?1, due_date = ?2, priority = ?3, status = ?4, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?5
             RETURNING {REMINDER_COLUMNS}"
        ),
        params![data.title, data.due_date, data.priority, data.status, id],
        map_row_to_reminder,
    )?;

    Ok(reminder)
}

/// Mark the reminder `id` as completed.
///
/// # Errors
/// Returns an:
/// - [Error::NotFound] if `id` does not refer to a reminder,
/// - [Error::SqlError] if there is some other SQL error.
pub fn complete_reminder(id: ReminderId, connection: &Connection) -> Result<Reminder, Error> {
    let reminder = connection.query_one(
        &format!(
            "UPDATE payment_reminder
             SET status = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?2
             RETURNING {REMINDER_COLUMNS}"
        ),
        params![ReminderStatus::Completed, id],
        map_row_to_reminder,
    )?;

    Ok(reminder)
}

/// Delete the reminder `id`.
///
/// # Errors
/// Returns an:
/// - [Error::NotFound] if `id` does not refer to a reminder,
/// - [Error::SqlError] if there is some other SQL error.
pub fn delete_reminder(id: ReminderId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM payment_reminder WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn get_reminder(id: ReminderId, connection: &Connection) -> Result<Reminder, Error> {
    let reminder = connection.query_one(
        &format!("SELECT {REMINDER_COLUMNS} FROM payment_reminder WHERE id = ?1"),
        params![id],
        map_row_to_reminder,
    )?;

    Ok(reminder)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, db::initialize};

    use super::{
        Priority, ReminderData, ReminderStatus, complete_reminder, create_reminder,
        delete_reminder, get_reminder, update_reminder,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn electricity_bill() -> ReminderData {
        ReminderData {
            title: "Electricity bill".to_owned(),
            due_date: date!(2030 - 01 - 15),
            priority: Priority::High,
            status: ReminderStatus::Pending,
        }
    }

    #[test]
    fn create_returns_stored_reminder() {
        let conn = get_test_connection();
        let data = electricity_bill();

        let reminder = create_reminder(&data, &conn).unwrap();

        assert_eq!(reminder.id, 1);
        assert_eq!(reminder.title, data.title);
        assert_eq!(reminder.due_date, data.due_date);
        assert_eq!(reminder.priority, data.priority);
        assert_eq!(reminder.status, data.status);
        assert_eq!(reminder.created_at, reminder.updated_at);
        assert_eq!(get_reminder(reminder.id, &conn), Ok(reminder));
    }

    #[test]
    fn update_replaces_fields() {
        let conn = get_test_connection();
        let reminder = create_reminder(&electricity_bill(), &conn).unwrap();
        let new_data = ReminderData {
            title: "Water bill".to_owned(),
            due_date: date!(2030 - 02 - 01),
            priority: Priority::Low,
            status: ReminderStatus::Completed,
        };

        let updated = update_reminder(reminder.id, &new_data, &conn).unwrap();

        assert_eq!(updated.id, reminder.id);
        assert_eq!(updated.title, new_data.title);
        assert_eq!(updated.due_date, new_data.due_date);
        assert_eq!(updated.priority, new_data.priority);
        assert_eq!(updated.status, new_data.status);
        assert_eq!(updated.created_at, reminder.created_at);
    }

    #[test]
    fn update_missing_reminder_is_not_found() {
        let conn = get_test_connection();

        let result = update_reminder(42, &electricity_bill(), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn complete_sets_status() {
        let conn = get_test_connection();
        let reminder = create_reminder(&electricity_bill(), &conn).unwrap();

        let completed = complete_reminder(reminder.id, &conn).unwrap();

        assert_eq!(completed.status, ReminderStatus::Completed);
        assert_eq!(completed.title, reminder.title);
    }

    #[test]
    fn complete_missing_reminder_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(complete_reminder(7, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_reminder() {
        let conn = get_test_connection();
        let reminder = create_reminder(&electricity_bill(), &conn).unwrap();

        delete_reminder(reminder.id, &conn).unwrap();

        assert_eq!(get_reminder(reminder.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_reminder_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(delete_reminder(3, &conn), Err(Error::NotFound));
    }

    #[test]
    fn table_rejects_unknown_priority() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO payment_reminder (title, due_date, priority, status) \
            VALUES ('rent', '2030-01-01', 'urgent', 'pending')",
            (),
        );

        assert!(result.is_err());
    }
}
