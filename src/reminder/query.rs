//! Builds and runs the filtered, sorted query behind the reminder list.
//!
//! Filter values only ever reach SQLite as bound parameters. The SQL text is
//! assembled from column names and clauses defined in this module.

use rusqlite::{Connection, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::Error;

use super::core::{Reminder, map_row_to_reminder};

/// The query string parameters accepted when listing reminders.
///
/// Each field is optional and an empty string counts as not set.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderFilter {
    /// Only include reminders due on this date ("YYYY-MM-DD").
    pub due_date: Option<String>,
    /// Only include reminders with this status.
    pub status: Option<String>,
    /// Only include reminders with this priority.
    pub priority: Option<String>,
    /// "priority" to sort by priority, otherwise reminders are sorted by due date.
    pub sort_by: Option<String>,
}

/// A column a reminder can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterColumn {
    DueDate,
    Status,
    Priority,
}

impl FilterColumn {
    fn as_sql(self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
            Self::Status => "status",
            Self::Priority => "priority",
        }
    }
}

/// The order to return reminders in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOrder {
    /// Earliest due date first.
    #[default]
    DueDate,
    /// Ascending by the priority text, i.e. "high", "low", then "medium".
    ///
    /// This is alphabetical order, not order of urgency.
    Priority,
}

impl ReminderOrder {
    fn from_sort_by(sort_by: Option<&str>) -> Self {
        match sort_by {
            Some("priority") => Self::Priority,
            _ => Self::DueDate,
        }
    }

    fn as_sql(self) -> &'static str {
        // The ID keeps the order stable for rows with equal sort keys.
        match self {
            Self::DueDate => "ORDER BY due_date ASC, id ASC",
            Self::Priority => "ORDER BY priority ASC, id ASC",
        }
    }
}

/// A parameterized query for reminders.
///
/// Rows must match every condition (logical AND) with exact equality. With no
/// conditions every row matches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReminderQuery {
    conditions: Vec<(FilterColumn, String)>,
    order: ReminderOrder,
}

impl ReminderQuery {
    /// Build a query from the parameters a client sent.
    pub fn from_filter(filter: &ReminderFilter) -> Self {
        let candidates = [
            (FilterColumn::DueDate, &filter.due_date),
            (FilterColumn::Status, &filter.status),
            (FilterColumn::Priority, &filter.priority),
        ];

        let conditions = candidates
            .into_iter()
            .filter_map(|(column, value)| match value.as_deref() {
                Some(value) if !value.is_empty() => Some((column, value.to_owned())),
                _ => None,
            })
            .collect();

        Self {
            conditions,
            order: ReminderOrder::from_sort_by(filter.sort_by.as_deref()),
        }
    }

    /// The order rows will be returned in.
    pub fn order(&self) -> ReminderOrder {
        self.order
    }

    /// The WHERE clause with one numbered placeholder per condition, or `None`
    /// if the query has no conditions.
    pub fn where_clause(&self) -> Option<String> {
        if self.conditions.is_empty() {
            return None;
        }

        let predicates: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("{} = ?{}", column.as_sql(), index + 1))
            .collect();

        Some(format!("WHERE {}", predicates.join(" AND ")))
    }

    /// The values to bind to the placeholders in [ReminderQuery::where_clause], in order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|(_, value)| value.as_str())
    }

    /// The complete SELECT statement.
    pub fn to_sql(&self) -> String {
        let mut query_string_parts = vec![
            "SELECT id, title, due_date, priority, status, created_at, updated_at \
            FROM payment_reminder"
                .to_owned(),
        ];

        if let Some(where_clause) = self.where_clause() {
            query_string_parts.push(where_clause);
        }

        query_string_parts.push(self.order.as_sql().to_owned());

        query_string_parts.join(" ")
    }
}

/// Get the reminders matching `query`.
///
/// Filter values are not validated. A value that does not match the column's
/// format simply matches no rows.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Reminder row mapping fails
pub fn get_reminders(query: &ReminderQuery, connection: &Connection) -> Result<Vec<Reminder>, Error> {
    connection
        .prepare(&query.to_sql())?
        .query_map(params_from_iter(query.parameters()), map_row_to_reminder)?
        .map(|reminder_result| reminder_result.map_err(Error::SqlError))
        .collect()
}
