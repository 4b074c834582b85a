//! Payment reminders: scheduled obligations with a due date, priority and
//! completion status.
//!
//! This module contains:
//! - The `Reminder` model and the SQL for storing it
//! - The filter/sort query builder used by the reminder list
//! - The due date policy shared by the create and update endpoints
//! - The route handlers

mod core;
mod due_date;
mod endpoints;
mod query;

#[cfg(test)]
pub use core::Reminder;
pub use core::{
    Priority, ReminderData, ReminderId, ReminderStatus, complete_reminder, create_reminder,
    create_reminder_table, delete_reminder, update_reminder,
};
pub use due_date::validate_due_date;
pub use endpoints::{
    complete_reminder_endpoint, create_reminder_endpoint, delete_reminder_endpoint,
    get_reminders_endpoint, update_reminder_endpoint,
};
pub use query::{ReminderFilter, ReminderQuery, get_reminders};
