//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g., '/users/{user_id}', are filled in by
//! `format_endpoint` in tests.

/// The route to create and list users.
pub const USERS: &str = "/users";
/// The route to access a single user.
pub const USER: &str = "/users/{user_id}";
/// The route for checking a user's email and password.
pub const LOG_IN: &str = "/login";
/// The route to create and list bank accounts.
pub const ACCOUNTS: &str = "/accounts";
/// The route to access a single bank account.
pub const ACCOUNT: &str = "/accounts/{c_id}";
/// The route to create and list (with filters) payment reminders.
pub const PAYMENT_REMINDERS: &str = "/payment-reminders";
/// The route to access a single payment reminder.
pub const PAYMENT_REMINDER: &str = "/payment-reminders/{reminder_id}";
/// The route to mark a payment reminder as completed.
pub const COMPLETE_PAYMENT_REMINDER: &str = "/payment-reminders/{reminder_id}/complete";
/// The route to create and list financial transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single financial transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for a user's income, expense and balance totals.
pub const TRANSACTION_TOTAL: &str = "/transtotal/{user_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
