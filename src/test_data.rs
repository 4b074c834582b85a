//! Sample rows for a database used in manual testing.

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Duration};

use crate::{
    Error,
    account::seed_sample_accounts,
    reminder::{Priority, ReminderData, ReminderStatus, create_reminder},
    transaction::{TransactionData, TransactionType, create_transaction},
    user::{CredentialScheme, UserID, create_user},
};

/// The email of the user created by [seed_test_data].
pub const TEST_USER_EMAIL: &str = "test@example.com";
/// The password of the user created by [seed_test_data].
pub const TEST_USER_PASSWORD: &str = "test";

/// Fill an initialized database with sample accounts, a test user, pending
/// reminders due after `today` and a few transactions for the test user.
///
/// Rows are written through the same functions the server uses, so the
/// password is encoded by `credentials` and amounts are stored as cents.
///
/// Returns the ID of the test user.
///
/// # Errors
/// Returns an [Error] if any row could not be written, e.g. the test user
/// already exists.
pub fn seed_test_data(
    connection: &Connection,
    credentials: &dyn CredentialScheme,
    today: Date,
) -> Result<UserID, Error> {
    seed_sample_accounts(connection)?;

    let password = credentials.encode(TEST_USER_PASSWORD)?;
    let user = create_user(TEST_USER_EMAIL, "test", &password, connection)?;

    for (title, days_ahead, priority) in [
        ("Rent", 3, Priority::High),
        ("Power bill", 10, Priority::Medium),
        ("Streaming subscription", 21, Priority::Low),
    ] {
        create_reminder(
            &ReminderData {
                title: title.to_owned(),
                due_date: today + Duration::days(days_ahead),
                priority,
                status: ReminderStatus::Pending,
            },
            connection,
        )?;
    }

    for (category, amount_cents, transaction_type, days_ago) in [
        ("salary", 420_000, TransactionType::Income, 14),
        ("rent", 180_000, TransactionType::Expense, 12),
        ("groceries", 12_550, TransactionType::Expense, 5),
        ("refund", 2_999, TransactionType::Income, 1),
    ] {
        create_transaction(
            &TransactionData {
                user_id: user.id,
                category: category.to_owned(),
                amount: Decimal::new(amount_cents, 2),
                transaction_type,
                transaction_date: today - Duration::days(days_ago),
            },
            connection,
        )?;
    }

    Ok(user.id)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error, PlainTextCredentials,
        account::get_accounts,
        db::initialize,
        reminder::{ReminderFilter, ReminderQuery, get_reminders},
        transaction::get_transaction_summary,
        user::{CredentialScheme, get_user_credentials_by_email},
    };

    use super::{TEST_USER_EMAIL, TEST_USER_PASSWORD, seed_test_data};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn seeds_every_table() {
        let conn = get_test_connection();

        let user_id = seed_test_data(&conn, &PlainTextCredentials, date!(2025 - 06 - 01)).unwrap();

        let reminders =
            get_reminders(&ReminderQuery::from_filter(&ReminderFilter::default()), &conn).unwrap();
        let summary = get_transaction_summary(user_id, &conn).unwrap();
        assert_eq!(get_accounts(&conn).unwrap().len(), 3);
        assert_eq!(reminders.len(), 3);
        assert!(reminders.iter().all(|r| r.due_date > date!(2025 - 06 - 01)));
        assert_eq!(summary.total_income, Decimal::new(422_999, 2));
        assert_eq!(summary.total_expense, Decimal::new(192_550, 2));
        assert_eq!(summary.balance, Decimal::new(230_449, 2));
    }

    #[test]
    fn test_user_password_goes_through_credential_scheme() {
        let conn = get_test_connection();

        seed_test_data(&conn, &PlainTextCredentials, date!(2025 - 06 - 01)).unwrap();

        let credentials = get_user_credentials_by_email(TEST_USER_EMAIL, &conn).unwrap();
        assert_eq!(
            PlainTextCredentials.verify(TEST_USER_PASSWORD, &credentials.stored_password),
            Ok(true)
        );
    }

    #[test]
    fn seeding_twice_fails_on_duplicate_user() {
        let conn = get_test_connection();
        seed_test_data(&conn, &PlainTextCredentials, date!(2025 - 06 - 01)).unwrap();

        let result = seed_test_data(&conn, &PlainTextCredentials, date!(2025 - 06 - 01));

        assert!(matches!(result, Err(Error::SqlError(_))));
    }
}
