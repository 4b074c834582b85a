//! Per-user income, expense and balance totals.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, user::UserID};

use super::core::{TransactionType, cents_to_amount};

/// The totals of every transaction belonging to one user.
///
/// `balance` is always exactly `total_income - total_expense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub user_id: UserID,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Sum the income and expenses of the user `user_id`.
///
/// Sums are taken over whole cents in SQLite, so no precision is lost.
///
/// # Errors
/// Returns an:
/// - [Error::NotFound] if the user has no transactions. A user without any
///   activity has no summary rather than a summary of zeros.
/// - [Error::SqlError] if there is some other SQL error.
pub fn get_transaction_summary(
    user_id: UserID,
    connection: &Connection,
) -> Result<TransactionSummary, Error> {
    let summary = connection.query_one(
        "SELECT
            user_id,
            SUM(CASE WHEN transaction_type = ?2 THEN amount_cents ELSE 0 END),
            SUM(CASE WHEN transaction_type = ?3 THEN amount_cents ELSE 0 END),
            SUM(CASE WHEN transaction_type = ?2 THEN amount_cents ELSE -amount_cents END)
        FROM financial_transaction
        WHERE user_id = ?1
        GROUP BY user_id",
        params![
            user_id.as_i64(),
            TransactionType::Income,
            TransactionType::Expense
        ],
        |row| {
            Ok(TransactionSummary {
                user_id: UserID::new(row.get(0)?),
                total_income: cents_to_amount(row.get(1)?),
                total_expense: cents_to_amount(row.get(2)?),
                balance: cents_to_amount(row.get(3)?),
            })
        },
    )?;

    Ok(summary)
}
