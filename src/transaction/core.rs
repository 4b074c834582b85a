//! Defines the core data models and database queries for financial transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseId, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// The ID of a financial transaction.
pub type TransactionId = DatabaseId;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The text stored in the database and used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text was neither "income" nor "expense".
#[derive(Debug, thiserror::Error)]
#[error("unknown transaction type \"{0}\"")]
pub struct UnknownTransactionType(String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(UnknownTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A single dated movement of money for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user the transaction belongs to.
    pub user_id: UserID,
    /// A free text category, e.g. "groceries".
    pub category: String,
    /// The amount of money, always with two decimal places.
    pub amount: Decimal,
    /// Whether the amount was earned or spent.
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    pub transaction_date: Date,
}

/// The client supplied fields for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    /// The user the transaction belongs to.
    pub user_id: UserID,
    /// A free text category, e.g. "groceries".
    pub category: String,
    /// A positive amount, rounded to cents when stored.
    pub amount: Decimal,
    /// Whether the amount was earned or spent.
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    pub transaction_date: Date,
}

// ============================================================================
// AMOUNTS
// ============================================================================

/// The largest storable amount in cents, i.e. 99,999,999.99.
const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// Convert `amount` to a whole number of cents for storage.
///
/// Amounts with more than two decimal places are rounded half away from zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the amount has more than eight digits
/// before the decimal point.
pub(crate) fn amount_to_cents(amount: Decimal) -> Result<i64, Error> {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .filter(|cents| cents.abs() <= MAX_AMOUNT_CENTS)
        .ok_or(Error::InvalidAmount(amount))
}

/// Convert a stored number of cents back to an amount with two decimal places.
pub(crate) fn cents_to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const TRANSACTION_COLUMNS: &str =
    "id, user_id, category, amount_cents, transaction_type, transaction_date";

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS financial_transaction (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            category TEXT NOT NULL,
            amount_cents INTEGER NOT NULL,
            transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense')),
            transaction_date TEXT NOT NULL
        )",
        (),
    )?;

    // Speeds up the per-user totals.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_financial_transaction_user_id
        ON financial_transaction(user_id)",
        (),
    )?;

    Ok(())
}

pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        category: row.get(2)?,
        amount: cents_to_amount(row.get(3)?),
        transaction_type: row.get(4)?,
        transaction_date: row.get(5)?,
    })
}

/// Insert a new transaction.
///
/// # Errors
/// Returns an:
/// - [Error::InvalidAmount] if the amount is too large to store,
/// - [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    data: &TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let amount_cents = amount_to_cents(data.amount)?;

    let transaction = connection.query_one(
        &format!(
            "INSERT INTO financial_transaction
             (user_id, category, amount_cents, transaction_type, transaction_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {TRANSACTION_COLUMNS}"
        ),
        params![
            data.user_id.as_i64(),
            data.category,
            amount_cents,
            data.transaction_type,
            data.transaction_date
        ],
        map_transaction_row,
    )?;

    Ok(transaction)
}

/// Get every transaction, most recent transaction date first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM financial_transaction
             ORDER BY transaction_date DESC, id DESC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Replace every client supplied field of the transaction `id`.
///
/// # Errors
/// Returns an:
/// - [Error::InvalidAmount] if the amount is too large to store,
/// - [Error::NotFound] if `id` does not refer to a transaction,
/// - [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    data: &TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let amount_cents = amount_to_cents(data.amount)?;

    let transaction = connection.query_one(
        &format!(
            "UPDATE financial_transaction
             SET user_id = ?1, category = ?2, amount_cents = ?3, transaction_type = ?4,
                 transaction_date = ?5
             WHERE id = ?6
             RETURNING {TRANSACTION_COLUMNS}"
        ),
        params![
            data.user_id.as_i64(),
            data.category,
            amount_cents,
            data.transaction_type,
            data.transaction_date,
            id
        ],
        map_transaction_row,
    )?;

    Ok(transaction)
}

/// Delete the transaction `id`.
///
/// # Errors
/// Returns an:
/// - [Error::NotFound] if `id` does not refer to a transaction,
/// - [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM financial_transaction WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod amount_tests {
    use rust_decimal::Decimal;

    use crate::Error;

    use super::{amount_to_cents, cents_to_amount};

    #[test]
    fn whole_cents_are_exact() {
        assert_eq!(amount_to_cents(Decimal::new(2550, 2)), Ok(2550));
        assert_eq!(amount_to_cents(Decimal::new(100, 0)), Ok(10000));
        assert_eq!(amount_to_cents(Decimal::new(-4, 1)), Ok(-40));
    }

    #[test]
    fn extra_decimal_places_round_half_away_from_zero() {
        assert_eq!(amount_to_cents(Decimal::new(10005, 3)), Ok(1001));
        assert_eq!(amount_to_cents(Decimal::new(-10005, 3)), Ok(-1001));
        assert_eq!(amount_to_cents(Decimal::new(10004, 3)), Ok(1000));
    }

    #[test]
    fn largest_amount_is_accepted() {
        assert_eq!(
            amount_to_cents(Decimal::new(9_999_999_999, 2)),
            Ok(9_999_999_999)
        );
    }

    #[test]
    fn too_many_integer_digits_is_rejected() {
        let amount = Decimal::new(100_000_000, 0);

        assert_eq!(amount_to_cents(amount), Err(Error::InvalidAmount(amount)));
    }

    #[test]
    fn cents_convert_back_with_two_decimal_places() {
        let amount = cents_to_amount(4000);

        assert_eq!(amount, Decimal::new(4000, 2));
        assert_eq!(amount.to_string(), "40.00");
    }
}
