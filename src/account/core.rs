use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

pub type AccountId = DatabaseId;

/// The balances a customer holds across their bank products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The customer/account ID.
    pub c_id: AccountId,
    pub savings: i64,
    pub chequing: i64,
    pub creditcard: i64,
    /// Loyalty points, not currency.
    pub scenepoints: i64,
    pub balance: i64,
}

/// The client-supplied fields of an [Account].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    pub savings: i64,
    pub chequing: i64,
    pub creditcard: i64,
    pub scenepoints: i64,
    pub balance: i64,
}

/// Rows inserted by [seed_sample_accounts].
const SAMPLE_ACCOUNTS: [AccountData; 3] = [
    AccountData {
        savings: 3000,
        chequing: 2000,
        creditcard: 200,
        scenepoints: 23000,
        balance: 5000,
    },
    AccountData {
        savings: 4000,
        chequing: 2000,
        creditcard: 300,
        scenepoints: 5467364,
        balance: 6000,
    },
    AccountData {
        savings: 5000,
        chequing: 2000,
        creditcard: 400,
        scenepoints: 4677,
        balance: 7000,
    },
];

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            c_id INTEGER PRIMARY KEY AUTOINCREMENT,
            savings INTEGER NOT NULL,
            chequing INTEGER NOT NULL,
            creditcard INTEGER NOT NULL,
            scenepoints INTEGER NOT NULL,
            balance INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let c_id = row.get(0)?;
    let savings = row.get(1)?;
    let chequing = row.get(2)?;
    let creditcard = row.get(3)?;
    let scenepoints = row.get(4)?;
    let balance = row.get(5)?;

    Ok(Account {
        c_id,
        savings,
        chequing,
        creditcard,
        scenepoints,
        balance,
    })
}

/// Insert the three sample accounts if the account table has no rows.
///
/// Returns the number of accounts inserted, which is zero when the table
/// already had data.
///
/// # Errors
/// Returns [Error::SqlError] if the table could not be read or written.
pub fn seed_sample_accounts(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_one("SELECT COUNT(*) FROM account", [], |row| row.get(0))?;

    if count > 0 {
        return Ok(0);
    }

    for account in &SAMPLE_ACCOUNTS {
        create_account(account, connection)?;
    }

    tracing::info!("Seeded {} sample accounts", SAMPLE_ACCOUNTS.len());

    Ok(SAMPLE_ACCOUNTS.len())
}

/// Insert a new account and return it with its assigned `c_id`.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn create_account(data: &AccountData, connection: &Connection) -> Result<Account, Error> {
    let account = connection.query_one(
        "INSERT INTO account (savings, chequing, creditcard, scenepoints, balance)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING c_id, savings, chequing, creditcard, scenepoints, balance",
        params![
            data.savings,
            data.chequing,
            data.creditcard,
            data.scenepoints,
            data.balance
        ],
        map_row_to_account,
    )?;

    Ok(account)
}

/// Get every account ordered by `c_id`.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn get_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT c_id, savings, chequing, creditcard, scenepoints, balance
             FROM account ORDER BY c_id",
        )?
        .query_map([], map_row_to_account)?
        .map(|account_result| account_result.map_err(Error::SqlError))
        .collect()
}

/// Replace every balance of the account `c_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `c_id` does not exist, or [Error::SqlError]
/// for any other SQL error.
pub fn update_account(
    c_id: AccountId,
    data: &AccountData,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .query_one(
            "UPDATE account
             SET savings = ?1, chequing = ?2, creditcard = ?3, scenepoints = ?4, balance = ?5
             WHERE c_id = ?6
             RETURNING c_id, savings, chequing, creditcard, scenepoints, balance",
            params![
                data.savings,
                data.chequing,
                data.creditcard,
                data.scenepoints,
                data.balance,
                c_id
            ],
            map_row_to_account,
        )
        .map_err(|error| error.into())
}

/// Delete the account `c_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `c_id` does not exist, or [Error::SqlError]
/// for any other SQL error.
pub fn delete_account(c_id: AccountId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM account WHERE c_id = ?1", params![c_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_account_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_account_table(&connection));
    }
}


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::Error;

    use super::{
        Account, AccountData, create_account, create_account_table, delete_account, get_accounts,
        update_account,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_account_table(&connection).unwrap();
        connection
    }

    fn account_data(balance: i64) -> AccountData {
        AccountData {
            savings: 100,
            chequing: 200,
            creditcard: 300,
            scenepoints: 400,
            balance,
        }
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let connection = get_test_connection();

        let first = create_account(&account_data(1), &connection).unwrap();
        let second = create_account(&account_data(2), &connection).unwrap();

        assert_eq!(first.c_id, 1);
        assert_eq!(second.c_id, 2);
        assert_eq!(get_accounts(&connection).unwrap(), vec![first, second]);
    }

    #[test]
    fn update_replaces_balances() {
        let connection = get_test_connection();
        let account = create_account(&account_data(1), &connection).unwrap();

        let updated = update_account(account.c_id, &account_data(99), &connection).unwrap();

        assert_eq!(
            updated,
            Account {
                c_id: account.c_id,
                savings: 100,
                chequing: 200,
                creditcard: 300,
                scenepoints: 400,
                balance: 99,
            }
        );
    }

    #[test]
    fn update_missing_account_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(
            update_account(12, &account_data(1), &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_removes_only_that_account() {
        let connection = get_test_connection();
        let first = create_account(&account_data(1), &connection).unwrap();
        let second = create_account(&account_data(2), &connection).unwrap();

        delete_account(first.c_id, &connection).unwrap();

        assert_eq!(get_accounts(&connection).unwrap(), vec![second]);
        assert_eq!(delete_account(first.c_id, &connection), Err(Error::NotFound));
    }
}
