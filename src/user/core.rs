//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application, as shown to clients.
///
/// The stored password is deliberately not part of this type, see [UserCredentials].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The address the user logs in with, unique across users.
    pub email: String,
    /// The name shown in greetings.
    pub username: String,
}

/// A user together with their password as stored by the
/// [CredentialScheme](super::CredentialScheme).
#[derive(Debug, Clone, PartialEq)]
pub struct UserCredentials {
    pub user: User,
    pub stored_password: String,
}

/// The data for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    /// The password as entered by the user.
    pub password: String,
}

/// The fields of a user that can be changed after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: UserID::new(row.get(0)?),
        email: row.get(1)?,
        username: row.get(2)?,
    })
}

/// Insert a new user.
///
/// `stored_password` must already have been encoded by the credential scheme.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, e.g. the
/// email is already registered.
pub fn create_user(
    email: &str,
    username: &str,
    stored_password: &str,
    connection: &Connection,
) -> Result<User, Error> {
    let user = connection.query_one(
        "INSERT INTO user (email, username, password) VALUES (?1, ?2, ?3)
         RETURNING id, email, username",
        params![email, username, stored_password],
        map_row_to_user,
    )?;

    Ok(user)
}

/// Get every user, ordered by ID.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, email, username FROM user ORDER BY id")?
        .query_map([], map_row_to_user)?
        .map(|user_result| user_result.map_err(Error::SqlError))
        .collect()
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .query_one(
            "SELECT id, email, username FROM user WHERE id = ?1",
            params![user_id.as_i64()],
            map_row_to_user,
        )
        .map_err(|error| error.into())
}

/// Get the user registered with `email` along with their stored password.
///
/// # Errors
///
/// This function will return an error if:
/// - no user is registered with `email`.
/// - there was an error trying to access the store.
pub fn get_user_credentials_by_email(
    email: &str,
    connection: &Connection,
) -> Result<UserCredentials, Error> {
    connection
        .query_one(
            "SELECT id, email, username, password FROM user WHERE email = ?1",
            params![email],
            |row| {
                Ok(UserCredentials {
                    user: map_row_to_user(row)?,
                    stored_password: row.get(3)?,
                })
            },
        )
        .map_err(|error| error.into())
}

/// Change the username and email of the user `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn update_user(
    user_id: UserID,
    update: &UserUpdate,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .query_one(
            "UPDATE user SET username = ?1, email = ?2 WHERE id = ?3
             RETURNING id, email, username",
            params![update.username, update.email, user_id.as_i64()],
            map_row_to_user,
        )
        .map_err(|error| error.into())
}

/// Delete the user `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn delete_user(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM user WHERE id = ?1", params![user_id.as_i64()])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
