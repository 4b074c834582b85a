//! The route handlers for registering and managing users.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, ErrorMessages, db::lock_connection};

use super::{
    CredentialScheme, NewUser, UserID, UserUpdate, create_user, delete_user, get_user_by_id,
    get_users, update_user,
};

/// The state needed to manage users.
#[derive(Debug, Clone)]
pub struct UserState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// Encodes passwords before they are stored.
    pub credentials: Arc<dyn CredentialScheme>,
}

impl FromRef<AppState> for UserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            credentials: state.credentials.clone(),
        }
    }
}

/// A route handler for registering a new user.
pub async fn create_user_endpoint(
    State(state): State<UserState>,
    Json(new_user): Json<NewUser>,
) -> Response {
    let result = state
        .credentials
        .encode(&new_user.password)
        .and_then(|stored_password| {
            lock_connection(&state.db_connection).and_then(|connection| {
                create_user(
                    &new_user.email,
                    &new_user.username,
                    &stored_password,
                    &connection,
                )
            })
        });

    match result {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "User not found",
            failure: "Failed to create user",
        }),
    }
}

/// A route handler for listing every user.
pub async fn get_users_endpoint(State(state): State<UserState>) -> Response {
    let result = lock_connection(&state.db_connection).and_then(|connection| get_users(&connection));

    match result {
        Ok(users) => Json(users).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "User not found",
            failure: "Failed to fetch users",
        }),
    }
}

/// A route handler for fetching a single user.
pub async fn get_user_endpoint(
    State(state): State<UserState>,
    Path(user_id): Path<UserID>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_user_by_id(user_id, &connection));

    match result {
        Ok(user) => Json(user).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "User not found",
            failure: "Failed to fetch user",
        }),
    }
}

/// A route handler for changing a user's username and email.
pub async fn update_user_endpoint(
    State(state): State<UserState>,
    Path(user_id): Path<UserID>,
    Json(update): Json<UserUpdate>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| update_user(user_id, &update, &connection));

    match result {
        Ok(user) => Json(user).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "User not found",
            failure: "Failed to update user",
        }),
    }
}

/// A route handler for deleting a user.
pub async fn delete_user_endpoint(
    State(state): State<UserState>,
    Path(user_id): Path<UserID>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_user(user_id, &connection));

    match result {
        Ok(()) => Json(json!({ "message": "User deleted successfully" })).into_response(),
        Err(error) => error.into_json_response(ErrorMessages {
            not_found: "User not found",
            failure: "Failed to delete user",
        }),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::get_test_server,
        user::{User, UserID},
    };

    async fn register(server: &TestServer, email: &str, username: &str) -> User {
        let response = server
            .post(endpoints::USERS)
            .json(&json!({
                "email": email,
                "username": username,
                "password": "hunter2",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<User>()
    }

    #[tokio::test]
    async fn create_user_hides_password() {
        let server = get_test_server();

        let response = server
            .post(endpoints::USERS)
            .json(&json!({
                "email": "ana@example.com",
                "username": "ana",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "id": 1,
            "email": "ana@example.com",
            "username": "ana",
        }));
    }

    #[tokio::test]
    async fn create_user_with_taken_email_fails() {
        let server = get_test_server();
        register(&server, "ana@example.com", "ana").await;

        let response = server
            .post(endpoints::USERS)
            .json(&json!({
                "email": "ana@example.com",
                "username": "impostor",
                "password": "letmein",
            }))
            .await;

        response.assert_status_internal_server_error();
        response.assert_json(&json!({ "error": "Failed to create user" }));
    }

    #[tokio::test]
    async fn list_and_get_users() {
        let server = get_test_server();
        let ana = register(&server, "ana@example.com", "ana").await;
        let bo = register(&server, "bo@example.com", "bo").await;

        let users = server.get(endpoints::USERS).await.json::<Vec<User>>();
        let fetched = server
            .get(&format_endpoint(endpoints::USER, bo.id.as_i64()))
            .await
            .json::<User>();

        assert_eq!(users, vec![ana, bo.clone()]);
        assert_eq!(fetched, bo);
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::USER, 99)).await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn update_user_changes_fields() {
        let server = get_test_server();
        let user = register(&server, "ana@example.com", "ana").await;

        let response = server
            .put(&format_endpoint(endpoints::USER, user.id.as_i64()))
            .json(&json!({ "username": "anastasia", "email": "anastasia@example.com" }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<User>(),
            User {
                id: user.id,
                email: "anastasia@example.com".to_owned(),
                username: "anastasia".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let server = get_test_server();

        server
            .put(&format_endpoint(endpoints::USER, 5))
            .json(&json!({ "username": "ghost", "email": "ghost@example.com" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_user_then_fetch_is_not_found() {
        let server = get_test_server();
        let user = register(&server, "ana@example.com", "ana").await;
        let path = format_endpoint(endpoints::USER, user.id.as_i64());

        let response = server.delete(&path).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "User deleted successfully" }));
        server.get(&path).await.assert_status_not_found();
        server
            .delete(&format_endpoint(endpoints::USER, UserID::new(42).as_i64()))
            .await
            .assert_json(&json!({ "error": "User not found" }));
    }
}
