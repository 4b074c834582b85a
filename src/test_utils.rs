#![allow(missing_docs)]

use std::sync::Arc;

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, PlainTextCredentials, build_router};

pub(crate) fn get_test_state() -> AppState {
    let db_connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(db_connection, "Etc/UTC", Arc::new(PlainTextCredentials))
        .expect("Could not create app state.")
}

pub(crate) fn get_test_server() -> TestServer {
    TestServer::new(build_router(get_test_state())).expect("Could not create test server.")
}
