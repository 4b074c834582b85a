//! Application router configuration.

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, get_accounts_endpoint,
        update_account_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    reminder::{
        complete_reminder_endpoint, create_reminder_endpoint, delete_reminder_endpoint,
        get_reminders_endpoint, update_reminder_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint,
        get_transaction_summary_endpoint, get_transactions_endpoint, update_transaction_endpoint,
    },
    user::{
        create_user_endpoint, delete_user_endpoint, get_user_endpoint, get_users_endpoint,
        post_log_in, update_user_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Requests from any origin are allowed.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            endpoints::USERS,
            get(get_users_endpoint).post(create_user_endpoint),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint)
                .put(update_user_endpoint)
                .delete(delete_user_endpoint),
        )
        .route(endpoints::LOG_IN, post(post_log_in));

    let account_routes = Router::new()
        .route(
            endpoints::ACCOUNTS,
            get(get_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            put(update_account_endpoint).delete(delete_account_endpoint),
        );

    let reminder_routes = Router::new()
        .route(
            endpoints::PAYMENT_REMINDERS,
            get(get_reminders_endpoint).post(create_reminder_endpoint),
        )
        .route(
            endpoints::PAYMENT_REMINDER,
            put(update_reminder_endpoint).delete(delete_reminder_endpoint),
        )
        .route(
            endpoints::COMPLETE_PAYMENT_REMINDER,
            patch(complete_reminder_endpoint),
        );

    let transaction_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_TOTAL,
            get(get_transaction_summary_endpoint),
        );

    user_routes
        .merge(account_routes)
        .merge(reminder_routes)
        .merge(transaction_routes)
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
