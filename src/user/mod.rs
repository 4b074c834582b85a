//! Users of the application: registration, profile management and log-in.

mod core;
mod credentials;
mod endpoints;
mod log_in;

#[cfg(test)]
pub use core::User;
pub use core::{
    NewUser, UserID, UserUpdate, create_user, create_user_table, delete_user, get_user_by_id,
    get_user_credentials_by_email, get_users, update_user,
};
pub use credentials::{CredentialScheme, PlainTextCredentials};
pub use endpoints::{
    create_user_endpoint, delete_user_endpoint, get_user_endpoint, get_users_endpoint,
    update_user_endpoint,
};
pub use log_in::post_log_in;
