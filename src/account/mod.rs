//! Bank accounts holding a customer's savings, chequing, credit card and loyalty point balances.

mod core;
mod endpoints;

#[cfg(test)]
pub use core::Account;
pub use core::{
    AccountData, AccountId, create_account, create_account_table, delete_account, get_accounts,
    seed_sample_accounts, update_account,
};
pub use endpoints::{
    create_account_endpoint, delete_account_endpoint, get_accounts_endpoint,
    update_account_endpoint,
};
