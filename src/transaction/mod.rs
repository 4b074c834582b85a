//! Financial transactions: dated movements of money classified as income or
//! expense, and the per-user totals computed from them.

mod core;
mod endpoints;
mod summary;

#[cfg(test)]
pub use core::Transaction;
pub use core::{
    TransactionData, TransactionId, TransactionType, create_transaction,
    create_transaction_table, delete_transaction, get_transactions, update_transaction,
};
pub use endpoints::{
    create_transaction_endpoint, delete_transaction_endpoint, get_transaction_summary_endpoint,
    get_transactions_endpoint, update_transaction_endpoint,
};
#[cfg(test)]
pub use summary::TransactionSummary;
pub use summary::get_transaction_summary;
