//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The SQLite backed `TransactionStore`
//! - Route handlers for creating, reading, editing and deleting transactions

mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod get_endpoint;
mod models;
mod store;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
pub use models::{DEFAULT_CATEGORY, Transaction, TransactionBuilder, TransactionKind};
pub use store::{SortOrder, TransactionStore, create_transaction_table};
