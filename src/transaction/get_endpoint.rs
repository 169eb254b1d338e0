//! Endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    database_id::TransactionId,
    ledger::get_transactions,
    transaction::{Transaction, TransactionStore},
};

/// A route handler that responds with a single transaction as JSON.
pub async fn get_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    store.get(transaction_id).map(Json)
}

/// The query string for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Text to search for in the category and note, empty for all transactions.
    #[serde(default)]
    pub q: String,
}

/// A route handler that lists transactions newest first, optionally
/// filtered by the search text `q`.
pub async fn get_transactions_endpoint(
    State(store): State<TransactionStore>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    get_transactions(&store, &query.q)
        .inspect_err(|error| tracing::error!("Could not list transactions: {error}"))
        .map(Json)
}
