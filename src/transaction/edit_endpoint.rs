//! Defines the endpoint for overwriting an existing transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::Form;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionStore, form::TransactionForm},
};

/// A route handler that replaces every field of a transaction.
///
/// Responds with the updated transaction, or 404 if it does not exist.
pub async fn edit_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let builder = form.into_updated_transaction()?;

    store
        .update(transaction_id, builder)
        .inspect_err(|error| {
            tracing::error!("Could not update transaction {transaction_id}: {error}")
        })
        .map(Json)
}
