//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{Error, database_id::TransactionId, transaction::TransactionStore};

/// A route handler for deleting a transaction.
///
/// Responds with 204 No Content, or 404 if the transaction does not exist.
pub async fn delete_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    match store.delete(transaction_id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(Error::NotFound) => {
            tracing::debug!("Tried to delete missing transaction {transaction_id}");
            Err(Error::NotFound)
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Error,
        transaction::{Transaction, TransactionKind, TransactionStore},
    };

    use super::delete_transaction_endpoint;

    #[tokio::test]
    async fn deletes_transaction() {
        let store = TransactionStore::open_in_memory().unwrap();
        let transaction = store
            .create(Transaction::build(TransactionKind::Expense, 1.23, "2025-10-26"))
            .unwrap();

        let status = delete_transaction_endpoint(State(store.clone()), Path(transaction.id)).await;

        assert_eq!(status, Ok(StatusCode::NO_CONTENT));
        assert_eq!(store.get(transaction.id), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_not_found() {
        let store = TransactionStore::open_in_memory().unwrap();

        let status = delete_transaction_endpoint(State(store), Path(1)).await;

        assert_eq!(status, Err(Error::NotFound));
    }
}
