//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use time::OffsetDateTime;

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    transaction::{TransactionStore, form::TransactionForm},
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 Created, the new transaction as JSON and its location.
/// A missing date defaults to the current local time.
pub async fn create_transaction_endpoint(
    State(store): State<TransactionStore>,
    Form(form): Form<TransactionForm>,
) -> Result<Response, Error> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let builder = form.into_new_transaction(now)?;

    let transaction = store
        .create(builder)
        .inspect_err(|error| tracing::error!("Could not create transaction: {error}"))?;

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(transaction),
    )
        .into_response())
}
