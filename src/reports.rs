//! Endpoints for chart data and the CSV download.

use axum::{
    Json,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    Error, ledger,
    summary::{CategoryChart, Totals},
    transaction::TransactionStore,
};

/// The name of the file offered by the CSV download.
pub const EXPORT_FILE_NAME: &str = "transactions.csv";

/// Respond with `{"income", "expense", "balance"}` over all transactions.
pub async fn get_summary_endpoint(
    State(store): State<TransactionStore>,
) -> Result<Json<Totals>, Error> {
    ledger::get_summary(&store)
        .inspect_err(|error| tracing::error!("Could not get summary: {error}"))
        .map(Json)
}

/// Respond with `{"labels", "values"}` of expense totals per category, largest first.
pub async fn get_category_data_endpoint(
    State(store): State<TransactionStore>,
) -> Result<Json<CategoryChart>, Error> {
    ledger::get_category_breakdown(&store)
        .inspect_err(|error| tracing::error!("Could not get category breakdown: {error}"))
        .map(|breakdown| Json(CategoryChart::from(breakdown)))
}

/// Respond with every transaction as a CSV attachment.
pub async fn get_export_endpoint(State(store): State<TransactionStore>) -> Result<Response, Error> {
    let csv = ledger::export(&store)
        .inspect_err(|error| tracing::error!("Could not export transactions: {error}"))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
