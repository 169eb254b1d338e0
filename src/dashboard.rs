//! The dashboard endpoint: recent transactions and overall totals.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    ledger::{DEFAULT_DASHBOARD_LIMIT, Dashboard, get_dashboard},
    transaction::TransactionStore,
};

/// The query string for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// How many recent transactions to include.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_DASHBOARD_LIMIT
}

/// Respond with the most recent transactions and the totals over all transactions.
///
/// A `limit` that is not a non-negative integer is an [Error::InvalidInput].
pub async fn get_dashboard_endpoint(
    State(store): State<TransactionStore>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<Dashboard>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidInput(rejection.body_text()))?;

    get_dashboard(&store, query.limit)
        .inspect_err(|error| tracing::error!("Could not build dashboard: {error}"))
        .map(Json)
}
