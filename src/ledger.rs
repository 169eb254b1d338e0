//! The queries the HTTP layer needs, composed from the store, the
//! aggregations and the CSV encoder.
//!
//! Nothing here is cached, every call reads the transactions again.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    csv_export::encode_csv,
    summary::{CategoryTotal, Totals, expense_by_category, totals},
    transaction::{SortOrder, Transaction, TransactionStore},
};

/// The number of recent transactions shown on the dashboard by default.
pub const DEFAULT_DASHBOARD_LIMIT: u32 = 10;

/// The most recent transactions and the totals over all transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// The most recent transactions, newest first.
    pub recent: Vec<Transaction>,
    /// Totals over every transaction, not just the recent ones.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Get the `limit` most recent transactions and the totals over all transactions.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_dashboard(store: &TransactionStore, limit: u32) -> Result<Dashboard, Error> {
    let recent = store.list_recent(limit)?;
    let totals = get_summary(store)?;

    Ok(Dashboard { recent, totals })
}

/// Get the income, expense and balance over all transactions.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_summary(store: &TransactionStore) -> Result<Totals, Error> {
    let transactions = store.list_all(SortOrder::Descending)?;

    Ok(totals(&transactions))
}

/// Get the total spent per category, largest first.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_category_breakdown(store: &TransactionStore) -> Result<Vec<CategoryTotal>, Error> {
    let transactions = store.list_all(SortOrder::Descending)?;

    Ok(expense_by_category(&transactions))
}

/// Get transactions newest first, filtered by `query` if it is not empty.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_transactions(store: &TransactionStore, query: &str) -> Result<Vec<Transaction>, Error> {
    store.search(query)
}

/// Get every transaction, newest first, encoded as CSV.
///
/// # Errors
/// Returns an error if the store could not be read or the CSV could not be written.
pub fn export(store: &TransactionStore) -> Result<Vec<u8>, Error> {
    let transactions = store.list_all(SortOrder::Descending)?;

    encode_csv(&transactions)
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        summary::{CategoryTotal, Totals},
        transaction::{SortOrder, Transaction, TransactionKind, TransactionStore},
    };

    use super::{export, get_category_breakdown, get_dashboard, get_summary, get_transactions};

    fn get_test_store() -> TransactionStore {
        TransactionStore::open_in_memory().expect("could not create in-memory store")
    }

    fn create_salary_and_lunch(store: &TransactionStore) -> (Transaction, Transaction) {
        let salary = store
            .create(
                Transaction::build(TransactionKind::Income, 1000.0, "2024-01-01")
                    .category("salary")
                    .note(Some("")),
            )
            .unwrap();
        let lunch = store
            .create(
                Transaction::build(TransactionKind::Expense, 200.0, "2024-01-02")
                    .category("food")
                    .note(Some("lunch")),
            )
            .unwrap();

        (salary, lunch)
    }

    #[test]
    fn summary_and_breakdown_for_salary_and_lunch() {
        let store = get_test_store();
        create_salary_and_lunch(&store);

        assert_eq!(
            get_summary(&store),
            Ok(Totals {
                income: 1000.0,
                expense: 200.0,
                balance: 800.0
            })
        );
        assert_eq!(
            get_category_breakdown(&store),
            Ok(vec![CategoryTotal {
                category: "food".to_owned(),
                total: 200.0
            }])
        );
    }

    #[test]
    fn summary_follows_updated_kind() {
        let store = get_test_store();
        let (_, lunch) = create_salary_and_lunch(&store);

        store
            .update(
                lunch.id,
                Transaction::build(TransactionKind::Income, lunch.amount, &lunch.date)
                    .category(&lunch.category)
                    .note(lunch.note.as_deref()),
            )
            .unwrap();

        assert_eq!(
            get_summary(&store),
            Ok(Totals {
                income: 1200.0,
                expense: 0.0,
                balance: 1200.0
            })
        );
        assert_eq!(get_category_breakdown(&store), Ok(vec![]));
    }

    #[test]
    fn deleting_missing_id_does_not_change_summary() {
        let store = get_test_store();
        create_salary_and_lunch(&store);
        let before = get_summary(&store).unwrap();

        assert_eq!(store.delete(1234), Err(Error::NotFound));
        assert_eq!(get_summary(&store), Ok(before));
    }

    #[test]
    fn empty_store_has_zero_summary() {
        let store = get_test_store();

        assert_eq!(get_summary(&store), Ok(Totals::default()));
        assert_eq!(get_category_breakdown(&store), Ok(vec![]));
    }

    #[test]
    fn dashboard_limits_recent_but_totals_everything() {
        let store = get_test_store();
        for day in 1..=15 {
            store
                .create(Transaction::build(
                    TransactionKind::Income,
                    10.0,
                    &format!("2024-01-{day:02}"),
                ))
                .unwrap();
        }

        let dashboard = get_dashboard(&store, 10).unwrap();

        assert_eq!(dashboard.recent.len(), 10);
        assert_eq!(dashboard.recent[0].date, "2024-01-15");
        assert_eq!(dashboard.recent[9].date, "2024-01-06");
        assert_eq!(dashboard.totals.income, 150.0);
    }

    #[test]
    fn dashboard_serializes_totals_at_top_level() {
        let store = get_test_store();
        create_salary_and_lunch(&store);

        let json = serde_json::to_value(get_dashboard(&store, 1).unwrap()).unwrap();

        assert_eq!(json["income"], 1000.0);
        assert_eq!(json["expense"], 200.0);
        assert_eq!(json["balance"], 800.0);
        assert_eq!(json["recent"].as_array().unwrap().len(), 1);
        assert_eq!(json["recent"][0]["category"], "food");
    }

    #[test]
    fn empty_query_lists_everything() {
        let store = get_test_store();
        create_salary_and_lunch(&store);

        assert_eq!(
            get_transactions(&store, ""),
            store.list_all(SortOrder::Descending)
        );
    }

    #[test]
    fn export_uses_list_order() {
        let store = get_test_store();
        create_salary_and_lunch(&store);

        let csv = String::from_utf8(export(&store).unwrap()).unwrap();

        assert_eq!(
            csv,
            "id,type,amount,category,date,note\n\
            2,expense,200,food,2024-01-02,lunch\n\
            1,income,1000,salary,2024-01-01,\n"
        );
    }
}
