//! Suggested categories offered when entering a transaction.

use axum::Json;
use serde::Serialize;

/// Categories suggested for income.
pub const INCOME_CATEGORIES: [&str; 5] = ["salary", "bonus", "interest", "gift", "other"];

/// Categories suggested for expenses.
pub const EXPENSE_CATEGORIES: [&str; 6] = ["food", "rent", "travel", "shopping", "bills", "other"];

/// The suggested categories for each transaction type.
///
/// These are only suggestions, any category text is accepted.
#[derive(Debug, Serialize, PartialEq)]
pub struct CategorySuggestions {
    income: &'static [&'static str],
    expense: &'static [&'static str],
}

/// Respond with the suggested categories for each transaction type.
pub async fn get_categories_endpoint() -> Json<CategorySuggestions> {
    Json(CategorySuggestions {
        income: &INCOME_CATEGORIES,
        expense: &EXPENSE_CATEGORIES,
    })
}

#[cfg(test)]
mod tests {
    use super::get_categories_endpoint;

    #[tokio::test]
    async fn lists_suggestions_by_type() {
        let json = serde_json::to_value(get_categories_endpoint().await.0).unwrap();

        assert_eq!(json["income"][0], "salary");
        assert_eq!(json["expense"].as_array().unwrap().len(), 6);
    }
}
