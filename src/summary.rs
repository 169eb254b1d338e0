//! Aggregates transactions into totals and per-category sums.
//!
//! Sums are plain `f64` additions with no rounding, so results can carry the
//! usual floating point representation error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// Income, expenses and their difference over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of expense amounts in the category.
    pub total: f64,
}

/// Sums income and expenses.
///
/// Empty input yields all zeros.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => expense += transaction.amount,
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Groups expense transactions by category and sums each group.
///
/// Income is ignored. Groups are sorted by total, largest first, and groups
/// with equal totals are sorted by category name.
pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if transaction.kind == TransactionKind::Expense {
            *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
        }
    }

    let mut grouped: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();

    grouped.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    grouped
}

/// Category totals in the shape expected by the chart on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryChart {
    /// The category names.
    pub labels: Vec<String>,
    /// The total for the category at the same index in `labels`.
    pub values: Vec<f64>,
}

impl From<Vec<CategoryTotal>> for CategoryChart {
    fn from(category_totals: Vec<CategoryTotal>) -> Self {
        let (labels, values) = category_totals
            .into_iter()
            .map(|CategoryTotal { category, total }| (category, total))
            .unzip();

        Self { labels, values }
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::{Transaction, TransactionKind};

    use super::{CategoryChart, CategoryTotal, Totals, expense_by_category, totals};

    fn transaction(id: i64, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        Transaction {
            id,
            kind,
            amount,
            category: category.to_owned(),
            date: "2024-01-01".to_owned(),
            note: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(1, TransactionKind::Income, 1000.0, "salary"),
            transaction(2, TransactionKind::Expense, 200.0, "food"),
            transaction(3, TransactionKind::Expense, 50.0, "travel"),
            transaction(4, TransactionKind::Expense, 25.5, "food"),
            transaction(5, TransactionKind::Income, 100.0, "gift"),
            transaction(6, TransactionKind::Expense, 800.0, "rent"),
        ]
    }

    #[test]
    fn totals_of_nothing_is_zero() {
        assert_eq!(
            totals(&[]),
            Totals {
                income: 0.0,
                expense: 0.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn totals_sums_by_kind() {
        let got = totals(&[
            transaction(1, TransactionKind::Income, 1000.0, "salary"),
            transaction(2, TransactionKind::Expense, 200.0, "food"),
        ]);

        assert_eq!(
            got,
            Totals {
                income: 1000.0,
                expense: 200.0,
                balance: 800.0
            }
        );
    }

    #[test]
    fn totals_keeps_negative_amounts() {
        let got = totals(&[transaction(1, TransactionKind::Expense, -20.0, "refund")]);

        assert_eq!(got.expense, -20.0);
        assert_eq!(got.balance, 20.0);
    }

    #[test]
    fn totals_do_not_round() {
        let got = totals(&[
            transaction(1, TransactionKind::Income, 0.1, "interest"),
            transaction(2, TransactionKind::Income, 0.2, "interest"),
        ]);

        // 0.1 + 0.2 is not exactly 0.3 in binary floating point.
        assert_eq!(got.income, 0.1 + 0.2);
        assert!((got.income - 0.3).abs() < 1e-9);
    }

    #[test]
    fn totals_is_additive_over_disjoint_sets() {
        let all = sample();
        let (left, right) = all.split_at(3);

        let whole = totals(&all);
        let left = totals(left);
        let right = totals(right);

        assert_eq!(whole.income, left.income + right.income);
        assert_eq!(whole.expense, left.expense + right.expense);
        assert_eq!(whole.balance, left.balance + right.balance);
    }

    #[test]
    fn groups_expenses_largest_first() {
        let got = expense_by_category(&sample());

        assert_eq!(
            got,
            vec![
                CategoryTotal {
                    category: "rent".to_owned(),
                    total: 800.0
                },
                CategoryTotal {
                    category: "food".to_owned(),
                    total: 225.5
                },
                CategoryTotal {
                    category: "travel".to_owned(),
                    total: 50.0
                },
            ]
        );
    }

    #[test]
    fn grouped_totals_sum_to_expense_total() {
        let transactions = sample();

        let grouped_sum: f64 = expense_by_category(&transactions)
            .iter()
            .map(|category_total| category_total.total)
            .sum();

        assert!((grouped_sum - totals(&transactions).expense).abs() < 1e-9);
    }

    #[test]
    fn ties_are_sorted_by_category_name() {
        let got = expense_by_category(&[
            transaction(1, TransactionKind::Expense, 10.0, "travel"),
            transaction(2, TransactionKind::Expense, 10.0, "bills"),
            transaction(3, TransactionKind::Expense, 10.0, "food"),
        ]);

        let categories: Vec<&str> = got.iter().map(|total| total.category.as_str()).collect();
        assert_eq!(categories, vec!["bills", "food", "travel"]);
    }

    #[test]
    fn categories_are_case_sensitive() {
        let got = expense_by_category(&[
            transaction(1, TransactionKind::Expense, 1.0, "Food"),
            transaction(2, TransactionKind::Expense, 2.0, "food"),
        ]);

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn no_expenses_yields_empty_breakdown() {
        assert_eq!(expense_by_category(&[]), vec![]);
        assert_eq!(
            expense_by_category(&[transaction(1, TransactionKind::Income, 5.0, "gift")]),
            vec![]
        );
    }

    #[test]
    fn chart_data_keeps_order() {
        let chart = CategoryChart::from(expense_by_category(&sample()));

        assert_eq!(chart.labels, vec!["rent", "food", "travel"]);
        assert_eq!(chart.values, vec![800.0, 225.5, 50.0]);
    }

    #[test]
    fn chart_data_serializes_as_labels_and_values() {
        let json = serde_json::to_value(CategoryChart::default()).unwrap();

        assert_eq!(json, serde_json::json!({ "labels": [], "values": [] }));
    }
}
