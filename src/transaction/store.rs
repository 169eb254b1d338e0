//! Implements a SQLite backed transaction store.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    database_id::TransactionId,
    db::initialize,
    transaction::{Transaction, TransactionBuilder},
};

/// The order to sort transactions by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    #[default]
    Descending,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Stores transactions in a SQLite database.
///
/// Cloning the store is cheap, clones share the same connection. The
/// connection is closed when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl TransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The database must already be initialized with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Open (or create) the database file at `path` and initialize it.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the file cannot be opened or the
    /// tables cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    /// Create an initialized store that lives in memory.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the tables cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self::new(Arc::new(Mutex::new(connection))))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    /// Create a new transaction in the database from a builder.
    ///
    /// The kind, amount and date are stored as given, no business rules are
    /// checked here.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    pub fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (kind, amount, category, date, note)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, kind, amount, category, date, note",
            )?
            .query_row(
                params![
                    builder.kind,
                    builder.amount,
                    builder.category,
                    builder.date,
                    builder.note,
                ],
                map_transaction_row,
            )?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Retrieve a transaction from the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, kind, amount, category, date, note FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Overwrite every field of the transaction `id` with the fields in `builder`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    pub fn update(
        &self,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "UPDATE \"transaction\" \
                SET kind = ?1, amount = ?2, category = ?3, date = ?4, note = ?5 \
                WHERE id = ?6 \
                RETURNING id, kind, amount, category, date, note",
            )?
            .query_row(
                params![
                    builder.kind,
                    builder.amount,
                    builder.category,
                    builder.date,
                    builder.note,
                    id,
                ],
                map_transaction_row,
            )?;

        tracing::debug!("Updated transaction {id}");

        Ok(transaction)
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    pub fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        tracing::debug!("Deleted transaction {id}");

        Ok(())
    }

    /// Get every transaction sorted by date.
    ///
    /// Dates are compared as text. Transactions with the same date are
    /// ordered by ID in the same direction.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    pub fn list_all(&self, sort_order: SortOrder) -> Result<Vec<Transaction>, Error> {
        let order = sort_order.as_sql();
        let query = format!(
            "SELECT id, kind, amount, category, date, note FROM \"transaction\" \
            ORDER BY date {order}, id {order}"
        );

        self.lock()?
            .prepare(&query)?
            .query_map([], map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect()
    }

    /// Get the `limit` most recent transactions, newest first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    pub fn list_recent(&self, limit: u32) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, kind, amount, category, date, note FROM \"transaction\" \
                ORDER BY date DESC, id DESC \
                LIMIT ?1",
            )?
            .query_map([limit], map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect()
    }

    /// Find transactions whose category or note contains `text`, ignoring case.
    ///
    /// `text` is trimmed and matched literally, `%` and `_` are not wildcards.
    /// An empty search returns the same rows as [TransactionStore::list_all]
    /// in descending order.
    ///
    /// Case folding follows SQLite's `LIKE`, which only folds ASCII letters.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    pub fn search(&self, text: &str) -> Result<Vec<Transaction>, Error> {
        let text = text.trim();

        if text.is_empty() {
            return self.list_all(SortOrder::Descending);
        }

        let pattern = format!("%{}%", escape_like_pattern(text));

        self.lock()?
            .prepare(
                "SELECT id, kind, amount, category, date, note FROM \"transaction\" \
                WHERE category LIKE ?1 ESCAPE '\\' OR note LIKE ?1 ESCAPE '\\' \
                ORDER BY date DESC, id DESC",
            )?
            .query_map([pattern], map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    pub fn count(&self) -> Result<u32, Error> {
        self.lock()?
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }
}

/// Escape the wildcards of a SQL `LIKE` pattern with a backslash.
fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                note TEXT
                )",
        (),
    )?;

    // Listing and the dashboard both sort by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;
    let note = row.get(5)?;

    Ok(Transaction {
        id,
        kind,
        amount,
        category,
        date,
        note,
    })
}
