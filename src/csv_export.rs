//! Encodes transactions as CSV for download.

use csv::{QuoteStyle, WriterBuilder};

use crate::{Error, transaction::Transaction};

/// The column names written as the first line of every export.
pub const CSV_HEADER: [&str; 6] = ["id", "type", "amount", "category", "date", "note"];

/// Encode `transactions` as CSV, one row per transaction in the given order.
///
/// Fields are quoted only when needed: a field containing a comma, a double
/// quote or a line break is wrapped in double quotes and embedded quotes are
/// doubled (RFC 4180). A missing note is written as an empty field. An empty
/// slice produces only the header line.
///
/// # Errors
/// Returns an [Error::CsvError] if the CSV writer fails.
pub fn encode_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.id.to_string().as_str(),
                transaction.kind.as_str(),
                transaction.amount.to_string().as_str(),
                transaction.category.as_str(),
                transaction.date.as_str(),
                transaction.note.as_deref().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

fn csv_error(error: csv::Error) -> Error {
    tracing::error!("Could not write CSV record: {error}");
    Error::CsvError(error.to_string())
}
