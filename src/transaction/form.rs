//! The form used to create and edit transactions, and its validation.

use serde::Deserialize;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Iso8601},
    macros::format_description,
};

use crate::{
    Error,
    transaction::{DEFAULT_CATEGORY, TransactionBuilder, TransactionKind},
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// The form data for creating or editing a transaction.
///
/// All fields are text so that malformed values can be reported as
/// [Error::InvalidInput] instead of a generic form rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The value of the transaction in dollars.
    pub amount: Option<String>,
    /// The category label, "Other" if omitted.
    pub category: Option<String>,
    /// When the transaction occurred, as ISO-8601 text.
    pub date: Option<String>,
    /// Text detailing the transaction.
    pub note: Option<String>,
}

impl TransactionForm {
    /// Validate the form for creating a new transaction.
    ///
    /// A missing date defaults to `now`.
    ///
    /// # Errors
    /// Returns [Error::InvalidKind] or [Error::InvalidInput] if a field is
    /// missing or malformed.
    pub fn into_new_transaction(self, now: OffsetDateTime) -> Result<TransactionBuilder, Error> {
        let date = match non_empty(self.date.as_deref()) {
            Some(date) => date.to_owned(),
            None => format_timestamp(now)?,
        };

        self.into_builder(date)
    }

    /// Validate the form for overwriting an existing transaction.
    ///
    /// Every field except `category` and `note` is required.
    ///
    /// # Errors
    /// Returns [Error::InvalidKind] or [Error::InvalidInput] if a field is
    /// missing or malformed.
    pub fn into_updated_transaction(self) -> Result<TransactionBuilder, Error> {
        let date = non_empty(self.date.as_deref())
            .ok_or_else(|| Error::InvalidInput("date is required".to_owned()))?
            .to_owned();

        self.into_builder(date)
    }

    fn into_builder(self, date: String) -> Result<TransactionBuilder, Error> {
        let kind = non_empty(self.kind.as_deref())
            .ok_or_else(|| Error::InvalidInput("type is required".to_owned()))?
            .parse::<TransactionKind>()?;
        let amount = parse_amount(self.amount.as_deref())?;
        let date = normalize_date(&date)?;

        let category = non_empty(self.category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_owned();
        let note = non_empty(self.note.as_deref()).map(ToOwned::to_owned);

        Ok(TransactionBuilder {
            kind,
            amount,
            category,
            date,
            note,
        })
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_amount(text: Option<&str>) -> Result<f64, Error> {
    let text =
        non_empty(text).ok_or_else(|| Error::InvalidInput("amount is required".to_owned()))?;

    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidInput(format!("\"{text}\" is not a valid amount"))),
    }
}

/// Parse an ISO-8601 date or date-time and rewrite it as `YYYY-MM-DD` or
/// `YYYY-MM-DDTHH:MM:SS` so that sorting the stored text also sorts
/// chronologically.
///
/// Date-times with an offset are converted to UTC. Date-times without one are
/// kept as given. Fractional seconds are dropped.
///
/// # Errors
/// Returns [Error::InvalidInput] if `date` is not in a supported format.
pub fn normalize_date(date: &str) -> Result<String, Error> {
    let date = date.trim();

    if Date::parse(date, DATE_FORMAT).is_ok() {
        return Ok(date.to_owned());
    }

    if let Ok(date_time) = OffsetDateTime::parse(date, &Iso8601::DEFAULT) {
        return format_timestamp(date_time.to_offset(UtcOffset::UTC));
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(date, &Iso8601::DEFAULT) {
        return format_timestamp(date_time.assume_utc());
    }

    Err(Error::InvalidInput(format!(
        "\"{date}\" is not an ISO-8601 date, e.g. 2024-01-31 or 2024-01-31T08:15:00"
    )))
}

/// Format `timestamp` as an ISO-8601 date-time without an offset, e.g. `2024-01-31T08:15:00`.
///
/// # Errors
/// Returns [Error::InvalidInput] if the timestamp cannot be formatted.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, Error> {
    timestamp
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidInput(format!("could not format date: {error}")))
}
