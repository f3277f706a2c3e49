//! Typed quote rows and their conversion into a quote dataset.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray, TimestampNanosecondArray};
use arrow::error::ArrowError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::option_type::OptionType;
use super::schema::quote_schema;

/// Errors from building a quote dataset.
#[derive(Debug, Error)]
pub enum QuoteBatchError {
    /// A date cannot be represented as nanoseconds since the epoch.
    #[error("date {date} is out of range for a nanosecond timestamp")]
    DateOutOfRange {
        /// Offending date.
        date: NaiveDate,
    },

    /// Arrow rejected the batch.
    #[error("failed to assemble quote batch: {0}")]
    Arrow(#[from] ArrowError),
}

/// One historical option quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Underlying symbol.
    pub underlying_symbol: String,
    /// Date the quote was taken.
    pub quote_date: NaiveDate,
    /// Contract expiration.
    pub expiration: NaiveDate,
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Underlying price at quote time.
    pub underlying_price: f64,
    /// Quoted delta.
    pub delta: f64,
}

fn date_to_nanos(date: NaiveDate) -> Result<i64, QuoteBatchError> {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or(QuoteBatchError::DateOutOfRange { date })
}

/// Convert quote rows into a `RecordBatch` with the canonical quote schema.
pub fn quotes_to_record_batch(rows: &[QuoteRow]) -> Result<RecordBatch, QuoteBatchError> {
    let quote_dates = rows
        .iter()
        .map(|r| date_to_nanos(r.quote_date))
        .collect::<Result<Vec<_>, _>>()?;
    let expirations = rows
        .iter()
        .map(|r| date_to_nanos(r.expiration))
        .collect::<Result<Vec<_>, _>>()?;

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter()
                .map(|r| r.underlying_symbol.as_str())
                .collect::<Vec<_>>(),
        )),
        Arc::new(TimestampNanosecondArray::from(quote_dates)),
        Arc::new(TimestampNanosecondArray::from(expirations)),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.strike).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter()
                .map(|r| r.option_type.as_str())
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.bid).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.ask).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.underlying_price).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.delta).collect::<Vec<_>>())),
    ];

    Ok(RecordBatch::try_new(quote_schema(), columns)?)
}
