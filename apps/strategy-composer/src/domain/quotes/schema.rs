//! Quote dataset schema and schema enforcement.

use std::collections::BTreeSet;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use thiserror::Error;

/// Underlying symbol column.
pub const UNDERLYING_SYMBOL: &str = "underlying_symbol";
/// Quote date column.
pub const QUOTE_DATE: &str = "quote_date";
/// Expiration date column.
pub const EXPIRATION: &str = "expiration";
/// Strike price column.
pub const STRIKE: &str = "strike";
/// Option type column (`CALL` / `PUT`).
pub const OPTION_TYPE: &str = "option_type";
/// Bid column.
pub const BID: &str = "bid";
/// Ask column.
pub const ASK: &str = "ask";
/// Underlying price column.
pub const UNDERLYING_PRICE: &str = "underlying_price";
/// Delta column.
pub const DELTA: &str = "delta";

/// Arrow type used for the date columns.
pub const DATE_TYPE: DataType = DataType::Timestamp(TimeUnit::Nanosecond, None);

/// Required columns and their exact types.
pub const REQUIRED_COLUMNS: [(&str, DataType); 9] = [
    (UNDERLYING_SYMBOL, DataType::Utf8),
    (QUOTE_DATE, DATE_TYPE),
    (EXPIRATION, DATE_TYPE),
    (STRIKE, DataType::Float64),
    (OPTION_TYPE, DataType::Utf8),
    (BID, DataType::Float64),
    (ASK, DataType::Float64),
    (UNDERLYING_PRICE, DataType::Float64),
    (DELTA, DataType::Float64),
];

/// Errors raised when a quote dataset does not match the required schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Column set differs from the required set.
    #[error("Required columns missing! missing: {missing:?}, unexpected: {unexpected:?}")]
    ColumnsMismatch {
        /// Required columns absent from the dataset.
        missing: Vec<String>,
        /// Dataset columns that are not part of the schema.
        unexpected: Vec<String>,
    },

    /// A column has the wrong type.
    #[error("Incorrect datatypes detected! column '{column}' expected {expected}, found {found}")]
    IncorrectType {
        /// Column name.
        column: String,
        /// Required type.
        expected: DataType,
        /// Type present in the dataset.
        found: DataType,
    },
}

/// Build the canonical quote schema, in canonical column order.
#[must_use]
pub fn quote_schema() -> SchemaRef {
    Arc::new(Schema::new(
        REQUIRED_COLUMNS
            .iter()
            .map(|(name, data_type)| Field::new(*name, data_type.clone(), false))
            .collect::<Vec<_>>(),
    ))
}

/// Check that `schema` has exactly the required columns with exactly the
/// required types. Column order and nullability are not significant.
pub fn check_quote_schema(schema: &Schema) -> Result<(), SchemaError> {
    let present: BTreeSet<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    let required: BTreeSet<&str> = REQUIRED_COLUMNS.iter().map(|(name, _)| *name).collect();

    if present != required || schema.fields().len() != REQUIRED_COLUMNS.len() {
        return Err(SchemaError::ColumnsMismatch {
            missing: required
                .difference(&present)
                .map(|s| (*s).to_string())
                .collect(),
            unexpected: present
                .difference(&required)
                .map(|s| (*s).to_string())
                .collect(),
        });
    }

    for (name, expected) in &REQUIRED_COLUMNS {
        // Presence was established above.
        let Ok(field) = schema.field_with_name(name) else {
            continue;
        };
        if field.data_type() != expected {
            return Err(SchemaError::IncorrectType {
                column: (*name).to_string(),
                expected: expected.clone(),
                found: field.data_type().clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_with(replace: Option<(&str, DataType)>, drop: Option<&str>, extra: Option<&str>) -> Schema {
        let mut fields: Vec<Field> = REQUIRED_COLUMNS
            .iter()
            .filter(|(name, _)| Some(*name) != drop)
            .map(|(name, data_type)| match &replace {
                Some((col, dt)) if col == name => Field::new(*name, dt.clone(), false),
                _ => Field::new(*name, data_type.clone(), false),
            })
            .collect();
        if let Some(extra) = extra {
            fields.push(Field::new(extra, DataType::Float64, true));
        }
        Schema::new(fields)
    }

    #[test]
    fn canonical_schema_passes() {
        assert_eq!(check_quote_schema(&quote_schema()), Ok(()));
    }

    #[test]
    fn column_order_is_not_significant() {
        let mut fields: Vec<Field> = quote_schema().fields().iter().map(|f| (**f).clone()).collect();
        fields.reverse();
        assert_eq!(check_quote_schema(&Schema::new(fields)), Ok(()));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = check_quote_schema(&schema_with(None, Some(DELTA), None)).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ColumnsMismatch {
                missing: vec!["delta".to_string()],
                unexpected: vec![],
            }
        );
    }

    #[test]
    fn extra_column_is_reported() {
        let err = check_quote_schema(&schema_with(None, None, Some("gamma"))).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ColumnsMismatch {
                missing: vec![],
                unexpected: vec!["gamma".to_string()],
            }
        );
    }

    #[test]
    fn integer_strike_is_not_widened() {
        let err = check_quote_schema(&schema_with(Some((STRIKE, DataType::Int64)), None, None))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::IncorrectType {
                column: "strike".to_string(),
                expected: DataType::Float64,
                found: DataType::Int64,
            }
        );
    }

    #[test]
    fn date_resolution_must_match() {
        let err = check_quote_schema(&schema_with(
            Some((QUOTE_DATE, DataType::Timestamp(TimeUnit::Millisecond, None))),
            None,
            None,
        ))
        .unwrap_err();
        assert!(matches!(err, SchemaError::IncorrectType { ref column, .. } if column == "quote_date"));
    }

    #[test]
    fn error_messages() {
        let err = SchemaError::ColumnsMismatch {
            missing: vec!["bid".to_string()],
            unexpected: vec![],
        };
        assert!(err.to_string().starts_with("Required columns missing!"));
    }
}
