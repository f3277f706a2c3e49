//! Spread table produced by the spread builder.

use std::collections::{HashMap, HashSet};

use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, RecordBatch};
use arrow::compute::filter_record_batch;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

/// Column grouping rows into spread instances.
pub const SPREAD_ID_COLUMN: &str = "spread_id";
/// Column holding each leg's strike.
pub const STRIKE_COLUMN: &str = "strike";

/// Errors raised when wrapping or filtering a spread table.
#[derive(Debug, Error)]
pub enum SpreadTableError {
    /// A required column is absent.
    #[error("spread table is missing column '{0}'")]
    MissingColumn(&'static str),

    /// A required column has the wrong type.
    #[error("spread table column '{column}' expected {expected}, found {found}")]
    IncorrectType {
        /// Column name.
        column: &'static str,
        /// Required type.
        expected: DataType,
        /// Type present in the table.
        found: DataType,
    },

    /// Some rows carry no spread id.
    #[error("spread table has {0} row(s) without a spread id")]
    NullSpreadId(usize),

    /// Arrow kernel failure.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

/// Constructed spreads: one row per leg, rows of one spread instance share a
/// `spread_id`. Columns other than `spread_id` and `strike` pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadTable {
    batch: RecordBatch,
    spread_ids: Int64Array,
    strikes: Float64Array,
}

impl SpreadTable {
    /// Wrap a record batch, checking the `spread_id` and `strike` columns.
    pub fn try_new(batch: RecordBatch) -> Result<Self, SpreadTableError> {
        let spread_ids: Int64Array = typed_column(&batch, SPREAD_ID_COLUMN, &DataType::Int64)?;
        if spread_ids.null_count() > 0 {
            return Err(SpreadTableError::NullSpreadId(spread_ids.null_count()));
        }
        let strikes: Float64Array = typed_column(&batch, STRIKE_COLUMN, &DataType::Float64)?;
        Ok(Self {
            batch,
            spread_ids,
            strikes,
        })
    }

    /// Underlying record batch.
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Consume the table, returning the record batch.
    #[must_use]
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Number of leg rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of distinct spread instances.
    #[must_use]
    pub fn spread_count(&self) -> usize {
        self.spread_ids.values().iter().collect::<HashSet<_>>().len()
    }

    /// Drop every spread instance in which two or more legs share a strike.
    ///
    /// Returns the filtered table and the number of instances dropped.
    /// Instances with distinct strikes are kept unchanged and in order. Null
    /// strikes never count as a match.
    pub fn drop_degenerate_spreads(&self) -> Result<(Self, usize), SpreadTableError> {
        let ids = &self.spread_ids;
        let strikes = &self.strikes;

        let mut seen: HashMap<i64, HashSet<u64>> = HashMap::new();
        let mut degenerate: HashSet<i64> = HashSet::new();
        for row in 0..self.batch.num_rows() {
            if strikes.is_null(row) {
                continue;
            }
            let id = ids.value(row);
            if !seen.entry(id).or_default().insert(strike_key(strikes.value(row))) {
                degenerate.insert(id);
            }
        }

        if degenerate.is_empty() {
            return Ok((self.clone(), 0));
        }

        let keep = BooleanArray::from(
            (0..self.batch.num_rows())
                .map(|row| !degenerate.contains(&ids.value(row)))
                .collect::<Vec<_>>(),
        );
        let filtered = filter_record_batch(&self.batch, &keep)?;
        Ok((Self::try_new(filtered)?, degenerate.len()))
    }
}

impl TryFrom<RecordBatch> for SpreadTable {
    type Error = SpreadTableError;

    fn try_from(batch: RecordBatch) -> Result<Self, Self::Error> {
        Self::try_new(batch)
    }
}

fn typed_column<A>(
    batch: &RecordBatch,
    column: &'static str,
    expected: &DataType,
) -> Result<A, SpreadTableError>
where
    A: Array + Clone + 'static,
{
    let array = batch
        .column_by_name(column)
        .ok_or(SpreadTableError::MissingColumn(column))?;
    array
        .as_any()
        .downcast_ref::<A>()
        .filter(|_| array.data_type() == expected)
        .cloned()
        .ok_or_else(|| SpreadTableError::IncorrectType {
            column,
            expected: expected.clone(),
            found: array.data_type().clone(),
        })
}

/// Hash key for a strike. Adding `0.0` folds `-0.0` into `0.0`.
fn strike_key(strike: f64) -> u64 {
    (strike + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{Field, Schema};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn table(ids: Vec<i64>, strikes: Vec<Option<f64>>) -> SpreadTable {
        let legs: Vec<String> = (0..ids.len()).map(|i| format!("leg{}", i % 4 + 1)).collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new(SPREAD_ID_COLUMN, DataType::Int64, false),
            Field::new("leg", DataType::Utf8, false),
            Field::new(STRIKE_COLUMN, DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(legs)),
            Arc::new(Float64Array::from(strikes)),
        ];
        SpreadTable::try_new(RecordBatch::try_new(schema, columns).unwrap()).unwrap()
    }

    fn ids_of(table: &SpreadTable) -> Vec<i64> {
        table.spread_ids.values().to_vec()
    }

    #[test]
    fn shared_strike_drops_whole_instance() {
        let spreads = table(
            vec![0, 0, 0, 0, 1, 1, 1, 1],
            vec![
                Some(2600.0),
                Some(2650.0),
                Some(2600.0),
                Some(2750.0),
                Some(2600.0),
                Some(2650.0),
                Some(2700.0),
                Some(2750.0),
            ],
        );

        let (filtered, dropped) = spreads.drop_degenerate_spreads().unwrap();

        assert_eq!(dropped, 1);
        assert_eq!(ids_of(&filtered), vec![1, 1, 1, 1]);
        assert_eq!(filtered.num_rows(), 4);
        assert_eq!(filtered.spread_count(), 1);
    }

    #[test]
    fn duplicates_across_instances_are_not_degenerate() {
        // Every instance reuses the other's strikes, but none repeats its own.
        let spreads = table(
            vec![0, 0, 1, 1],
            vec![Some(2600.0), Some(2650.0), Some(2600.0), Some(2650.0)],
        );
        let (filtered, dropped) = spreads.drop_degenerate_spreads().unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(filtered, spreads);
    }

    #[test]
    fn null_strikes_never_match() {
        let spreads = table(vec![7, 7, 7], vec![None, None, Some(10.0)]);
        let (_, dropped) = spreads.drop_degenerate_spreads().unwrap();
        assert_eq!(dropped, 0);
    }

    #[test]
    fn signed_zero_strikes_match() {
        let spreads = table(vec![3, 3], vec![Some(0.0), Some(-0.0)]);
        let (filtered, dropped) = spreads.drop_degenerate_spreads().unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(filtered.num_rows(), 0);
    }

    #[test]
    fn passthrough_columns_survive_filter() {
        let spreads = table(
            vec![0, 0, 1, 1],
            vec![Some(1.0), Some(1.0), Some(1.0), Some(2.0)],
        );
        let (filtered, _) = spreads.drop_degenerate_spreads().unwrap();
        let legs = filtered
            .batch()
            .column_by_name("leg")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(legs.value(0), "leg3");
        assert_eq!(legs.value(1), "leg4");
        assert_eq!(filtered.batch().schema(), spreads.batch().schema());
    }

    #[test]
    fn missing_spread_id_is_rejected() {
        let schema = Arc::new(Schema::new(vec![Field::new(STRIKE_COLUMN, DataType::Float64, false)]));
        let column: ArrayRef = Arc::new(Float64Array::from(vec![1.0]));
        let batch = RecordBatch::try_new(schema, vec![column]).unwrap();
        assert!(matches!(
            SpreadTable::try_new(batch),
            Err(SpreadTableError::MissingColumn(SPREAD_ID_COLUMN))
        ));
    }

    #[test]
    fn mistyped_strike_is_rejected() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SPREAD_ID_COLUMN, DataType::Int64, false),
            Field::new(STRIKE_COLUMN, DataType::Int64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1])),
            Arc::new(Int64Array::from(vec![2600])),
        ];
        let batch = RecordBatch::try_new(schema, columns).unwrap();
        let err = SpreadTable::try_from(batch).unwrap_err();
        assert!(matches!(
            err,
            SpreadTableError::IncorrectType { column: STRIKE_COLUMN, .. }
        ));
    }

    #[test]
    fn null_spread_ids_are_rejected() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SPREAD_ID_COLUMN, DataType::Int64, true),
            Field::new(STRIKE_COLUMN, DataType::Float64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![Some(1), None])),
            Arc::new(Float64Array::from(vec![1.0, 2.0])),
        ];
        let batch = RecordBatch::try_new(schema, columns).unwrap();
        assert!(matches!(
            SpreadTable::try_new(batch),
            Err(SpreadTableError::NullSpreadId(1))
        ));
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_the_distinct_instances(
            spreads in prop::collection::vec(prop::collection::vec(0u8..6, 4), 0..12)
        ) {
            let ids: Vec<i64> = (0..spreads.len() as i64)
                .flat_map(|id| std::iter::repeat_n(id, 4))
                .collect();
            let strikes: Vec<Option<f64>> = spreads
                .iter()
                .flatten()
                .map(|s| Some(2500.0 + f64::from(*s) * 25.0))
                .collect();
            let expected: Vec<i64> = spreads
                .iter()
                .enumerate()
                .filter(|(_, legs)| legs.iter().collect::<HashSet<_>>().len() == legs.len())
                .flat_map(|(id, _)| std::iter::repeat_n(id as i64, 4))
                .collect();

            let (filtered, dropped) = table(ids, strikes).drop_degenerate_spreads().unwrap();

            prop_assert_eq!(ids_of(&filtered), expected.clone());
            prop_assert_eq!(dropped, spreads.len() - expected.len() / 4);

            let (again, dropped_again) = filtered.drop_degenerate_spreads().unwrap();
            prop_assert_eq!(again, filtered);
            prop_assert_eq!(dropped_again, 0);
        }
    }
}
