//! Strategy Validator
//!
//! Pure checks run before any spread is constructed:
//! 1. Dataset schema (exact columns, exact types)
//! 2. Parameter value kinds for registered names
//! 3. Delta / strike-percentage exclusive-or per strategy shape
//! 4. Leg ordering for verticals and condors/butterflies
//!
//! Every check stops at the first violation.

use arrow::array::RecordBatch;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::quotes::check_quote_schema;
use crate::domain::strategy::errors::{OrderingViolation, ValidationError};
use crate::domain::strategy::value_objects::{
    ParameterSet, RangeBound, StrategyShape, accepted_kinds, resolve_selections,
};

/// Validates strategy requests against the quote schema and shape rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyValidator {
    ordering_bound: RangeBound,
}

impl StrategyValidator {
    /// Create a validator that compares range selections by `ordering_bound`.
    #[must_use]
    pub const fn new(ordering_bound: RangeBound) -> Self {
        Self { ordering_bound }
    }

    /// Bound used when a range selection stands in for a single value.
    #[must_use]
    pub const fn ordering_bound(&self) -> RangeBound {
        self.ordering_bound
    }

    /// Run the check matching `shape`.
    pub fn check(
        &self,
        shape: StrategyShape,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        debug!(%shape, params = params.len(), rows = dataset.num_rows(), "Validating strategy request");
        match shape {
            StrategyShape::Single => self.check_single(dataset, params),
            StrategyShape::VerticalCall => self.check_vertical_call(dataset, params),
            StrategyShape::VerticalPut => self.check_vertical_put(dataset, params),
            StrategyShape::IronCondor => self.check_iron_condor(dataset, params),
            StrategyShape::IronButterfly => self.check_iron_butterfly(dataset, params),
        }
    }

    /// Dataset schema and parameter kinds. Shared by every shape.
    pub fn check_common(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        check_quote_schema(&dataset.schema())?;
        check_parameter_kinds(params)
    }

    /// Single option: one delta or one strike percentage.
    pub fn check_single(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        self.check_common(dataset, params)?;
        resolve_selections(params, StrategyShape::Single.leg_count())?;
        Ok(())
    }

    /// Call spread: leg 1 selection strictly above leg 2.
    pub fn check_vertical_call(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        self.check_common(dataset, params)?;
        let [leg1, leg2] = self.resolve_values::<2>(params)?;
        if leg1 <= leg2 {
            return Err(OrderingViolation::CallLegsInverted { leg1, leg2 }.into());
        }
        Ok(())
    }

    /// Put spread: leg 1 selection strictly below leg 2.
    pub fn check_vertical_put(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        self.check_common(dataset, params)?;
        let [leg1, leg2] = self.resolve_values::<2>(params)?;
        if leg1 >= leg2 {
            return Err(OrderingViolation::PutLegsInverted { leg1, leg2 }.into());
        }
        Ok(())
    }

    /// Iron condor: leg1 >= leg2 > leg3 <= leg4.
    pub fn check_iron_condor(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        self.check_common(dataset, params)?;
        let values = self.resolve_values::<4>(params)?;
        check_four_leg_ordering(values)
    }

    /// Iron butterfly: same ordering rule as the condor.
    pub fn check_iron_butterfly(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> Result<(), ValidationError> {
        self.check_iron_condor(dataset, params)
    }

    fn resolve_values<const N: usize>(
        &self,
        params: &ParameterSet,
    ) -> Result<[Decimal; N], ValidationError> {
        let selections = resolve_selections(params, N)?;
        let mut values = [Decimal::ZERO; N];
        for (value, selection) in values.iter_mut().zip(&selections) {
            *value = selection.value(self.ordering_bound);
        }
        Ok(values)
    }
}

/// Check that every registered parameter carries an accepted kind.
pub fn check_parameter_kinds(params: &ParameterSet) -> Result<(), ValidationError> {
    for (name, value) in params.iter() {
        // Unregistered names are passed through to the spread builder.
        let Some(accepted) = accepted_kinds(name) else {
            continue;
        };
        if !accepted.contains(&value.kind()) {
            return Err(ValidationError::ParameterType {
                name: name.to_string(),
                expected: accepted
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                found: value.kind(),
            });
        }
    }
    Ok(())
}

fn check_four_leg_ordering([leg1, leg2, leg3, leg4]: [Decimal; 4]) -> Result<(), ValidationError> {
    if leg1 < leg2 {
        return Err(OrderingViolation::Leg1BelowLeg2 { leg1, leg2 }.into());
    }
    if leg2 <= leg3 {
        return Err(OrderingViolation::Leg2NotAboveLeg3 { leg2, leg3 }.into());
    }
    if leg3 > leg4 {
        return Err(OrderingViolation::Leg3AboveLeg4 { leg3, leg4 }.into());
    }
    Ok(())
}
