//! Compose Strategy Use Case
//!
//! Validates a strategy request, hands the leg sequence to the spread builder
//! and screens four-leg results for spread instances whose legs share a
//! strike.

use std::sync::Arc;
use std::time::Instant;

use arrow::array::RecordBatch;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::ports::{SpreadBuilderError, SpreadBuilderPort};
use crate::config::ComposerConfig;
use crate::domain::spread::{SpreadTable, SpreadTableError};
use crate::domain::strategy::{
    Leg, ParameterSet, Strategy, StrategyShape, StrategyValidator, ValidationError,
};
use crate::observability::{
    outcome, record_composition, record_degenerate_spreads_dropped, record_validation_failure,
};

/// Metric and log label for caller-defined iron butterflies.
pub const IRON_BUTTERFLY: &str = "iron_butterfly";

/// Errors returned by the strategy composer.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The request failed validation; the builder was not called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The spread builder failed.
    #[error(transparent)]
    Builder(#[from] SpreadBuilderError),

    /// The builder's table could not be filtered.
    #[error("invalid spread table: {0}")]
    SpreadTable(#[from] SpreadTableError),

    /// A caller-supplied leg sequence has the wrong length.
    #[error("{strategy} requires {expected} legs, got {found}")]
    LegCount {
        /// Strategy label.
        strategy: &'static str,
        /// Required number of legs.
        expected: usize,
        /// Supplied number of legs.
        found: usize,
    },
}

/// Result of a composition: `None` when the builder found no spreads.
pub type StrategyResult = Result<Option<SpreadTable>, StrategyError>;

/// Use case for validating and composing option strategies.
pub struct StrategyComposer<B>
where
    B: SpreadBuilderPort + ?Sized,
{
    builder: Arc<B>,
    validator: StrategyValidator,
    config: ComposerConfig,
}

impl<B> StrategyComposer<B>
where
    B: SpreadBuilderPort + ?Sized,
{
    /// Create a new StrategyComposer.
    pub fn new(builder: Arc<B>, config: ComposerConfig) -> Self {
        Self {
            builder,
            validator: StrategyValidator::new(config.ordering_bound),
            config,
        }
    }

    /// Configuration this composer was built with.
    pub const fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose a named strategy from its static leg table.
    pub fn process(
        &self,
        strategy: Strategy,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> StrategyResult {
        self.compose(strategy.name(), strategy.shape(), strategy.legs(), dataset, params)
    }

    /// Buy one call.
    pub fn long_call(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::LongCall, dataset, params)
    }

    /// Sell one call.
    pub fn short_call(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::ShortCall, dataset, params)
    }

    /// Buy one put.
    pub fn long_put(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::LongPut, dataset, params)
    }

    /// Sell one put.
    pub fn short_put(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::ShortPut, dataset, params)
    }

    /// Long call, short call; leg 1 selection above leg 2.
    pub fn long_call_spread(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::LongCallSpread, dataset, params)
    }

    /// Short call, long call; leg 1 selection above leg 2.
    pub fn short_call_spread(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> StrategyResult {
        self.process(Strategy::ShortCallSpread, dataset, params)
    }

    /// Short put, long put; leg 1 selection below leg 2.
    pub fn long_put_spread(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::LongPutSpread, dataset, params)
    }

    /// Long put, short put; leg 1 selection below leg 2.
    pub fn short_put_spread(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::ShortPutSpread, dataset, params)
    }

    /// Long put wing, short put, short call, long call wing.
    pub fn long_iron_condor(&self, dataset: &RecordBatch, params: &ParameterSet) -> StrategyResult {
        self.process(Strategy::LongIronCondor, dataset, params)
    }

    /// Short put wing, long put, long call, short call wing.
    pub fn short_iron_condor(
        &self,
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> StrategyResult {
        self.process(Strategy::ShortIronCondor, dataset, params)
    }

    /// Compose an iron butterfly from a caller-supplied four-leg sequence.
    ///
    /// Validated with the condor ordering rule and filtered like a condor.
    pub fn iron_butterfly(
        &self,
        dataset: &RecordBatch,
        legs: &[Leg],
        params: &ParameterSet,
    ) -> StrategyResult {
        let expected = StrategyShape::IronButterfly.leg_count();
        if legs.len() != expected {
            return Err(StrategyError::LegCount {
                strategy: IRON_BUTTERFLY,
                expected,
                found: legs.len(),
            });
        }
        self.compose(IRON_BUTTERFLY, StrategyShape::IronButterfly, legs, dataset, params)
    }

    fn compose(
        &self,
        name: &str,
        shape: StrategyShape,
        legs: &[Leg],
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> StrategyResult {
        let started = Instant::now();
        debug!(strategy = name, %shape, legs = legs.len(), "Composing strategy");

        let result = self.validate_and_build(name, shape, legs, dataset, params);

        let label = match &result {
            Ok(Some(_)) => outcome::BUILT,
            Ok(None) => outcome::EMPTY,
            Err(StrategyError::Validation(_) | StrategyError::LegCount { .. }) => outcome::INVALID,
            Err(_) => outcome::FAILED,
        };
        record_composition(name, label, started.elapsed().as_secs_f64());
        result
    }

    fn validate_and_build(
        &self,
        name: &str,
        shape: StrategyShape,
        legs: &[Leg],
        dataset: &RecordBatch,
        params: &ParameterSet,
    ) -> StrategyResult {
        if let Err(e) = self.validator.check(shape, dataset, params) {
            warn!(strategy = name, kind = e.kind(), error = %e, "Strategy validation failed");
            record_validation_failure(name, e.kind());
            return Err(e.into());
        }

        let Some(spreads) = self.builder.build(dataset, legs, params, self.config.mode)? else {
            debug!(strategy = name, "Spread builder returned no spreads");
            return Ok(None);
        };

        if !(shape.drops_degenerate_spreads() && self.config.filter_degenerate_spreads) {
            return Ok(Some(spreads));
        }

        let rows_before = spreads.num_rows();
        let (filtered, dropped) = spreads.drop_degenerate_spreads()?;
        debug!(
            strategy = name,
            rows_before,
            rows_after = filtered.num_rows(),
            dropped,
            "Filtered spreads with shared strikes"
        );
        if dropped > 0 {
            record_degenerate_spreads_dropped(name, dropped);
        }
        Ok(Some(filtered))
    }
}
