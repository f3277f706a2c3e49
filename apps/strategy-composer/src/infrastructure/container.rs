//! Dependency Injection Container
//!
//! Wires a spread builder adapter and loaded configuration into use cases.

use std::sync::Arc;

use crate::application::ports::SpreadBuilderPort;
use crate::application::use_cases::StrategyComposer;
use crate::config::{ComposerConfig, Config};

/// Dependency injection container.
///
/// Holds the spread builder and configuration. Use cases are created on
/// demand and share the builder.
pub struct Container<B>
where
    B: SpreadBuilderPort + ?Sized + 'static,
{
    builder: Arc<B>,
    config: Config,
}

impl<B> Container<B>
where
    B: SpreadBuilderPort + ?Sized + 'static,
{
    /// Create a new container.
    pub const fn new(builder: Arc<B>, config: Config) -> Self {
        Self { builder, config }
    }

    /// Get the spread builder port.
    pub fn builder(&self) -> Arc<B> {
        Arc::clone(&self.builder)
    }

    /// Get the loaded configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Get the composer section of the configuration.
    pub const fn composer_config(&self) -> ComposerConfig {
        self.config.composer
    }

    /// Create a `StrategyComposer`.
    pub fn strategy_composer(&self) -> StrategyComposer<B> {
        StrategyComposer::new(Arc::clone(&self.builder), self.config.composer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ExecutionMode, SpreadBuilderError};
    use crate::config::load_config_from_string;
    use crate::domain::quotes::{OptionType, QuoteRow, quotes_to_record_batch};
    use crate::domain::spread::SpreadTable;
    use crate::domain::strategy::{Leg, ParameterSet, RangeBound};
    use arrow::array::RecordBatch;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    // Records the mode of every call and never finds spreads
    struct RecordingBuilder {
        modes: Mutex<Vec<ExecutionMode>>,
    }

    impl SpreadBuilderPort for RecordingBuilder {
        fn build(
            &self,
            _dataset: &RecordBatch,
            _legs: &[Leg],
            _params: &ParameterSet,
            mode: ExecutionMode,
        ) -> Result<Option<SpreadTable>, SpreadBuilderError> {
            self.modes.lock().unwrap().push(mode);
            Ok(None)
        }
    }

    fn recording_builder() -> Arc<RecordingBuilder> {
        Arc::new(RecordingBuilder {
            modes: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_composer_uses_loaded_config() {
        let config = load_config_from_string(
            r"
composer:
  mode: midpoint
  ordering_bound: lower
",
        )
        .unwrap();
        let container = Container::new(recording_builder(), config);

        let composer = container.strategy_composer();
        assert_eq!(composer.config().mode, ExecutionMode::Midpoint);
        assert_eq!(composer.config().ordering_bound, RangeBound::Lower);
        assert_eq!(container.composer_config(), *composer.config());
    }

    #[test]
    fn test_builder_sees_configured_mode() {
        let builder = recording_builder();
        let config = Config {
            composer: ComposerConfig::default().with_mode(ExecutionMode::Midpoint),
            ..Config::default()
        };
        let container = Container::new(Arc::clone(&builder), config);
        let dataset = quotes_to_record_batch(&[QuoteRow {
            underlying_symbol: "SPX".to_string(),
            quote_date: NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
            expiration: NaiveDate::from_ymd_opt(2018, 1, 19).unwrap(),
            strike: 2700.0,
            option_type: OptionType::Call,
            bid: 10.0,
            ask: 10.5,
            underlying_price: 2695.81,
            delta: 0.45,
        }])
        .unwrap();
        let params = ParameterSet::new().with("leg1_delta", dec!(0.45));

        let result = container.strategy_composer().long_call(&dataset, &params).unwrap();

        assert!(result.is_none());
        assert_eq!(*builder.modes.lock().unwrap(), vec![ExecutionMode::Midpoint]);
    }

    #[test]
    fn test_composers_share_builder() {
        let container = Container::new(recording_builder(), Config::default());
        let _first = container.strategy_composer();
        let _second = container.strategy_composer();
        // container + two composers
        assert_eq!(Arc::strong_count(&container.builder()), 4);
    }

    #[test]
    fn test_dyn_builder() {
        let builder: Arc<dyn SpreadBuilderPort> = recording_builder();
        let container = Container::new(builder, Config::default());
        assert_eq!(container.strategy_composer().config().mode, ExecutionMode::Market);
    }
}
