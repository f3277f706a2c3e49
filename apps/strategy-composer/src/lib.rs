// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::cast_possible_wrap,
        clippy::items_after_statements
    )
)]

//! Strategy Composer - Rust Core Library
//!
//! Validates and assembles multi-leg option strategies from a table of
//! historical option quotes.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `quotes`: Quote dataset schema and typed quote rows
//!   - `strategy`: Leg tables, parameters, selections and the validator
//!   - `spread`: Constructed spread tables and duplicate-strike screening
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interface to the external spread builder (`SpreadBuilderPort`)
//!   - `use_cases`: `StrategyComposer`
//!
//! - **Infrastructure**: Wiring
//!   - `container`: Dependency injection container
//!
//! # Flow
//!
//! `StrategyComposer::process` validates the dataset and parameters for the
//! strategy's shape, calls the spread builder with the strategy's legs and,
//! for four-leg shapes, drops spread instances whose legs share a strike.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Wiring of adapters into use cases.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment variable interpolation.
pub mod config;

/// Logging setup and metric recorders.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::quotes::{OptionType, QuoteRow, SchemaError, quotes_to_record_batch};
pub use domain::spread::{SpreadTable, SpreadTableError};
pub use domain::strategy::{
    Direction, Leg, OrderingViolation, ParamRange, ParamValue, ParameterSet, RangeBound,
    Selection, Strategy, StrategyShape, StrategyValidator, ValidationError,
};

// Application re-exports
pub use application::ports::{ExecutionMode, SpreadBuilderError, SpreadBuilderPort};
pub use application::use_cases::{StrategyComposer, StrategyError, StrategyResult};

// Infrastructure re-exports
pub use infrastructure::Container;

// Config re-exports
pub use config::{ComposerConfig, Config, ConfigError, load_config, load_config_from_string};
