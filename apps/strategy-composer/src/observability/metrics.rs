//! Metrics for strategy validation and composition.
//!
//! Recorded through the `metrics` facade. The library installs no exporter;
//! without a host-installed recorder every call is a no-op.
//!
//! # Example
//!
//! ```ignore
//! use strategy_composer::observability::record_composition;
//!
//! record_composition("long_iron_condor", outcome::BUILT, 0.004);
//! ```

use metrics::{counter, histogram};

/// Composition outcome labels.
pub mod outcome {
    /// The builder returned a spread table.
    pub const BUILT: &str = "built";
    /// The builder found no spreads.
    pub const EMPTY: &str = "empty";
    /// The request failed validation.
    pub const INVALID: &str = "invalid";
    /// The builder or the spread table failed.
    pub const FAILED: &str = "failed";
}

/// Record a validation failure.
///
/// # Arguments
///
/// * `strategy` - Strategy name (e.g., "long_call_spread")
/// * `kind` - Failure kind (e.g., "schema", "ordering")
pub fn record_validation_failure(strategy: &str, kind: &str) {
    counter!(
        "strategy_validation_failures_total",
        "strategy" => strategy.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record a finished composition.
///
/// # Arguments
///
/// * `strategy` - Strategy name
/// * `outcome` - One of the [`outcome`] labels
/// * `duration_seconds` - Validation plus construction time in seconds
pub fn record_composition(strategy: &str, outcome: &str, duration_seconds: f64) {
    counter!(
        "strategy_compositions_total",
        "strategy" => strategy.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "strategy_composition_duration_seconds",
        "strategy" => strategy.to_string()
    )
    .record(duration_seconds);
}

/// Record spread instances dropped for sharing a strike between legs.
pub fn record_degenerate_spreads_dropped(strategy: &str, count: usize) {
    counter!(
        "strategy_degenerate_spreads_dropped_total",
        "strategy" => strategy.to_string()
    )
    .increment(count as u64);
}
