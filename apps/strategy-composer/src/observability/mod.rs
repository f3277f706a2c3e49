//! Observability module for logging and metrics.
//!
//! Tracing setup for hosts plus the metric recorders used by the composer.

mod metrics;
mod tracing;

pub use self::metrics::{
    outcome, record_composition, record_degenerate_spreads_dropped, record_validation_failure,
};
pub use self::tracing::{TracingError, env_filter, init_tracing};
