//! Spread Builder Port (Driven Port)
//!
//! Interface to the external spread-construction collaborator. The builder
//! joins quotes into spreads for a leg sequence and prices each spread
//! instance; the composer only validates its inputs and filters its output.

use arrow::array::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::domain::spread::SpreadTable;
use crate::domain::strategy::{Leg, ParameterSet};

/// Price at which spreads are assumed to fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Buy at the ask, sell at the bid.
    #[default]
    Market,
    /// Fill at the bid/ask midpoint.
    Midpoint,
}

impl ExecutionMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Midpoint => "midpoint",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spread builder error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpreadBuilderError {
    /// The builder could not join or price the requested legs.
    #[error("Spread construction failed: {message}")]
    ConstructionFailed {
        /// Error details.
        message: String,
    },

    /// The builder produced a table without the required spread columns.
    #[error("Spread builder returned an invalid table: {message}")]
    InvalidOutput {
        /// Error details.
        message: String,
    },
}

/// Port for constructing spreads from a validated quote dataset.
///
/// Implementations receive the dataset and parameters exactly as validated,
/// plus the ordered leg sequence. `Ok(None)` means no spread could be
/// constructed for the request; it is not an error.
pub trait SpreadBuilderPort: Send + Sync {
    /// Build spreads for `legs` from `dataset`.
    ///
    /// # Errors
    ///
    /// Returns error if construction fails.
    fn build(
        &self,
        dataset: &RecordBatch,
        legs: &[Leg],
        params: &ParameterSet,
        mode: ExecutionMode,
    ) -> Result<Option<SpreadTable>, SpreadBuilderError>;
}
