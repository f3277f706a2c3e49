//! Strategy composer configuration.

use serde::{Deserialize, Serialize};

use crate::application::ports::ExecutionMode;
use crate::domain::strategy::RangeBound;

/// Settings fixed for the lifetime of a `StrategyComposer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Fill assumption passed to the spread builder.
    #[serde(default)]
    pub mode: ExecutionMode,
    /// Range end used when comparing leg selections.
    #[serde(default)]
    pub ordering_bound: RangeBound,
    /// Drop condor/butterfly instances whose legs share a strike.
    #[serde(default = "default_true")]
    pub filter_degenerate_spreads: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            ordering_bound: RangeBound::default(),
            filter_degenerate_spreads: true,
        }
    }
}

impl ComposerConfig {
    /// Set the execution mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the range bound used for ordering checks.
    #[must_use]
    pub const fn with_ordering_bound(mut self, bound: RangeBound) -> Self {
        self.ordering_bound = bound;
        self
    }
}

pub(super) const fn default_true() -> bool {
    true
}
