//! Strategy Leg Value Object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::quotes::OptionType;

/// Position direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl Direction {
    /// Get the sign multiplier for this direction.
    #[must_use]
    pub const fn sign(&self) -> i32 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }

    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }
}

/// One option role in a strategy: option type plus direction.
///
/// Legs pair positionally with the `legN_*` selection parameters, so a leg
/// sequence is always ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leg {
    option_type: OptionType,
    direction: Direction,
}

impl Leg {
    /// Create a new leg.
    #[must_use]
    pub const fn new(option_type: OptionType, direction: Direction) -> Self {
        Self {
            option_type,
            direction,
        }
    }

    /// Create a long leg.
    #[must_use]
    pub const fn long(option_type: OptionType) -> Self {
        Self::new(option_type, Direction::Long)
    }

    /// Create a short leg.
    #[must_use]
    pub const fn short(option_type: OptionType) -> Self {
        Self::new(option_type, Direction::Short)
    }

    /// Get the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Get the direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction sign (+1 long, -1 short).
    #[must_use]
    pub const fn sign(&self) -> i32 {
        self.direction.sign()
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:+}", self.option_type, self.sign())
    }
}
