//! Strategy Validation Errors

use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::ValueKind;
use crate::domain::quotes::SchemaError;

/// Errors raised while validating a strategy request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Dataset columns or column types do not match the quote schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A parameter value is not of a type accepted for its name.
    #[error("Incorrect value type detected for a filter! '{name}' expects {expected}, found {found}")]
    ParameterType {
        /// Parameter name.
        name: String,
        /// Accepted kinds, comma separated.
        expected: String,
        /// Kind that was supplied.
        found: ValueKind,
    },

    /// Neither or both selection families were supplied.
    #[error("Must provide values for either leg_deltas or strike_pct parameters ({legs} leg(s))")]
    MissingSelection {
        /// Number of legs the strategy selects.
        legs: usize,
    },

    /// Leg selections violate the strategy's strike ordering.
    #[error(transparent)]
    Ordering(#[from] OrderingViolation),
}

impl ValidationError {
    /// Short label for metrics and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Schema(_) => "schema",
            Self::ParameterType { .. } => "parameter_type",
            Self::MissingSelection { .. } => "missing_selection",
            Self::Ordering(_) => "ordering",
        }
    }
}

/// A violated inequality between resolved leg selections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingViolation {
    /// Call spread where leg 1 does not sit above leg 2.
    #[error("leg 1 selection ({leg1}) must be greater than leg 2 selection ({leg2}) for a call spread")]
    CallLegsInverted {
        /// Resolved leg 1 value.
        leg1: Decimal,
        /// Resolved leg 2 value.
        leg2: Decimal,
    },

    /// Put spread where leg 1 does not sit below leg 2.
    #[error("leg 1 selection ({leg1}) must be less than leg 2 selection ({leg2}) for a put spread")]
    PutLegsInverted {
        /// Resolved leg 1 value.
        leg1: Decimal,
        /// Resolved leg 2 value.
        leg2: Decimal,
    },

    /// Condor/butterfly leg 1 below leg 2.
    #[error("leg 1 selection ({leg1}) cannot be lower than leg 2 selection ({leg2})")]
    Leg1BelowLeg2 {
        /// Resolved leg 1 value.
        leg1: Decimal,
        /// Resolved leg 2 value.
        leg2: Decimal,
    },

    /// Condor/butterfly leg 2 not above leg 3.
    #[error("leg 2 selection ({leg2}) must be greater than leg 3 selection ({leg3})")]
    Leg2NotAboveLeg3 {
        /// Resolved leg 2 value.
        leg2: Decimal,
        /// Resolved leg 3 value.
        leg3: Decimal,
    },

    /// Condor/butterfly leg 3 above leg 4.
    #[error("leg 3 selection ({leg3}) cannot be higher than leg 4 selection ({leg4})")]
    Leg3AboveLeg4 {
        /// Resolved leg 3 value.
        leg3: Decimal,
        /// Resolved leg 4 value.
        leg4: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn error_display() {
        let err = ValidationError::MissingSelection { legs: 2 };
        assert_eq!(
            err.to_string(),
            "Must provide values for either leg_deltas or strike_pct parameters (2 leg(s))"
        );

        let err = ValidationError::from(OrderingViolation::Leg2NotAboveLeg3 {
            leg2: dec!(0.10),
            leg3: dec!(0.12),
        });
        assert_eq!(
            err.to_string(),
            "leg 2 selection (0.10) must be greater than leg 3 selection (0.12)"
        );
    }

    #[test]
    fn ordering_messages_are_distinct() {
        let messages = [
            OrderingViolation::CallLegsInverted { leg1: dec!(1), leg2: dec!(2) },
            OrderingViolation::PutLegsInverted { leg1: dec!(1), leg2: dec!(2) },
            OrderingViolation::Leg1BelowLeg2 { leg1: dec!(1), leg2: dec!(2) },
            OrderingViolation::Leg2NotAboveLeg3 { leg2: dec!(1), leg3: dec!(2) },
            OrderingViolation::Leg3AboveLeg4 { leg3: dec!(1), leg4: dec!(2) },
        ]
        .map(|v| v.to_string());

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn kind_labels() {
        assert_eq!(ValidationError::MissingSelection { legs: 1 }.kind(), "missing_selection");
        assert_eq!(
            ValidationError::ParameterType {
                name: "start_date".to_string(),
                expected: "date".to_string(),
                found: ValueKind::Int,
            }
            .kind(),
            "parameter_type"
        );
    }
}
