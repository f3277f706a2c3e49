//! Per-leg strike selection.
//!
//! Every leg is selected either by delta or by strike percentage. The two
//! families are mutually exclusive: a request supplies one complete family
//! (`leg1_delta` .. `legN_delta` or `leg1_strike_pct` .. `legN_strike_pct`)
//! and the choice is captured once as a `Selection` per leg.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parameters::{ParamRange, ParamValue, ParameterSet, RangeBound, ValueKind};
use crate::domain::strategy::errors::ValidationError;

/// Selection parameter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionFamily {
    /// `legN_delta`.
    Delta,
    /// `legN_strike_pct`.
    StrikePct,
}

impl SelectionFamily {
    /// Parameter name for the 1-based `leg` in this family.
    #[must_use]
    pub fn param_name(&self, leg: usize) -> String {
        match self {
            Self::Delta => format!("leg{leg}_delta"),
            Self::StrikePct => format!("leg{leg}_strike_pct"),
        }
    }

    /// Whether every leg's parameter of this family is present.
    fn is_complete(self, params: &ParameterSet, legs: usize) -> bool {
        (1..=legs).all(|leg| params.contains(&self.param_name(leg)))
    }
}

/// Target value of a selection: an exact value or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTarget {
    /// A single value.
    Exact(Decimal),
    /// A two-sided range.
    Range(ParamRange),
}

impl SelectionTarget {
    /// Single representative value, picking `bound` for ranges.
    #[must_use]
    pub const fn resolve(&self, bound: RangeBound) -> Decimal {
        match self {
            Self::Exact(value) => *value,
            Self::Range(range) => range.bound(bound),
        }
    }
}

/// How one leg's strike is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Select by quoted delta.
    Delta(SelectionTarget),
    /// Select by strike relative to the underlying price.
    StrikePct(SelectionTarget),
}

impl Selection {
    /// Family this selection belongs to.
    #[must_use]
    pub const fn family(&self) -> SelectionFamily {
        match self {
            Self::Delta(_) => SelectionFamily::Delta,
            Self::StrikePct(_) => SelectionFamily::StrikePct,
        }
    }

    /// Selection target.
    #[must_use]
    pub const fn target(&self) -> &SelectionTarget {
        match self {
            Self::Delta(target) | Self::StrikePct(target) => target,
        }
    }

    /// Single representative value used for ordering checks.
    #[must_use]
    pub const fn value(&self, bound: RangeBound) -> Decimal {
        self.target().resolve(bound)
    }

    fn from_param(family: SelectionFamily, name: &str, value: &ParamValue) -> Result<Self, ValidationError> {
        let target = match value {
            ParamValue::Int(v) => SelectionTarget::Exact(Decimal::from(*v)),
            ParamValue::Float(v) => SelectionTarget::Exact(*v),
            ParamValue::Range(range) => SelectionTarget::Range(*range),
            other => {
                return Err(ValidationError::ParameterType {
                    name: name.to_string(),
                    expected: format!("{}, {}, {}", ValueKind::Int, ValueKind::Float, ValueKind::Range),
                    found: other.kind(),
                });
            }
        };
        Ok(match family {
            SelectionFamily::Delta => Self::Delta(target),
            SelectionFamily::StrikePct => Self::StrikePct(target),
        })
    }
}

/// Resolve one `Selection` per leg from a parameter set.
///
/// Exactly one of the two families must be complete for `legs` legs; both or
/// neither fails with `MissingSelection`. Selections come from the complete
/// family only, so a zero delta is a real selection and is never replaced by
/// a strike percentage.
pub fn resolve_selections(params: &ParameterSet, legs: usize) -> Result<Vec<Selection>, ValidationError> {
    let family = match (
        SelectionFamily::Delta.is_complete(params, legs),
        SelectionFamily::StrikePct.is_complete(params, legs),
    ) {
        (true, false) => SelectionFamily::Delta,
        (false, true) => SelectionFamily::StrikePct,
        _ => return Err(ValidationError::MissingSelection { legs }),
    };

    (1..=legs)
        .map(|leg| {
            let name = family.param_name(leg);
            let value = params
                .get(&name)
                .ok_or(ValidationError::MissingSelection { legs })?;
            Selection::from_param(family, &name, value)
        })
        .collect()
}
