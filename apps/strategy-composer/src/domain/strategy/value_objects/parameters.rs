//! Caller-supplied strategy parameters.
//!
//! A `ParameterSet` maps parameter names to tagged values. Each registered
//! name accepts a fixed set of value kinds; unregistered names pass through
//! to the spread builder unchecked.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of a range stands in for the range when a single value is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBound {
    /// The lower bound.
    Lower,
    /// The upper bound.
    #[default]
    Upper,
}

/// A two-sided parameter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange {
    /// Lower bound.
    pub lower: Decimal,
    /// Upper bound.
    pub upper: Decimal,
}

impl ParamRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(lower: Decimal, upper: Decimal) -> Self {
        Self { lower, upper }
    }

    /// Get the requested bound.
    #[must_use]
    pub const fn bound(&self, bound: RangeBound) -> Decimal {
        match bound {
            RangeBound::Lower => self.lower,
            RangeBound::Upper => self.upper,
        }
    }
}

/// Type class of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Whole number.
    Int,
    /// Decimal number.
    Float,
    /// Calendar date.
    Date,
    /// Free text.
    Text,
    /// List of text values.
    TextList,
    /// Two-sided numeric range.
    Range,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Date => write!(f, "date"),
            Self::Text => write!(f, "text"),
            Self::TextList => write!(f, "text_list"),
            Self::Range => write!(f, "range"),
        }
    }
}

/// A parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    /// Whole number.
    Int(i64),
    /// Decimal number.
    Float(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Free text.
    Text(String),
    /// List of text values.
    TextList(Vec<String>),
    /// Two-sided numeric range.
    Range(ParamRange),
}

impl ParamValue {
    /// Type class of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Date(_) => ValueKind::Date,
            Self::Text(_) => ValueKind::Text,
            Self::TextList(_) => ValueKind::TextList,
            Self::Range(_) => ValueKind::Range,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

impl From<ParamRange> for ParamValue {
    fn from(value: ParamRange) -> Self {
        Self::Range(value)
    }
}

const DATE: &[ValueKind] = &[ValueKind::Date];
const INT: &[ValueKind] = &[ValueKind::Int];
const INT_OR_RANGE: &[ValueKind] = &[ValueKind::Int, ValueKind::Range];
const NUMERIC: &[ValueKind] = &[ValueKind::Int, ValueKind::Float, ValueKind::Range];
const TEXT: &[ValueKind] = &[ValueKind::Text, ValueKind::TextList];

/// Value kinds accepted for a registered parameter name, or `None` when the
/// name is not registered.
#[must_use]
pub fn accepted_kinds(name: &str) -> Option<&'static [ValueKind]> {
    let kinds = match name {
        "start_date" | "end_date" => DATE,
        "expr_type" => TEXT,
        "contract_size" | "entry_days" | "exit_dte" | "exit_hold_days" => INT,
        "entry_dte" => INT_OR_RANGE,
        "leg1_delta" | "leg2_delta" | "leg3_delta" | "leg4_delta" | "leg1_strike_pct"
        | "leg2_strike_pct" | "leg3_strike_pct" | "leg4_strike_pct" | "entry_spread_price"
        | "entry_spread_delta" | "entry_spread_yield" | "exit_leg_1_delta"
        | "exit_leg_1_otm_pct" | "exit_profit_loss_pct" | "exit_spread_delta"
        | "exit_spread_price" | "exit_strike_diff_pct" => NUMERIC,
        _ => return None,
    };
    Some(kinds)
}

/// Errors converting external input into a parameter set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// The input was not a JSON object.
    #[error("parameters must be a JSON object")]
    NotAnObject,

    /// A value has no parameter representation.
    #[error("unsupported value for parameter '{name}': {value}")]
    UnsupportedValue {
        /// Parameter name.
        name: String,
        /// Offending JSON value.
        value: String,
    },
}

/// A set of named strategy parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Check if a parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a parameter set from a JSON object.
    ///
    /// Integers become `Int`, other numbers `Float`, `YYYY-MM-DD` strings
    /// `Date`, other strings `Text`, two-number arrays `Range` and string
    /// arrays `TextList`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ParameterError> {
        let object = value.as_object().ok_or(ParameterError::NotAnObject)?;
        let mut params = Self::new();
        for (name, raw) in object {
            let converted = json_to_param(raw).ok_or_else(|| ParameterError::UnsupportedValue {
                name: name.clone(),
                value: raw.to_string(),
            })?;
            params.insert(name.clone(), converted);
        }
        Ok(params)
    }
}

fn json_number_to_decimal(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn json_to_param(raw: &serde_json::Value) -> Option<ParamValue> {
    use serde_json::Value;

    match raw {
        Value::Number(n) => n
            .as_i64()
            .map(ParamValue::Int)
            .or_else(|| json_number_to_decimal(n).map(ParamValue::Float)),
        Value::String(s) => Some(
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_or_else(|_| ParamValue::Text(s.clone()), ParamValue::Date),
        ),
        Value::Array(items) if items.len() == 2 && items.iter().all(Value::is_number) => {
            let bounds = items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => json_number_to_decimal(n),
                    _ => None,
                })
                .collect::<Vec<_>>();
            if bounds.len() != 2 {
                return None;
            }
            Some(ParamValue::Range(ParamRange::new(bounds[0], bounds[1])))
        }
        Value::Array(items) if items.iter().all(Value::is_string) => Some(ParamValue::TextList(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )),
        _ => None,
    }
}
