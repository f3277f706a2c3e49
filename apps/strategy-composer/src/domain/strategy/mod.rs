//! Strategy Bounded Context
//!
//! This module defines what a strategy request is and when it is valid:
//! - Named strategies and their fixed leg tables
//! - Caller parameters and per-leg strike selections
//! - Schema, parameter-kind, exclusive-or and ordering checks

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{OrderingViolation, ValidationError};
pub use services::StrategyValidator;
pub use value_objects::{
    Direction, Leg, ParamRange, ParamValue, ParameterError, ParameterSet, RangeBound, Selection,
    SelectionFamily, SelectionTarget, Strategy, StrategyShape, UnknownStrategy, ValueKind,
};
