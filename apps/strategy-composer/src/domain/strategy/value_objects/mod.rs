//! Strategy Value Objects

mod leg;
mod parameters;
mod selection;
mod strategy_type;

pub use leg::{Direction, Leg};
pub use parameters::{
    ParamRange, ParamValue, ParameterError, ParameterSet, RangeBound, ValueKind, accepted_kinds,
};
pub use selection::{Selection, SelectionFamily, SelectionTarget, resolve_selections};
pub use strategy_type::{Strategy, StrategyShape, UnknownStrategy};
