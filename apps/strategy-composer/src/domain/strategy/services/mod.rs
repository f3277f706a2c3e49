//! Strategy Domain Services

mod validator;

pub use validator::{StrategyValidator, check_parameter_kinds};
