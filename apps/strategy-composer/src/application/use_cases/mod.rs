//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod compose_strategy;

pub use compose_strategy::{IRON_BUTTERFLY, StrategyComposer, StrategyError, StrategyResult};
