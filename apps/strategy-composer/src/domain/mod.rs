//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//!
//! # Bounded Contexts
//!
//! - [`quotes`]: The historical quote dataset and its schema
//! - [`strategy`]: Strategy leg tables, parameters and request validation
//! - [`spread`]: Constructed spreads and duplicate-strike screening

pub mod quotes;
pub mod spread;
pub mod strategy;
