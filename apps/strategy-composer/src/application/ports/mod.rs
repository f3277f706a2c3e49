//! Application Ports
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod spread_builder_port;

pub use spread_builder_port::{ExecutionMode, SpreadBuilderError, SpreadBuilderPort};
