//! Infrastructure Layer
//!
//! Wires adapters for the ports defined in the application layer into use
//! cases. Spread builder adapters live with the host; this crate only
//! assembles them with configuration.

mod container;

pub use container::Container;
