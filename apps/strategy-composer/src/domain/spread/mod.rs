//! Spread Bounded Context
//!
//! Constructed spreads as returned by the spread builder, one row per leg,
//! grouped into spread instances by `spread_id`.

mod spread_table;

pub use spread_table::{SPREAD_ID_COLUMN, STRIKE_COLUMN, SpreadTable, SpreadTableError};
