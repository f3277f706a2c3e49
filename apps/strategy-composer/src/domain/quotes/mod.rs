//! Quote Dataset Bounded Context
//!
//! The historical option quote table every strategy is built from:
//! - Canonical Arrow schema and exact schema enforcement
//! - Typed quote rows and their conversion into a `RecordBatch`

mod batch;
mod option_type;
pub mod schema;

pub use batch::{QuoteBatchError, QuoteRow, quotes_to_record_batch};
pub use option_type::OptionType;
pub use schema::{SchemaError, check_quote_schema, quote_schema};
