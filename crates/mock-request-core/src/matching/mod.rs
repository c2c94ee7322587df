//! Request matching utilities.

mod query;
mod signature;

pub use query::parse_query_string;
pub use signature::{wire_values, RequestSignature};
