//! Search module.
//!
//! Contains the product filters and the catalog query that applies
//! them and sorts the result.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};
