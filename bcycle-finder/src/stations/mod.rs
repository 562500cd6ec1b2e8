//! Station records and the operations over them.
//!
//! The information and status feeds are joined on the raw station
//! identifier into [`MergedStation`] records, which the query functions
//! then filter by normalized identifier or by name.

mod merge;
mod query;

pub use merge::{MergedStation, merge};
pub use query::{StationRecord, by_exact_identifier, by_identifier_set, by_substring};
