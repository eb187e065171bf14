//! Fuzzy filtering and selection state
//!
//! Matching is a case-insensitive ordered subsequence test with no ranking:
//! an item either matches or is dropped, and survivors keep their order.

mod filter;
mod selector;

pub use filter::*;
pub use selector::*;
