//! Git inspection
//!
//! - `GitOracle` - repository / linked-worktree detection and resolution

mod oracle;

pub use oracle::*;
