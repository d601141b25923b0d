//! Fixed-topology circuit templates.
//!
//! These generators build circuits directly over the IR with no wire pool
//! involved: their shape is fully determined by their parameters.

pub mod adder;
pub mod ram;

pub use adder::{full_adder, ripple_adder};
pub use ram::lookup_table;
