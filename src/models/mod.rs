//! Core data models for match statistics.

mod continent;
mod match_record;
mod stats;
mod table;

pub use continent::*;
pub use match_record::*;
pub use stats::*;
pub use table::*;
