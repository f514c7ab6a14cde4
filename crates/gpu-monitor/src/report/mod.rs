//! nvidia-smi memory report parsing
//!
//! Turns the free-form text printed by `nvidia-smi -q -d MEMORY` into a
//! [`MemoryReading`] for one device. Parsing is pure: no I/O, no state.

pub mod parser;
pub mod types;

pub use parser::*;
pub use types::*;
