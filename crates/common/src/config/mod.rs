//! # Configuration Abstractions
//!
//! Layered configuration loading and validation shared by all binaries.

pub mod loader;
pub mod traits;

pub use loader::*;
pub use traits::*;
