// zilkara-core/src/lib.rs
// Zilkara - market stability scanner core

pub mod config;
pub mod logging;
pub mod service;
pub mod sink;
pub mod source;

// Re-export zilkara-common for convenience
pub use zilkara_common::{data, scoring};
