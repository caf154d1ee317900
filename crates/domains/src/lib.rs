//! # domains
//!
//! Entry model, visibility rules and the ports adapters plug into.

pub mod errors;
pub mod listing;
pub mod models;
pub mod ports;
pub mod visibility;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
