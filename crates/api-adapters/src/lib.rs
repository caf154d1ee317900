//! # api-adapters
//!
//! The web routing and orchestration layer for the note board.

pub mod state;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod routes;

pub use state::AppState;

#[cfg(feature = "web-axum")]
pub use routes::router;
