//! HTTP API layer.
//!
//! The router is composable: [`app_router`] returns a `Router` that can
//! be mounted on any axum server instance; handlers get their injected
//! dependencies through [`types::ApiContext`].

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::app_router;
pub use types::ApiContext;
