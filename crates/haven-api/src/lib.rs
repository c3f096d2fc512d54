//! HTTP surface for the Haven engagement backend.
//!
//! This module exposes the axum router and server entry points for use by
//! the unified CLI and integration tests.

pub mod cli;

mod error;
mod profile;
mod routes;
mod server;
mod state;

pub use cli::ApiArgs;
pub use error::ApiError;
pub use routes::router;
pub use server::serve;
pub use state::{AppState, SharedStore};
pub use tokio_util::sync::CancellationToken;
