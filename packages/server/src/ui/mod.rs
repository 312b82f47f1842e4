//! HTTP and WebSocket surface of the attendance server.

pub mod error;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use error::ApiError;
pub use runner::{build_router, run};
pub use state::AppState;
