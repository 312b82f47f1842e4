//! Geofenced attendance tracking server.
//!
//! Employees check in and out explicitly over HTTP, or implicitly by
//! streaming location reports over a WebSocket: the first "inside office"
//! report of the day checks them in, the first "outside" report after that
//! checks them out. Every report is rebroadcast to all connected channels.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerArgs;
pub use ui::{build_router, run};
