//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{check_in, check_out, get_status, health_check, list_connections, root};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
