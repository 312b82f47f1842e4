//! Attendance server with geofence-driven check-in/check-out.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin shukkin-server -- --port 3000
//! ```

use clap::Parser;
use shukkin_server::ServerArgs;
use shukkin_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = shukkin_server::run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
