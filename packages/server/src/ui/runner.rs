//! Server bootstrap: state wiring, routing and serving.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerArgs,
    error::ServerError,
    infrastructure::{ConnectionRegistry, InMemoryAttendanceRepository, SystemClock},
    ui::{
        handler::{
            check_in, check_out, get_status, health_check, list_connections, root,
            websocket_handler,
        },
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the application router around `state`
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/checkin", post(check_in))
        .route("/api/checkout", post(check_out))
        .route("/api/status/{id}", get(get_status))
        .route("/api/connections", get(list_connections))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives
pub async fn run(args: ServerArgs) -> Result<(), ServerError> {
    let offset = args.utc_offset()?;
    tracing::info!("Attendance days are cut at local midnight (UTC{})", offset);

    // The registry lives exactly as long as the server
    let registry = Arc::new(ConnectionRegistry::new());
    let state = Arc::new(AppState::new(
        Arc::new(InMemoryAttendanceRepository::new()),
        registry.clone(),
        Arc::new(SystemClock::new(offset)),
    ));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind_address()).await?;
    tracing::info!("Server is up and running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(registry))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
