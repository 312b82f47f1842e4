//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::{AttendanceRepository, Clock},
    infrastructure::ConnectionRegistry,
};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn AttendanceRepository>,
    /// Live realtime channels and employee bindings
    pub registry: Arc<ConnectionRegistry>,
    /// Source of "now" and local midnight
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn AttendanceRepository>,
        registry: Arc<ConnectionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            registry,
            clock,
        }
    }
}
