//! Command line / environment configuration.

use chrono::FixedOffset;
use clap::Parser;
use shukkin_shared::time::{local_offset, offset_from_minutes};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("UTC offset must be within +-24h (got {0} minutes)")]
    InvalidUtcOffset(i32),
}

/// Attendance server for geofenced check-in/check-out
#[derive(Debug, Clone, Parser)]
#[command(name = "shukkin-server", version, about)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "SHUKKIN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SHUKKIN_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Minutes east of UTC that define local midnight (default: host timezone)
    #[arg(long, env = "SHUKKIN_UTC_OFFSET_MINUTES", allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "SHUKKIN_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerArgs {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Offset used to cut attendance days
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        match self.utc_offset_minutes {
            Some(minutes) => {
                offset_from_minutes(minutes).ok_or(ConfigError::InvalidUtcOffset(minutes))
            }
            None => Ok(local_offset()),
        }
    }
}
