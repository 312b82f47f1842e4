//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::{IdentifierDto, NumberDto};

/// Timestamp as sent by clients: epoch milliseconds or an RFC 3339 string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampDto {
    Millis(i64),
    Text(String),
}

/// Body of `POST /api/checkin` and `POST /api/checkout`.
///
/// Every field is optional here so that missing fields surface as a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequestDto {
    pub user_id: Option<IdentifierDto>,
    pub timestamp: Option<TimestampDto>,
    pub latitude: Option<NumberDto>,
    pub longitude: Option<NumberDto>,
}

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "error": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Response of `GET /api/status/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatusDto {
    pub status: String,
    pub check_in_time: Option<String>, // RFC 3339
    pub check_out_time: Option<String>, // RFC 3339
}

/// One registered employee in `GET /api/connections`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    pub employee_id: String,
    pub channel_id: String,
}
