//! WebSocket event DTOs.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IdentifierDto, NumberDto};

/// Events sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Bind this channel to an employee
    RegisterEmpId(IdentifierDto),
    /// Geofence report; kept raw so it can be echoed back untouched
    SendLocation(Value),
}

/// Fields of a `sendLocation` payload, read leniently.
///
/// Devices send loosely typed JSON: coordinates may arrive as numeric
/// strings and `inside` as any truthy value. A field of the wrong type reads
/// as absent instead of failing the whole report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPayloadDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub inside: bool,
    pub emp_id: Option<String>,
}

impl LocationPayloadDto {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            latitude: payload.get("latitude").and_then(number_from_value),
            longitude: payload.get("longitude").and_then(number_from_value),
            inside: payload.get("inside").is_some_and(is_truthy),
            emp_id: payload.get("empId").and_then(identifier_from_value),
        }
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => NumberDto::Text(s.clone()).to_f64(),
        _ => None,
    }
}

fn identifier_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `null`, `false`, `0`, `NaN` and `""` are false; everything else is true
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Events sent by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Sent once to a freshly accepted channel
    Connected { id: String },
    /// A location report, rebroadcast to every channel
    ReceiveLocation(Map<String, Value>),
    /// A channel went away
    UserDisconnected(String),
}

impl ServerEvent {
    /// `{ id: channelId, ...payload }`; keys in the payload win
    pub fn receive_location(channel_id: &str, payload: Map<String, Value>) -> Self {
        let mut body = Map::new();
        body.insert("id".to_string(), Value::String(channel_id.to_string()));
        body.extend(payload);
        Self::ReceiveLocation(body)
    }
}
