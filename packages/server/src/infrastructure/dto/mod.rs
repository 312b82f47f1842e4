//! Data transfer objects for the HTTP and WebSocket surfaces.

pub mod http;
pub mod websocket;

use serde::{Deserialize, Serialize};

/// Identifier as clients send it: a string or a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierDto {
    Text(String),
    Number(i64),
}

impl IdentifierDto {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Number as clients send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberDto {
    Number(f64),
    Text(String),
}

impl NumberDto {
    /// `None` for text that is not a number
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => parse_number(text),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
