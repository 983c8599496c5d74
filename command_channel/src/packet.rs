//! Command and response envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPacket {
    /// UUID v4, assigned at creation
    pub id: String,
    pub command: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl CommandPacket {
    pub fn new(command: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            command: command.into(),
            data,
            created_at: Utc::now(),
        }
    }

    /// Packet without payload
    pub fn bare(command: impl Into<String>) -> Self {
        Self::new(command, serde_json::Value::Null)
    }
}

/// Outcome of handling one [`CommandPacket`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Id of the packet this answers
    pub packet_id: String,
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CommandResponse {
    pub fn success(packet: &CommandPacket, data: serde_json::Value) -> Self {
        Self {
            packet_id: packet.id.clone(),
            success: true,
            data,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    pub fn failure(packet: &CommandPacket, message: impl Into<String>) -> Self {
        Self {
            packet_id: packet.id.clone(),
            success: false,
            data: serde_json::Value::Null,
            error_message: Some(message.into()),
            created_at: Utc::now(),
        }
    }
}
