//! Wire types shared across the write path and the downstream consumer:
//! the transactional-outbox envelope, the dead-letter envelope, and the
//! aggregate-scoped DTOs returned by the RPC adapter.
//!
//! Kept dependency-free of any I/O crate — this is pure data, serialised
//! with `serde_json` at the producer/consumer boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Which aggregate table an outbox row belongs to. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateType {
    Board,
    Column,
    Task,
}

/// The bit-exact outbox envelope produced to the bus.
///
/// ```json
/// { "id": "<uuid>", "event_type": "<Name>", "aggregate_type": "board|column|task",
///   "aggregate_id": "<uuid>", "created_at": "<rfc3339 utc>",
///   "payload": <event-specific JSON>, "version": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEnvelope {
    pub id: Uuid,
    pub event_type: String,
    pub aggregate_type: AggregateType,
    pub aggregate_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub payload: Value,
    pub version: u32,
}

/// Dead-letter envelope. Non-UTF8 header values are base64-prefixed with
/// `b64:`; UTF8 values pass through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlqEnvelope {
    pub error: String,
    pub source_topic: String,
    pub source_partition: i32,
    pub source_offset: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_base64: Option<String>,
    pub headers: std::collections::BTreeMap<String, String>,
}

pub const B64_HEADER_PREFIX: &str = "b64:";

/// Encode a raw header value, prefixing with `b64:` when it is not valid UTF-8.
pub fn encode_header_value(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => format!("{B64_HEADER_PREFIX}{}", base64::Engine::encode(&base64::engine::general_purpose::STANDARD, raw)),
    }
}

// ---------------------------------------------------------------------------
// RPC wire DTOs (§4.8 / §6 HTTP gateway mapping)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDto {
    pub id: Uuid,
    pub board_id: Uuid,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub column_id: Uuid,
    pub position: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full board snapshot as cached and as returned by `GetBoardFull` / `ListBoards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshotDto {
    pub board: BoardDto,
    pub columns: Vec<ColumnDto>,
    pub tasks: Vec<TaskDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResultDto {
    pub user: UserDto,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trips_through_json() {
        let env = OutboxEnvelope {
            id: Uuid::new_v4(),
            event_type: "BoardCreated".to_string(),
            aggregate_type: AggregateType::Board,
            aggregate_id: Uuid::new_v4(),
            created_at: Utc::now(),
            payload: serde_json::json!({"title": "Sprint"}),
            version: 1,
        };
        let s = serde_json::to_string(&env).unwrap();
        assert!(s.contains("\"aggregate_type\":\"board\""));
        let back: OutboxEnvelope = serde_json::from_str(&s).unwrap();
        assert_eq!(back.id, env.id);
    }

    #[test]
    fn header_value_passes_through_valid_utf8() {
        assert_eq!(encode_header_value(b"hello"), "hello");
    }

    #[test]
    fn header_value_is_base64_prefixed_when_not_utf8() {
        let raw = [0xff, 0xfe, 0x00, 0x01];
        let encoded = encode_header_value(&raw);
        assert!(encoded.starts_with(B64_HEADER_PREFIX));
    }
}
