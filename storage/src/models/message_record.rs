//! Message rows as read from the `Message` table and the uniform record projected from them.

use serde::Serialize;
use serde_json::Value;

use crate::media::{classify_media, MediaDescriptor};
use crate::models::message_filter::Direction;
use crate::models::message_query::format_timestamp;
use crate::payload::MessagePayload;
use crate::text::resolve_text;

/// Columns selected by the message listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: String,
    pub remote_jid: Option<String>,
    pub from_me: Option<i64>,
    pub message_type: Option<String>,
    pub status: Option<String>,
    pub message_timestamp: Option<i64>,
    /// Raw JSON payload.
    pub message: Option<String>,
}

/// Uniform view of one message, built fresh per row per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub jid: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub when: String,
    pub direction: Direction,
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
    pub status: String,
    pub media: Option<MediaDescriptor>,
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        let payload = MessagePayload::from_json(row.message.as_deref());
        Self {
            id: row.id,
            jid: row.remote_jid.unwrap_or_default(),
            when: row.message_timestamp.map(format_timestamp).unwrap_or_default(),
            direction: Direction::from_me(row.from_me.unwrap_or(0) != 0),
            message_type: row.message_type.unwrap_or_default(),
            text: resolve_text(&payload),
            status: row.status.unwrap_or_default(),
            media: classify_media(&payload),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredMessageRow {
    pub id: String,
    pub key: Option<String>,
    pub message: Option<String>,
    pub message_type: Option<String>,
    pub status: Option<String>,
    pub message_timestamp: Option<i64>,
}

/// A message close to how it is stored, for debugging and integrations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    pub key: Value,
    pub message: Value,
    pub message_type: Option<String>,
    pub status: Option<String>,
    pub message_timestamp: Option<i64>,
}

impl From<StoredMessageRow> for StoredMessage {
    fn from(row: StoredMessageRow) -> Self {
        Self {
            id: row.id,
            key: json_column(row.key),
            message: json_column(row.message),
            message_type: row.message_type,
            status: row.status,
            message_timestamp: row.message_timestamp,
        }
    }
}

/// Decodes a JSON text column; text that is not valid JSON is kept as a string.
fn json_column(raw: Option<String>) -> Value {
    match raw {
        None => Value::Null,
        Some(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use serde_json::json;

    fn row(message: Value, from_me: i64) -> MessageRow {
        MessageRow {
            id: "3EB0C767D26A".to_string(),
            remote_jid: Some("5511999990000@s.whatsapp.net".to_string()),
            from_me: Some(from_me),
            message_type: Some("imageMessage".to_string()),
            status: None,
            message_timestamp: Some(1_700_000_000),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn test_record_from_row() {
        let record = MessageRecord::from(row(
            json!({"imageMessage": {"caption": "beach", "mimetype": "image/jpeg"}}),
            1,
        ));

        assert_eq!(record.jid, "5511999990000@s.whatsapp.net");
        assert_eq!(record.when, "2023-11-14 22:13:20");
        assert_eq!(record.direction, Direction::Out);
        assert_eq!(record.text, "beach");
        assert_eq!(record.status, "");
        assert_eq!(record.media.map(|m| m.kind), Some(MediaKind::Image));
    }

    #[test]
    fn test_record_json_shape() {
        let record = MessageRecord::from(row(json!({"conversation": "oi"}), 0));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["direction"], "in");
        assert_eq!(value["type"], "imageMessage");
        assert_eq!(value["text"], "oi");
        assert!(value["media"].is_null());
    }

    #[test]
    fn test_record_from_malformed_payload() {
        let mut bad = row(json!(null), 0);
        bad.message = Some("{not json".to_string());
        let record = MessageRecord::from(bad);

        assert_eq!(record.text, "");
        assert!(record.media.is_none());
    }

    #[test]
    fn test_stored_message_keeps_raw_shape() {
        let stored = StoredMessage::from(StoredMessageRow {
            id: "m1".to_string(),
            key: Some(r#"{"remoteJid":"x@s.whatsapp.net","fromMe":true}"#.to_string()),
            message: Some("not json".to_string()),
            message_type: Some("conversation".to_string()),
            status: Some("READ".to_string()),
            message_timestamp: Some(1),
        });

        assert_eq!(stored.key["fromMe"], json!(true));
        assert_eq!(stored.message, json!("not json"));
    }
}
