use super::content::MessageContent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One entry of a stored chat history
///
/// Timestamps are assigned by the store and only read back. A record submitted with no
/// `message` asks the store to delete the entry with the same `id`.
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: Option<MessageContent>,
}

impl Message {
    /// Create a new record with a fresh id
    pub fn new(content: MessageContent) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), content)
    }

    /// Create a record that replaces the content stored under `id`
    pub fn with_id<S: Into<String>>(id: S, content: MessageContent) -> Self {
        Message {
            id: id.into(),
            created_at: None,
            updated_at: None,
            message: Some(content),
        }
    }

    /// Create a record that deletes the entry stored under `id`
    pub fn deletion<S: Into<String>>(id: S) -> Self {
        Message {
            id: id.into(),
            created_at: None,
            updated_at: None,
            message: None,
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.message.is_none()
    }

    pub fn text(&self) -> String {
        self.message
            .as_ref()
            .map(|content| content.text())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of a history update
pub struct Messages {
    pub messages: Vec<Message>,
}

impl From<Vec<Message>> for Messages {
    fn from(messages: Vec<Message>) -> Self {
        Messages { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::ChatMessageType;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_deletion_serializes_null_message() {
        let value = serde_json::to_value(Message::deletion("b")).unwrap();
        assert_eq!(value, json!({"id": "b", "message": null}));
    }

    #[test]
    fn test_new_message_has_no_timestamps() {
        let msg = Message::new(MessageContent::text_parts(ChatMessageType::Ai, "Message 1"));
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("created_at").is_none());
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["message"], json!({"role": "ai", "text": "Message 1"}));
        assert!(Uuid::parse_str(&msg.id).is_ok());
    }

    #[test]
    fn test_decode_stored_message() {
        let value = json!({
            "id": "a",
            "created_at": "2024-11-05T10:15:30Z",
            "updated_at": "2024-11-05T10:16:00.5+01:00",
            "message": {"role": "human", "text": "hello"}
        });
        let msg: Message = serde_json::from_value(value).unwrap();
        assert_eq!(
            msg.created_at,
            Some(Utc.with_ymd_and_hms(2024, 11, 5, 10, 15, 30).unwrap())
        );
        assert!(msg.updated_at.is_some());
        assert_eq!(msg.text(), "hello");
        assert!(!msg.is_deletion());
    }

    #[test]
    fn test_decode_missing_and_null_fields() {
        let msg: Message = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(msg, Message::deletion("x"));

        let msg: Message = serde_json::from_value(json!({
            "id": "y",
            "created_at": null,
            "message": null
        }))
        .unwrap();
        assert!(msg.created_at.is_none());
        assert!(msg.is_deletion());
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn test_zero_time_decodes() {
        let msg: Message = serde_json::from_value(json!({
            "id": "z",
            "created_at": "0001-01-01T00:00:00Z",
            "updated_at": "0001-01-01T00:00:00Z",
            "message": null
        }))
        .unwrap();
        assert!(msg.created_at.is_some());
    }

    #[test]
    fn test_decode_history_with_function_role() {
        let history: Vec<Message> = serde_json::from_str(
            r#"[{"id":"a","message":{"role":"function","text":"x"}},{"id":"b","message":{"role":"ai","text":"y"}}]"#,
        )
        .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].message.as_ref().map(|c| c.role),
            Some(ChatMessageType::Function)
        );
        assert_eq!(history[0].text(), "x");
    }

    #[test]
    fn test_messages_envelope() {
        let batch: Messages = vec![Message::deletion("a")].into();
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value, json!({"messages": [{"id": "a", "message": null}]}));
    }
}
