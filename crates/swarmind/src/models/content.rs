use super::role::ChatMessageType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryContent {
    pub mime_type: String,
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionCall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A single typed piece of a chat message
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    Binary { binary: BinaryContent },
    ToolCall { tool_call: ToolCall },
    ToolResponse { tool_response: ToolCallResponse },
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }

    pub fn binary<S: Into<String>>(mime_type: S, data: Vec<u8>) -> Self {
        ContentPart::Binary {
            binary: BinaryContent {
                mime_type: mime_type.into(),
                data,
            },
        }
    }

    /// Get the text if this is a Text variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Role-tagged chat message body
///
/// A body holding exactly one text part is written in the compact form
/// `{"role": "...", "text": "..."}`, anything else as `{"role": "...", "parts": [...]}`.
/// Both forms are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMessageContent", into = "RawMessageContent")]
pub struct MessageContent {
    pub role: ChatMessageType,
    pub parts: Vec<ContentPart>,
}

impl MessageContent {
    pub fn new(role: ChatMessageType) -> Self {
        MessageContent {
            role,
            parts: Vec::new(),
        }
    }

    pub fn human() -> Self {
        Self::new(ChatMessageType::Human)
    }

    pub fn ai() -> Self {
        Self::new(ChatMessageType::Ai)
    }

    pub fn system() -> Self {
        Self::new(ChatMessageType::System)
    }

    /// Create a body with a single text part
    pub fn text_parts<S: Into<String>>(role: ChatMessageType, text: S) -> Self {
        Self::new(role).with_text(text)
    }

    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_part(ContentPart::text(text))
    }

    /// All text parts joined by newlines
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.as_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize, Deserialize)]
struct RawMessageContent {
    role: ChatMessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<Vec<ContentPart>>,
}

impl From<RawMessageContent> for MessageContent {
    fn from(raw: RawMessageContent) -> Self {
        let mut parts = Vec::new();
        if let Some(text) = raw.text {
            parts.push(ContentPart::Text { text });
        }
        parts.extend(raw.parts.unwrap_or_default());
        MessageContent {
            role: raw.role,
            parts,
        }
    }
}

impl From<MessageContent> for RawMessageContent {
    fn from(content: MessageContent) -> Self {
        let MessageContent { role, parts } = content;
        if parts.len() == 1 {
            if let Some(ContentPart::Text { text }) = parts.first() {
                let text = text.clone();
                return RawMessageContent {
                    role,
                    text: Some(text),
                    parts: None,
                };
            }
        }
        RawMessageContent {
            role,
            text: None,
            parts: Some(parts),
        }
    }
}

mod base64_data {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
