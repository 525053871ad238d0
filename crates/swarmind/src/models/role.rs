use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Who authored a piece of chat content
pub enum ChatMessageType {
    Ai,
    Human,
    System,
    Generic,
    Tool,
    Function,
}

impl ChatMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMessageType::Ai => "ai",
            ChatMessageType::Human => "human",
            ChatMessageType::System => "system",
            ChatMessageType::Generic => "generic",
            ChatMessageType::Tool => "tool",
            ChatMessageType::Function => "function",
        }
    }
}

impl fmt::Display for ChatMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ai" | "assistant" => Ok(ChatMessageType::Ai),
            "human" | "user" => Ok(ChatMessageType::Human),
            "system" => Ok(ChatMessageType::System),
            "generic" => Ok(ChatMessageType::Generic),
            "tool" => Ok(ChatMessageType::Tool),
            "function" => Ok(ChatMessageType::Function),
            other => Err(format!("unknown chat message type: {}", other)),
        }
    }
}
