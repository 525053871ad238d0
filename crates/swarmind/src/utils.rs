use crate::errors::{SwarmindError, SwarmindResult};
use crate::models::content::MessageContent;
use crate::models::message::Message;

/// Wrap chat bodies into new history records
///
/// Each record gets a fresh id, even when two bodies are identical. Timestamps stay empty
/// until the store assigns them.
pub fn contents_to_messages<I>(contents: I) -> Vec<Message>
where
    I: IntoIterator<Item = MessageContent>,
{
    contents.into_iter().map(Message::new).collect()
}

/// Extract the chat bodies of history records, in order
///
/// Fails on the first record that carries no content.
pub fn messages_to_contents(messages: &[Message]) -> SwarmindResult<Vec<MessageContent>> {
    messages
        .iter()
        .map(|msg| {
            msg.message
                .clone()
                .ok_or_else(|| SwarmindError::MissingContent { id: msg.id.clone() })
        })
        .collect()
}
