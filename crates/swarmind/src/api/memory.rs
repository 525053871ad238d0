use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::errors::TransportError;
use crate::models::message::{Message, Messages};

/// In-process stand-in for the history store
///
/// Answers the same routes as the store: updates edit entries by id, append unknown ids,
/// delete entries submitted without content, and an unknown chat reads as `null`. Every
/// request is recorded for inspection.
#[derive(Default)]
pub struct MemoryStore {
    chats: Mutex<BTreeMap<(String, String), Vec<Message>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn respond(status: StatusCode, body: Vec<u8>) -> HttpResponse {
        HttpResponse { status, body }
    }

    fn apply(history: &mut Vec<Message>, update: Vec<Message>) {
        let now = Utc::now();
        for msg in update {
            match history.iter().position(|stored| stored.id == msg.id) {
                Some(index) => match msg.message {
                    Some(content) => {
                        history[index].message = Some(content);
                        history[index].updated_at = Some(now);
                    }
                    None => {
                        history.remove(index);
                    }
                },
                None if msg.message.is_some() => history.push(Message {
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..msg
                }),
                None => {}
            }
        }
    }
}

#[async_trait]
impl Transport for MemoryStore {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .map_err(|_| "request log poisoned")?
            .push(request.clone());

        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| {
                s.map(|segment| urlencoding::decode(segment).map(|d| d.into_owned()))
                    .collect::<Result<Vec<String>, _>>()
            })
            .transpose()?
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut chats = self.chats.lock().map_err(|_| "store poisoned")?;

        let response = match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["heads"]) => Self::respond(StatusCode::OK, serde_json::to_vec(&["main"])?),
            ("GET", ["store", "chats", namespace]) => {
                let names: Vec<&str> = chats
                    .keys()
                    .filter(|(ns, _)| ns.as_str() == *namespace)
                    .map(|(_, chat)| chat.as_str())
                    .collect();
                Self::respond(StatusCode::OK, serde_json::to_vec(&names)?)
            }
            ("GET", ["store", "history", namespace, chat]) => {
                let key = (namespace.to_string(), chat.to_string());
                let body = match chats.get(&key) {
                    Some(history) => serde_json::to_vec(history)?,
                    None => b"null".to_vec(),
                };
                Self::respond(StatusCode::OK, body)
            }
            ("POST", ["store", "history", namespace, chat]) => {
                let body = request.body.unwrap_or_default();
                let update: Messages = match serde_json::from_slice(&body) {
                    Ok(update) => update,
                    Err(e) => {
                        return Ok(Self::respond(
                            StatusCode::BAD_REQUEST,
                            e.to_string().into_bytes(),
                        ))
                    }
                };
                let history = chats
                    .entry((namespace.to_string(), chat.to_string()))
                    .or_default();
                Self::apply(history, update.messages);
                Self::respond(StatusCode::NO_CONTENT, Vec::new())
            }
            ("DELETE", ["store", "history", namespace, chat]) => {
                chats.remove(&(namespace.to_string(), chat.to_string()));
                Self::respond(StatusCode::NO_CONTENT, Vec::new())
            }
            _ => Self::respond(StatusCode::NOT_FOUND, b"404 page not found".to_vec()),
        };

        Ok(response)
    }
}
