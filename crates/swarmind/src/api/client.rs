use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::config::ApiConfig;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::errors::{SwarmindError, SwarmindResult};
use crate::models::message::{Message, Messages};

/// Client for the chat history store
///
/// Every call is a single authenticated round trip. Nothing is cached between calls and
/// nothing is retried, so callers sequence dependent calls themselves.
pub struct ApiClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// List the store's current heads
    pub async fn list_heads(&self) -> SwarmindResult<Vec<String>> {
        let url = self.endpoint(&["heads"])?;
        let response = self.execute(Method::GET, url, None, StatusCode::OK).await?;
        decode_list(&response)
    }

    /// List the chats stored under the configured namespace
    pub async fn list_chats(&self) -> SwarmindResult<Vec<String>> {
        let url = self.endpoint(&["store", "chats", &self.config.namespace])?;
        let response = self.execute(Method::GET, url, None, StatusCode::OK).await?;
        decode_list(&response)
    }

    /// Fetch the ordered history of `chat`
    pub async fn get_history(&self, chat: &str) -> SwarmindResult<Vec<Message>> {
        let url = self.history_endpoint(chat)?;
        let response = self.execute(Method::GET, url, None, StatusCode::OK).await?;
        decode_list(&response)
    }

    /// Append, edit or delete entries of `chat`
    ///
    /// Records with an unknown id are appended. A known id with content replaces the stored
    /// content and a known id without content deletes the entry.
    pub async fn update_history(&self, chat: &str, messages: &[Message]) -> SwarmindResult<()> {
        let url = self.history_endpoint(chat)?;
        let body = serde_json::to_vec(&Messages {
            messages: messages.to_vec(),
        })
        .map_err(SwarmindError::Encode)?;
        self.execute(Method::POST, url, Some(body), StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }

    /// Remove the whole history of `chat`
    pub async fn drop_history(&self, chat: &str) -> SwarmindResult<()> {
        let url = self.history_endpoint(chat)?;
        self.execute(Method::DELETE, url, None, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }

    fn history_endpoint(&self, chat: &str) -> SwarmindResult<Url> {
        self.endpoint(&["store", "history", &self.config.namespace, chat])
    }

    fn endpoint(&self, segments: &[&str]) -> SwarmindResult<Url> {
        join_url(&self.config.url, segments)
    }

    fn headers(&self, has_body: bool) -> SwarmindResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.config.token))
            .map_err(|e| SwarmindError::InvalidRequest(format!("authorization header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> SwarmindResult<HttpResponse> {
        let request = HttpRequest {
            method,
            url,
            headers: self.headers(body.is_some())?,
            body,
        };
        tracing::debug!(method = %request.method, url = %request.url, "sending store request");

        let method = request.method.clone();
        let url = request.url.clone();
        let send = self.transport.send(request);
        let response = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, send)
                .await
                .map_err(|_| SwarmindError::Timeout(timeout))?,
            None => send.await,
        }
        .map_err(SwarmindError::Transport)?;

        tracing::debug!(%method, %url, status = %response.status, "store responded");
        if response.status != expected {
            tracing::warn!(
                %method,
                %url,
                status = %response.status,
                expected = %expected,
                "unexpected status from store"
            );
            return Err(SwarmindError::UnexpectedStatus {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }

        Ok(response)
    }
}

/// Decode a JSON array, treating a `null` body as an empty list
fn decode_list<D: DeserializeOwned>(response: &HttpResponse) -> SwarmindResult<Vec<D>> {
    let items: Option<Vec<D>> =
        serde_json::from_slice(&response.body).map_err(SwarmindError::Decode)?;
    Ok(items.unwrap_or_default())
}

/// Append path segments to `base`
///
/// Trailing slashes of the base path are dropped and every segment is percent-encoded as a
/// single path segment, so a `/` inside a chat name never adds a level. This differs from a
/// plain path join, which would split such a name into several segments. Empty, `.` and `..`
/// segments are rejected since they would resolve to another resource.
pub(crate) fn join_url(base: &str, segments: &[&str]) -> SwarmindResult<Url> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(SwarmindError::InvalidUrl(format!(
            "{} cannot be used as a base URL",
            base
        )));
    }

    let mut path = url.path().trim_end_matches('/').to_string();
    for segment in segments {
        if segment.is_empty() || *segment == "." || *segment == ".." {
            return Err(SwarmindError::InvalidUrl(format!(
                "invalid path segment {:?} in {:?}",
                segment, segments
            )));
        }
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    url.set_path(&path);

    Ok(url)
}
