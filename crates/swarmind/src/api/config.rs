use std::time::Duration;

/// Connection settings for a history store
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub url: String,
    pub namespace: String,
    pub token: String,
    /// Deadline for a whole round trip, body read included
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new<U, N, T>(url: U, namespace: N, token: T) -> Self
    where
        U: Into<String>,
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            url: url.into(),
            namespace: namespace.into(),
            token: token.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
