#![allow(async_fn_in_trait)]

use std::time::Duration;

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Server at {url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    Body { url: String, source: std::io::Error },

    #[error("Fetch task failed: {source}")]
    Task { source: tokio::task::JoinError },
}

/// Everything that can make a single poll cycle come back empty-handed.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Network error: {0}")]
    Fetch(#[from] FetchError),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PollError {
    pub fn is_network(&self) -> bool {
        matches!(self, PollError::Fetch(_))
    }
}

/// A remote document that can be fetched as raw JSON text.
pub trait JsonSource {
    fn url(&self) -> &str;

    async fn fetch(&self) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            url: url.into(),
            agent,
        }
    }

    fn get_blocking(&self) -> Result<String, FetchError> {
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: self.url.clone(),
                status,
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: self.url.clone(),
                message: transport.to_string(),
            },
        })?;

        response.into_string().map_err(|source| FetchError::Body {
            url: self.url.clone(),
            source,
        })
    }
}

impl JsonSource for HttpSource {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let source = self.clone();

        tokio::task::spawn_blocking(move || source.get_blocking())
            .await
            .map_err(|source| FetchError::Task { source })?
    }
}

pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

pub async fn fetch_json<S, T>(source: &S) -> Result<T, PollError>
where
    S: JsonSource,
    T: DeserializeOwned,
{
    let body = source.fetch().await?;
    tracing::trace!(url = source.url(), bytes = body.len(), "Received response");

    Ok(parse_json(&body)?)
}
