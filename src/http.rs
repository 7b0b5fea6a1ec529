use std::io::{self, Read};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Blocking GET access to remote documents.
pub trait HttpSource {
    /// Fetches `url` and returns the decoded body.
    fn get_text(&self, url: &Url) -> Result<String, HttpError>;

    /// Starts fetching `url` and returns the body as a reader, so large
    /// downloads are consumed in chunks.
    fn get_stream(&self, url: &Url) -> Result<Box<dyn Read + '_>, HttpError>;
}

/// [`HttpSource`] backed by `reqwest`'s blocking client. Every request sends
/// the configured user agent and is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct BlockingClient {
    client: Client,
}

impl BlockingClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(HttpError::Client)?;
        Ok(Self { client })
    }

    fn send(&self, url: &Url) -> Result<Response, HttpError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl HttpSource for BlockingClient {
    fn get_text(&self, url: &Url) -> Result<String, HttpError> {
        self.send(url)?.text().map_err(|source| HttpError::Request {
            url: url.to_string(),
            source,
        })
    }

    fn get_stream(&self, url: &Url) -> Result<Box<dyn Read + '_>, HttpError> {
        Ok(Box::new(self.send(url)?))
    }
}
