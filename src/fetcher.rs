use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{info, warn};

/// Outcome of one results-page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Body of a 200 response, unvalidated.
    Success(String),
    Failure(FetchFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server could not be reached or the body could not be read.
    ConnectionError(String),
    /// The server answered with something other than 200.
    HttpError(u16),
}

/// Retrieves a results page. One call, one request; nothing is cached.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> FetchResult;
}

/// Blocking HTTP fetcher with the client's default timeouts and no retries.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, error = %err, "request failed");
                return FetchResult::Failure(FetchFailure::ConnectionError(err.to_string()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "unexpected response status");
            return FetchResult::Failure(FetchFailure::HttpError(status.as_u16()));
        }

        match response.text() {
            Ok(body) => {
                info!(%url, bytes = body.len(), "fetched results page");
                FetchResult::Success(body)
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to read response body");
                FetchResult::Failure(FetchFailure::ConnectionError(err.to_string()))
            }
        }
    }
}
