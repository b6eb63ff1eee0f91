use std::time::Duration;

use reqwest::{redirect, Client};

use crate::error::{AnalyzerError, FetchFailure};

/// Raw content captured from a single bounded GET.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL that was requested (canonical form).
    pub requested_url: String,
    /// Resolved URL after following redirects.
    pub final_url: String,
    pub status: u16,
    /// Response body, decoded lossily as UTF-8, capped at the byte limit.
    pub body: String,
    /// The body was cut at the cap; the prefix is still analyzed.
    pub truncated: bool,
}

/// HTTP fetcher for page analysis.
///
/// Built once at startup with configured timeout, `User-Agent`, body cap,
/// and redirect hop limit, then injected wherever fetching happens; there
/// is no process-wide client singleton.
///
/// The single request timeout is the cancellation boundary for a whole
/// analysis: everything downstream of the fetch is pure and non-blocking.
pub struct PageFetcher {
    client: Client,
    timeout_secs: u64,
    max_body_bytes: usize,
    max_redirects: usize,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with configured timeout, `User-Agent`, body
    /// cap, and redirect policy.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_body_bytes: usize,
        max_redirects: usize,
    ) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(max_redirects))
            .build()?;
        Ok(Self {
            client,
            timeout_secs,
            max_body_bytes,
            max_redirects,
        })
    }

    /// Issues one bounded GET for `url` and captures the final URL, status,
    /// and body up to the configured byte cap.
    ///
    /// A body that crosses the cap mid-stream is truncated and recorded as
    /// such, not failed; a `Content-Length` already over the cap fails with
    /// [`FetchFailure::TooLarge`] before any body bytes are read.
    ///
    /// # Errors
    ///
    /// - [`FetchFailure::Timeout`]: the request exceeded the configured timeout.
    /// - [`FetchFailure::TooManyRedirects`]: the redirect hop limit was hit.
    /// - [`FetchFailure::Unreachable`]: DNS/connect/TLS failure.
    /// - [`FetchFailure::HttpStatus`]: any non-2xx final status.
    /// - [`FetchFailure::TooLarge`]: declared body size over the cap.
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, FetchFailure> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Err(self.classify(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::HttpStatus {
                status: status.as_u16(),
            });
        }

        let cap = u64::try_from(self.max_body_bytes).unwrap_or(u64::MAX);
        if let Some(content_length) = response.content_length() {
            if content_length > cap {
                return Err(FetchFailure::TooLarge {
                    content_length,
                    max_bytes: self.max_body_bytes,
                });
            }
        }

        let final_url = response.url().to_string();
        let status_code = status.as_u16();

        let mut response = response;
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    let remaining = self.max_body_bytes - body.len();
                    if chunk.len() >= remaining {
                        body.extend_from_slice(&chunk[..remaining]);
                        // Only a truncation if there were more bytes to read.
                        truncated = chunk.len() > remaining
                            || matches!(response.chunk().await, Ok(Some(_)));
                        break;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => return Err(self.classify(&e)),
            }
        }

        Ok(FetchResult {
            requested_url: url.to_owned(),
            final_url,
            status: status_code,
            body: String::from_utf8_lossy(&body).into_owned(),
            truncated,
        })
    }

    /// Maps a `reqwest` transport error onto the fetch failure taxonomy.
    fn classify(&self, err: &reqwest::Error) -> FetchFailure {
        if err.is_timeout() {
            FetchFailure::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if err.is_redirect() {
            FetchFailure::TooManyRedirects {
                limit: self.max_redirects,
            }
        } else {
            FetchFailure::Unreachable {
                reason: err.to_string(),
            }
        }
    }
}
