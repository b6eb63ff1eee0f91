//! Request-scoped analysis orchestration.
//!
//! Each analysis runs independently with no shared mutable state; the only
//! blocking step is the fetch, and its timeout bounds the whole request.
//! Extraction, scoring, building, comparison, and export are pure.

use aiready_core::{AppConfig, Comparison, Report};

use crate::canonical::canonicalize;
use crate::compare::compare;
use crate::error::AnalyzerError;
use crate::extract::extract;
use crate::fetch::PageFetcher;
use crate::report::{from_failure, from_fetch};
use crate::score::score;

/// The analysis engine: an explicitly constructed fetcher plus the pure
/// pipeline stages. Built once at startup and injected into callers.
pub struct Analyzer {
    fetcher: PageFetcher,
}

impl Analyzer {
    /// Creates an analyzer with the given fetch parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the HTTP client cannot be built.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_body_bytes: usize,
        max_redirects: usize,
    ) -> Result<Self, AnalyzerError> {
        let fetcher = PageFetcher::new(timeout_secs, user_agent, max_body_bytes, max_redirects)?;
        Ok(Self { fetcher })
    }

    /// Creates an analyzer from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalyzerError> {
        Self::new(
            config.fetch_timeout_secs,
            &config.fetch_user_agent,
            config.fetch_max_body_bytes,
            config.fetch_max_redirects,
        )
    }

    /// Runs the full pipeline for one URL: canonicalize, fetch, extract,
    /// score, build.
    ///
    /// Fetch failures do not abort the pipeline; they produce a degraded
    /// Report with `fetch_ok = false` and zero scores, so callers (and the
    /// History Store) never have to handle a missing report.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidUrl`] for inputs that don't parse as
    /// absolute HTTP/HTTPS URLs; this is rejected before any network access.
    pub async fn analyze(&self, url: &str) -> Result<Report, AnalyzerError> {
        let canonical = canonicalize(url)?;

        match self.fetcher.fetch(&canonical).await {
            Ok(fetch) => {
                let signals = extract(&fetch);
                let scores = score(&signals);
                tracing::debug!(
                    url = %canonical,
                    aggregate = scores.aggregate,
                    "analysis complete"
                );
                Ok(from_fetch(canonical, url, &fetch, signals, scores))
            }
            Err(failure) => {
                tracing::warn!(
                    url = %canonical,
                    error = %failure,
                    "fetch failed; producing degraded report"
                );
                Ok(from_failure(canonical, url, &failure))
            }
        }
    }

    /// Analyzes two URLs concurrently and compares the results.
    ///
    /// The two fetches are independent: one side failing (and degrading per
    /// [`Analyzer::analyze`]) never prevents the other side's Report, and
    /// the Comparison is still produced with the failed side at zero.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidUrl`] if either URL is malformed,
    /// checked for both sides before any network access.
    pub async fn analyze_pair(
        &self,
        url_a: &str,
        url_b: &str,
    ) -> Result<(Report, Report, Comparison), AnalyzerError> {
        // Validate both inputs up front so a malformed second URL doesn't
        // waste a fetch of the first.
        canonicalize(url_a)?;
        canonicalize(url_b)?;

        let (report_a, report_b) = tokio::join!(self.analyze(url_a), self.analyze(url_b));
        let (report_a, report_b) = (report_a?, report_b?);

        let comparison = compare(&report_a, &report_b)?;
        Ok((report_a, report_b, comparison))
    }
}
