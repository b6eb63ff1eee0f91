//! Report assembly: extractor output + scores + metadata into an immutable
//! [`Report`] value.

use aiready_core::{Report, ScoreSet, SignalSet, SCHEMA_VERSION};
use chrono::Utc;

use crate::error::FetchFailure;
use crate::fetch::FetchResult;

/// Builds the Report for a successful fetch, stamping the current time and
/// the pipeline's schema version.
pub(crate) fn from_fetch(
    canonical_url: String,
    requested_url: &str,
    fetch: &FetchResult,
    signals: SignalSet,
    scores: ScoreSet,
) -> Report {
    Report {
        url: canonical_url,
        requested_url: requested_url.to_owned(),
        final_url: Some(fetch.final_url.clone()),
        fetched_at: Utc::now(),
        fetch_ok: true,
        fetch_error: None,
        http_status: Some(fetch.status),
        truncated: fetch.truncated,
        signals,
        scores,
        schema_version: SCHEMA_VERSION,
    }
}

/// Builds the degraded Report for a failed fetch: all-absent signals, zero
/// scores, and the failure rendered into `fetch_error`. Downstream history
/// and comparison logic never see a missing report.
pub(crate) fn from_failure(
    canonical_url: String,
    requested_url: &str,
    failure: &FetchFailure,
) -> Report {
    Report {
        url: canonical_url,
        requested_url: requested_url.to_owned(),
        final_url: None,
        fetched_at: Utc::now(),
        fetch_ok: false,
        fetch_error: Some(failure.to_string()),
        http_status: failure.http_status(),
        truncated: false,
        signals: SignalSet::default(),
        scores: ScoreSet::zero(),
        schema_version: SCHEMA_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use aiready_core::Dimension;

    use super::*;

    #[test]
    fn failed_fetch_still_yields_a_complete_report() {
        let report = from_failure(
            "https://example.com".to_owned(),
            "https://EXAMPLE.com/",
            &FetchFailure::HttpStatus { status: 404 },
        );
        assert!(!report.fetch_ok);
        assert_eq!(report.http_status, Some(404));
        assert_eq!(report.fetch_error.as_deref(), Some("HTTP error status 404"));
        assert_eq!(report.schema_version, SCHEMA_VERSION);
        for dimension in Dimension::ALL {
            assert_eq!(report.scores.get(dimension), 0);
        }
        assert_eq!(report.scores.aggregate, 0.0);
    }

    #[test]
    fn transport_failure_carries_no_status() {
        let report = from_failure(
            "https://example.com".to_owned(),
            "https://example.com",
            &FetchFailure::Timeout { timeout_secs: 20 },
        );
        assert!(report.http_status.is_none());
        assert!(
            report
                .fetch_error
                .as_deref()
                .is_some_and(|e| e.contains("timed out")),
            "expected a timeout message, got: {:?}",
            report.fetch_error
        );
    }

    #[test]
    fn successful_fetch_records_final_url_and_status() {
        let fetch = FetchResult {
            requested_url: "https://example.com".to_owned(),
            final_url: "https://example.com/landing".to_owned(),
            status: 200,
            body: String::new(),
            truncated: true,
        };
        let report = from_fetch(
            "https://example.com".to_owned(),
            "https://EXAMPLE.com",
            &fetch,
            SignalSet::default(),
            ScoreSet::zero(),
        );
        assert!(report.fetch_ok);
        assert_eq!(report.requested_url, "https://EXAMPLE.com");
        assert_eq!(report.final_url.as_deref(), Some("https://example.com/landing"));
        assert_eq!(report.http_status, Some(200));
        assert!(report.truncated);
    }
}
