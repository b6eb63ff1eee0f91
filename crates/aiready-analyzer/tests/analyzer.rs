//! Integration tests for the analysis pipeline.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, the degraded-report
//! policy for every fetch failure the pipeline can recover, and the
//! two-URL comparison path with one failing side.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aiready_analyzer::{Analyzer, AnalyzerError};
use aiready_core::{Dimension, Leader, SCHEMA_VERSION};

/// Builds an `Analyzer` suitable for tests: 2-second timeout, generous body cap.
fn test_analyzer() -> Analyzer {
    Analyzer::new(2, "aiready-test/0.1", 1_000_000, 5).expect("failed to build test Analyzer")
}

/// A page with enough signals to score well above zero.
fn rich_body() -> &'static str {
    r##"<html><head>
<title>Acme Widgets</title>
<meta name="description" content="Widgets assistants can recommend.">
<meta property="og:site_name" content="Acme Widgets">
<link rel="canonical" href="https://acme.example/">
<script type="application/ld+json">{"@type": "Organization", "name": "Acme Widgets"}</script>
</head><body>
<h1>Acme Widgets</h1>
<h2>What is a widget?</h2>
<p>A widget is a small component that does one thing well and is documented for reuse.</p>
<h2>How much does it cost?</h2>
<p>Plans start at $29/mo.</p>
<a href="/pricing">Pricing</a>
</body></html>"##
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_scores_a_reachable_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rich_body()))
        .mount(&server)
        .await;

    let report = test_analyzer()
        .analyze(&server.uri())
        .await
        .expect("analysis should succeed");

    assert!(report.fetch_ok);
    assert_eq!(report.http_status, Some(200));
    assert!(report.fetch_error.is_none());
    assert_eq!(report.schema_version, SCHEMA_VERSION);
    assert!(report.signals.site_name.present);
    assert!(report.signals.title_tag.present);
    assert!(report.signals.visible_pricing.present);
    assert!(
        report.scores.aggregate > 0.0,
        "expected a positive aggregate, got {}",
        report.scores.aggregate
    );
}

#[tokio::test]
async fn analyze_canonicalizes_the_report_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>ok</title>"))
        .mount(&server)
        .await;

    let raw = format!("{}/page/#section", server.uri());
    let report = test_analyzer().analyze(&raw).await.expect("analysis");
    assert_eq!(report.url, format!("{}/page", server.uri()));
    assert_eq!(report.requested_url, raw);
}

// ---------------------------------------------------------------------------
// Degraded reports: every fetch failure still yields a complete Report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_404_degrades_to_a_low_scoring_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = test_analyzer()
        .analyze(&server.uri())
        .await
        .expect("a 404 must still produce a report");

    assert!(!report.fetch_ok);
    assert_eq!(report.http_status, Some(404));
    assert!(
        report
            .fetch_error
            .as_deref()
            .is_some_and(|e| e.contains("404")),
        "expected the status in the error, got: {:?}",
        report.fetch_error
    );
    // The score set is complete even though nothing was extracted.
    for dimension in Dimension::ALL {
        assert_eq!(report.scores.get(dimension), 0);
    }
    assert!(report.scores.aggregate <= 10.0);
}

#[tokio::test]
async fn server_error_degrades_to_a_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = test_analyzer().analyze(&server.uri()).await.expect("report");
    assert!(!report.fetch_ok);
    assert_eq!(report.http_status, Some(503));
}

#[tokio::test]
async fn timeout_degrades_to_a_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>slow</title>")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    // 1-second timeout so the test doesn't dawdle.
    let analyzer = Analyzer::new(1, "aiready-test/0.1", 1_000_000, 5).expect("analyzer");
    let report = analyzer.analyze(&server.uri()).await.expect("report");

    assert!(!report.fetch_ok);
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

#[tokio::test]
async fn unreachable_host_degrades_to_a_report() {
    // Grab a local port that is no longer listening.
    let dead_uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let report = test_analyzer().analyze(&dead_uri).await.expect("report");
    assert!(!report.fetch_ok);
    assert!(report.http_status.is_none());
    assert!(
        report
            .fetch_error
            .as_deref()
            .is_some_and(|e| e.contains("unreachable")),
        "expected an unreachable message, got: {:?}",
        report.fetch_error
    );
}

#[tokio::test]
async fn oversized_declared_body_degrades_to_a_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .mount(&server)
        .await;

    // Cap well below the declared Content-Length.
    let analyzer = Analyzer::new(2, "aiready-test/0.1", 512, 5).expect("analyzer");
    let report = analyzer.analyze(&server.uri()).await.expect("report");

    assert!(!report.fetch_ok);
    assert!(
        report
            .fetch_error
            .as_deref()
            .is_some_and(|e| e.contains("exceeds the cap")),
        "expected a size-cap message, got: {:?}",
        report.fetch_error
    );
}

// ---------------------------------------------------------------------------
// Redirects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn redirects_are_followed_and_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/landing", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>landed</title>"))
        .mount(&server)
        .await;

    let report = test_analyzer().analyze(&server.uri()).await.expect("report");
    assert!(report.fetch_ok);
    assert_eq!(
        report.final_url.as_deref(),
        Some(format!("{}/landing", server.uri()).as_str())
    );
    assert!(report.signals.title_tag.present);
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_url_is_rejected_before_any_fetch() {
    let result = test_analyzer().analyze("not a url").await;
    assert!(
        matches!(result, Err(AnalyzerError::InvalidUrl { .. })),
        "expected InvalidUrl, got: {result:?}"
    );
}

#[tokio::test]
async fn pair_with_one_malformed_url_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rich_body()))
        .mount(&server)
        .await;

    let result = test_analyzer()
        .analyze_pair(&server.uri(), "nope://")
        .await;
    assert!(matches!(result, Err(AnalyzerError::InvalidUrl { .. })));
    // Nothing should have been fetched for the valid side either.
    assert!(server.received_requests().await.is_some_and(|r| r.is_empty()));
}

// ---------------------------------------------------------------------------
// Two-URL comparison with partial failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pair_comparison_survives_one_failing_side() {
    let healthy = MockServer::start().await;
    let broken = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rich_body()))
        .mount(&healthy)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let (report_a, report_b, comparison) = test_analyzer()
        .analyze_pair(&healthy.uri(), &broken.uri())
        .await
        .expect("pair analysis with one failure must still compare");

    assert!(report_a.fetch_ok);
    assert!(!report_b.fetch_ok);
    assert_eq!(comparison.aggregate.leader, Leader::A);
    assert!(comparison.aggregate.delta < 0.0);
    assert_eq!(comparison.dimensions.len(), Dimension::ALL.len());
}
