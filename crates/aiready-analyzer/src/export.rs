//! Markdown rendering of Reports and Comparisons.
//!
//! Pure rendering with no external calls. Field ordering is the fixed rubric
//! order, so the same input always produces byte-identical output and the
//! rendered documents diff cleanly against each other.

use aiready_core::{Comparison, Dimension, Leader, Report};

use crate::score::checks_for;

/// Renders a Report as a portable Markdown document.
#[must_use]
pub fn report_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("# AI readiness report: {}\n\n", report.url));
    out.push_str(&format!(
        "- Fetched at: {}\n",
        report.fetched_at.to_rfc3339()
    ));
    match (&report.fetch_error, report.http_status) {
        (Some(error), _) => out.push_str(&format!("- Fetch: failed ({error})\n")),
        (None, Some(status)) => out.push_str(&format!("- Fetch: ok (HTTP {status})\n")),
        (None, None) => out.push_str("- Fetch: ok\n"),
    }
    if let Some(final_url) = &report.final_url {
        if final_url != &report.url {
            out.push_str(&format!("- Resolved to: {final_url}\n"));
        }
    }
    if report.truncated {
        out.push_str("- Body truncated at the size cap; signals reflect the fetched prefix\n");
    }
    out.push_str(&format!("- Schema version: {}\n", report.schema_version));

    out.push_str("\n## Scores\n\n");
    out.push_str("| Dimension | Score |\n|---|---|\n");
    for dimension in Dimension::ALL {
        out.push_str(&format!(
            "| {} | {} |\n",
            dimension.label(),
            report.scores.get(dimension)
        ));
    }
    out.push_str(&format!("| Aggregate | {:.1} |\n", report.scores.aggregate));

    out.push_str("\n## Signals\n");
    for dimension in Dimension::ALL {
        out.push_str(&format!("\n### {}\n\n", dimension.label()));
        for &(key, _) in checks_for(dimension) {
            let signal = report.signals.get(key);
            if signal.present {
                match &signal.evidence {
                    Some(evidence) => {
                        out.push_str(&format!("- [x] {}: {}\n", key.as_str(), evidence));
                    }
                    None => out.push_str(&format!("- [x] {}\n", key.as_str())),
                }
            } else {
                out.push_str(&format!("- [ ] {}\n", key.as_str()));
            }
        }
    }

    out
}

/// Renders a Comparison as a portable Markdown document.
#[must_use]
pub fn comparison_markdown(comparison: &Comparison) -> String {
    let mut out = String::new();

    out.push_str("# AI readiness comparison\n\n");
    out.push_str(&format!("- A: {}\n", comparison.url_a));
    out.push_str(&format!("- B: {}\n", comparison.url_b));
    out.push_str(&format!("- Schema version: {}\n", comparison.schema_version));

    out.push_str("\n## Scores\n\n");
    out.push_str("| Dimension | A | B | Delta | Leader |\n|---|---|---|---|---|\n");
    for delta in &comparison.dimensions {
        out.push_str(&format!(
            "| {} | {} | {} | {:+} | {} |\n",
            delta.dimension.label(),
            delta.score_a,
            delta.score_b,
            delta.delta,
            leader_cell(delta.leader)
        ));
    }
    let aggregate = &comparison.aggregate;
    out.push_str(&format!(
        "| Aggregate | {:.1} | {:.1} | {:+.1} | {} |\n",
        aggregate.score_a,
        aggregate.score_b,
        aggregate.delta,
        leader_cell(aggregate.leader)
    ));

    out
}

fn leader_cell(leader: Leader) -> &'static str {
    match leader {
        Leader::A => "A",
        Leader::B => "B",
        Leader::Tie => "tie",
    }
}
