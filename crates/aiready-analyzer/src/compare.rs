//! Structured diffing of two Reports.

use aiready_core::{AggregateDelta, Comparison, Dimension, DimensionDelta, Leader, Report};

use crate::error::AnalyzerError;

/// Compares two Reports into a [`Comparison`].
///
/// Works identically for two different sites and for the same site at two
/// points in time; the inputs have the same shape either way. For each
/// dimension, `delta = score_b - score_a`; equal scores mean no leader.
///
/// # Errors
///
/// Returns [`AnalyzerError::IncompatibleSchemaVersion`] when the Reports
/// were produced by different rubric versions. Deltas across rubric
/// revisions would be misleading, so this is never silently coerced.
pub fn compare(a: &Report, b: &Report) -> Result<Comparison, AnalyzerError> {
    if a.schema_version != b.schema_version {
        return Err(AnalyzerError::IncompatibleSchemaVersion {
            version_a: a.schema_version,
            version_b: b.schema_version,
        });
    }

    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let score_a = a.scores.get(dimension);
            let score_b = b.scores.get(dimension);
            DimensionDelta {
                dimension,
                score_a,
                score_b,
                delta: i64::from(score_b) - i64::from(score_a),
                leader: leader_for(score_a, score_b),
            }
        })
        .collect();

    let aggregate = AggregateDelta {
        score_a: a.scores.aggregate,
        score_b: b.scores.aggregate,
        delta: b.scores.aggregate - a.scores.aggregate,
        leader: leader_for(a.scores.aggregate, b.scores.aggregate),
    };

    Ok(Comparison {
        url_a: a.url.clone(),
        url_b: b.url.clone(),
        dimensions,
        aggregate,
        schema_version: a.schema_version,
    })
}

/// Symmetric tie rule: equal scores have no leader.
fn leader_for<T: PartialOrd>(a: T, b: T) -> Leader {
    match b.partial_cmp(&a) {
        Some(std::cmp::Ordering::Greater) => Leader::B,
        Some(std::cmp::Ordering::Less) => Leader::A,
        _ => Leader::Tie,
    }
}
