//! Table-driven readiness scorer.
//!
//! Each dimension has a fixed ordered list of signal checks with fixed point
//! weights; the dimension score is the sum of satisfied-check weights,
//! clamped to the bounded range. These tables and the aggregate weights are
//! part of the published contract: changing any of them requires bumping
//! [`aiready_core::SCHEMA_VERSION`].

use aiready_core::{Dimension, ScoreSet, SignalKey, SignalSet};

/// Upper bound of every dimension score.
pub(crate) const MAX_DIMENSION_SCORE: u32 = 100;

/// Entity clarity: can an assistant tell who this site is?
const ENTITY_CLARITY_CHECKS: &[(SignalKey, u32)] = &[
    (SignalKey::OrganizationSchema, 40),
    (SignalKey::SiteName, 25),
    (SignalKey::CanonicalLink, 20),
    (SignalKey::MetaDescription, 15),
];

/// Answerability: does the page carry answer-shaped content?
const ANSWERABILITY_CHECKS: &[(SignalKey, u32)] = &[
    (SignalKey::FaqSchema, 35),
    (SignalKey::QuestionHeadings, 25),
    (SignalKey::DirectAnswers, 25),
    (SignalKey::HeadingHierarchy, 15),
];

/// Commercial clarity: is there a visible, structured offer?
const COMMERCIAL_CLARITY_CHECKS: &[(SignalKey, u32)] = &[
    (SignalKey::OfferSchema, 40),
    (SignalKey::VisiblePricing, 35),
    (SignalKey::PricingPageLink, 25),
];

/// Trust: authorship, freshness, references, reachability.
const TRUST_CHECKS: &[(SignalKey, u32)] = &[
    (SignalKey::AuthorByline, 30),
    (SignalKey::FreshnessDate, 30),
    (SignalKey::OutboundCitations, 20),
    (SignalKey::ContactPoint, 20),
];

/// Retrievability: can the page be crawled and understood?
const RETRIEVABILITY_CHECKS: &[(SignalKey, u32)] = &[
    (SignalKey::Indexable, 40),
    (SignalKey::ValidStructuredData, 25),
    (SignalKey::SitemapReference, 20),
    (SignalKey::TitleTag, 15),
];

/// Aggregate weights across the five dimensions; they sum to 1.0.
const AGGREGATE_WEIGHTS: [(Dimension, f64); 5] = [
    (Dimension::EntityClarity, 0.25),
    (Dimension::Answerability, 0.25),
    (Dimension::CommercialClarity, 0.15),
    (Dimension::Trust, 0.20),
    (Dimension::Retrievability, 0.15),
];

/// The check table for one dimension, in check order.
pub(crate) fn checks_for(dimension: Dimension) -> &'static [(SignalKey, u32)] {
    match dimension {
        Dimension::EntityClarity => ENTITY_CLARITY_CHECKS,
        Dimension::Answerability => ANSWERABILITY_CHECKS,
        Dimension::CommercialClarity => COMMERCIAL_CLARITY_CHECKS,
        Dimension::Trust => TRUST_CHECKS,
        Dimension::Retrievability => RETRIEVABILITY_CHECKS,
    }
}

/// Scores one signal set against the rubric.
///
/// Deterministic and side-effect-free: the same `SignalSet` always yields
/// the same `ScoreSet`, which is what makes history diffing meaningful.
#[must_use]
pub fn score(signals: &SignalSet) -> ScoreSet {
    let per_dimension = |dimension| dimension_score(signals, checks_for(dimension));

    let mut scores = ScoreSet {
        entity_clarity: per_dimension(Dimension::EntityClarity),
        answerability: per_dimension(Dimension::Answerability),
        commercial_clarity: per_dimension(Dimension::CommercialClarity),
        trust: per_dimension(Dimension::Trust),
        retrievability: per_dimension(Dimension::Retrievability),
        aggregate: 0.0,
    };

    let aggregate: f64 = AGGREGATE_WEIGHTS
        .iter()
        .map(|&(dimension, weight)| f64::from(scores.get(dimension)) * weight)
        .sum();
    scores.aggregate = (aggregate * 10.0).round() / 10.0;

    scores
}

/// Sum of satisfied-check weights, clamped to the bounded range.
fn dimension_score(signals: &SignalSet, checks: &[(SignalKey, u32)]) -> u32 {
    let sum: u32 = checks
        .iter()
        .filter(|&&(key, _)| signals.get(key).present)
        .map(|&(_, weight)| weight)
        .sum();
    sum.min(MAX_DIMENSION_SCORE)
}
