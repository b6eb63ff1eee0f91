//! Shared domain model for readiness analysis.
//!
//! Everything downstream of extraction (scoring, persistence, comparison,
//! export, the HTTP surface) works in terms of these types. They are built
//! once per analysis and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version tag of the rubric and extraction logic.
///
/// Bumped whenever the signal list, the per-dimension check weights, or the
/// aggregate weights change. Reports carrying different versions are not
/// comparable; see [`Comparison`].
pub const SCHEMA_VERSION: u32 = 1;

/// One of the five fixed readiness dimensions, in rubric order.
///
/// The order of [`Dimension::ALL`] is the canonical iteration order for
/// scoring, comparison, and export; never alphabetical or insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    EntityClarity,
    Answerability,
    CommercialClarity,
    Trust,
    Retrievability,
}

impl Dimension {
    /// All dimensions in rubric order.
    pub const ALL: [Dimension; 5] = [
        Dimension::EntityClarity,
        Dimension::Answerability,
        Dimension::CommercialClarity,
        Dimension::Trust,
        Dimension::Retrievability,
    ];

    /// Stable snake_case name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::EntityClarity => "entity_clarity",
            Dimension::Answerability => "answerability",
            Dimension::CommercialClarity => "commercial_clarity",
            Dimension::Trust => "trust",
            Dimension::Retrievability => "retrievability",
        }
    }

    /// Human-readable label used in rendered output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Dimension::EntityClarity => "Entity clarity",
            Dimension::Answerability => "Answerability",
            Dimension::CommercialClarity => "Commercial clarity",
            Dimension::Trust => "Trust",
            Dimension::Retrievability => "Retrievability",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted fact: present or absent, with a short evidence snippet
/// (matched text or attribute value) when present.
///
/// Absence is a negative data point, not an error; the scorer interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Signal {
    /// A present signal with its evidence snippet.
    #[must_use]
    pub fn found(evidence: impl Into<String>) -> Self {
        Self {
            present: true,
            evidence: Some(evidence.into()),
        }
    }

    /// An absent signal.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Identifies one signal for the table-driven scorer.
///
/// Order here mirrors the field order of [`SignalSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKey {
    SiteName,
    CanonicalLink,
    OrganizationSchema,
    MetaDescription,
    FaqSchema,
    QuestionHeadings,
    DirectAnswers,
    HeadingHierarchy,
    OfferSchema,
    VisiblePricing,
    PricingPageLink,
    AuthorByline,
    FreshnessDate,
    OutboundCitations,
    ContactPoint,
    Indexable,
    SitemapReference,
    ValidStructuredData,
    TitleTag,
}

impl SignalKey {
    /// Stable snake_case name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKey::SiteName => "site_name",
            SignalKey::CanonicalLink => "canonical_link",
            SignalKey::OrganizationSchema => "organization_schema",
            SignalKey::MetaDescription => "meta_description",
            SignalKey::FaqSchema => "faq_schema",
            SignalKey::QuestionHeadings => "question_headings",
            SignalKey::DirectAnswers => "direct_answers",
            SignalKey::HeadingHierarchy => "heading_hierarchy",
            SignalKey::OfferSchema => "offer_schema",
            SignalKey::VisiblePricing => "visible_pricing",
            SignalKey::PricingPageLink => "pricing_page_link",
            SignalKey::AuthorByline => "author_byline",
            SignalKey::FreshnessDate => "freshness_date",
            SignalKey::OutboundCitations => "outbound_citations",
            SignalKey::ContactPoint => "contact_point",
            SignalKey::Indexable => "indexable",
            SignalKey::SitemapReference => "sitemap_reference",
            SignalKey::ValidStructuredData => "valid_structured_data",
            SignalKey::TitleTag => "title_tag",
        }
    }
}

/// Normalized facts extracted from one fetched page, grouped by dimension.
///
/// A struct with named fields rather than a map, so "every rubric signal is
/// accounted for" holds by construction. [`SignalSet::default`] is the
/// all-absent set used for failed fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    // Entity identity
    pub site_name: Signal,
    pub canonical_link: Signal,
    pub organization_schema: Signal,
    pub meta_description: Signal,
    // Answerability
    pub faq_schema: Signal,
    pub question_headings: Signal,
    pub direct_answers: Signal,
    pub heading_hierarchy: Signal,
    // Commercial clarity
    pub offer_schema: Signal,
    pub visible_pricing: Signal,
    pub pricing_page_link: Signal,
    // Trust
    pub author_byline: Signal,
    pub freshness_date: Signal,
    pub outbound_citations: Signal,
    pub contact_point: Signal,
    // Retrievability
    pub indexable: Signal,
    pub sitemap_reference: Signal,
    pub valid_structured_data: Signal,
    pub title_tag: Signal,
}

impl SignalSet {
    /// Look up a signal by key. Bridges the scorer's constant check tables
    /// to the named fields.
    #[must_use]
    pub fn get(&self, key: SignalKey) -> &Signal {
        match key {
            SignalKey::SiteName => &self.site_name,
            SignalKey::CanonicalLink => &self.canonical_link,
            SignalKey::OrganizationSchema => &self.organization_schema,
            SignalKey::MetaDescription => &self.meta_description,
            SignalKey::FaqSchema => &self.faq_schema,
            SignalKey::QuestionHeadings => &self.question_headings,
            SignalKey::DirectAnswers => &self.direct_answers,
            SignalKey::HeadingHierarchy => &self.heading_hierarchy,
            SignalKey::OfferSchema => &self.offer_schema,
            SignalKey::VisiblePricing => &self.visible_pricing,
            SignalKey::PricingPageLink => &self.pricing_page_link,
            SignalKey::AuthorByline => &self.author_byline,
            SignalKey::FreshnessDate => &self.freshness_date,
            SignalKey::OutboundCitations => &self.outbound_citations,
            SignalKey::ContactPoint => &self.contact_point,
            SignalKey::Indexable => &self.indexable,
            SignalKey::SitemapReference => &self.sitemap_reference,
            SignalKey::ValidStructuredData => &self.valid_structured_data,
            SignalKey::TitleTag => &self.title_tag,
        }
    }
}

/// Scores per dimension (each in `0..=100`) plus the weighted aggregate.
///
/// One named field per dimension, so the "exactly one score per rubric
/// dimension" invariant is structural rather than checked at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub entity_clarity: u32,
    pub answerability: u32,
    pub commercial_clarity: u32,
    pub trust: u32,
    pub retrievability: u32,
    /// Fixed weighted average of the five dimension scores, rounded to one
    /// decimal place.
    pub aggregate: f64,
}

impl ScoreSet {
    /// Look up a dimension score.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::EntityClarity => self.entity_clarity,
            Dimension::Answerability => self.answerability,
            Dimension::CommercialClarity => self.commercial_clarity,
            Dimension::Trust => self.trust,
            Dimension::Retrievability => self.retrievability,
        }
    }

    /// The all-zero score set used for failed fetches.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// The immutable analysis result for one URL at one point in time.
///
/// A failed fetch still produces a Report; `fetch_ok = false`, the failure
/// rendered into `fetch_error`, all-absent signals, zero scores; so history
/// and comparison never need to special-case a missing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Canonical form of the analyzed URL; the stable identity key for
    /// history tracking.
    pub url: String,
    /// The URL exactly as the caller supplied it.
    pub requested_url: String,
    /// Final URL after redirects, when the fetch reached a response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub fetch_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// The body was cut at the size cap; signals reflect the fetched prefix.
    pub truncated: bool,
    pub signals: SignalSet,
    pub scores: ScoreSet,
    pub schema_version: u32,
}

/// Which side of a comparison leads. Equal scores are a tie on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    A,
    B,
    Tie,
}

/// Per-dimension score diff. `delta` is `score_b - score_a`, so a positive
/// delta means side B leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionDelta {
    pub dimension: Dimension,
    pub score_a: u32,
    pub score_b: u32,
    pub delta: i64,
    pub leader: Leader,
}

/// Aggregate score diff, same convention as [`DimensionDelta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDelta {
    pub score_a: f64,
    pub score_b: f64,
    pub delta: f64,
    pub leader: Leader,
}

/// Structured diff between two Reports sharing a schema version.
///
/// Derived purely from its input Reports and recomputed on demand; "same URL
/// over time" and "two different sites" are the same shape of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub url_a: String,
    pub url_b: String,
    /// One entry per dimension, in rubric order.
    pub dimensions: Vec<DimensionDelta>,
    pub aggregate: AggregateDelta,
    pub schema_version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_all_is_rubric_order() {
        let names: Vec<&str> = Dimension::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "entity_clarity",
                "answerability",
                "commercial_clarity",
                "trust",
                "retrievability"
            ]
        );
    }

    #[test]
    fn signal_set_get_maps_every_key() {
        let signals = SignalSet {
            faq_schema: Signal::found("FAQPage"),
            ..SignalSet::default()
        };
        assert!(signals.get(SignalKey::FaqSchema).present);
        assert!(!signals.get(SignalKey::SiteName).present);
        assert_eq!(
            signals.get(SignalKey::FaqSchema).evidence.as_deref(),
            Some("FAQPage")
        );
    }

    #[test]
    fn score_set_get_matches_fields() {
        let scores = ScoreSet {
            entity_clarity: 10,
            answerability: 20,
            commercial_clarity: 30,
            trust: 40,
            retrievability: 50,
            aggregate: 28.5,
        };
        assert_eq!(scores.get(Dimension::EntityClarity), 10);
        assert_eq!(scores.get(Dimension::Retrievability), 50);
    }

    #[test]
    fn absent_signal_serializes_without_evidence() {
        let json = serde_json::to_string(&Signal::absent()).expect("serialize");
        assert_eq!(json, r#"{"present":false}"#);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = Report {
            url: "https://example.com".to_owned(),
            requested_url: "https://EXAMPLE.com/".to_owned(),
            final_url: Some("https://example.com/".to_owned()),
            fetched_at: Utc::now(),
            fetch_ok: true,
            fetch_error: None,
            http_status: Some(200),
            truncated: false,
            signals: SignalSet::default(),
            scores: ScoreSet::zero(),
            schema_version: SCHEMA_VERSION,
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let back: Report = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(back, report);
    }

    #[test]
    fn leader_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Leader::Tie).expect("serialize"),
            r#""tie""#
        );
    }
}
