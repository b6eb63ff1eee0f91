//! Signal extraction: fetched bytes → normalized [`SignalSet`].
//!
//! Pure function of the fetched body plus resolved URL; never performs I/O.
//! Low-level markup scanning lives in [`crate::markup`] and JSON-LD handling
//! in [`crate::jsonld`]; this module composes them into the rubric's signals,
//! recording an evidence snippet for each present signal.

use aiready_core::{Signal, SignalSet};

use crate::fetch::FetchResult;
use crate::jsonld::{extract_json_ld, JsonLdSummary, ORG_TYPE_TOKENS};
use crate::markup;

/// Evidence snippets are capped so reports stay readable.
const EVIDENCE_MAX_CHARS: usize = 160;

/// A lone question heading is not FAQ-shaped content.
const MIN_QUESTION_HEADINGS: usize = 2;

/// Minimum cleaned length for a text block to count as a direct answer.
const MIN_ANSWER_CHARS: usize = 40;

/// External references below this count don't register as citations.
const MIN_OUTBOUND_CITATIONS: usize = 2;

const FAQ_TYPE_TOKENS: &[&str] = &["faqpage", "qapage"];
const OFFER_TYPE_TOKENS: &[&str] = &["offer", "product"];

/// Extracts the full signal set from one fetch.
///
/// Absence of a signal is a negative data point for the scorer, not an
/// error; malformed markup degrades to "signal absent".
#[must_use]
pub fn extract(fetch: &FetchResult) -> SignalSet {
    let html = &fetch.body;
    let jsonld = extract_json_ld(html);
    let headings = markup::headings(html);
    let hrefs = markup::anchor_hrefs(html);

    SignalSet {
        site_name: site_name(html, &jsonld),
        canonical_link: option_signal(markup::link_href(html, "canonical")),
        organization_schema: option_signal(
            jsonld
                .first_type_matching(ORG_TYPE_TOKENS)
                .map(str::to_owned),
        ),
        meta_description: option_signal(markup::meta_content(html, "description")),

        faq_schema: option_signal(jsonld.first_type_matching(FAQ_TYPE_TOKENS).map(str::to_owned)),
        question_headings: question_headings(&headings),
        direct_answers: direct_answers(&headings),
        heading_hierarchy: heading_hierarchy(&headings),

        offer_schema: option_signal(
            jsonld
                .first_type_matching(OFFER_TYPE_TOKENS)
                .map(str::to_owned),
        ),
        visible_pricing: option_signal(markup::pricing_snippet(&markup::strip_tags(html))),
        pricing_page_link: pricing_page_link(&hrefs),

        author_byline: author_byline(html, &jsonld),
        freshness_date: freshness_date(html, &jsonld),
        outbound_citations: outbound_citations(&hrefs, &fetch.final_url),
        contact_point: contact_point(&hrefs),

        indexable: indexable(html),
        sitemap_reference: sitemap_reference(html),
        valid_structured_data: valid_structured_data(&jsonld),
        title_tag: option_signal(markup::title(html)),
    }
}

/// Present-with-evidence when `value` is `Some`, absent otherwise.
fn option_signal(value: Option<String>) -> Signal {
    match value {
        Some(evidence) => Signal::found(markup::truncate_chars(&evidence, EVIDENCE_MAX_CHARS)),
        None => Signal::absent(),
    }
}

/// Site name: `og:site_name`, then an organization-shaped JSON-LD `name`,
/// then `application-name`.
fn site_name(html: &str, jsonld: &JsonLdSummary) -> Signal {
    option_signal(
        markup::meta_content(html, "og:site_name")
            .or_else(|| jsonld.org_name.clone())
            .or_else(|| markup::meta_content(html, "application-name")),
    )
}

fn question_headings(headings: &[markup::Heading]) -> Signal {
    let questions: Vec<&markup::Heading> =
        headings.iter().filter(|h| h.text.ends_with('?')).collect();
    if questions.len() >= MIN_QUESTION_HEADINGS {
        option_signal(Some(questions[0].text.clone()))
    } else {
        Signal::absent()
    }
}

/// A question heading immediately answered by a substantial text block.
fn direct_answers(headings: &[markup::Heading]) -> Signal {
    headings
        .iter()
        .find(|h| h.text.ends_with('?') && h.following.chars().count() >= MIN_ANSWER_CHARS)
        .map_or_else(Signal::absent, |h| {
            option_signal(Some(h.following.clone()))
        })
}

/// Exactly one `<h1>` and at least two `<h2>`s.
fn heading_hierarchy(headings: &[markup::Heading]) -> Signal {
    let h1: Vec<&markup::Heading> = headings.iter().filter(|h| h.level == 1).collect();
    let h2_count = headings.iter().filter(|h| h.level == 2).count();
    if h1.len() == 1 && h2_count >= 2 {
        option_signal(Some(h1[0].text.clone()))
    } else {
        Signal::absent()
    }
}

fn pricing_page_link(hrefs: &[String]) -> Signal {
    option_signal(
        hrefs
            .iter()
            .find(|href| {
                let lower = href.to_lowercase();
                lower.contains("pricing") || lower.contains("plans")
            })
            .cloned(),
    )
}

fn author_byline(html: &str, jsonld: &JsonLdSummary) -> Signal {
    if let Some(author) = markup::meta_content(html, "author")
        .or_else(|| markup::meta_content(html, "article:author"))
    {
        return option_signal(Some(author));
    }
    if jsonld.has_author {
        return Signal::found("schema.org author property");
    }
    Signal::absent()
}

fn freshness_date(html: &str, jsonld: &JsonLdSummary) -> Signal {
    option_signal(
        markup::meta_content(html, "article:published_time")
            .or_else(|| markup::meta_content(html, "article:modified_time"))
            .or_else(|| jsonld.published.clone())
            .or_else(|| markup::time_datetime(html)),
    )
}

/// Counts absolute links pointing off the page's own host.
fn outbound_citations(hrefs: &[String], final_url: &str) -> Signal {
    let page_host = reqwest::Url::parse(final_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned));

    let external: Vec<&String> = hrefs
        .iter()
        .filter(|href| {
            reqwest::Url::parse(href).is_ok_and(|u| {
                matches!(u.scheme(), "http" | "https")
                    && u.host_str().map(str::to_owned) != page_host
            })
        })
        .collect();

    if external.len() >= MIN_OUTBOUND_CITATIONS {
        option_signal(Some(format!(
            "{} external references; first: {}",
            external.len(),
            external[0]
        )))
    } else {
        Signal::absent()
    }
}

fn contact_point(hrefs: &[String]) -> Signal {
    option_signal(
        hrefs
            .iter()
            .find(|href| {
                let lower = href.to_lowercase();
                lower.starts_with("mailto:") || lower.contains("/contact")
            })
            .cloned(),
    )
}

/// Indexable unless a robots meta directive says `noindex`. No directive at
/// all is the common (and positive) case.
fn indexable(html: &str) -> Signal {
    match markup::robots_directives(html) {
        Some(directives) if directives.to_lowercase().contains("noindex") => Signal::absent(),
        Some(directives) => option_signal(Some(format!("robots: {directives}"))),
        None => Signal::found("no robots restrictions"),
    }
}

fn sitemap_reference(html: &str) -> Signal {
    if let Some(href) = markup::link_href(html, "sitemap") {
        return option_signal(Some(href));
    }
    if html.contains("sitemap.xml") {
        return Signal::found("sitemap.xml reference");
    }
    Signal::absent()
}

/// Present when JSON-LD exists and every block parses.
fn valid_structured_data(jsonld: &JsonLdSummary) -> Signal {
    if jsonld.blocks > 0 && jsonld.parsed == jsonld.blocks {
        option_signal(Some(format!("{} JSON-LD block(s) parsed", jsonld.parsed)))
    } else {
        Signal::absent()
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
