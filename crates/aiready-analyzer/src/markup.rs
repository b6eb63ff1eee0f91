//! Low-level HTML scanning helpers for signal extraction.
//!
//! These work on the raw markup with targeted patterns rather than a full
//! DOM parse: malformed markup degrades to "no match", never to a failure.
//! See [`crate::extract`] for how they compose into a full signal set.

use regex::Regex;

/// A heading with the cleaned text that follows it, up to the next heading.
#[derive(Debug, Clone)]
pub(crate) struct Heading {
    pub level: u8,
    pub text: String,
    /// Visible text between this heading and the next (or end of document),
    /// cleaned and capped.
    pub following: String,
}

/// Cap on how much following-text is kept per heading.
const FOLLOWING_TEXT_MAX_CHARS: usize = 600;

/// Returns the `content` of the first `<meta>` whose `name` or `property`
/// equals `key` (case-insensitive). Handles both attribute orders.
pub(crate) fn meta_content(html: &str, key: &str) -> Option<String> {
    let escaped = regex::escape(key);
    let name_first = Regex::new(&format!(
        r#"(?is)<meta\b[^>]*\b(?:name|property)\s*=\s*["']{escaped}["'][^>]*\bcontent\s*=\s*["']([^"']*)["']"#
    ))
    .expect("valid meta regex");
    let content_first = Regex::new(&format!(
        r#"(?is)<meta\b[^>]*\bcontent\s*=\s*["']([^"']*)["'][^>]*\b(?:name|property)\s*=\s*["']{escaped}["']"#
    ))
    .expect("valid meta regex");

    let raw = name_first
        .captures(html)
        .or_else(|| content_first.captures(html))?
        .get(1)?
        .as_str();
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Returns the `href` of the first `<link>` carrying `rel="<rel>"`.
pub(crate) fn link_href(html: &str, rel: &str) -> Option<String> {
    let escaped = regex::escape(rel);
    let rel_first = Regex::new(&format!(
        r#"(?is)<link\b[^>]*\brel\s*=\s*["']{escaped}["'][^>]*\bhref\s*=\s*["']([^"']+)["']"#
    ))
    .expect("valid link regex");
    let href_first = Regex::new(&format!(
        r#"(?is)<link\b[^>]*\bhref\s*=\s*["']([^"']+)["'][^>]*\brel\s*=\s*["']{escaped}["']"#
    ))
    .expect("valid link regex");

    rel_first
        .captures(html)
        .or_else(|| href_first.captures(html))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|href| !href.is_empty())
}

/// Returns the cleaned inner text of `<title>`, if present and non-empty.
pub(crate) fn title(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
    let raw = re.captures(html)?.get(1)?.as_str();
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Returns all `<h1>`–`<h3>` headings in document order, each paired with
/// the visible text that follows it.
pub(crate) fn headings(html: &str) -> Vec<Heading> {
    let re = Regex::new(r"(?is)<h([1-3])[^>]*>(.*?)</h[1-3]\s*>").expect("valid heading regex");

    let matches: Vec<(usize, usize, u8, String)> = re
        .captures_iter(html)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let level = cap.get(1)?.as_str().parse::<u8>().ok()?;
            // Heading content may carry inline markup (<span>, <em>, ...).
            let text = strip_tags(cap.get(2)?.as_str());
            Some((whole.start(), whole.end(), level, text))
        })
        .collect();

    matches
        .iter()
        .enumerate()
        .map(|(i, (_, end, level, text))| {
            let until = matches
                .get(i + 1)
                .map_or(html.len(), |(next_start, ..)| *next_start);
            let following = truncate_chars(&strip_tags(&html[*end..until]), FOLLOWING_TEXT_MAX_CHARS);
            Heading {
                level: *level,
                text: text.clone(),
                following,
            }
        })
        .collect()
}

/// Returns the `content` of `<meta name="robots">`, if present.
pub(crate) fn robots_directives(html: &str) -> Option<String> {
    meta_content(html, "robots")
}

/// Returns the `datetime` attribute of the first `<time>` element.
pub(crate) fn time_datetime(html: &str) -> Option<String> {
    let re = Regex::new(r#"(?is)<time\b[^>]*\bdatetime\s*=\s*["']([^"']+)["']"#)
        .expect("valid time regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Returns all anchor `href` values in document order.
pub(crate) fn anchor_hrefs(html: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<a\b[^>]*\bhref\s*=\s*["']([^"']+)["']"#).expect("valid anchor regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|href| !href.is_empty())
        .collect()
}

/// Scans visible text for the first price-shaped pattern: a currency amount
/// (`$29`, `€9.99`, `120 USD`) or a per-period phrase (`per month`).
pub(crate) fn pricing_snippet(text: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)(?:[$€£]\s?\d[\d,]*(?:\.\d{1,2})?(?:\s?/\s?(?:mo|month|yr|year|user|seat))?|\d[\d,]*(?:\.\d{1,2})?\s?(?:USD|EUR|GBP)|per\s+(?:month|year|user|seat))",
    )
    .expect("valid pricing regex");
    re.find(text).map(|m| m.as_str().trim().to_owned())
}

/// Strips `<script>`/`<style>` blocks and all tags, collapsing whitespace.
pub(crate) fn strip_tags(html: &str) -> String {
    let script_re =
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid block regex");
    let tag_re = Regex::new(r"(?s)<[^>]*>").expect("valid tag regex");

    let without_blocks = script_re.replace_all(html, " ");
    let without_tags = tag_re.replace_all(&without_blocks, " ");
    clean_text(&without_tags)
}

/// Collapses whitespace and decodes the handful of entities that matter for
/// evidence snippets.
pub(crate) fn clean_text(s: &str) -> String {
    let decoded = s
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, on a char boundary.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // meta_content
    // -----------------------------------------------------------------------

    #[test]
    fn meta_content_name_before_content() {
        let html = r#"<meta name="description" content="A fine site">"#;
        assert_eq!(
            meta_content(html, "description").as_deref(),
            Some("A fine site")
        );
    }

    #[test]
    fn meta_content_content_before_name() {
        let html = r#"<meta content="A fine site" name="description">"#;
        assert_eq!(
            meta_content(html, "description").as_deref(),
            Some("A fine site")
        );
    }

    #[test]
    fn meta_content_matches_property_attribute() {
        let html = r#"<meta property="og:site_name" content="Acme">"#;
        assert_eq!(meta_content(html, "og:site_name").as_deref(), Some("Acme"));
    }

    #[test]
    fn meta_content_empty_value_is_none() {
        let html = r#"<meta name="description" content="">"#;
        assert!(meta_content(html, "description").is_none());
    }

    #[test]
    fn meta_content_absent_is_none() {
        assert!(meta_content("<p>hello</p>", "description").is_none());
    }

    // -----------------------------------------------------------------------
    // link_href / title / time
    // -----------------------------------------------------------------------

    #[test]
    fn link_href_finds_canonical() {
        let html = r#"<link rel="canonical" href="https://example.com/page">"#;
        assert_eq!(
            link_href(html, "canonical").as_deref(),
            Some("https://example.com/page")
        );
    }

    #[test]
    fn link_href_handles_reversed_attributes() {
        let html = r#"<link href="/sitemap.xml" rel="sitemap">"#;
        assert_eq!(link_href(html, "sitemap").as_deref(), Some("/sitemap.xml"));
    }

    #[test]
    fn title_returns_cleaned_text() {
        assert_eq!(
            title("<title>  Acme &amp; Co </title>").as_deref(),
            Some("Acme & Co")
        );
    }

    #[test]
    fn title_empty_is_none() {
        assert!(title("<title>   </title>").is_none());
    }

    #[test]
    fn time_datetime_extracts_attribute() {
        let html = r#"<time datetime="2026-01-15">Jan 15</time>"#;
        assert_eq!(time_datetime(html).as_deref(), Some("2026-01-15"));
    }

    // -----------------------------------------------------------------------
    // headings
    // -----------------------------------------------------------------------

    #[test]
    fn headings_collects_levels_and_text_in_order() {
        let html = "<h1>Main</h1><p>intro</p><h2>What is it?</h2><p>An answer.</p>";
        let hs = headings(html);
        assert_eq!(hs.len(), 2);
        assert_eq!((hs[0].level, hs[0].text.as_str()), (1, "Main"));
        assert_eq!((hs[1].level, hs[1].text.as_str()), (2, "What is it?"));
    }

    #[test]
    fn headings_captures_following_text() {
        let html = "<h2>How does pricing work?</h2><p>Plans start at $29 per month.</p><h2>Next</h2>";
        let hs = headings(html);
        assert_eq!(hs[0].following, "Plans start at $29 per month.");
        assert_eq!(hs[1].following, "");
    }

    #[test]
    fn headings_ignores_deeper_levels() {
        let hs = headings("<h4>Deep</h4><h1>Top</h1>");
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].text, "Top");
    }

    // -----------------------------------------------------------------------
    // anchors / pricing / strip_tags
    // -----------------------------------------------------------------------

    #[test]
    fn anchor_hrefs_collects_all() {
        let html = r##"<a href="/pricing">Pricing</a> <a href="https://other.com">Out</a>"##;
        assert_eq!(anchor_hrefs(html), vec!["/pricing", "https://other.com"]);
    }

    #[test]
    fn pricing_snippet_matches_dollar_amount() {
        assert_eq!(
            pricing_snippet("Plans start at $29/mo for teams").as_deref(),
            Some("$29/mo")
        );
    }

    #[test]
    fn pricing_snippet_matches_currency_code() {
        assert_eq!(pricing_snippet("From 120 USD annually").as_deref(), Some("120 USD"));
    }

    #[test]
    fn pricing_snippet_matches_per_period() {
        assert_eq!(pricing_snippet("billed per month").as_deref(), Some("per month"));
    }

    #[test]
    fn pricing_snippet_absent_is_none() {
        assert!(pricing_snippet("no commercial content here").is_none());
    }

    #[test]
    fn strip_tags_removes_scripts_and_markup() {
        let html = "<p>Hello</p><script>var x = 1;</script><div>world</div>";
        assert_eq!(strip_tags(html), "Hello world");
    }

    #[test]
    fn truncate_chars_is_boundary_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ok", 10), "ok");
    }
}
