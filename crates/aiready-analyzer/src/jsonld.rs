//! JSON-LD structured data extraction for readiness signals.

use regex::Regex;
use serde_json::Value;

use crate::markup::clean_text;

/// schema.org type tokens treated as an organization-shaped entity node.
pub(crate) const ORG_TYPE_TOKENS: &[&str] = &[
    "organization",
    "localbusiness",
    "corporation",
    "brand",
    "website",
];

/// Flattened summary of a page's JSON-LD blocks.
///
/// Malformed blocks are counted but contribute nothing; extraction never
/// fails on bad markup.
#[derive(Debug, Clone, Default)]
pub(crate) struct JsonLdSummary {
    /// `<script type="application/ld+json">` blocks seen.
    pub blocks: usize,
    /// Blocks that parsed as JSON.
    pub parsed: usize,
    /// Lowercased `@type` tokens across all nodes, document order.
    pub types: Vec<String>,
    /// `name` of the first organization-shaped node.
    pub org_name: Option<String>,
    /// Any node carries an `author` property.
    pub has_author: bool,
    /// First `datePublished`/`dateModified` value seen.
    pub published: Option<String>,
}

impl JsonLdSummary {
    /// First collected type containing any of the given lowercase tokens.
    pub fn first_type_matching(&self, tokens: &[&str]) -> Option<&str> {
        self.types
            .iter()
            .find(|t| tokens.iter().any(|token| t.contains(token)))
            .map(String::as_str)
    }
}

/// Scans `html` for JSON-LD script blocks and summarizes their contents.
pub(crate) fn extract_json_ld(html: &str) -> JsonLdSummary {
    let script_re = Regex::new(
        r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid json-ld script regex");

    let mut summary = JsonLdSummary::default();

    for cap in script_re.captures_iter(html) {
        summary.blocks += 1;
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        summary.parsed += 1;
        collect_node(&value, &mut summary);
    }

    summary
}

fn collect_node(value: &Value, out: &mut JsonLdSummary) {
    match value {
        Value::Object(map) => {
            let node_types = type_tokens(map.get("@type"));

            if out.org_name.is_none()
                && node_types
                    .iter()
                    .any(|t| ORG_TYPE_TOKENS.iter().any(|token| t.contains(token)))
            {
                out.org_name = map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(clean_text)
                    .filter(|name| !name.is_empty());
            }

            if map.contains_key("author") {
                out.has_author = true;
            }

            if out.published.is_none() {
                out.published = map
                    .get("datePublished")
                    .or_else(|| map.get("dateModified"))
                    .and_then(Value::as_str)
                    .map(str::to_owned);
            }

            out.types.extend(node_types);

            for child in map.values() {
                collect_node(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_node(child, out);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` tokens of one node: a string or an array of strings.
fn type_tokens(node_type: Option<&Value>) -> Vec<String> {
    match node_type {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(json: &str) -> String {
        format!(r#"<script type="application/ld+json">{json}</script>"#)
    }

    #[test]
    fn empty_page_has_no_blocks() {
        let summary = extract_json_ld("<p>no structured data</p>");
        assert_eq!(summary.blocks, 0);
        assert_eq!(summary.parsed, 0);
        assert!(summary.types.is_empty());
    }

    #[test]
    fn collects_types_from_single_block() {
        let html = wrap(r#"{"@type": "Organization", "name": "Acme"}"#);
        let summary = extract_json_ld(&html);
        assert_eq!(summary.blocks, 1);
        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.types, vec!["organization"]);
        assert_eq!(summary.org_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn collects_types_from_type_array() {
        let html = wrap(r#"{"@type": ["Product", "Offer"]}"#);
        let summary = extract_json_ld(&html);
        assert_eq!(summary.types, vec!["product", "offer"]);
    }

    #[test]
    fn walks_nested_graph_nodes() {
        let html = wrap(
            r#"{"@graph": [{"@type": "WebSite", "name": "Acme"}, {"@type": "FAQPage"}]}"#,
        );
        let summary = extract_json_ld(&html);
        assert_eq!(summary.types, vec!["website", "faqpage"]);
        assert_eq!(summary.org_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn malformed_block_counts_but_contributes_nothing() {
        let html = format!("{}{}", wrap("{not json"), wrap(r#"{"@type": "FAQPage"}"#));
        let summary = extract_json_ld(&html);
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.types, vec!["faqpage"]);
    }

    #[test]
    fn records_author_and_published() {
        let html = wrap(
            r#"{"@type": "Article", "author": {"name": "J. Writer"}, "datePublished": "2026-02-01"}"#,
        );
        let summary = extract_json_ld(&html);
        assert!(summary.has_author);
        assert_eq!(summary.published.as_deref(), Some("2026-02-01"));
    }

    #[test]
    fn first_type_matching_uses_substring_tokens() {
        let html = wrap(r#"{"@type": "AggregateOffer"}"#);
        let summary = extract_json_ld(&html);
        assert_eq!(
            summary.first_type_matching(&["offer", "product"]),
            Some("aggregateoffer")
        );
        assert!(summary.first_type_matching(&["faqpage"]).is_none());
    }

    #[test]
    fn org_name_prefers_first_org_node() {
        let html = format!(
            "{}{}",
            wrap(r#"{"@type": "Organization", "name": "First Co"}"#),
            wrap(r#"{"@type": "Organization", "name": "Second Co"}"#)
        );
        let summary = extract_json_ld(&html);
        assert_eq!(summary.org_name.as_deref(), Some("First Co"));
    }
}
