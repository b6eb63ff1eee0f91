//! URL canonicalization: the stable identity key for history tracking.
//!
//! The canonical form is what gets fetched, reported, and used as the
//! History Store key, so lookups for "the same site" are stable no matter
//! how the URL was originally typed.

use crate::error::AnalyzerError;

/// Canonicalizes a URL string.
///
/// Normalization applied:
/// - scheme and host lowercased (via URL parsing)
/// - default ports (`:80`, `:443`) stripped
/// - fragment dropped
/// - trailing slashes trimmed from the path (`/pricing/` → `/pricing`,
///   bare root `https://example.com/` → `https://example.com`)
///
/// Query strings are preserved; they can select materially different
/// content. Idempotent: canonicalizing a canonical URL is a no-op.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidUrl`] if the input is not an absolute
/// HTTP or HTTPS URL with a host. This is checked before any network access.
pub fn canonicalize(raw: &str) -> Result<String, AnalyzerError> {
    let trimmed = raw.trim();
    let mut url = reqwest::Url::parse(trimmed).map_err(|e| AnalyzerError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AnalyzerError::InvalidUrl {
                url: raw.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            })
        }
    }

    if url.host_str().is_none() {
        return Err(AnalyzerError::InvalidUrl {
            url: raw.to_owned(),
            reason: "missing host".to_owned(),
        });
    }

    url.set_fragment(None);

    let path = url.path().to_owned();
    if path != "/" && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    // The url parser keeps a bare "/" path when serializing; trim it so the
    // root form is "https://example.com" (only safe when no query follows).
    let mut out = url.to_string();
    if url.query().is_none() && out.ends_with('/') {
        out.pop();
    }

    Ok(out)
}
