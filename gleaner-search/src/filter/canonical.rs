//! URL canonicalisation: tracking-parameter stripping and redirect unwrapping.
//!
//! A canonical URL points straight at the destination page with click-ids,
//! campaign tags and referrer markers removed. Every function here returns
//! its input unchanged when it cannot parse it.

use base64::Engine as _;
use url::Url;

use super::host_matches;

/// Query keys dropped in addition to any `utm_*` key.
const TRACKING_PARAMS: &[&str] = &[
    "gclid", "gbraid", "wbraid", "fbclid", "msclkid", "igshid", "yclid", "spm", "scid", "ref",
    "ref_src",
];

/// A redirect wrapper: host suffix, path prefix, and target parameters in
/// lookup order.
struct Wrapper {
    host: &'static str,
    path: &'static str,
    params: &'static [&'static str],
    encoding: TargetEncoding,
}

#[derive(Clone, Copy)]
enum TargetEncoding {
    /// The parameter holds the percent-encoded destination.
    Plain,
    /// The parameter holds `a1` followed by unpadded base64url (Bing `/ck/a`).
    BingBase64,
}

const WRAPPERS: &[Wrapper] = &[
    Wrapper {
        host: "duckduckgo.com",
        path: "/l/",
        params: &["uddg"],
        encoding: TargetEncoding::Plain,
    },
    Wrapper {
        host: "google.com",
        path: "/url",
        params: &["q", "url"],
        encoding: TargetEncoding::Plain,
    },
    Wrapper {
        host: "bing.com",
        path: "/ck/a",
        params: &["u"],
        encoding: TargetEncoding::BingBase64,
    },
    Wrapper {
        host: "facebook.com",
        path: "/l.php",
        params: &["u"],
        encoding: TargetEncoding::Plain,
    },
];

/// Upper bound on nested wrappers unwrapped in one pass.
const MAX_UNWRAP_DEPTH: usize = 8;

/// Canonicalise a URL: unwrap redirect wrappers, then strip tracking params.
///
/// Idempotent: `canonicalize(&canonicalize(u)) == canonicalize(u)`.
///
/// # Examples
///
/// ```
/// use gleaner_search::filter::canonicalize;
///
/// assert_eq!(
///     canonicalize("https://duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com"),
///     "https://example.com"
/// );
/// assert_eq!(canonicalize("https://x.com/a?utm_source=x&b=1"), "https://x.com/a?b=1");
/// assert_eq!(canonicalize("not a url"), "not a url");
/// ```
pub fn canonicalize(url: &str) -> String {
    strip_tracking_params(&unwrap_redirect(url))
}

/// Remove `utm_*` and known click-id/referrer parameters from the query.
///
/// Remaining parameters keep their relative order. URLs without any
/// tracking parameter, non-`http(s)` URLs and unparseable input are
/// returned byte-for-byte unchanged.
pub fn strip_tracking_params(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_owned();
    };
    if !matches!(parsed.scheme(), "http" | "https") || parsed.query().is_none() {
        return url.to_owned();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| !is_tracking_key(k)).collect();

    if kept.len() == pairs.len() {
        return url.to_owned();
    }

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    parsed.to_string()
}

fn is_tracking_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Recover the destination of a known redirect-wrapper URL.
///
/// Protocol-relative wrappers (`//duckduckgo.com/l/?uddg=...`) are
/// recognised too. Nested wrappers are unwrapped one after another. When
/// the input is not a wrapper, or the wrapper has no usable target, it is
/// returned unchanged.
pub fn unwrap_redirect(url: &str) -> String {
    let mut current = url.to_owned();
    for _ in 0..MAX_UNWRAP_DEPTH {
        match unwrap_once(&current) {
            Some(target) if target != current => current = target,
            _ => break,
        }
    }
    current
}

fn unwrap_once(url: &str) -> Option<String> {
    let absolute = if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_owned()
    };
    let parsed = Url::parse(&absolute).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    let wrapper = WRAPPERS
        .iter()
        .find(|w| host_matches(&host, w.host) && parsed.path().starts_with(w.path))?;

    wrapper.params.iter().find_map(|name| {
        let raw = parsed
            .query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())?;
        let target = match wrapper.encoding {
            TargetEncoding::Plain => raw,
            TargetEncoding::BingBase64 => decode_bing_target(&raw)?,
        };
        is_web_url(&target).then_some(target)
    })
}

/// Only absolute http(s) URLs count as redirect targets.
fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

fn decode_bing_target(raw: &str) -> Option<String> {
    let encoded = raw.strip_prefix("a1").unwrap_or(raw).trim_end_matches('=');
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(encoded)
        .ok()?;
    String::from_utf8(bytes).ok()
}
