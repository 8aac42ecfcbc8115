//! URL filtering: ad/tracking classification and canonicalisation.
//!
//! Both halves are pure functions of their input plus configuration, and
//! neither can fail: malformed URLs are rejected by the classifier and
//! passed through unchanged by the canonicaliser.

pub mod canonical;
pub mod classifier;

pub use canonical::{canonicalize, strip_tracking_params, unwrap_redirect};
pub use classifier::is_ad_or_tracking;

/// Returns `true` if `host` is `domain` or a subdomain of it.
pub(crate) fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
