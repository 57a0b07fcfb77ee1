//! Mirror rule matching logic.
//!
//! # Responsibilities
//! - Match repository ids against `mirror_of` patterns
//! - Match repository layouts against `layouts` patterns
//! - Classify repositories as external (not loopback, not file based)
//!
//! # Pattern Grammar
//! ```text
//! pattern := token ("," token)*
//! token   := "*"            any value, keep scanning
//!          | "external:*"   external repositories only, keep scanning
//!          | "!" value      veto: value excluded, stop scanning
//!          | value          exact value
//! ```
//!
//! # Design Decisions
//! - Tokens are scanned left to right; a veto ends the scan immediately
//! - No trimming, no case folding: tokens compare with exact equality
//! - Empty layout pattern = always matches; empty id pattern never does
//! - URL parse failures classify as "not external" and are never surfaced

use url::Url;

use crate::routing::types::Repository;

/// Matches every value.
pub const WILDCARD: &str = "*";

/// Matches every external repository.
pub const EXTERNAL_WILDCARD: &str = "external:*";

/// Trait for matching repositories against rule conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the repository matches this condition.
    fn matches(&self, repository: &Repository) -> bool;
}

/// Matches the repository id against a `mirror_of` pattern.
#[derive(Debug, Clone, Copy)]
pub struct MirrorOfMatcher<'a> {
    pattern: &'a str,
}

impl<'a> MirrorOfMatcher<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }
}

impl Matcher for MirrorOfMatcher<'_> {
    fn matches(&self, repository: &Repository) -> bool {
        matches_pattern(repository, self.pattern)
    }
}

/// Matches the repository layout against a `layouts` pattern.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMatcher<'a> {
    pattern: &'a str,
}

impl<'a> LayoutMatcher<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }
}

impl Matcher for LayoutMatcher<'_> {
    fn matches(&self, repository: &Repository) -> bool {
        matches_layout(repository.layout.as_deref(), self.pattern)
    }
}

/// Evaluate a `mirror_of` pattern against the repository id.
pub fn matches_pattern(repository: &Repository, pattern: &str) -> bool {
    let id = repository.id.as_str();

    if pattern == WILDCARD || pattern == id {
        return true;
    }

    scan_tokens(pattern, Some(id), || repository.is_external())
}

/// Evaluate a `layouts` pattern against a repository layout.
pub fn matches_layout(repo_layout: Option<&str>, pattern: &str) -> bool {
    if pattern.is_empty() || pattern == WILDCARD || Some(pattern) == repo_layout {
        return true;
    }

    // `external:*` is meaningless for layouts
    scan_tokens(pattern, repo_layout, || false)
}

/// Left-to-right scan over comma separated tokens.
///
/// Positive tokens raise the result and keep scanning, so a later veto of the
/// same value still excludes it. A veto of the candidate ends the scan.
fn scan_tokens(pattern: &str, candidate: Option<&str>, is_external: impl Fn() -> bool) -> bool {
    let mut result = false;

    // trailing empty tokens are dropped: "a," lists only "a"
    let tokens = pattern.trim_end_matches(',');
    if tokens.is_empty() {
        return false;
    }

    for token in tokens.split(',') {
        // a lone "!" is an ordinary value
        if token.len() > 1 && token.starts_with('!') {
            if Some(&token[1..]) == candidate {
                return false;
            }
        } else if Some(token) == candidate {
            result = true;
        } else if token == EXTERNAL_WILDCARD {
            if is_external() {
                result = true;
            }
        } else if token == WILDCARD {
            result = true;
        }
    }

    result
}

/// Classify a repository URL as external.
///
/// External means the host is neither `localhost` nor `127.0.0.1` and the
/// scheme is not `file`. Unparseable URLs and URLs without a host
/// (`mailto:x`, `foo:bar`) are not external.
pub fn is_external_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "file" => false,
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => !(host == "localhost" || host == "127.0.0.1"),
            _ => {
                tracing::trace!(url = %url, "Repository URL has no host, treating as not external");
                false
            }
        },
        Err(e) => {
            tracing::trace!(url = %url, error = %e, "Unparseable repository URL, treating as not external");
            false
        }
    }
}
