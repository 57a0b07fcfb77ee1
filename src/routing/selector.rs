//! Mirror selection.
//!
//! # Responsibilities
//! - Pick the settings mirror for a repository (exact pass, then pattern pass)
//! - Fall back to the routing table when no settings mirror applies
//! - Return the selected mirror or an explicit "no mirror"
//!
//! # Design Decisions
//! - Exact `mirror_of` rules outrank pattern rules regardless of list order
//! - Within a pass, first listed rule wins
//! - Routing table is injected and may be absent (no routing session)
//! - Pure: no retained state, inputs are never mutated

use crate::observability::metrics;
use crate::routing::matcher::{LayoutMatcher, Matcher, MirrorOfMatcher};
use crate::routing::table::MirrorRouter;
use crate::routing::types::{MirrorRule, MirrorSource, Repository, ResolvedMirror};

/// Select the mirror that should intercept requests to `repository`.
///
/// Returns `None` when the repository should be contacted directly.
pub fn select_mirror(
    repository: &Repository,
    mirrors: &[MirrorRule],
    router: Option<&dyn MirrorRouter>,
) -> Option<ResolvedMirror> {
    tracing::debug!(repository = %repository.id, url = %repository.url, "Selecting mirror");

    let selected = settings_mirror(repository, mirrors).or_else(|| routed_mirror(repository, router));

    metrics::record_resolution(selected.as_ref().map(|m| m.source.as_str()).unwrap_or("none"));
    selected
}

/// Select a mirror from the configured rules only.
pub fn settings_mirror(repository: &Repository, mirrors: &[MirrorRule]) -> Option<ResolvedMirror> {
    let (rule, source) = exact_mirror(repository, mirrors)
        .map(|rule| (rule, MirrorSource::Exact))
        .or_else(|| pattern_mirror(repository, mirrors).map(|rule| (rule, MirrorSource::Pattern)))?;

    tracing::debug!(
        repository = %repository.id,
        mirror = %rule.id,
        mirror_of = %rule.mirror_of,
        source = source.as_str(),
        "Using mirror from settings"
    );
    Some(ResolvedMirror::from_rule(rule, source))
}

/// First rule whose `mirror_of` is exactly the repository id.
pub fn exact_mirror<'a>(repository: &Repository, mirrors: &'a [MirrorRule]) -> Option<&'a MirrorRule> {
    mirrors
        .iter()
        .find(|rule| rule.mirror_of == repository.id && LayoutMatcher::new(&rule.layouts).matches(repository))
}

/// First rule whose `mirror_of` pattern selects the repository.
pub fn pattern_mirror<'a>(repository: &Repository, mirrors: &'a [MirrorRule]) -> Option<&'a MirrorRule> {
    mirrors.iter().find(|rule| {
        MirrorOfMatcher::new(&rule.mirror_of).matches(repository)
            && LayoutMatcher::new(&rule.layouts).matches(repository)
    })
}

/// Ask the routing table for an automatic mirror.
pub fn routed_mirror(repository: &Repository, router: Option<&dyn MirrorRouter>) -> Option<ResolvedMirror> {
    let Some(router) = router else {
        tracing::trace!(repository = %repository.id, "No routing table available");
        return None;
    };

    match router.lookup_by_url(&repository.url) {
        Some(route) => {
            tracing::debug!(repository = %repository.id, route = %route.id, url = %route.url, "==> routed");
            Some(ResolvedMirror::from_route(repository, route))
        }
        None => {
            tracing::debug!(repository = %repository.id, "No auto-mirror found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::RouteTable;
    use crate::routing::types::AutoRoute;

    fn central() -> Repository {
        Repository::new("central", "https://repo.maven.apache.org/maven2").with_layout("default")
    }

    #[test]
    fn test_exact_beats_wildcard_listed_first() {
        let mirrors = vec![
            MirrorRule::new("a", "*", "http://mA"),
            MirrorRule::new("b", "central", "http://mB"),
        ];
        let mirror = select_mirror(&central(), &mirrors, None).unwrap();
        assert_eq!(mirror.url, "http://mB");
        assert_eq!(mirror.source, MirrorSource::Exact);
    }

    #[test]
    fn test_first_pattern_rule_wins() {
        let mirrors = vec![
            MirrorRule::new("a", "external:*", "http://mA"),
            MirrorRule::new("b", "*", "http://mB"),
        ];
        let mirror = select_mirror(&central(), &mirrors, None).unwrap();
        assert_eq!(mirror.id, "a");
        assert_eq!(mirror.source, MirrorSource::Pattern);
    }

    #[test]
    fn test_exact_rule_with_wrong_layout_is_skipped() {
        let mirrors = vec![
            MirrorRule::new("legacy", "central", "http://legacy").with_layouts("legacy"),
            MirrorRule::new("all", "*", "http://all"),
        ];
        let mirror = select_mirror(&central(), &mirrors, None).unwrap();
        assert_eq!(mirror.id, "all");
    }

    #[test]
    fn test_resolved_mirror_carries_rule_fields() {
        let mirrors = vec![MirrorRule::new("p2", "*", "http://p2").with_layout("p2")];
        let mirror = select_mirror(&central(), &mirrors, None).unwrap();
        assert_eq!(mirror.layout, "p2");
        assert_eq!(mirror.mirror_of, "*");
    }

    #[test]
    fn test_empty_id_still_matches_wildcard() {
        let repository = Repository::new("", "https://repo.example.org");
        let mirrors = vec![
            MirrorRule::new("named", "central", "http://named"),
            MirrorRule::new("a", "*", "http://mA"),
        ];
        let mirror = select_mirror(&repository, &mirrors, None).unwrap();
        assert_eq!(mirror.id, "a");
        assert_eq!(mirror.source, MirrorSource::Pattern);
    }

    #[test]
    fn test_fallback_route() {
        let table = RouteTable::new();
        table.insert(&central().url, AutoRoute::new("auto", "https://auto.example.org"));

        let mirror = select_mirror(&central(), &[], Some(&table)).unwrap();
        assert_eq!(mirror.id, "auto");
        assert_eq!(mirror.url, "https://auto.example.org");
        assert_eq!(mirror.layout, "default");
        assert_eq!(mirror.mirror_of, "central");
        assert_eq!(mirror.source, MirrorSource::Route);
    }

    #[test]
    fn test_settings_outrank_route() {
        let table = RouteTable::new();
        table.insert(&central().url, AutoRoute::new("auto", "https://auto.example.org"));
        let mirrors = vec![MirrorRule::new("a", "*", "http://mA")];

        let mirror = select_mirror(&central(), &mirrors, Some(&table)).unwrap();
        assert_eq!(mirror.id, "a");
    }

    #[test]
    fn test_no_mirror() {
        let table = RouteTable::new();
        assert!(select_mirror(&central(), &[], Some(&table)).is_none());
        assert!(select_mirror(&central(), &[], None).is_none());
    }

    #[test]
    fn test_inputs_untouched() {
        let repository = central();
        let mirrors = vec![MirrorRule::new("a", "*", "http://mA")];
        let before = (repository.clone(), mirrors.clone());
        let _ = select_mirror(&repository, &mirrors, None);
        assert_eq!((repository, mirrors), before);
    }
}
