//! End-to-end mirror selection scenarios.

use mirror_router::routing::matcher::{is_external_url, matches_layout, matches_pattern};
use mirror_router::routing::{select_mirror, AutoRoute, MirrorRouter, MirrorSource, RouteTable};

mod common;
use common::{repo, rule};

/// Routing table that answers every lookup with the same route.
struct FixedRouter(AutoRoute);

impl MirrorRouter for FixedRouter {
    fn lookup_by_url(&self, _url: &str) -> Option<AutoRoute> {
        Some(self.0.clone())
    }
}

#[test]
fn test_exact_rule_wins_regardless_of_position() {
    let repository = repo("central", "https://repo.maven.apache.org/maven2");
    let mirrors = vec![
        rule("mA", "*", "http://mA"),
        rule("mC", "external:*", "http://mC"),
        rule("mB", "central", "http://mB"),
    ];

    let mirror = select_mirror(&repository, &mirrors, None).unwrap();
    assert_eq!(mirror.url, "http://mB");
    assert_eq!(mirror.source, MirrorSource::Exact);
}

#[test]
fn test_external_wildcard_scenarios() {
    let mirrors = vec![rule("mC", "external:*", "http://mC")];

    let remote = repo("x", "http://example.org/repo");
    assert_eq!(select_mirror(&remote, &mirrors, None).unwrap().url, "http://mC");

    let local = repo("x", "file:///local/repo");
    assert!(select_mirror(&local, &mirrors, None).is_none());
}

#[test]
fn test_negation_orderings_agree() {
    let foo = repo("foo", "https://foo.example.org");
    let bar = repo("bar", "https://bar.example.org");

    for pattern in ["*,!foo", "!foo,*"] {
        assert!(!matches_pattern(&foo, pattern), "{pattern} should exclude foo");
        assert!(matches_pattern(&bar, pattern), "{pattern} should include bar");
    }
    assert!(!matches_pattern(&foo, "foo,!foo"));
}

#[test]
fn test_excluded_repository_falls_through_to_next_rule() {
    let mirrors = vec![
        rule("all-but-snapshots", "*,!snapshots", "http://all"),
        rule("local", "snapshots,staging", "http://local"),
    ];

    let snapshots = repo("snapshots", "http://localhost:8081/snapshots");
    assert_eq!(select_mirror(&snapshots, &mirrors, None).unwrap().id, "local");

    let central = repo("central", "https://repo.maven.apache.org/maven2");
    assert_eq!(select_mirror(&central, &mirrors, None).unwrap().id, "all-but-snapshots");
}

#[test]
fn test_layout_filter() {
    let mirrors = vec![
        rule("legacy-only", "*", "http://legacy").with_layouts("legacy"),
        rule("default-only", "*", "http://default").with_layouts("default"),
    ];

    let modern = repo("central", "https://a.example.org").with_layout("default");
    assert_eq!(select_mirror(&modern, &mirrors, None).unwrap().id, "default-only");

    let no_layout = repo("central", "https://a.example.org");
    assert!(select_mirror(&no_layout, &mirrors, None).is_none());

    assert!(matches_layout(None, ""));
    assert!(matches_layout(None, "*"));
}

#[test]
fn test_fallback_synthesizes_default_layout() {
    let repository = repo("plugins", "https://plugins.example.org/repo").with_layout("legacy");
    let router = FixedRouter(AutoRoute::new("auto", "https://auto.example.org"));

    let mirror = select_mirror(&repository, &[], Some(&router)).unwrap();
    assert_eq!(mirror.id, "auto");
    assert_eq!(mirror.url, "https://auto.example.org");
    assert_eq!(mirror.layout, "default");
    assert_eq!(mirror.mirror_of, "plugins");
    assert_eq!(mirror.source, MirrorSource::Route);
}

#[test]
fn test_fallback_absent_or_empty() {
    let repository = repo("plugins", "https://plugins.example.org/repo");
    let mirrors = vec![rule("other", "central", "http://other")];

    assert!(select_mirror(&repository, &mirrors, None).is_none());
    assert!(select_mirror(&repository, &mirrors, Some(&RouteTable::new())).is_none());
}

#[test]
fn test_malformed_url_is_not_external() {
    assert!(!is_external_url("not a url"));

    let repository = repo("x", "not a url");
    let mirrors = vec![rule("mC", "external:*", "http://mC")];
    assert!(select_mirror(&repository, &mirrors, None).is_none());
}

#[test]
fn test_concurrent_resolution() {
    let table = RouteTable::new();
    table.insert("https://plugins.example.org/repo", AutoRoute::new("auto", "https://auto.example.org"));
    let mirrors = vec![rule("mB", "central", "http://mB")];

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..500 {
                    let central = repo("central", "https://repo.maven.apache.org/maven2");
                    let plugins = repo("plugins", "https://plugins.example.org/repo");
                    assert_eq!(select_mirror(&central, &mirrors, Some(&table)).unwrap().id, "mB");
                    assert_eq!(select_mirror(&plugins, &mirrors, Some(&table)).unwrap().id, "auto");
                }
            });
        }
    });
}
