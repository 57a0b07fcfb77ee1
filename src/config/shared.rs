//! Live settings snapshot shared across resolver callers.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::MirrorSettings;
use crate::observability::metrics;
use crate::routing::selector::select_mirror;
use crate::routing::table::{MirrorRouter, RouteTable};
use crate::routing::types::{Repository, ResolvedMirror};

/// Immutable settings revision plus the routing table built from it.
#[derive(Debug)]
pub struct Snapshot {
    pub settings: MirrorSettings,
    pub routes: RouteTable,
}

impl Snapshot {
    pub fn new(settings: MirrorSettings) -> Self {
        let routes = RouteTable::from_config(&settings.routes);
        Self { settings, routes }
    }

    /// The routing table, or `None` when auto routing is switched off.
    pub fn router(&self) -> Option<&dyn MirrorRouter> {
        if self.settings.resolution.auto_routing {
            Some(&self.routes)
        } else {
            None
        }
    }

    /// Routes the resolver can actually use.
    pub fn active_routes(&self) -> usize {
        if self.settings.resolution.auto_routing {
            self.routes.len()
        } else {
            0
        }
    }

    /// True when `next` changes settings that only take effect at startup.
    pub fn requires_restart(&self, next: &MirrorSettings) -> bool {
        self.settings.observability != next.observability
    }

    /// Resolve a repository against this revision.
    pub fn resolve(&self, repository: &Repository) -> Option<ResolvedMirror> {
        select_mirror(repository, &self.settings.mirrors, self.router())
    }
}

/// Atomically swappable settings. Readers never block writers.
#[derive(Debug)]
pub struct SharedSettings {
    current: ArcSwap<Snapshot>,
}

impl SharedSettings {
    pub fn new(settings: MirrorSettings) -> Self {
        let snapshot = Snapshot::new(settings);
        metrics::record_route_count(snapshot.active_routes());
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Current revision. Stays valid after a concurrent reload.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the live revision.
    ///
    /// `[observability]` changes are not applied to a running process.
    pub fn replace(&self, settings: MirrorSettings) {
        if self.current.load().requires_restart(&settings) {
            tracing::warn!("Observability settings changed; log level and metrics apply after a restart");
        }
        tracing::info!(
            mirrors = settings.mirrors.len(),
            routes = settings.routes.len(),
            "Applying new settings"
        );

        let snapshot = Snapshot::new(settings);
        metrics::record_route_count(snapshot.active_routes());
        self.current.store(Arc::new(snapshot));
    }

    pub fn resolve(&self, repository: &Repository) -> Option<ResolvedMirror> {
        self.current.load().resolve(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::types::{MirrorRule, MirrorSource};

    fn settings_with_route() -> MirrorSettings {
        let mut settings = MirrorSettings::default();
        settings.routes.push(RouteConfig {
            id: "auto".into(),
            repository_url: "https://repo.example.org/maven2".into(),
            route_url: "https://auto.example.org".into(),
        });
        settings
    }

    #[test]
    fn test_route_fallback() {
        let shared = SharedSettings::new(settings_with_route());
        let repository = Repository::new("plugins", "https://repo.example.org/maven2");

        let mirror = shared.resolve(&repository).unwrap();
        assert_eq!(mirror.source, MirrorSource::Route);
        assert_eq!(mirror.mirror_of, "plugins");
    }

    #[test]
    fn test_auto_routing_disabled() {
        let mut settings = settings_with_route();
        settings.resolution.auto_routing = false;
        let shared = SharedSettings::new(settings);

        let repository = Repository::new("plugins", "https://repo.example.org/maven2");
        assert!(shared.resolve(&repository).is_none());
    }

    #[test]
    fn test_active_routes_follow_auto_routing() {
        let snapshot = Snapshot::new(settings_with_route());
        assert_eq!(snapshot.active_routes(), 1);

        let mut settings = settings_with_route();
        settings.resolution.auto_routing = false;
        let snapshot = Snapshot::new(settings);
        assert_eq!(snapshot.routes.len(), 1);
        assert_eq!(snapshot.active_routes(), 0);
    }

    #[test]
    fn test_observability_change_requires_restart() {
        let snapshot = Snapshot::new(settings_with_route());

        let mut next = settings_with_route();
        next.mirrors.push(MirrorRule::new("m", "*", "https://m.example.org"));
        assert!(!snapshot.requires_restart(&next));

        next.observability.log_level = "debug".into();
        assert!(snapshot.requires_restart(&next));
    }

    #[test]
    fn test_replace_keeps_old_snapshot_alive() {
        let shared = SharedSettings::new(MirrorSettings::default());
        let before = shared.snapshot();

        let mut settings = MirrorSettings::default();
        settings.mirrors.push(MirrorRule::new("m", "*", "https://m.example.org"));
        shared.replace(settings);

        let repository = Repository::new("central", "https://repo.example.org");
        assert!(before.resolve(&repository).is_none());
        assert_eq!(shared.resolve(&repository).unwrap().id, "m");
    }
}
