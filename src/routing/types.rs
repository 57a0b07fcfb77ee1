//! Repository, mirror rule and resolution result types.

use serde::{Deserialize, Serialize};

use crate::routing::matcher;

/// Layout tag assigned to mirrors that do not declare one.
pub const DEFAULT_LAYOUT: &str = "default";

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

/// A remote artifact repository a build wants to contact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    /// Repository identifier, unique within one resolution context.
    pub id: String,

    /// Repository base URL.
    pub url: String,

    /// Layout tag (e.g. "default"); absent when the repository declares none.
    #[serde(default)]
    pub layout: Option<String>,
}

impl Repository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// True when the repository is neither loopback-hosted nor file based.
    pub fn is_external(&self) -> bool {
        matcher::is_external_url(&self.url)
    }
}

/// A configured mirror rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MirrorRule {
    /// Mirror identifier.
    pub id: String,

    /// Pattern selecting the repository ids this mirror intercepts.
    #[serde(alias = "mirrorOf")]
    pub mirror_of: String,

    /// Mirror endpoint.
    pub url: String,

    /// Layout of the mirror itself.
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Pattern over repository layouts. Empty matches every layout.
    #[serde(default, alias = "mirrorOfLayouts")]
    pub layouts: String,
}

impl MirrorRule {
    pub fn new(id: impl Into<String>, mirror_of: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mirror_of: mirror_of.into(),
            url: url.into(),
            layout: default_layout(),
            layouts: String::new(),
        }
    }

    pub fn with_layouts(mut self, layouts: impl Into<String>) -> Self {
        self.layouts = layouts.into();
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }
}

/// An automatic route supplied by the routing table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutoRoute {
    /// Mirror identifier of the route.
    pub id: String,

    /// Endpoint requests are routed to.
    pub url: String,
}

impl AutoRoute {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Which stage of resolution produced a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorSource {
    /// A rule whose `mirror_of` equals the repository id.
    Exact,
    /// A rule whose `mirror_of` pattern selects the repository.
    Pattern,
    /// The routing table fallback.
    Route,
}

impl MirrorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorSource::Exact => "exact",
            MirrorSource::Pattern => "pattern",
            MirrorSource::Route => "route",
        }
    }
}

/// The mirror selected for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMirror {
    pub id: String,
    pub url: String,
    pub layout: String,
    pub mirror_of: String,
    pub source: MirrorSource,
}

impl ResolvedMirror {
    pub(crate) fn from_rule(rule: &MirrorRule, source: MirrorSource) -> Self {
        Self {
            id: rule.id.clone(),
            url: rule.url.clone(),
            layout: rule.layout.clone(),
            mirror_of: rule.mirror_of.clone(),
            source,
        }
    }

    /// Synthesize a mirror from a routing table hit.
    /// `mirror_of` points back at the source repository for traceability.
    pub(crate) fn from_route(repository: &Repository, route: AutoRoute) -> Self {
        Self {
            id: route.id,
            url: route.url,
            layout: default_layout(),
            mirror_of: repository.id.clone(),
            source: MirrorSource::Route,
        }
    }
}
