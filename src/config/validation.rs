//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Unique, non-empty mirror and repository ids
//! - Parseable mirror, repository and route URLs
//! - Metrics address parses when metrics are enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MirrorSettings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::MirrorSettings;

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mirror #{index} has an empty id")]
    EmptyMirrorId { index: usize },

    #[error("duplicate mirror id '{0}'")]
    DuplicateMirrorId(String),

    #[error("mirror '{mirror}' has an empty mirror_of pattern")]
    EmptyMirrorOf { mirror: String },

    #[error("mirror '{mirror}' has an invalid url '{url}'")]
    InvalidMirrorUrl { mirror: String, url: String },

    #[error("repository #{index} has an empty id")]
    EmptyRepositoryId { index: usize },

    #[error("duplicate repository id '{0}'")]
    DuplicateRepositoryId(String),

    #[error("repository '{repository}' has an invalid url '{url}'")]
    InvalidRepositoryUrl { repository: String, url: String },

    #[error("route #{index} has an empty id")]
    EmptyRouteId { index: usize },

    #[error("route '{route}' has an invalid url '{url}'")]
    InvalidRouteUrl { route: String, url: String },

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate settings, collecting every problem found.
pub fn validate_settings(settings: &MirrorSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut mirror_ids = HashSet::new();
    for (index, mirror) in settings.mirrors.iter().enumerate() {
        if mirror.id.is_empty() {
            errors.push(ValidationError::EmptyMirrorId { index });
        } else if !mirror_ids.insert(mirror.id.as_str()) {
            errors.push(ValidationError::DuplicateMirrorId(mirror.id.clone()));
        }
        if mirror.mirror_of.is_empty() {
            errors.push(ValidationError::EmptyMirrorOf { mirror: mirror.id.clone() });
        }
        if Url::parse(&mirror.url).is_err() {
            errors.push(ValidationError::InvalidMirrorUrl {
                mirror: mirror.id.clone(),
                url: mirror.url.clone(),
            });
        }
    }

    let mut repository_ids = HashSet::new();
    for (index, repository) in settings.repositories.iter().enumerate() {
        if repository.id.is_empty() {
            errors.push(ValidationError::EmptyRepositoryId { index });
        } else if !repository_ids.insert(repository.id.as_str()) {
            errors.push(ValidationError::DuplicateRepositoryId(repository.id.clone()));
        }
        if Url::parse(&repository.url).is_err() {
            errors.push(ValidationError::InvalidRepositoryUrl {
                repository: repository.id.clone(),
                url: repository.url.clone(),
            });
        }
    }

    for (index, route) in settings.routes.iter().enumerate() {
        if route.id.is_empty() {
            errors.push(ValidationError::EmptyRouteId { index });
        }
        for url in [&route.repository_url, &route.route_url] {
            if Url::parse(url).is_err() {
                errors.push(ValidationError::InvalidRouteUrl {
                    route: route.id.clone(),
                    url: url.clone(),
                });
            }
        }
    }

    let observability = &settings.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
