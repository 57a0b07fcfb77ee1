//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate settings
//! - Initialize logging from the loaded settings
//! - Build the shared settings snapshot
//!
//! # Design Decisions
//! - Fail fast: a settings error is fatal at startup
//! - Logging starts only after settings are known (log level lives there)

use std::path::Path;

use crate::config::loader::{load_settings, ConfigError};
use crate::config::shared::SharedSettings;
use crate::observability::logging;

/// Load settings from `path`, start logging and return the live settings.
pub fn bootstrap(path: &Path) -> Result<SharedSettings, ConfigError> {
    let settings = load_settings(path)?;
    logging::init_logging(&settings.observability);

    tracing::info!(
        path = ?path,
        mirrors = settings.mirrors.len(),
        repositories = settings.repositories.len(),
        routes = settings.routes.len(),
        auto_routing = settings.resolution.auto_routing,
        "Settings loaded"
    );

    Ok(SharedSettings::new(settings))
}
