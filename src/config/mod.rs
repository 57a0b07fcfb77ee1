//! Settings management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MirrorSettings (validated, immutable)
//!     → shared.rs Snapshot (settings + route table) behind ArcSwap
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new settings
//!     → validation.rs validates
//!     → atomic swap of Arc<Snapshot>
//!     → resolvers observe new settings on their next call
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal files
//! - Invalid reloads are rejected and the current revision is kept

pub mod loader;
pub mod schema;
pub mod shared;
pub mod validation;
pub mod watcher;

pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{MirrorSettings, ObservabilityConfig, ResolutionConfig, RouteConfig};
pub use shared::{SharedSettings, Snapshot};
pub use validation::ValidationError;
