//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config, lifecycle produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (resolution and reload counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, watch mode only)
//! ```

pub mod logging;
pub mod metrics;
