//! Mirror routing library.
//!
//! Decides which configured mirror, if any, intercepts requests to a remote
//! artifact repository: exact `mirror_of` rules first, then pattern rules,
//! then the automatic routing table.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{MirrorSettings, SharedSettings};
pub use routing::{select_mirror, AutoRoute, MirrorRouter, MirrorRule, Repository, ResolvedMirror, RouteTable};
