//! Mirror routing subsystem.
//!
//! # Data Flow
//! ```text
//! Repository (id, url, layout) + MirrorRule[]
//!     → selector.rs exact pass (mirror_of == id, layout filter)
//!     → selector.rs pattern pass (matcher.rs grammar, layout filter)
//!     → table.rs fallback (lookup by repository URL, optional)
//!     → Return: ResolvedMirror or no mirror
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function of its inputs plus the injected table
//! - Deterministic: same input always selects the same mirror
//! - "No mirror" is a valid outcome, never an error

pub mod matcher;
pub mod selector;
pub mod table;
pub mod types;

pub use selector::select_mirror;
pub use table::{MirrorRouter, RouteTable};
pub use types::{AutoRoute, MirrorRule, MirrorSource, Repository, ResolvedMirror};
