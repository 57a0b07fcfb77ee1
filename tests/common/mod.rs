//! Shared builders for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use mirror_router::routing::{MirrorRule, Repository};

pub fn repo(id: &str, url: &str) -> Repository {
    Repository::new(id, url)
}

#[allow(dead_code)]
pub fn rule(id: &str, mirror_of: &str, url: &str) -> MirrorRule {
    MirrorRule::new(id, mirror_of, url)
}

/// Write settings into a fresh temp dir. The dir is removed when the guard drops.
#[allow(dead_code)]
pub fn write_settings(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
