mod repo;
mod repo_types;

pub use repo::{ArtifactRepo, PgArtifactRepo};
pub use repo_types::{Artifact, ArtifactKind, NewArtifact};

use serde::Deserialize;

/// `?limit=&offset=` for history listings.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Pagination {
    /// Clamps to sane bounds before the values reach SQL.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}
