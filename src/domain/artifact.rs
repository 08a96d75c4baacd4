use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A downloaded image on disk, keyed by a timestamp-based file name.
/// No deduplication and no content addressing.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub path: PathBuf,
    pub source_url: String,
    pub saved_at: DateTime<Utc>,
}
