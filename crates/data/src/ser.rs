use crate::PersonRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid RON snapshot: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// The file extension doesn't tell us how to decode the snapshot
    #[error("unsupported snapshot format {0:?}, expected .json or .ron")]
    UnsupportedFormat(String),
}

/// The on-disk shapes a snapshot can take: a bare list of records, or the
/// `{ "nodes": [...] }` envelope the tree listing endpoint answers with.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    Bare(Vec<PersonRecord>),
    Envelope { nodes: Vec<PersonRecord> },
}

impl From<SnapshotRepr> for Snapshot {
    fn from(repr: SnapshotRepr) -> Self {
        match repr {
            SnapshotRepr::Bare(records) => Snapshot { records },
            SnapshotRepr::Envelope { nodes } => Snapshot { records: nodes },
        }
    }
}

/// Every person of one family tree at a given instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: Vec<PersonRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(input: &str) -> Result<Self, DataError> {
        let repr: SnapshotRepr = serde_json::from_str(input)?;
        Ok(repr.into())
    }

    pub fn from_ron(input: &str) -> Result<Self, DataError> {
        let repr: SnapshotRepr = ron::from_str(input)?;
        Ok(repr.into())
    }

    /// Load a snapshot, picking the decoder from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let input = std::fs::read_to_string(path)?;

        let snapshot = match extension.as_str() {
            "json" => Self::from_json(&input)?,
            "ron" => Self::from_ron(&input)?,
            _ => return Err(DataError::UnsupportedFormat(extension)),
        };
        debug!(
            "Loaded {} records from {}",
            snapshot.records.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
