//! Record sinks.
//!
//! A sink stores one projected record per catalog entry, keyed by the record
//! id, overwriting any existing document whole (no partial-field merge).
//! Sinks are explicitly constructed by the caller and passed down; there is
//! no process-global client. Construction is the lifecycle start, drop is
//! the end.
//!
//! A sink failure is per record: the caller logs it and continues with the
//! next record.

pub mod firestore;

pub use firestore::FirestoreSink;

use gutenmeta_extract::BookRecord;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to initialize sink: {message}")]
    Init { message: String },
    #[error("sink I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize record {record_id}: {source}")]
    Serialize {
        record_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("remote store rejected record {record_id}: {message}")]
    Remote { record_id: String, message: String },
}

/// Destination for projected records.
pub trait RecordSink {
    /// Store `record` under `record_id`, replacing any existing document.
    fn put(&self, record_id: &str, record: &BookRecord) -> Result<(), SinkError>;
}

// ============================================================================
// Local JSON directory sink
// ============================================================================

/// Writes each record to `<dir>/<record_id>.json` (pretty-printed).
/// The default sink for local runs and tests.
#[derive(Debug)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl RecordSink for JsonDirSink {
    fn put(&self, record_id: &str, record: &BookRecord) -> Result<(), SinkError> {
        let path = self.dir.join(format!("{record_id}.json"));
        let json =
            serde_json::to_vec_pretty(record).map_err(|source| SinkError::Serialize {
                record_id: record_id.to_string(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(record_id, path = %path.display(), "wrote record");
        Ok(())
    }
}
