//! Fetched-orders snapshot.
//!
//! Persists the combined, today-filtered fetch result as a pretty-printed
//! JSON array. Debug/audit artifact only; overwritten each run.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use crate::domain::OrderRecord;

/// Errors from writing the orders snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Could not create or truncate the snapshot file.
    #[error("failed to create snapshot {path}: {message}")]
    Create {
        /// Snapshot path.
        path: String,
        /// Error details.
        message: String,
    },

    /// Serialization to the file failed.
    #[error("failed to write snapshot {path}: {message}")]
    Write {
        /// Snapshot path.
        path: String,
        /// Error details.
        message: String,
    },
}

/// Write the combined order collection to `path`, replacing any previous run.
pub fn write_snapshot(path: &Path, orders: &[OrderRecord]) -> Result<(), SnapshotError> {
    let display = path.display().to_string();

    let file = File::create(path).map_err(|e| SnapshotError::Create {
        path: display.clone(),
        message: e.to_string(),
    })?;

    serde_json::to_writer_pretty(BufWriter::new(file), orders).map_err(|e| {
        SnapshotError::Write {
            path: display,
            message: e.to_string(),
        }
    })
}
