//! Processed-order ledger.
//!
//! Reads the externally maintained CSV of already-processed order ids.
//! The file is read-only input; only the `ext_id` column is interpreted.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

/// Column holding the processed order identifiers.
const EXT_ID_COLUMN: &str = "ext_id";

/// Errors from reading the processed-order ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file does not exist.
    #[error("ledger file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The ledger exists but has no `ext_id` column.
    #[error("ledger {path} is missing the '{EXT_ID_COLUMN}' column")]
    MissingColumn {
        /// Path of the malformed ledger.
        path: String,
    },

    /// I/O or CSV parsing failure.
    #[error("failed to read ledger {path}: {message}")]
    Read {
        /// Path of the unreadable ledger.
        path: String,
        /// Error details.
        message: String,
    },
}

/// Load the set of processed order ids from the ledger CSV.
///
/// Values are trimmed; empty cells are skipped.
pub fn load_processed_ids(path: &Path) -> Result<HashSet<String>, LedgerError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(LedgerError::NotFound { path: display });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| LedgerError::Read {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let headers = reader.headers().map_err(|e| LedgerError::Read {
        path: display.clone(),
        message: e.to_string(),
    })?;
    let Some(ext_id_index) = headers.iter().position(|h| h.trim() == EXT_ID_COLUMN) else {
        return Err(LedgerError::MissingColumn { path: display });
    };

    let mut ids = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(|e| LedgerError::Read {
            path: display.clone(),
            message: e.to_string(),
        })?;
        if let Some(value) = record.get(ext_id_index) {
            let value = value.trim();
            if !value.is_empty() {
                ids.insert(value.to_string());
            }
        }
    }

    Ok(ids)
}
