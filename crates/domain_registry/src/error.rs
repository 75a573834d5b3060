//! Registry domain errors

use core_kernel::FileNo;
use thiserror::Error;

/// Errors that can occur in the registry domain
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A file with this number is already enrolled
    #[error("File already exists: {0}")]
    DuplicateFile(FileNo),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(FileNo),

    /// Input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ledger field name is not recognised
    #[error("Unknown ledger field: {0}")]
    UnknownField(String),

    /// Value cannot be stored in the given ledger field
    #[error("Invalid value for {field}: {value}")]
    InvalidFieldValue {
        field: String,
        value: String,
    },

    /// Ledger entry index is past the end of the working sequence
    #[error("Ledger entry {index} out of range (ledger has {len} entries)")]
    EntryOutOfRange {
        index: usize,
        len: usize,
    },

    /// No ledger is open for editing
    #[error("No ledger is open for editing")]
    NoActiveSession,

    /// CSV generation failed
    #[error("Export failed: {0}")]
    Export(String),
}

impl RegistryError {
    pub fn validation(message: impl Into<String>) -> Self {
        RegistryError::Validation(message.into())
    }
}
