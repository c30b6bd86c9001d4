use thiserror::Error;

use crate::document::FieldRole;
use crate::export::ExportError;
use crate::state::PersistenceError;

/// Errors surfaced by editor operations. None of them end the session: every
/// failing operation leaves the editor in its last well-defined state.
#[derive(Debug, Error)]
pub enum CoverError {
    /// One or more required fields are empty after trimming
    #[error("required fields are empty: {0:?}")]
    Validation(Vec<FieldRole>),

    /// The stored snapshot could not be parsed or lacks required keys
    #[error("saved design is corrupt: {0}")]
    CorruptData(String),

    #[error("no saved design found")]
    NothingSaved,

    /// Uploaded bytes are not an image format we can recognise
    #[error("unsupported image data")]
    UnsupportedImage,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<PersistenceError> for CoverError {
    fn from(e: PersistenceError) -> Self {
        CoverError::CorruptData(e.to_string())
    }
}

/// Result type for editor operations
pub type CoverResult<T> = Result<T, CoverError>;
