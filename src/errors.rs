//! Errors of note and label operations

use thiserror::Error;
use uuid::Uuid;

use crate::storage;

/// Input that can not be saved
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Label is empty after trimming
    #[error("Label cannot be empty")]
    EmptyLabel,

    /// Label is already part of the set
    #[error("Label already exists")]
    DuplicateLabel,

    /// Both title and content are empty after trimming
    #[error("Note must have a title or content")]
    EmptyNote,

    /// Background color is not one of the palette colors
    #[error("Background color is not in the palette")]
    UnknownBackgroundColor,
}

/// Failure of a single user action
///
/// None of these are fatal, the action is abandoned and previous state stays as it was.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching from the store failed
    #[error("Could not read from the store: {0}")]
    StoreRead(#[source] storage::Error),

    /// Writing to the store failed
    #[error("Could not write to the store: {0}")]
    StoreWrite(#[source] storage::Error),

    /// The note is not one of the user's notes
    #[error("Note {0} not found")]
    NoteNotFound(Uuid),

    /// Input was rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for note and label operations
pub type Result<T> = core::result::Result<T, Error>;
