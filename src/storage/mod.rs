//! All things related to the storage of notes and labels
//!
//! The store only knows documents: a "notes" collection keyed by a store assigned ID and a
//! "labels" collection keyed by user. Ownership filtering, ordering and validation live in
//! the layers above.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::notes::Note;
use crate::notes::NoteFields;
use crate::users::UserId;

pub use memory::Memory;
#[cfg(feature = "postgres")]
pub use postgres::Config as DatabaseConfig;
#[cfg(feature = "postgres")]
pub use postgres::Postgres;

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),

    /// The targeted document does not exist (anymore)
    #[error("Document {0} does not exist")]
    MissingDocument(Uuid),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Owner of the note, never changes afterwards
    pub user_id: &'a UserId,

    /// All writable fields
    pub fields: &'a NoteFields,

    /// Time of the write, in milliseconds since the epoch
    pub time_stamp: i64,
}

/// Values to merge into an existing Note
///
/// Absent fields are left alone, the time stamp is always written.
#[derive(Debug, Default)]
pub struct UpdateNoteValues {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub background_color: Option<String>,
    pub labels: Option<Vec<String>>,

    /// Checklist in its stored text form
    pub check_list: Option<String>,

    /// Time of the write, in milliseconds since the epoch
    pub time_stamp: i64,
}

/// Storage with all supported operations
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all notes, of every user, in the order of the store
    fn find_all_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Find a single note by its ID
    fn find_single_note_by_id(
        &self,
        id: &Uuid,
    ) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Create a note
    fn create_note(&self, values: &CreateNoteValues<'_>)
    -> impl Future<Output = Result<Note>> + Send;

    /// Merge values into a note
    ///
    /// Fails with [`Error::MissingDocument`] when the note does not exist
    fn update_note(
        &self,
        id: &Uuid,
        values: &UpdateNoteValues,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Delete a note
    ///
    /// Fails with [`Error::MissingDocument`] when the note does not exist
    fn delete_note(&self, id: &Uuid) -> impl Future<Output = Result<()>> + Send;

    /// Find the label set of a user, `None` when it was never written
    fn find_label_set(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<Vec<String>>>> + Send;

    /// Overwrite the label set of a user
    fn save_label_set(
        &self,
        user_id: &UserId,
        labels: &[String],
    ) -> impl Future<Output = Result<()>> + Send;
}
