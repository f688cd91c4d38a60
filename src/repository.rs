//! Note repository
//!
//! Owner filtering and display ordering on top of the raw note documents. Callers are
//! expected to fetch the full list again after every mutation; nothing is patched locally.

use chrono::Utc;
use uuid::Uuid;

use crate::errors::Error;
use crate::errors::Result;
use crate::notes::Note;
use crate::notes::NoteFields;
use crate::notes::sort_for_display;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;
use crate::users::UserId;

/// Fields to merge into an existing note
///
/// The checklist is in its stored text form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub background_color: Option<String>,
    pub labels: Option<Vec<String>>,
    pub check_list: Option<String>,
}

impl From<NoteFields> for NotePatch {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: Some(fields.title),
            content: Some(fields.content),
            is_pinned: Some(fields.is_pinned),
            background_color: Some(fields.background_color),
            labels: Some(fields.labels),
            check_list: Some(fields.check_list),
        }
    }
}

/// Reads and writes notes of users
#[derive(Clone)]
pub struct NoteRepository<S: Storage> {
    storage: S,
}

impl<S: Storage> NoteRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All notes of a user, pinned first, then most recently written first
    pub async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<Note>> {
        let mut notes = self.storage.find_all_notes().await.map_err(|err| {
            tracing::error!("Could not fetch notes: {err}");
            Error::StoreRead(err)
        })?;

        notes.retain(|note| &note.user_id == user_id);

        sort_for_display(&mut notes);

        Ok(notes)
    }

    /// A single note, only when it belongs to the user
    pub async fn find_single(&self, user_id: &UserId, note_id: &Uuid) -> Result<Option<Note>> {
        let note = self
            .storage
            .find_single_note_by_id(note_id)
            .await
            .map_err(|err| {
                tracing::error!("Could not fetch note {note_id}: {err}");
                Error::StoreRead(err)
            })?;

        Ok(note.filter(|note| &note.user_id == user_id))
    }

    /// Create a note for the user, stamped with the current time
    pub async fn create(&self, fields: &NoteFields, user_id: &UserId) -> Result<Note> {
        let values = CreateNoteValues {
            user_id,
            fields,
            time_stamp: now(),
        };

        let note = self.storage.create_note(&values).await.map_err(|err| {
            tracing::error!("Could not create note: {err}");
            Error::StoreWrite(err)
        })?;

        tracing::debug!("Created note {} for {user_id}", note.id);

        Ok(note)
    }

    /// Merge fields into a note, always refreshing its time stamp
    pub async fn update(&self, note_id: &Uuid, patch: NotePatch) -> Result<Note> {
        let values = UpdateNoteValues {
            title: patch.title,
            content: patch.content,
            is_pinned: patch.is_pinned,
            background_color: patch.background_color,
            labels: patch.labels,
            check_list: patch.check_list,
            time_stamp: now(),
        };

        let note = self
            .storage
            .update_note(note_id, &values)
            .await
            .map_err(|err| {
                tracing::error!("Could not update note {note_id}: {err}");
                Error::StoreWrite(err)
            })?;

        tracing::debug!("Updated note {note_id}");

        Ok(note)
    }

    /// Delete a note
    ///
    /// Asking the user for confirmation is up to the caller.
    pub async fn delete(&self, note_id: &Uuid) -> Result<()> {
        self.storage.delete_note(note_id).await.map_err(|err| {
            tracing::error!("Could not delete note {note_id}: {err}");
            Error::StoreWrite(err)
        })?;

        tracing::debug!("Deleted note {note_id}");

        Ok(())
    }

    /// Flip the pin state of a note
    pub async fn toggle_pin(&self, note: &Note) -> Result<Note> {
        let patch = NotePatch {
            is_pinned: Some(!note.is_pinned),
            ..NotePatch::default()
        };

        self.update(&note.id, patch).await
    }
}

/// Milliseconds since the epoch
fn now() -> i64 {
    Utc::now().timestamp_millis()
}
