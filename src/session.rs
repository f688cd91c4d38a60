//! Notes session of a signed in user
//!
//! Holds what the user last successfully saw: their notes, their labels and the active
//! filter. Every mutation goes to the store first and is followed by a fresh fetch; when
//! anything fails the session keeps showing what it had.

use uuid::Uuid;

use crate::editor::NoteEditor;
use crate::errors::Error;
use crate::errors::Result;
use crate::labels::LabelSet;
use crate::labels::LabelStore;
use crate::notes::Note;
use crate::repository::NotePatch;
use crate::repository::NoteRepository;
use crate::search::EmptyState;
use crate::search::LabelSelection;
use crate::search::NoteFilter;
use crate::storage::Storage;
use crate::users::Identity;

/// Synchronized view on the notes of one user
pub struct NotesSession<S: Storage> {
    identity: Identity,
    repository: NoteRepository<S>,
    label_store: LabelStore<S>,
    notes: Vec<Note>,
    labels: LabelSet,
    filter: NoteFilter,
    loading: bool,
}

impl<S: Storage> NotesSession<S> {
    /// Start a session, nothing is fetched yet
    pub fn new(storage: S, identity: Identity) -> Self {
        Self {
            identity,
            repository: NoteRepository::new(storage.clone()),
            label_store: LabelStore::new(storage),
            notes: Vec::new(),
            labels: LabelSet::default(),
            filter: NoteFilter::default(),
            loading: true,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the first fetch of notes is still outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// All notes of the user, in display order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    /// Fetch notes and labels again
    ///
    /// Unreadable labels count as no labels; unreadable notes keep the previous list and
    /// report the error.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.label_store.fetch(&self.identity.id).await {
            Ok(labels) => self.labels = labels,
            Err(_) => self.labels = LabelSet::default(),
        }

        self.refresh_notes().await
    }

    async fn refresh_notes(&mut self) -> Result<()> {
        let result = self.repository.fetch_all(&self.identity.id).await;

        self.loading = false;

        self.notes = result?;

        Ok(())
    }

    /// Save the editor, as a new note or over an existing one
    ///
    /// Nothing is written when the draft has neither title nor content, or when the edited
    /// note is not one of the session's notes.
    pub async fn save(&mut self, editor: &NoteEditor, editing: Option<&Uuid>) -> Result<()> {
        let fields = editor.to_saveable()?;

        if let Some(note_id) = editing {
            self.own_note(note_id)?;

            self.repository
                .update(note_id, NotePatch::from(fields))
                .await?;
        } else {
            self.repository.create(&fields, &self.identity.id).await?;
        }

        self.refresh_notes().await
    }

    /// Delete a note the user already confirmed to delete
    pub async fn delete(&mut self, note_id: &Uuid) -> Result<()> {
        self.own_note(note_id)?;

        self.repository.delete(note_id).await?;

        self.refresh_notes().await
    }

    /// Pin or unpin one of the notes in the session
    ///
    /// Unknown IDs are ignored.
    pub async fn toggle_pin(&mut self, note_id: &Uuid) -> Result<()> {
        let Some(note) = self.notes.iter().find(|note| &note.id == note_id) else {
            tracing::debug!("Not toggling pin of unknown note {note_id}");
            return Ok(());
        };

        self.repository.toggle_pin(note).await?;

        self.refresh_notes().await
    }

    fn own_note(&self, note_id: &Uuid) -> Result<&Note> {
        self.notes
            .iter()
            .find(|note| &note.id == note_id)
            .ok_or(Error::NoteNotFound(*note_id))
    }

    /// Add a label to the user's set
    pub async fn add_label(&mut self, name: &str) -> Result<()> {
        // validate against what the user sees before touching the store
        self.labels.with_label(name)?;

        self.labels = self.label_store.add_label(&self.identity.id, name).await?;

        Ok(())
    }

    pub fn select_label(&mut self, label: LabelSelection) {
        self.filter.label = label;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// Notes passing the current filter
    pub fn visible(&self) -> Vec<&Note> {
        self.filter.visible(&self.notes)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.filter.empty_state(&self.notes)
    }
}
