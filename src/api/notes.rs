//! Notes API

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::editor::NoteEditor;
use crate::errors::ValidationError;
use crate::notes::CheckList;
use crate::notes::Note;
use crate::repository::NotePatch;
use crate::repository::NoteRepository;
use crate::search::LabelSelection;
use crate::search::NoteFilter;
use crate::storage::Storage;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::PathParameters;
use super::QueryParameters;
use super::Success;

/// The note response information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub background_color: String,
    pub labels: Vec<String>,
    pub check_list: CheckList,
    pub time_stamp: i64,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            is_pinned: note.is_pinned,
            background_color: note.background_color,
            labels: note.labels,
            check_list: note.check_list,
            time_stamp: note.time_stamp,
        }
    }

    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// Filter on the note list
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    /// Label to filter on, `all` for every label
    label: Option<String>,

    /// Free text to search for in title and content
    search: Option<String>,
}

impl ListNotesQuery {
    fn into_filter(self) -> NoteFilter {
        let label = match self.label.filter(|label| !label.is_empty()) {
            Some(label) => match label.parse::<LabelSelection>() {
                Ok(selection) => selection,
            },
            None => LabelSelection::All,
        };

        NoteFilter::new(label, self.search.unwrap_or_default())
    }
}

/// List the visible notes of the current user
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer some-token' \
///     'http://localhost:6000/api/notes?label=work&search=standup'
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    QueryParameters(query): QueryParameters<ListNotesQuery>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = NoteRepository::new(storage)
        .fetch_all(&current_user.id)
        .await?;

    let visible = query
        .into_filter()
        .visible(&notes)
        .into_iter()
        .cloned()
        .collect::<Vec<Note>>();

    Ok(Success::ok(NoteResponse::from_note_multiple(visible)))
}

pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<NoteResponse>, Error> {
    let repository = NoteRepository::new(storage);

    get_note(&repository, &current_user, &note_id)
        .await
        .map(|note| Success::ok(NoteResponse::from_note(note)))
}

/// Note to create, as the editor would save it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    is_pinned: bool,
    background_color: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    check_list: CheckList,
}

impl CreateNoteForm {
    fn into_editor(self) -> Result<NoteEditor, ValidationError> {
        let mut editor = NoteEditor::new(None);

        editor.set_title(self.title);
        editor.set_content(self.content);
        editor.set_pinned(self.is_pinned);
        set_background_color(&mut editor, self.background_color)?;
        editor.set_labels(self.labels);
        editor.set_check_list(self.check_list.0);

        Ok(editor)
    }
}

pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let fields = form
        .into_editor()
        .and_then(|editor| editor.to_saveable())
        .map_err(Error::bad_request)?;

    let note = NoteRepository::new(storage)
        .create(&fields, &current_user.id)
        .await?;

    Ok(Success::created(NoteResponse::from_note(note)))
}

/// Fields to change, anything absent stays as it is
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    title: Option<String>,
    content: Option<String>,
    is_pinned: Option<bool>,
    background_color: Option<String>,
    labels: Option<Vec<String>>,
    check_list: Option<CheckList>,
}

impl UpdateNoteForm {
    /// Editor on the current note with the sent fields applied
    fn into_editor(self, note: &Note) -> Result<NoteEditor, ValidationError> {
        let mut editor = NoteEditor::new(Some(note));

        if let Some(title) = self.title {
            editor.set_title(title);
        }

        if let Some(content) = self.content {
            editor.set_content(content);
        }

        if let Some(is_pinned) = self.is_pinned {
            editor.set_pinned(is_pinned);
        }

        set_background_color(&mut editor, self.background_color)?;

        if let Some(labels) = self.labels {
            editor.set_labels(labels);
        }

        if let Some(check_list) = self.check_list {
            editor.set_check_list(check_list.0);
        }

        Ok(editor)
    }
}

fn set_background_color(
    editor: &mut NoteEditor,
    color: Option<String>,
) -> Result<(), ValidationError> {
    match color {
        Some(color) if !editor.set_background_color(&color) => {
            Err(ValidationError::UnknownBackgroundColor)
        }
        _ => Ok(()),
    }
}

pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<Uuid>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let repository = NoteRepository::new(storage);

    let note = get_note(&repository, &current_user, &note_id).await?;

    let fields = form
        .into_editor(&note)
        .and_then(|editor| editor.to_saveable())
        .map_err(Error::bad_request)?;

    let note = repository.update(&note.id, NotePatch::from(fields)).await?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

pub async fn toggle_pin<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<NoteResponse>, Error> {
    let repository = NoteRepository::new(storage);

    let note = get_note(&repository, &current_user, &note_id).await?;

    let note = repository.toggle_pin(&note).await?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<&'static str>, Error> {
    let repository = NoteRepository::new(storage);

    let note = get_note(&repository, &current_user, &note_id).await?;

    repository.delete(&note.id).await?;

    Ok(Success::<&'static str>::no_content())
}

async fn get_note<S: Storage>(
    repository: &NoteRepository<S>,
    current_user: &CurrentUser,
    note_id: &Uuid,
) -> Result<Note, Error> {
    repository
        .find_single(&current_user.id, note_id)
        .await?
        .ok_or_else(|| Error::not_found("Note not found"))
}
