//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::notes::CheckList;
use crate::notes::Note;
use crate::users::UserId;

use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// A note as it is kept in memory, checklist as text
#[derive(Clone, Debug)]
struct NoteDocument {
    id: Uuid,
    user_id: UserId,
    title: String,
    content: String,
    is_pinned: bool,
    background_color: String,
    labels: Vec<String>,
    check_list: String,
    time_stamp: i64,
}

impl NoteDocument {
    fn to_note(&self) -> Note {
        Note {
            id: self.id,
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            is_pinned: self.is_pinned,
            background_color: self.background_color.clone(),
            labels: self.labels.clone(),
            check_list: CheckList::from_text_lossy(&self.check_list),
            time_stamp: self.time_stamp,
        }
    }
}

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All notes in storage, in insertion order
    notes: Arc<Mutex<Vec<NoteDocument>>>,

    /// Label sets by user
    labels: Arc<Mutex<HashMap<UserId, Vec<String>>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for Memory {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .await
            .iter()
            .map(NoteDocument::to_note)
            .collect())
    }

    async fn find_single_note_by_id(&self, id: &Uuid) -> Result<Option<Note>> {
        Ok(self
            .notes
            .lock()
            .await
            .iter()
            .find(|note| &note.id == id)
            .map(NoteDocument::to_note))
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let fields = values.fields;

        let document = NoteDocument {
            id: Uuid::new_v4(),
            user_id: values.user_id.clone(),
            title: fields.title.clone(),
            content: fields.content.clone(),
            is_pinned: fields.is_pinned,
            background_color: fields.background_color.clone(),
            labels: fields.labels.clone(),
            check_list: fields.check_list.clone(),
            time_stamp: values.time_stamp,
        };

        let note = document.to_note();

        self.notes.lock().await.push(document);

        Ok(note)
    }

    async fn update_note(&self, id: &Uuid, values: &UpdateNoteValues) -> Result<Note> {
        let mut notes = self.notes.lock().await;

        let document = notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or(Error::MissingDocument(*id))?;

        if let Some(title) = &values.title {
            document.title.clone_from(title);
        }

        if let Some(content) = &values.content {
            document.content.clone_from(content);
        }

        if let Some(is_pinned) = values.is_pinned {
            document.is_pinned = is_pinned;
        }

        if let Some(background_color) = &values.background_color {
            document.background_color.clone_from(background_color);
        }

        if let Some(labels) = &values.labels {
            document.labels.clone_from(labels);
        }

        if let Some(check_list) = &values.check_list {
            document.check_list.clone_from(check_list);
        }

        document.time_stamp = values.time_stamp;

        Ok(document.to_note())
    }

    async fn delete_note(&self, id: &Uuid) -> Result<()> {
        let mut notes = self.notes.lock().await;

        let position = notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or(Error::MissingDocument(*id))?;

        notes.remove(position);

        Ok(())
    }

    async fn find_label_set(&self, user_id: &UserId) -> Result<Option<Vec<String>>> {
        Ok(self.labels.lock().await.get(user_id).cloned())
    }

    async fn save_label_set(&self, user_id: &UserId, labels: &[String]) -> Result<()> {
        self.labels
            .lock()
            .await
            .insert(user_id.clone(), labels.to_vec());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::notes::NoteFields;

    use super::*;

    fn fields(title: &str) -> NoteFields {
        NoteFields {
            title: title.to_string(),
            content: String::new(),
            is_pinned: false,
            background_color: String::from("#FFFFFF"),
            labels: vec![String::from("work")],
            check_list: String::from(r#"[{"text":"call","isChecked":false}]"#),
        }
    }

    #[tokio::test]
    async fn test_notes_keep_insertion_order() {
        let storage = Memory::new();
        let user_id = UserId::from("someone");

        for (time_stamp, title) in ["one", "two", "three"].iter().enumerate() {
            let values = CreateNoteValues {
                user_id: &user_id,
                fields: &fields(title),
                time_stamp: i64::try_from(time_stamp).unwrap(),
            };
            storage.create_note(&values).await.unwrap();
        }

        let titles = storage
            .find_all_notes()
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.title)
            .collect::<Vec<_>>();

        assert_eq!(vec!["one", "two", "three"], titles);
    }

    #[tokio::test]
    async fn test_merge_update() {
        let storage = Memory::new();
        let user_id = UserId::from("someone");

        let note = storage
            .create_note(&CreateNoteValues {
                user_id: &user_id,
                fields: &fields("groceries"),
                time_stamp: 10,
            })
            .await
            .unwrap();
        assert_eq!(1, note.check_list.len());

        let values = UpdateNoteValues {
            is_pinned: Some(true),
            time_stamp: 20,
            ..UpdateNoteValues::default()
        };
        let note = storage.update_note(&note.id, &values).await.unwrap();

        assert!(note.is_pinned);
        assert_eq!(20, note.time_stamp);
        assert_eq!("groceries", note.title);
        assert_eq!(vec![String::from("work")], note.labels);
        assert_eq!(user_id, note.user_id);
    }

    #[tokio::test]
    async fn test_missing_documents() {
        let storage = Memory::new();
        let id = Uuid::new_v4();

        let result = storage.update_note(&id, &UpdateNoteValues::default()).await;
        assert!(matches!(result, Err(Error::MissingDocument(missing)) if missing == id));

        let result = storage.delete_note(&id).await;
        assert!(matches!(result, Err(Error::MissingDocument(missing)) if missing == id));

        let labels = storage.find_label_set(&UserId::from("nobody")).await.unwrap();
        assert!(labels.is_none());
    }
}
