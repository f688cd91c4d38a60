//! Note editor
//!
//! Draft of a note being created or edited, plus the text of a checklist item that is
//! still being typed.

use crate::errors::ValidationError;
use crate::notes::CheckItem;
use crate::notes::CheckList;
use crate::notes::Note;
use crate::notes::NoteFields;

/// Background color of new notes
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";

/// Background colors offered to the user
pub const PALETTE: [&str; 12] = [
    "#FFFFFF", "#F28B82", "#FBBC04", "#FFF475", "#CCFF90", "#A7FFEB", "#CBF0F8", "#AECBFA",
    "#D7AEFB", "#FDCFE8", "#E6C9A8", "#E8EAED",
];

/// The editable fields of a note
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub background_color: String,
    pub labels: Vec<String>,
    pub check_list: CheckList,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            is_pinned: false,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            labels: Vec::new(),
            check_list: CheckList::default(),
        }
    }
}

impl NoteDraft {
    /// Whether there is anything worth saving
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty() || !self.content.trim().is_empty()
    }

    /// Payload ready for the repository
    ///
    /// Title and content are trimmed and the checklist is turned into its stored text form.
    pub fn to_saveable(&self) -> Result<NoteFields, ValidationError> {
        if !self.can_save() {
            return Err(ValidationError::EmptyNote);
        }

        Ok(NoteFields {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            is_pinned: self.is_pinned,
            background_color: self.background_color.clone(),
            labels: self.labels.clone(),
            check_list: self.check_list.to_text(),
        })
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            is_pinned: note.is_pinned,
            background_color: note.background_color.clone(),
            labels: note.labels.clone(),
            check_list: note.check_list.clone(),
        }
    }
}

/// In-memory editor state
#[derive(Clone, Debug, Default)]
pub struct NoteEditor {
    draft: NoteDraft,
    pending_check_item: String,
}

impl NoteEditor {
    /// Editor for an existing note, or for a new one
    pub fn new(note: Option<&Note>) -> Self {
        let mut editor = Self::default();
        editor.load(note);
        editor
    }

    /// Reset the editor to an existing note, or to an empty draft
    pub fn load(&mut self, note: Option<&Note>) {
        self.draft = note.map(NoteDraft::from).unwrap_or_default();
        self.pending_check_item.clear();
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_pinned(&mut self, is_pinned: bool) {
        self.draft.is_pinned = is_pinned;
    }

    /// Pick a background color from the palette
    ///
    /// Returns `false`, leaving the color alone, for colors outside the palette.
    pub fn set_background_color(&mut self, color: &str) -> bool {
        if PALETTE.contains(&color) {
            self.draft.background_color = color.to_string();
            true
        } else {
            false
        }
    }

    /// Select a label when it is not selected, deselect it otherwise
    pub fn toggle_label(&mut self, name: &str) {
        if let Some(position) = self.draft.labels.iter().position(|label| label == name) {
            self.draft.labels.remove(position);
        } else {
            self.draft.labels.push(name.to_string());
        }
    }

    /// Select exactly these labels, keeping their order and dropping repeats
    pub fn set_labels(&mut self, labels: impl IntoIterator<Item = String>) {
        self.draft.labels.clear();

        for label in labels {
            if !self.draft.labels.contains(&label) {
                self.draft.labels.push(label);
            }
        }
    }

    /// Replace the checklist, under the same rules as adding items one by one
    pub fn set_check_list(&mut self, items: impl IntoIterator<Item = CheckItem>) {
        self.draft.check_list.0.clear();

        for item in items {
            let index = self.draft.check_list.len();
            self.add_check_item(&item.text);

            if item.is_checked {
                self.toggle_check_item(index);
            }
        }
    }

    /// Append an unchecked item, ignoring blank text
    pub fn add_check_item(&mut self, text: &str) {
        let text = text.trim();

        if !text.is_empty() {
            self.draft.check_list.0.push(CheckItem::new(text));
        }
    }

    pub fn pending_check_item(&self) -> &str {
        &self.pending_check_item
    }

    pub fn set_pending_check_item(&mut self, text: impl Into<String>) {
        self.pending_check_item = text.into();
    }

    /// Add the item being typed and start a new one
    pub fn commit_pending_check_item(&mut self) {
        if self.pending_check_item.trim().is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.pending_check_item);
        self.add_check_item(&text);
    }

    pub fn toggle_check_item(&mut self, index: usize) {
        if let Some(item) = self.draft.check_list.0.get_mut(index) {
            item.is_checked = !item.is_checked;
        }
    }

    pub fn remove_check_item(&mut self, index: usize) {
        if index < self.draft.check_list.len() {
            self.draft.check_list.0.remove(index);
        }
    }

    pub fn update_check_item_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(item) = self.draft.check_list.0.get_mut(index) {
            item.text = text.into();
        }
    }

    pub fn can_save(&self) -> bool {
        self.draft.can_save()
    }

    pub fn to_saveable(&self) -> Result<NoteFields, ValidationError> {
        self.draft.to_saveable()
    }
}
