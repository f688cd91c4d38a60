//! Notes and their checklists
//!
//! A note is owned by a single user for its whole life. Every write stamps it with the
//! current time in milliseconds, which is the only tie-break below the pin state when
//! ordering a user's notes.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::users::UserId;

/// A single entry of a checklist
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    /// What needs to be done
    #[serde(default)]
    pub text: String,

    /// Done or not
    #[serde(default)]
    pub is_checked: bool,
}

impl CheckItem {
    /// Create a new unchecked item
    pub fn new<T>(text: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            is_checked: false,
        }
    }
}

/// Ordered list of checklist items
///
/// Stored documents are flat, so the list is kept as text (a JSON array) at the storage
/// edge. Everywhere else it is a real nested sequence.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckList(pub Vec<CheckItem>);

impl CheckList {
    /// Serialize into the text form stored alongside a note
    pub fn to_text(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| String::from("[]"))
    }

    /// Parse the text form of a checklist
    ///
    /// Blank text is an empty list, like a note saved without any checklist at all.
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str::<Vec<CheckItem>>(text).map(Self)
    }

    /// Parse the text form, falling back to an empty list for text that is not a checklist
    pub fn from_text_lossy(text: &str) -> Self {
        Self::from_text(text).unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable checklist: {err}");
            Self::default()
        })
    }

    pub fn items(&self) -> &[CheckItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A stored note
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub background_color: String,
    pub labels: Vec<String>,
    pub check_list: CheckList,
    /// Milliseconds since the epoch of the latest write, `0` when never stamped
    pub time_stamp: i64,
}

impl Note {
    /// Whether the note carries the given label, exact match
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// The writable fields of a note, as produced by the editor
///
/// The checklist is already in its stored text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub background_color: String,
    pub labels: Vec<String>,
    pub check_list: String,
}

/// Display order of notes
///
/// Pinned before unpinned, then the most recently written first.
pub fn display_order(a: &Note, b: &Note) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.time_stamp.cmp(&a.time_stamp))
}

/// Sort notes into display order
///
/// The sort is stable, so notes with equal pin state and time stamp keep the order the
/// store returned them in.
pub fn sort_for_display(notes: &mut [Note]) {
    notes.sort_by(display_order);
}
