//! Label filter and free text search over a user's notes
//!
//! Pure and order preserving: the visible notes are derived again from the full list on
//! every change of notes, selected label or query.

use std::convert::Infallible;
use std::str::FromStr;

use crate::notes::Note;

/// Sentinel selecting every label
pub const ALL_LABELS: &str = "all";

/// Which label the notes are filtered on
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelSelection {
    /// No label filter
    #[default]
    All,

    /// Only notes carrying this exact label
    Label(String),
}

impl LabelSelection {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => note.has_label(label),
        }
    }
}

impl FromStr for LabelSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_LABELS {
            Self::All
        } else {
            Self::Label(s.to_string())
        })
    }
}

/// What to tell the user when nothing is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// The user has no notes at all
    NoNotesYet,

    /// Notes exist, the filter hides all of them
    NoMatches,
}

/// Case-insensitive substring match on title or content
///
/// An empty query matches everything.
pub fn matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();

    note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
}

/// Label selection plus search query
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub label: LabelSelection,
    pub query: String,
}

impl NoteFilter {
    pub fn new(label: LabelSelection, query: impl Into<String>) -> Self {
        Self {
            label,
            query: query.into(),
        }
    }

    /// Whether anything is filtered at all
    pub fn is_unfiltered(&self) -> bool {
        self.label == LabelSelection::All && self.query.is_empty()
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.label.matches(note) && matches_query(note, &self.query)
    }

    /// The notes passing the filter, in their original order
    pub fn visible<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|note| self.matches(note)).collect()
    }

    /// Why nothing is visible, `None` when something is
    pub fn empty_state(&self, notes: &[Note]) -> Option<EmptyState> {
        if notes.iter().any(|note| self.matches(note)) {
            None
        } else if self.is_unfiltered() {
            Some(EmptyState::NoNotesYet)
        } else {
            Some(EmptyState::NoMatches)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::notes::tests::note;

    use super::*;

    fn labelled(title: &str, content: &str, labels: &[&str]) -> Note {
        let mut note = note(title, false, 0);
        note.content = content.to_string();
        note.labels = labels.iter().map(ToString::to_string).collect();
        note
    }

    fn sample() -> Vec<Note> {
        vec![
            labelled("Standup", "discuss FOO rollout", &["work"]),
            labelled("Groceries", "milk, eggs", &["home"]),
            labelled("Foo fighters", "", &["music", "home"]),
            labelled("", "", &[]),
        ]
    }

    fn titles(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|note| note.title.clone()).collect()
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let note = labelled("", "this has FOO in it", &[]);

        assert!(matches_query(&note, "foo"));
        assert!(matches_query(&note, "Foo"));
        assert!(!matches_query(&note, "bar"));
    }

    #[test]
    fn test_empty_query_matches_empty_note() {
        assert!(matches_query(&labelled("", "", &[]), ""));
    }

    #[test]
    fn test_label_selection() {
        assert_eq!(LabelSelection::All, "all".parse().unwrap());
        assert_eq!(
            LabelSelection::Label(String::from("All")),
            "All".parse().unwrap()
        );

        let notes = sample();
        let filter = NoteFilter::new(LabelSelection::Label(String::from("home")), "");
        assert_eq!(vec!["Groceries", "Foo fighters"], titles(&filter.visible(&notes)));
    }

    #[test]
    fn test_label_and_query_combined() {
        let notes = sample();
        let filter = NoteFilter::new(LabelSelection::Label(String::from("home")), "foo");

        assert_eq!(vec!["Foo fighters"], titles(&filter.visible(&notes)));
    }

    #[test]
    fn test_predicates_commute() {
        let notes = sample();
        let label = LabelSelection::Label(String::from("home"));

        for query in ["", "foo", "MILK", "nothing"] {
            let label_first = notes
                .iter()
                .filter(|note| label.matches(note))
                .filter(|note| matches_query(note, query))
                .map(|note| note.id)
                .collect::<Vec<_>>();

            let query_first = notes
                .iter()
                .filter(|note| matches_query(note, query))
                .filter(|note| label.matches(note))
                .map(|note| note.id)
                .collect::<Vec<_>>();

            assert_eq!(label_first, query_first);
        }
    }

    #[test]
    fn test_empty_state() {
        let notes = sample();

        assert_eq!(None, NoteFilter::default().empty_state(&notes));
        assert_eq!(
            Some(EmptyState::NoNotesYet),
            NoteFilter::default().empty_state(&[])
        );
        assert_eq!(
            Some(EmptyState::NoMatches),
            NoteFilter::new(LabelSelection::All, "nothing").empty_state(&notes)
        );
        assert_eq!(
            Some(EmptyState::NoMatches),
            NoteFilter::new(LabelSelection::Label(String::from("work")), "").empty_state(&[])
        );
    }
}
