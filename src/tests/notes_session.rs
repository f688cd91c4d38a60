use crate::editor::NoteEditor;
use crate::errors::Error;
use crate::errors::ValidationError;
use crate::search::EmptyState;
use crate::search::LabelSelection;
use crate::session::NotesSession;
use crate::tests::helper::FlakyStorage;
use crate::users::Identity;

fn editor(title: &str, content: &str) -> NoteEditor {
    let mut editor = NoteEditor::new(None);
    editor.set_title(title);
    editor.set_content(content);
    editor
}

fn titles<S: crate::storage::Storage>(session: &NotesSession<S>) -> Vec<String> {
    session
        .visible()
        .into_iter()
        .map(|note| note.title.clone())
        .collect()
}

#[tokio::test]
async fn test_session_refetches_after_mutations() {
    let storage = FlakyStorage::default();
    let mut session = NotesSession::new(storage, Identity::new("someone"));

    assert!(session.is_loading());
    session.refresh().await.unwrap();
    assert!(!session.is_loading());
    assert_eq!(Some(EmptyState::NoNotesYet), session.empty_state());

    session.save(&editor("first", ""), None).await.unwrap();
    session.save(&editor("second", "foo bar"), None).await.unwrap();
    assert_eq!(2, session.notes().len());

    // pin the first one, it moves to the top
    let first_id = session
        .notes()
        .iter()
        .find(|note| note.title == "first")
        .map(|note| note.id)
        .unwrap();
    session.toggle_pin(&first_id).await.unwrap();
    assert_eq!(vec!["first", "second"], titles(&session));
    assert!(session.notes()[0].is_pinned);

    // edit an existing note
    let mut edit = NoteEditor::new(Some(&session.notes()[0]));
    edit.set_content("now with content");
    session.save(&edit, Some(&first_id)).await.unwrap();
    assert_eq!("now with content", session.notes()[0].content);
    assert!(session.notes()[0].is_pinned);

    // search
    session.set_search("FOO");
    assert_eq!(vec!["second"], titles(&session));
    session.set_search("nothing");
    assert_eq!(Some(EmptyState::NoMatches), session.empty_state());
    session.set_search("");

    // delete
    session.delete(&first_id).await.unwrap();
    assert_eq!(vec!["second"], titles(&session));
}

#[tokio::test]
async fn test_session_labels() {
    let storage = FlakyStorage::default();
    let mut session = NotesSession::new(storage, Identity::new("someone"));
    session.refresh().await.unwrap();

    session.add_label("work").await.unwrap();
    assert!(session.labels().contains("work"));

    let result = session.add_label(" work ").await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::DuplicateLabel))
    ));

    let mut labelled = editor("standup", "");
    labelled.toggle_label("work");
    session.save(&labelled, None).await.unwrap();
    session.save(&editor("groceries", ""), None).await.unwrap();

    session.select_label(LabelSelection::Label(String::from("work")));
    assert_eq!(vec!["standup"], titles(&session));

    session.select_label(LabelSelection::All);
    assert_eq!(2, titles(&session).len());
}

#[tokio::test]
async fn test_session_keeps_state_on_failures() {
    let storage = FlakyStorage::default();
    let mut session = NotesSession::new(storage.clone(), Identity::new("someone"));
    session.refresh().await.unwrap();

    session.save(&editor("keep me", ""), None).await.unwrap();
    session.add_label("work").await.unwrap();
    let before = session.notes().to_vec();
    let note_id = before[0].id;

    storage.fail_writes(true);

    assert!(matches!(
        session.save(&editor("lost", ""), None).await,
        Err(Error::StoreWrite(_))
    ));
    assert!(matches!(
        session.toggle_pin(&note_id).await,
        Err(Error::StoreWrite(_))
    ));
    assert!(matches!(
        session.delete(&note_id).await,
        Err(Error::StoreWrite(_))
    ));
    assert!(matches!(
        session.add_label("home").await,
        Err(Error::StoreWrite(_))
    ));
    assert_eq!(before, session.notes());
    assert_eq!(vec!["work".to_string()], session.labels().as_slice());

    storage.fail_writes(false);
    storage.fail_reads(true);

    // notes stay on screen, labels fall back to none
    assert!(matches!(session.refresh().await, Err(Error::StoreRead(_))));
    assert_eq!(before, session.notes());
    assert!(session.labels().as_slice().is_empty());

    storage.fail_reads(false);
    session.refresh().await.unwrap();
    assert_eq!(before, session.notes());
    assert!(session.labels().contains("work"));
}

#[tokio::test]
async fn test_session_only_touches_own_notes() {
    let storage = FlakyStorage::default();

    let mut owner = NotesSession::new(storage.clone(), Identity::new("owner"));
    owner.refresh().await.unwrap();
    owner.save(&editor("diary", "dear diary"), None).await.unwrap();
    let note_id = owner.notes()[0].id;

    let mut intruder = NotesSession::new(storage, Identity::new("intruder"));
    intruder.refresh().await.unwrap();

    let result = intruder.save(&editor("mine now", ""), Some(&note_id)).await;
    assert!(matches!(result, Err(Error::NoteNotFound(id)) if id == note_id));

    let result = intruder.delete(&note_id).await;
    assert!(matches!(result, Err(Error::NoteNotFound(id)) if id == note_id));

    assert!(intruder.notes().is_empty());

    owner.refresh().await.unwrap();
    assert_eq!(1, owner.notes().len());
    assert_eq!("diary", owner.notes()[0].title);
}

#[tokio::test]
async fn test_session_rejects_empty_drafts() {
    let storage = FlakyStorage::default();
    let mut session = NotesSession::new(storage, Identity::new("someone"));
    session.refresh().await.unwrap();

    let result = session.save(&editor("  ", "\n"), None).await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::EmptyNote))
    ));
    assert!(session.notes().is_empty());
}
