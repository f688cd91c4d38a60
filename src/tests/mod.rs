mod invalid_json;
mod notes_session;
