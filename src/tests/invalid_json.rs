use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let mut app = helper::setup_test_app();

    let access_token = helper::login("someone");

    // wrong data type
    let body = r#"{"title": 42}"#;
    let (status_code, error) =
        helper::maybe_create_note_with_raw_body(&mut app, &access_token, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Data error".to_string(), error.unwrap().error);

    // syntax error
    let body = r#"{"}"#;
    let (status_code, error) =
        helper::maybe_create_note_with_raw_body(&mut app, &access_token, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.error);
    assert!(error.description.is_some());

    // missing content type
    let body = r#"{"title": "Groceries"}"#;
    let (status_code, error) =
        helper::maybe_create_note_with_raw_body(&mut app, &access_token, body, false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        "Missing `application/json` content type".to_string(),
        error.unwrap().error
    );
}
