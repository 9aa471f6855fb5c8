use super::*;

#[test]
fn drawing_error_to_status_maps_not_found() {
    let err = DrawingError::NotFound(Uuid::nil());
    assert_eq!(drawing_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn drawing_error_to_status_maps_missing_revision_to_not_found() {
    let err = DrawingError::RevisionNotFound(Uuid::nil());
    assert_eq!(drawing_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn create_drawing_body_defaults_file_url() {
    let body: CreateDrawingBody = serde_json::from_str(
        r#"{"project_id":"00000000-0000-0000-0000-000000000000","discipline":"A"}"#,
    )
    .expect("body should parse");
    assert!(body.file_url.is_empty());
}

#[test]
fn revision_body_requires_file_metadata() {
    let result: Result<CreateRevisionBody, _> =
        serde_json::from_str(r#"{"label":"B"}"#);
    assert!(result.is_err(), "file_url/file_name/file_size are mandatory");
}

#[tokio::test]
async fn blank_revision_label_is_rejected() {
    let state = crate::state::test_helpers::test_app_state();
    let body = CreateRevisionBody {
        label: "   ".to_owned(),
        file_url: String::new(),
        file_name: "a.png".to_owned(),
        file_size: 0,
        description: String::new(),
        uploaded_by: None,
    };
    let result = create_revision(State(state), Path(Uuid::nil()), Json(body)).await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}

#[tokio::test]
async fn unknown_status_string_is_a_bad_request() {
    let state = crate::state::test_helpers::test_app_state();
    let body = UpdateDrawingBody { status: "archived".to_owned() };
    let result = update_drawing(State(state), Path(Uuid::nil()), Json(body)).await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}
