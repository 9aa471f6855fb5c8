use super::*;

#[test]
fn layer_error_to_status_maps_reserved_name_to_conflict() {
    let err = LayerError::ReservedName("Default".to_owned());
    assert_eq!(layer_error_to_status(err), StatusCode::CONFLICT);
}

#[test]
fn layer_error_to_status_maps_duplicate_to_conflict() {
    let err = LayerError::DuplicateName("Plumbing".to_owned());
    assert_eq!(layer_error_to_status(err), StatusCode::CONFLICT);
}

#[test]
fn layer_error_to_status_maps_not_found() {
    assert_eq!(layer_error_to_status(LayerError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[test]
fn create_body_defaults_the_color() {
    let body: CreateLayerBody = serde_json::from_str(r#"{"name":"Electrical"}"#).expect("parses");
    assert_eq!(body.color, "#1E88E5");
    assert!(body.created_by.is_none());
}

#[test]
fn create_body_keeps_the_creator() {
    let body: CreateLayerBody = serde_json::from_str(
        r#"{"name":"Electrical","created_by":"00000000-0000-0000-0000-000000000001"}"#,
    )
    .expect("parses");
    assert!(body.created_by.is_some());
}

#[tokio::test]
async fn creating_the_default_layer_is_a_conflict() {
    let state = crate::state::test_helpers::test_app_state();
    let body = CreateLayerBody { name: "Default".to_owned(), color: "#000000".to_owned(), created_by: None };
    let result = create_layer(State(state), Path(Uuid::nil()), Json(body)).await;
    assert!(matches!(result, Err(StatusCode::CONFLICT)));
}
