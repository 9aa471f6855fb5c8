use super::*;

#[test]
fn storage_error_to_status_maps_not_found() {
    let err = StorageError::NotFound("a/b/c.png".to_owned());
    assert_eq!(storage_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn storage_error_to_status_maps_bad_components_to_bad_request() {
    let err = StorageError::InvalidComponent("..".to_owned());
    assert_eq!(storage_error_to_status(err), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_upload_body_is_rejected() {
    let state = crate::state::test_helpers::test_app_state();
    let query = UploadQuery {
        project_id: Uuid::nil(),
        set_name: "Permit Set".to_owned(),
        revision_label: "A".to_owned(),
        file_name: "plan.png".to_owned(),
    };
    let result = upload_file(State(state), Query(query), Bytes::new()).await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}

#[tokio::test]
async fn upload_then_download_round_trips_through_the_store() {
    let state = crate::state::test_helpers::test_app_state();
    let query = UploadQuery {
        project_id: Uuid::nil(),
        set_name: "Permit Set".to_owned(),
        revision_label: "A".to_owned(),
        file_name: "plan.png".to_owned(),
    };

    let (status, Json(response)) =
        upload_file(State(state.clone()), Query(query), Bytes::from_static(b"raster"))
            .await
            .expect("upload");
    assert_eq!(status, StatusCode::CREATED);
    assert!(response.url.ends_with(&format!("/files/{}", response.path)));
    assert_eq!(
        response.path,
        format!("{}/Permit Set/A/plan.png", Uuid::nil()),
    );

    let bytes = download_file(State(state), Path(response.path)).await.expect("download");
    assert_eq!(bytes, b"raster");
}

#[tokio::test]
async fn traversal_in_the_query_is_rejected_before_any_write() {
    let state = crate::state::test_helpers::test_app_state();
    let query = UploadQuery {
        project_id: Uuid::nil(),
        set_name: "..".to_owned(),
        revision_label: "A".to_owned(),
        file_name: "plan.png".to_owned(),
    };
    let result = upload_file(State(state), Query(query), Bytes::from_static(b"x")).await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}
