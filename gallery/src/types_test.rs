use super::*;

#[test]
fn album_tolerates_server_bookkeeping_and_missing_cover() {
    let album: Album = serde_json::from_value(serde_json::json!({
        "id": "a1",
        "title": "Trip",
        "description": null,
        "created_at": "2025-01-01T00:00:00+00:00",
        "created_by": "uid-1"
    }))
    .unwrap();
    assert_eq!(album.id, "a1");
    assert_eq!(album.description, "");
    assert!(album.cover_url.is_none());
}

#[test]
fn photo_defaults_missing_fields_to_empty() {
    let photo: Photo = serde_json::from_value(serde_json::json!({ "id": "p1", "filename": "x.jpg" })).unwrap();
    assert_eq!(photo.filename, "x.jpg");
    assert_eq!(photo.public_url, "");
    assert_eq!(photo.description, "");
}

#[test]
fn album_list_treats_missing_or_null_albums_as_empty() {
    let missing: AlbumList = serde_json::from_str("{}").unwrap();
    assert!(missing.albums.is_empty());
    let null: AlbumList = serde_json::from_str(r#"{"albums": null}"#).unwrap();
    assert!(null.albums.is_empty());
}

#[test]
fn upload_target_request_serializes_filenames_in_order() {
    let names = vec!["x.jpg".to_owned(), "y.jpg".to_owned()];
    let body = serde_json::to_value(UploadTargetRequest { album_id: "a1", filenames: &names }).unwrap();
    assert_eq!(body, serde_json::json!({ "album_id": "a1", "filenames": ["x.jpg", "y.jpg"] }));
}

#[test]
fn delete_outcome_reads_error_field() {
    let outcome: DeleteOutcome = serde_json::from_str(r#"{"error": "Album has photos"}"#).unwrap();
    assert_eq!(outcome.error.as_deref(), Some("Album has photos"));
    let ok: DeleteOutcome = serde_json::from_str(r#"{"ok": true}"#).unwrap();
    assert!(ok.error.is_none());
}
