use super::*;
use crate::testing::{FakeIdentity, ScriptedTransport, client, token_with_admin};
use crate::transport::RequestBody;
use futures::executor::block_on;

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(album_endpoint("a1"), "/api/albums/a1");
    assert_eq!(album_photos_endpoint("a1"), "/api/albums/a1/photos");
    assert_eq!(photo_endpoint("a1", "p1"), "/api/photos/a1/p1");
    assert_eq!(photo_description_endpoint("a1", "p1"), "/api/photos/a1/p1/description");
}

// =============================================================
// call
// =============================================================

#[test]
fn call_attaches_fresh_bearer_token() {
    let api = client(ScriptedTransport::new().reply(200, "{}").reply(200, "{}"), FakeIdentity::signed_in(false));
    block_on(api.call(Method::Get, "/api/albums", None)).unwrap();
    api.identity().set_token(Some(token_with_admin(true)));
    block_on(api.call(Method::Get, "/api/albums", None)).unwrap();

    let requests = api.transport().requests();
    assert_eq!(requests[0].bearer, Some(token_with_admin(false)));
    assert_eq!(requests[1].bearer, Some(token_with_admin(true)));
}

#[test]
fn call_without_token_is_sent_unauthenticated() {
    let api = client(ScriptedTransport::new().reply(200, r#"{"albums":[]}"#), FakeIdentity::default());
    let albums = block_on(api.list_albums()).unwrap();
    assert!(albums.is_empty());
    assert!(api.transport().requests()[0].bearer.is_none());
}

#[test]
fn non_success_status_embeds_status_and_body() {
    let api = client(ScriptedTransport::new().reply(401, r#"{"error": "Admin only"}"#), FakeIdentity::default());
    let err = block_on(api.call(Method::Post, "/api/albums", None)).unwrap_err();
    assert_eq!(err.status(), Some(401));
    let message = err.to_string();
    assert!(message.contains("401"), "{message}");
    assert!(message.contains(r#"{"error": "Admin only"}"#), "{message}");
}

#[test]
fn token_failure_aborts_before_sending() {
    let identity = FakeIdentity::signed_in(true);
    identity.break_tokens();
    let api = client(ScriptedTransport::new().reply(200, "{}"), identity);
    let err = block_on(api.list_albums()).unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert!(api.transport().requests().is_empty());
}

#[test]
fn transport_failure_is_reported() {
    let api = client(ScriptedTransport::new().unreachable("connection reset"), FakeIdentity::default());
    let err = block_on(api.list_photos("a1")).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.to_string(), "request failed: connection reset");
}

#[test]
fn empty_success_body_decodes_as_null() {
    let api = client(ScriptedTransport::new().reply(200, ""), FakeIdentity::default());
    assert_eq!(block_on(api.call(Method::Delete, "/api/albums/a1", None)).unwrap(), Value::Null);
}

// =============================================================
// typed operations
// =============================================================

#[test]
fn list_photos_hits_album_scoped_path() {
    let body = serde_json::json!({ "photos": [{ "id": "p1", "filename": "x.jpg", "public_url": "u" }] });
    let api = client(ScriptedTransport::new().reply_json(200, &body), FakeIdentity::default());
    let photos = block_on(api.list_photos("a1")).unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].filename, "x.jpg");
    let request = &api.transport().requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "/api/albums/a1/photos");
}

#[test]
fn create_album_posts_title_and_description() {
    let api = client(ScriptedTransport::new().reply(201, r#"{"id":"a9"}"#), FakeIdentity::signed_in(true));
    assert_eq!(block_on(api.create_album("Trip", "")).unwrap(), "a9");
    let request = &api.transport().requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body, RequestBody::Json(serde_json::json!({ "title": "Trip", "description": "" })));
}

#[test]
fn delete_album_surfaces_error_field() {
    let api = client(
        ScriptedTransport::new().reply(200, r#"{"error":"Album has photos and cannot be deleted"}"#),
        FakeIdentity::signed_in(true),
    );
    let err = block_on(api.delete_album("a1")).unwrap_err();
    assert_eq!(err.to_string(), "Album has photos and cannot be deleted");
}

#[test]
fn delete_photo_surfaces_error_field_like_albums() {
    let api = client(ScriptedTransport::new().reply(200, r#"{"error":"Not found"}"#), FakeIdentity::signed_in(true));
    let err = block_on(api.delete_photo("a1", "p1")).unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Not found"));
    assert_eq!(api.transport().requests()[0].url, "/api/photos/a1/p1");
}

#[test]
fn update_description_puts_description() {
    let api = client(ScriptedTransport::new().reply(200, r#"{"ok":true}"#), FakeIdentity::signed_in(true));
    block_on(api.update_description("a1", "p1", "sunset")).unwrap();
    let request = &api.transport().requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "/api/photos/a1/p1/description");
    assert_eq!(request.body, RequestBody::Json(serde_json::json!({ "description": "sunset" })));
}

#[test]
fn put_object_sends_raw_bytes_without_token() {
    let api = client(ScriptedTransport::new().reply(200, ""), FakeIdentity::signed_in(true));
    block_on(api.put_object("https://storage.example/x?sig=1", vec![1, 2, 3])).unwrap();
    let request = &api.transport().requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "https://storage.example/x?sig=1");
    assert!(request.bearer.is_none());
    assert_eq!(request.body, RequestBody::Bytes(vec![1, 2, 3]));
}

#[test]
fn put_object_non_success_is_transfer_error() {
    let api = client(ScriptedTransport::new().reply(403, "SignatureDoesNotMatch"), FakeIdentity::default());
    let err = block_on(api.put_object("https://storage.example/x", Vec::new())).unwrap_err();
    assert_eq!(err, TransferError::Status(403));
}
