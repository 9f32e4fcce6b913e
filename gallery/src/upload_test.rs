use super::*;
use crate::error::TransferError;
use crate::testing::{FakeIdentity, ScriptedTransport, client};
use crate::transport::{HttpRequest, Method, RequestBody};
use futures::executor::block_on;

fn targets_body(names: &[&str]) -> serde_json::Value {
    let results: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "filename": name,
                "upload_url": format!("https://storage.example/put/{name}?sig=abc"),
                "blob_path": format!("albums/a1/uid-1/{name}"),
            })
        })
        .collect();
    serde_json::json!({ "results": results })
}

fn files(names: &[&str]) -> Vec<LocalFile> {
    names.iter().map(|n| LocalFile::new(*n, n.as_bytes().to_vec())).collect()
}

fn run_job(transport: ScriptedTransport, names: &[&str]) -> (Result<UploadSummary, UploadError>, UploadJob, Vec<UploadEvent>, Vec<HttpRequest>) {
    let api = client(transport, FakeIdentity::signed_in(true));
    let mut job = UploadJob::new("a1", files(names)).unwrap();
    let mut events = Vec::new();
    let result = block_on(run(&api, &mut job, |e| events.push(e.clone())));
    (result, job, events, api.transport().requests())
}

// =============================================================
// Success path
// =============================================================

#[test]
fn two_files_upload_and_register_in_order() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg", "y.jpg"]))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#)
        .reply(200, "")
        .reply(201, r#"{"id":"p2"}"#);
    let (result, job, _, requests) = run_job(transport, &["x.jpg", "y.jpg"]);

    assert_eq!(result.unwrap(), UploadSummary { registered: 2 });
    assert_eq!(job.log(), ["Uploading x.jpg...", "Uploaded x.jpg", "Uploading y.jpg...", "Uploaded y.jpg"]);
    assert_eq!(job.statuses(), [FileStatus::Registered, FileStatus::Registered]);
    assert!(job.is_finished());

    let shape: Vec<_> = requests.iter().map(|r| (r.method, r.url.as_str())).collect();
    assert_eq!(
        shape,
        [
            (Method::Post, "/api/generate_upload_urls"),
            (Method::Put, "https://storage.example/put/x.jpg?sig=abc"),
            (Method::Post, "/api/photos"),
            (Method::Put, "https://storage.example/put/y.jpg?sig=abc"),
            (Method::Post, "/api/photos"),
        ]
    );
    assert_eq!(
        requests[0].body,
        RequestBody::Json(serde_json::json!({ "album_id": "a1", "filenames": ["x.jpg", "y.jpg"] }))
    );
    assert_eq!(requests[1].body, RequestBody::Bytes(b"x.jpg".to_vec()));
    assert_eq!(
        requests[2].body,
        RequestBody::Json(serde_json::json!({
            "album_id": "a1",
            "filename": "x.jpg",
            "blob_path": "albums/a1/uid-1/x.jpg",
            "public_url": "https://storage.googleapis.com/albums%2Fa1%2Fuid-1%2Fx.jpg",
        }))
    );
}

#[test]
fn n_files_report_n_uploaded_events_in_input_order() {
    let names = ["c.jpg", "a.jpg", "b.jpg", "d.jpg"];
    // Targets come back in a different order; files still go in input order.
    let mut transport = ScriptedTransport::new().reply_json(200, &targets_body(&["d.jpg", "b.jpg", "a.jpg", "c.jpg"]));
    for _ in names {
        transport = transport.reply(200, "").reply(201, r#"{"id":"p"}"#);
    }
    let (result, _, events, _) = run_job(transport, &names);

    assert!(result.is_ok());
    let uploaded: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            UploadEvent::Uploaded { filename, .. } => Some(filename.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(uploaded, names);
    assert!(!events.iter().any(|e| matches!(e, UploadEvent::Failed { .. })));
}

#[test]
fn uploading_is_announced_before_transfer_and_uploaded_after_registration() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg"]))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#);
    let (_, _, events, _) = run_job(transport, &["x.jpg"]);
    assert_eq!(
        events,
        [
            UploadEvent::Uploading { index: 0, filename: "x.jpg".to_owned() },
            UploadEvent::Uploaded { index: 0, filename: "x.jpg".to_owned() },
        ]
    );
}

#[test]
fn duplicate_filenames_each_consume_their_own_target() {
    let body = serde_json::json!({ "results": [
        { "filename": "x.jpg", "upload_url": "https://storage.example/1", "blob_path": "b/1" },
        { "filename": "x.jpg", "upload_url": "https://storage.example/2", "blob_path": "b/2" },
    ]});
    let transport = ScriptedTransport::new()
        .reply_json(200, &body)
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#)
        .reply(200, "")
        .reply(201, r#"{"id":"p2"}"#);
    let (result, _, _, requests) = run_job(transport, &["x.jpg", "x.jpg"]);
    assert!(result.is_ok());
    let puts: Vec<_> = requests
        .into_iter()
        .filter(|r| r.method == Method::Put)
        .map(|r| r.url)
        .collect();
    assert_eq!(puts, ["https://storage.example/1", "https://storage.example/2"]);
}

// =============================================================
// Failure paths
// =============================================================

#[test]
fn empty_batch_is_rejected_before_any_request() {
    assert!(matches!(UploadJob::new("a1", Vec::new()), Err(UploadError::EmptyBatch)));
}

#[test]
fn target_request_failure_uploads_nothing() {
    let transport = ScriptedTransport::new().reply(400, r#"{"error":"Server not configured: IMAGES_BUCKET"}"#);
    let (result, job, events, requests) = run_job(transport, &["x.jpg", "y.jpg"]);

    let err = result.unwrap_err();
    assert!(matches!(err, UploadError::Targets(_)));
    assert!(err.to_string().contains("IMAGES_BUCKET"));
    assert_eq!(requests.len(), 1);
    assert!(job.log().is_empty());
    assert!(events.is_empty());
    assert_eq!(
        job.statuses(),
        [FileStatus::Failed(FailureCause::TargetRequest), FileStatus::Failed(FailureCause::TargetRequest)]
    );
}

#[test]
fn transfer_failure_on_second_file_keeps_first_registered() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg", "y.jpg"]))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#)
        .reply(403, "SignatureDoesNotMatch");
    let (result, job, events, requests) = run_job(transport, &["x.jpg", "y.jpg"]);

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Upload failed for y.jpg");
    assert!(matches!(err, UploadError::Transfer { source: TransferError::Status(403), .. }));
    assert_eq!(job.registered(), ["x.jpg"]);
    assert_eq!(job.statuses(), [FileStatus::Registered, FileStatus::Failed(FailureCause::Transfer)]);
    assert_eq!(job.log(), ["Uploading x.jpg...", "Uploaded x.jpg", "Uploading y.jpg..."]);

    let registrations = requests.iter().filter(|r| r.url == "/api/photos").count();
    assert_eq!(registrations, 1);
    let failures = events.iter().filter(|e| matches!(e, UploadEvent::Failed { .. })).count();
    assert_eq!(failures, 1);
}

#[test]
fn transfer_failure_at_k_leaves_later_files_unattempted() {
    let names = ["a.jpg", "b.jpg", "c.jpg", "d.jpg"];
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&names))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#)
        .unreachable("connection reset");
    let (result, job, _, requests) = run_job(transport, &names);

    assert!(matches!(result, Err(UploadError::Transfer { .. })));
    assert_eq!(
        job.statuses(),
        [
            FileStatus::Registered,
            FileStatus::Failed(FailureCause::Transfer),
            FileStatus::Failed(FailureCause::Aborted),
            FileStatus::Failed(FailureCause::Aborted),
        ]
    );
    let attempted: Vec<_> = requests
        .into_iter()
        .filter(|r| r.method == Method::Put)
        .map(|r| r.url)
        .collect();
    assert_eq!(attempted.len(), 2);
    assert!(job.is_finished());
}

#[test]
fn registration_failure_reports_orphaned_object() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg", "y.jpg"]))
        .reply(200, "")
        .reply(500, "firestore unavailable");
    let (result, job, _, requests) = run_job(transport, &["x.jpg", "y.jpg"]);

    let err = result.unwrap_err();
    assert_eq!(err.orphaned_blob(), Some("albums/a1/uid-1/x.jpg"));
    assert!(err.to_string().contains("500 firestore unavailable"));
    assert_eq!(job.orphaned(), ["x.jpg"]);
    assert_eq!(job.statuses()[1], FileStatus::Failed(FailureCause::Aborted));
    assert_eq!(job.log(), ["Uploading x.jpg..."]);
    assert_eq!(requests.len(), 3);
}

#[test]
fn missing_target_aborts_at_that_file() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg"]))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#);
    let (result, job, _, _) = run_job(transport, &["x.jpg", "X.JPG", "z.jpg"]);

    assert!(matches!(result, Err(UploadError::NoTarget { ref filename }) if filename == "X.JPG"));
    assert_eq!(
        job.statuses(),
        [
            FileStatus::Registered,
            FileStatus::Failed(FailureCause::NoTarget),
            FileStatus::Failed(FailureCause::Aborted),
        ]
    );
}

#[test]
fn transferred_bytes_are_released_from_the_job() {
    let transport = ScriptedTransport::new()
        .reply_json(200, &targets_body(&["x.jpg"]))
        .reply(200, "")
        .reply(201, r#"{"id":"p1"}"#);
    let (_, job, _, _) = run_job(transport, &["x.jpg"]);
    assert!(job.entries()[0].file.bytes.is_empty());
    assert_eq!(job.entries()[0].target.as_ref().map(|t| t.blob_path.as_str()), Some("albums/a1/uid-1/x.jpg"));
}
