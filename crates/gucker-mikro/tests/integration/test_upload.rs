//! Integration tests for multipart uploads

use std::io::Write;

use gucker_core::domain::newtypes::RemoteId;
use gucker_core::ports::data_service::DataService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn temp_tiff(name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"not-really-pixels").unwrap();
    (dir, path)
}

#[tokio::test]
async fn test_upload_returns_remote_record() {
    let (server, client) = common::setup_mikro_mock().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"uploadOmeroFile": {"id": "501", "name": "sample_s1_t0.TIF"}}
        })))
        .mount(&server)
        .await;

    let (_dir, local) = temp_tiff("sample_s1_t0.TIF");
    let uploaded = client.upload(&local, None).await.expect("upload failed");

    assert_eq!(uploaded.id.as_str(), "501");
    assert_eq!(uploaded.name, "sample_s1_t0.TIF");
    assert_eq!(uploaded.path, local);
}

#[tokio::test]
async fn test_upload_big_file_streams_and_parses_record() {
    let (server, client) = common::setup_mikro_mock().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"uploadBigFile": {"id": "502", "name": "huge.TIF"}}
        })))
        .mount(&server)
        .await;

    let (_dir, local) = temp_tiff("huge.TIF");
    let uploaded = client
        .upload_big_file(&local, Some(&RemoteId::new("D7").unwrap()))
        .await
        .expect("big-file upload failed");

    assert_eq!(uploaded.id.as_str(), "502");
}

#[tokio::test]
async fn test_upload_error_propagates() {
    let (server, client) = common::setup_mikro_mock().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": null,
            "errors": [{"message": "dataset does not exist"}]
        })))
        .mount(&server)
        .await;

    let (_dir, local) = temp_tiff("a.TIF");
    let err = client
        .upload(&local, Some(&RemoteId::new("nope").unwrap()))
        .await
        .expect_err("server error must propagate");

    assert!(err.to_string().contains("dataset does not exist"));
}

#[tokio::test]
async fn test_upload_missing_local_file_fails() {
    let (_server, client) = common::setup_mikro_mock().await;

    let err = client
        .upload(std::path::Path::new("/nonexistent/gone.TIF"), None)
        .await
        .expect_err("missing file must fail before any request");

    assert!(err.to_string().contains("Cannot read"));
}
