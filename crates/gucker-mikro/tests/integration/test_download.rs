//! Integration tests for payload downloads

use gucker_core::domain::newtypes::{FileHandle, RemoteId};
use gucker_core::ports::data_service::DataService;

use crate::common;

#[tokio::test]
async fn test_download_writes_payload_to_destination() {
    let (server, client) = common::setup_mikro_mock().await;
    common::mount_media(&server, "/media/a.czi", b"original-bytes").await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("a.czi");

    client
        .download(&FileHandle::new("media/a.czi"), &dest)
        .await
        .expect("download failed");

    assert_eq!(std::fs::read(&dest).unwrap(), b"original-bytes");
}

#[tokio::test]
async fn test_download_representation_resolves_store_then_fetches() {
    let (server, client) = common::setup_mikro_mock().await;

    common::mount_graphql(
        &server,
        "RepresentationStore",
        serde_json::json!({
            "representation": {"id": "88", "store": "media/zarr/88.tiff"}
        }),
    )
    .await;
    common::mount_media(&server, "/media/zarr/88.tiff", b"pixels").await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("ID(88) initial.tiff");

    client
        .download_representation(&RemoteId::new("88").unwrap(), &dest)
        .await
        .expect("representation download failed");

    assert_eq!(std::fs::read(&dest).unwrap(), b"pixels");
}

#[tokio::test]
async fn test_download_representation_without_store_fails() {
    let (server, client) = common::setup_mikro_mock().await;

    common::mount_graphql(
        &server,
        "RepresentationStore",
        serde_json::json!({
            "representation": {"id": "88", "store": null}
        }),
    )
    .await;

    let err = client
        .download_representation(&RemoteId::new("88").unwrap(), std::path::Path::new("/tmp/x"))
        .await
        .expect_err("a storeless representation cannot be exported");

    assert!(err.to_string().contains("no stored payload"));
}

#[tokio::test]
async fn test_download_http_error_propagates() {
    let (_server, client) = common::setup_mikro_mock().await;
    // No media mock mounted: the server answers 404.

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download(&FileHandle::new("media/missing.czi"), &dir.path().join("x"))
        .await
        .expect_err("404 must fail the download");

    assert!(err.to_string().contains("Download rejected"));
}
