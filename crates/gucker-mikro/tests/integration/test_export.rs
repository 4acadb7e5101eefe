//! Integration tests for export fragment fetches
//!
//! Verifies that fetch_stage_export / fetch_dataset_export parse the
//! nested wire shapes and that a null node maps to `Ok(None)`.

use gucker_core::domain::export::FileKind;
use gucker_core::domain::newtypes::RemoteId;
use gucker_core::ports::data_service::DataService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_fetch_stage_export_parses_nested_fragment() {
    let (server, client) = common::setup_mikro_mock().await;

    common::mount_graphql(
        &server,
        "ExportStage",
        serde_json::json!({
            "stage": {
                "id": "7",
                "name": "First Stage",
                "positions": [{
                    "id": "12",
                    "name": "Pos 0",
                    "x": 1.0, "y": 2.0, "z": 0.5,
                    "omeros": [{
                        "acquisitionDate": "2022-11-04T09:30:00Z",
                        "representation": {
                            "id": "88",
                            "name": "initial",
                            "store": "media/zarr/88.tiff",
                            "derived": [
                                {"id": "89", "name": "masked", "store": null, "derived": []}
                            ]
                        }
                    }]
                }]
            }
        }),
    )
    .await;

    let stage = client
        .fetch_stage_export(&RemoteId::new("7").unwrap())
        .await
        .expect("fetch failed")
        .expect("stage should resolve");

    assert_eq!(stage.name, "First Stage");
    assert_eq!(stage.positions.len(), 1);
    let omero = &stage.positions[0].omeros[0];
    assert_eq!(omero.representation.id.as_str(), "88");
    assert_eq!(omero.representation.derived.len(), 1);
    assert!(omero.acquisition_date.is_some());
}

#[tokio::test]
async fn test_fetch_stage_export_null_is_not_found() {
    let (server, client) = common::setup_mikro_mock().await;
    common::mount_graphql(&server, "ExportStage", serde_json::json!({ "stage": null })).await;

    let result = client
        .fetch_stage_export(&RemoteId::new("404").unwrap())
        .await
        .expect("a null node is not a transport error");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_dataset_export_parses_files() {
    let (server, client) = common::setup_mikro_mock().await;

    common::mount_graphql(
        &server,
        "ExportDataset",
        serde_json::json!({
            "dataset": {
                "id": "D1",
                "name": "run 3",
                "files": [
                    {"id": "1", "name": "a.czi", "type": "CZI", "file": "media/a.czi"},
                    {"id": "2", "name": "b.tif", "type": "TIFF", "file": "media/b.tif"}
                ]
            }
        }),
    )
    .await;

    let dataset = client
        .fetch_dataset_export(&RemoteId::new("D1").unwrap())
        .await
        .expect("fetch failed")
        .expect("dataset should resolve");

    assert_eq!(dataset.files.len(), 2);
    assert_eq!(dataset.files[0].kind, FileKind::Czi);
    assert_eq!(dataset.files[1].file.as_str(), "media/b.tif");
}

#[tokio::test]
async fn test_graphql_errors_surface_as_failures() {
    let (server, client) = common::setup_mikro_mock().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": null,
            "errors": [{"message": "permission denied"}]
        })))
        .mount(&server)
        .await;

    let err = client
        .fetch_stage_export(&RemoteId::new("7").unwrap())
        .await
        .expect_err("errors list must fail the call");

    assert!(err.to_string().contains("permission denied"));
}
