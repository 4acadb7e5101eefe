//! GraphQL documents for the Mikro service
//!
//! The field selections mirror the export fragments the service
//! exposes: a stage fans out into positions, acquisitions (omero
//! records), their representation, and one level of derived
//! representations per node; a dataset lists its originally uploaded
//! files with their download handles.

/// Fetches the nested export fragment for one stage
pub const EXPORT_STAGE: &str = r#"
query ExportStage($id: ID!) {
    stage(id: $id) {
        id
        name
        positions {
            id
            name
            x
            y
            z
            omeros {
                acquisitionDate
                representation {
                    id
                    name
                    store
                    derived {
                        id
                        name
                        store
                        derived {
                            id
                            name
                            store
                        }
                    }
                }
            }
        }
    }
}
"#;

/// Fetches the export fragment for one dataset
pub const EXPORT_DATASET: &str = r#"
query ExportDataset($id: ID!) {
    dataset(id: $id) {
        id
        name
        files: omerofiles {
            id
            name
            type
            file
        }
    }
}
"#;

/// Resolves a representation's store handle for payload download
pub const REPRESENTATION_STORE: &str = r#"
query RepresentationStore($id: ID!) {
    representation(id: $id) {
        id
        store
    }
}
"#;

/// Uploads one file, optionally attaching it to a dataset
///
/// Sent as a GraphQL multipart request; the `file` variable is mapped
/// to the attached file part.
pub const UPLOAD_FILE: &str = r#"
mutation UploadFile($file: Upload!, $datasets: [ID!]) {
    uploadOmeroFile(file: $file, datasets: $datasets) {
        id
        name
    }
}
"#;

/// Streamed variant of [`UPLOAD_FILE`] for large payloads
pub const UPLOAD_BIG_FILE: &str = r#"
mutation UploadBigFile($file: BigFile!, $datasets: [ID!]) {
    uploadBigFile(file: $file, datasets: $datasets) {
        id
        name
    }
}
"#;
