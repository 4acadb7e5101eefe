//! Integration tests for gucker-mikro
//!
//! Uses wiremock to simulate the Mikro GraphQL service and verifies
//! end-to-end behavior of the MikroClient: export fetches, uploads,
//! and payload downloads.

mod common;

mod test_download;
mod test_export;
mod test_upload;
