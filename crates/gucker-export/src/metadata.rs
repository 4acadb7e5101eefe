//! JSON metadata dumps
//!
//! Every exported node gets its full record written next to it as JSON:
//! keys sorted, 4-space indent, timestamps as ISO-8601 strings. The
//! sorted/indented form is part of the export contract (re-runs must
//! produce byte-identical files), not a cosmetic choice.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use gucker_core::domain::errors::ExportError;

/// Renders `value` with sorted keys and 4-space indentation
///
/// Going through [`serde_json::Value`] first sorts the keys: its map is
/// BTree-backed, so object entries come out in key order regardless of
/// struct field order.
pub fn render<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Writes the rendered record to `path`, replacing any previous dump
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let rendered = render(value)?;
    tokio::fs::write(path, rendered).await?;
    debug!(path = %path.display(), "Wrote metadata dump");
    Ok(())
}
