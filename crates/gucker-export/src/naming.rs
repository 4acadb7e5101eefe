//! Deterministic directory and file naming for exports
//!
//! Every exported node gets a name derived from its remote id and
//! cleartext name: `ID(<id>) <name>`. Re-running an export therefore
//! lands in the same directories, which is what makes exports
//! idempotent.

use chrono::{DateTime, Utc};

use gucker_core::domain::export::RepresentationExport;
use gucker_core::domain::newtypes::RemoteId;

/// Directory name for a stage, position, or dataset node
#[must_use]
pub fn node_dir(id: &RemoteId, name: &str) -> String {
    format!("ID({id}) {name}")
}

/// Directory name for one acquisition: the root representation's id and
/// name plus the acquisition date
///
/// Undated acquisitions (imported data) get the literal `undated` so
/// the name stays deterministic.
#[must_use]
pub fn omero_dir(
    representation: &RepresentationExport,
    acquisition_date: Option<&DateTime<Utc>>,
) -> String {
    let date = acquisition_date
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "undated".to_string());
    format!(
        "ID({}) {} {}",
        representation.id,
        representation.display_name(),
        date
    )
}

/// File name for a representation's raw pixel payload
#[must_use]
pub fn representation_file(representation: &RepresentationExport) -> String {
    format!(
        "ID({}) {}.tiff",
        representation.id,
        representation.display_name()
    )
}

/// File name for a representation's metadata dump, sibling to the
/// payload file
#[must_use]
pub fn representation_meta(representation: &RepresentationExport) -> String {
    format!(
        "ID({}) {} meta.json",
        representation.id,
        representation.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(id: &str, name: Option<&str>) -> RepresentationExport {
        RepresentationExport {
            id: RemoteId::new(id).unwrap(),
            name: name.map(str::to_string),
            store: None,
            derived: Vec::new(),
        }
    }

    #[test]
    fn test_node_dir() {
        let id = RemoteId::new("D1").unwrap();
        assert_eq!(node_dir(&id, "run 3"), "ID(D1) run 3");
    }

    #[test]
    fn test_omero_dir_with_date() {
        let date: DateTime<Utc> = "2022-11-04T09:30:00Z".parse().unwrap();
        assert_eq!(
            omero_dir(&rep("88", Some("initial")), Some(&date)),
            "ID(88) initial 2022-11-04 09:30:00"
        );
    }

    #[test]
    fn test_omero_dir_undated() {
        assert_eq!(omero_dir(&rep("88", Some("x")), None), "ID(88) x undated");
    }

    #[test]
    fn test_representation_files_share_prefix() {
        let r = rep("42", Some("masked"));
        assert_eq!(representation_file(&r), "ID(42) masked.tiff");
        assert_eq!(representation_meta(&r), "ID(42) masked meta.json");
    }

    #[test]
    fn test_nameless_representation_uses_id() {
        let r = rep("42", None);
        assert_eq!(representation_file(&r), "ID(42) 42.tiff");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let id = RemoteId::new("7").unwrap();
        assert_eq!(node_dir(&id, "stage"), node_dir(&id, "stage"));
    }
}
