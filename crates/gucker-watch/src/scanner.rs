//! Directory scanning with pattern filter and stability probe
//!
//! One scan lists the watch directory, keeps regular files whose name
//! matches the session pattern and is not in the exclusion set, and
//! probes each survivor for stability before yielding it.
//!
//! ## Ordering
//!
//! Results come back in filesystem enumeration order. That order is
//! not deterministic and callers must not rely on it; the poll loop
//! only guarantees that uploads within one cycle follow whatever order
//! the scan produced.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use gucker_core::domain::errors::WatchError;

/// A compiled watch pattern with start-anchored match semantics
///
/// The GUI this engine grew out of matched file names with Python's
/// `re.match`: anchored at the start of the name, but not required to
/// consume it entirely unless the pattern itself anchors the end.
/// Existing user patterns depend on that looseness, so the pattern is
/// compiled with an implicit `\A` prefix and nothing appended.
#[derive(Debug, Clone)]
pub struct WatchPattern {
    regex: Regex,
}

impl WatchPattern {
    /// Compiles a pattern, preserving start-anchored semantics
    pub fn new(pattern: &str) -> Result<Self, WatchError> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))
            .map_err(|e| WatchError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    /// Returns true if the name matches at its start
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Scans `directory` for new, stable, matching files
///
/// Keeps only regular files, applies the pattern filter and the
/// exclusion set, then runs the stability probe. Files that fail the
/// probe are skipped for this cycle and picked up by a later one.
///
/// # Errors
/// Returns [`WatchError::Io`] when the directory itself cannot be
/// listed. Per-file errors never abort the scan.
pub fn scan(
    directory: &Path,
    pattern: Option<&WatchPattern>,
    excluded: &HashSet<String>,
) -> Result<Vec<String>, WatchError> {
    scan_with_probe(directory, pattern, excluded, is_stable)
}

/// [`scan`] with the stability probe injected
///
/// The real probe cannot be made to fail on demand (Linux rename-to-self
/// always succeeds), so the skip path is only reachable through here.
fn scan_with_probe(
    directory: &Path,
    pattern: Option<&WatchPattern>,
    excluded: &HashSet<String>,
    probe: impl Fn(&Path) -> bool,
) -> Result<Vec<String>, WatchError> {
    let mut names = Vec::new();

    for entry in fs::read_dir(directory)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "Skipping unreadable directory entry");
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                warn!(path = %entry.path().display(), %err, "Skipping entry without file type");
                continue;
            }
        };
        if !file_type.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };

        if let Some(pattern) = pattern {
            if !pattern.matches(&name) {
                continue;
            }
        }

        if excluded.contains(&name) {
            continue;
        }

        if !probe(&entry.path()) {
            debug!(name, "File still being written, retrying next cycle");
            continue;
        }

        names.push(name);
    }

    Ok(names)
}

/// Best-effort probe for a file still being written
///
/// Renames the file to itself; acquisition software holding the file
/// open (on platforms with mandatory locks) makes this fail. The probe
/// is race-prone and only a heuristic, never a guarantee.
fn is_stable(path: &Path) -> bool {
    fs::rename(path, path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        writeln!(file, "data").unwrap();
    }

    #[test]
    fn test_scan_returns_matching_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sample_s1_t0.TIF");
        touch(dir.path(), "sample_s1_t1.TIF");
        touch(dir.path(), "notes.txt");
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let pattern = WatchPattern::new(r".*_s(?P<s>[0-9]*)_t(?P<t>[0-9]*)\.TIF").unwrap();
        let mut names = scan(dir.path(), Some(&pattern), &HashSet::new()).unwrap();
        names.sort();

        assert_eq!(names, vec!["sample_s1_t0.TIF", "sample_s1_t1.TIF"]);
    }

    #[test]
    fn test_scan_without_pattern_keeps_all_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.czi");
        touch(dir.path(), "b.tif");

        let mut names = scan(dir.path(), None, &HashSet::new()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.czi", "b.tif"]);
    }

    #[test]
    fn test_scan_excludes_already_seen_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sample_s1_t0.TIF");
        touch(dir.path(), "sample_s1_t1.TIF");
        touch(dir.path(), "sample_s1_t2.TIF");

        let excluded: HashSet<String> = ["sample_s1_t0.TIF", "sample_s1_t1.TIF"]
            .into_iter()
            .map(str::to_string)
            .collect();

        let names = scan(dir.path(), None, &excluded).unwrap();
        assert_eq!(names, vec!["sample_s1_t2.TIF"]);
    }

    #[test]
    fn test_scan_has_no_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "one.TIF");
        touch(dir.path(), "two.TIF");

        let names = scan(dir.path(), None, &HashSet::new()).unwrap();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_unstable_file_is_skipped_until_probe_passes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "writing.TIF");
        touch(dir.path(), "done.TIF");

        // First cycle: the file still being written fails the probe and
        // is held back without failing the scan.
        let names = scan_with_probe(dir.path(), None, &HashSet::new(), |path| {
            path.file_name().unwrap() != "writing.TIF"
        })
        .unwrap();
        assert_eq!(names, vec!["done.TIF"]);

        // A later cycle where the probe passes picks it up.
        let mut names =
            scan_with_probe(dir.path(), None, &HashSet::new(), |_| true).unwrap();
        names.sort();
        assert_eq!(names, vec!["done.TIF", "writing.TIF"]);
    }

    #[test]
    fn test_scan_missing_directory_is_fatal() {
        let result = scan(Path::new("/nonexistent/gucker-watch"), None, &HashSet::new());
        assert!(matches!(result, Err(WatchError::Io(_))));
    }

    #[test]
    fn test_pattern_anchored_at_start_only() {
        // `re.match` semantics: must match from the first character,
        // need not consume the whole name.
        let pattern = WatchPattern::new(r"sample").unwrap();
        assert!(pattern.matches("sample_s1_t0.TIF"));
        assert!(!pattern.matches("resample_s1_t0.TIF"));
    }

    #[test]
    fn test_pattern_can_anchor_end_itself() {
        let pattern = WatchPattern::new(r".*\.TIF$").unwrap();
        assert!(pattern.matches("a.TIF"));
        assert!(!pattern.matches("a.TIF.partial"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(matches!(
            WatchPattern::new("("),
            Err(WatchError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_metamorph_default_pattern_matches() {
        // The acquisition naming scheme the GUI shipped as its default.
        let pattern = WatchPattern::new(
            r"(?P<magnification>[^x]*)x(?P<sample>[^_]*)__w(?P<channel_index>[0-9]*)(?P<channel_name>[^-]*)-(?P<wavelength>[^_]*)_s(?P<sample_index>[0-9]*)_t(?P<time_index>[0-9]*)\.TIF",
        )
        .unwrap();
        assert!(pattern.matches("63xNIH3T3__w1DAPI-405_s1_t0.TIF"));
        assert!(!pattern.matches("random.TIF"));
    }
}
