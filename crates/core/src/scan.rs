use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::SortError;
use crate::model::{Entry, SKIP_PREFIX};

/// Lists the immediate entries of `directory`, dropping navigation entries
/// and `skip.` names. Any listing failure is fatal.
pub fn scan_directory(directory: &Path) -> Result<Vec<Entry>, SortError> {
    let directory_error = |source| SortError::Directory {
        path: directory.to_path_buf(),
        source,
    };

    let listing = fs::read_dir(directory).map_err(directory_error)?;
    let mut entries = Vec::new();
    let mut filtered = 0_usize;

    for item in listing {
        let item = item.map_err(directory_error)?;
        let name = item.file_name();
        if !is_candidate(&name) {
            filtered += 1;
            continue;
        }
        entries.push(Entry::new(name));
    }

    debug!(
        "scanned {}: {} candidate(s), {} filtered",
        directory.display(),
        entries.len(),
        filtered
    );
    Ok(entries)
}

pub fn is_candidate(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    !(bytes.is_empty() || bytes == b"." || bytes == b".." || bytes.starts_with(SKIP_PREFIX))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::ffi::OsStr;
    use std::fs;

    use tempfile::TempDir;

    use super::{is_candidate, scan_directory};
    use crate::error::SortError;

    #[test]
    fn filters_navigation_and_skip_entries() {
        assert!(!is_candidate(OsStr::new(".")));
        assert!(!is_candidate(OsStr::new("..")));
        assert!(!is_candidate(OsStr::new("skip.slow-plugin")));
        assert!(is_candidate(OsStr::new("Skip.case-matters")));
        assert!(is_candidate(OsStr::new("skipper")));
        assert!(is_candidate(OsStr::new(".hidden")));
    }

    #[test]
    fn scans_flat_directory_without_skip_files() {
        let temp = TempDir::new().expect("tempdir");
        for name in ["ordered.01.first", "fn.a", "skip.disabled", "ordered.52.last"] {
            fs::write(temp.path().join(name), b"").expect("write");
        }
        fs::create_dir(temp.path().join("completions")).expect("mkdir");
        fs::write(temp.path().join("completions").join("nested.zsh"), b"").expect("write");

        let names = scan_directory(temp.path())
            .expect("scan")
            .iter()
            .map(|entry| entry.name().to_string_lossy().to_string())
            .collect::<BTreeSet<_>>();

        let expected = ["completions", "fn.a", "ordered.01.first", "ordered.52.last"]
            .iter()
            .map(|name| name.to_string())
            .collect::<BTreeSet<_>>();
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_directory_is_a_directory_error() {
        let temp = TempDir::new().expect("tempdir");
        let err = scan_directory(&temp.path().join("absent")).expect_err("missing dir");
        assert!(matches!(err, SortError::Directory { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let temp = TempDir::new().expect("tempdir");
        let file = temp.path().join("plain.sh");
        fs::write(&file, b"echo hi").expect("write");
        assert!(matches!(
            scan_directory(&file),
            Err(SortError::Directory { .. })
        ));
    }
}
