//! Reading load-test reports from disk.

use crate::error::LoadError;
use std::path::Path;

/// Read and parse a JSON report.
pub fn load_report(path: &Path) -> Result<serde_json::Value, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "loaded report");

    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("baseline_report.json");

        let err = load_report(&path).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        let msg = err.to_string();
        assert!(msg.contains("baseline_report.json"), "{msg}");
        assert!(msg.contains("both PR and Baseline"), "{msg}");
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artillery_report.json");
        fs::write(&path, "{ \"aggregate\": ").unwrap();

        let err = load_report(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("artillery_report.json"));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_report(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[test]
    fn test_valid_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{"aggregate": {"summaries": {}}}"#).unwrap();

        let doc = load_report(&path).unwrap();
        assert!(doc["aggregate"]["summaries"].is_object());
    }
}
