//! Local dataset and notes providers
//!
//! Read a sheet export (JSON) and a meeting-notes text file from disk.
//! Failures carry the offending path and are shown to the user verbatim.

use std::io;
use std::path::{Path, PathBuf};

use onepager_core::Dataset;
use thiserror::Error;

/// Failure loading an input file
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Could not read {}: {reason}", .path.display())]
    Read {
        path: PathBuf,
        reason: io::Error,
    },

    #[error("{} is not a valid sheet export: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        reason: serde_json::Error,
    },
}

/// Load a dataset from a sheet-export JSON file
pub fn load_dataset(path: &Path) -> Result<Dataset, SourceError> {
    let text = read(path)?;
    let dataset: Dataset = serde_json::from_str(&text).map_err(|reason| SourceError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::info!(sheet = %dataset.name, rows = dataset.rows.len(), "loaded dataset");
    Ok(dataset)
}

/// Load meeting notes. Any line ending style is accepted.
pub fn load_notes(path: &Path) -> Result<String, SourceError> {
    let notes = read(path)?;
    tracing::info!(path = %path.display(), bytes = notes.len(), "loaded notes");
    Ok(notes)
}

fn read(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|reason| SourceError::Read {
        path: path.to_path_buf(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_sheet_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.json");
        fs::write(
            &path,
            r#"{"name": "Ops", "columns": [{"id": 1, "title": "Task Name"}], "rows": [{"id": 5, "cells": []}]}"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.name, "Ops");
        assert_eq!(dataset.rows.len(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("absent.json"), "{}", err);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"name\": ").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().contains("is not a valid sheet export"));
    }

    #[test]
    fn notes_keep_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "- a\r\n- b\r\n").unwrap();
        assert_eq!(load_notes(&path).unwrap(), "- a\r\n- b\r\n");
    }
}
