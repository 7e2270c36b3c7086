//! YAML loading for hand-written case-study content.
//!
//! Reads every `.yaml`/`.yml` file of a content directory in file-name
//! order. A file holds either one record (a mapping) or a list of records.
//! Records are kept as raw YAML here; shape classification happens in
//! [`crate::source::SourceRecord::from_yaml`].

use std::path::Path;

use serde_yml::Value;
use thiserror::Error;

use crate::collection::{BuildReport, CaseStudyCollection};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// One record as read from disk, before classification.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// `file.yaml` for single-record files, `file.yaml#2` for list entries.
    pub origin: String,
    pub value: Value,
}

/// Load all raw records from a content directory.
///
/// A missing directory yields no records.
pub fn load_records(dir: &Path) -> Result<Vec<RawRecord>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::NotADirectory(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        records.extend(parse_records(&name, &contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?);
    }

    log::debug!("Loaded {} raw records from {}", records.len(), dir.display());
    Ok(records)
}

/// Split one YAML document into raw records.
pub fn parse_records(origin: &str, contents: &str) -> Result<Vec<RawRecord>, serde_yml::Error> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_yml::from_str(contents)?;
    Ok(match value {
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, value)| RawRecord {
                origin: format!("{origin}#{}", i + 1),
                value,
            })
            .collect(),
        Value::Null => Vec::new(),
        value => vec![RawRecord {
            origin: origin.to_string(),
            value,
        }],
    })
}

/// Load a content directory and build the collection from it.
pub fn load_collection(dir: &Path, featured_count: usize) -> Result<BuildReport, YamlError> {
    let raw = load_records(dir)?;
    Ok(CaseStudyCollection::from_raw(raw, featured_count))
}
