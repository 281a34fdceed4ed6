use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;

/// Attribute name to value, for one patient.
pub type AttributeProfile = BTreeMap<String, String>;

/// Patient key (`site-participant`) to the attributes gathered for it.
pub type PatientProfiles = BTreeMap<String, AttributeProfile>;

/// Counters reported alongside a source's metadata.
#[derive(Clone, Default, Serialize, Debug, PartialEq, Eq)]
pub struct IngestCounts {
    pub rows: usize,
    pub skipped_no_barcode: usize,
    pub skipped_malformed: usize,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Usage: {program} <input_features_file>")]
    Usage { program: String },

    #[error("cannot access {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SelectionError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SelectionError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SelectionError::FileAccess { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub trait Source {
    fn get_metadata(&self) -> BTreeMap<String, String>;
    fn parse(&mut self, reader: &mut dyn BufRead) -> std::io::Result<()>;
}
