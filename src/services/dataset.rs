use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

use crate::models::{School, SchoolId, SchoolRecord};

/// Errors that can occur while loading the school dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset must be a JSON object keyed by school id")]
    NotAnObject,

    #[error("Malformed school record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
}

/// Immutable snapshot of every school, ordered by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchoolDataset {
    schools: BTreeMap<SchoolId, School>,
}

/// A parsed dataset plus the records that were skipped
#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: SchoolDataset,
    pub skipped: Vec<DatasetError>,
}

impl SchoolDataset {
    /// Build a dataset from already-validated schools.
    ///
    /// A later school with the same id replaces an earlier one.
    pub fn from_schools<I>(schools: I) -> Self
    where
        I: IntoIterator<Item = School>,
    {
        Self {
            schools: schools.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    /// Parse a dataset document, skipping malformed records
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        parse_dataset(json).map(|loaded| loaded.dataset)
    }

    /// Read and parse a dataset file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} schools from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn get(&self, id: SchoolId) -> Option<&School> {
        self.schools.get(&id)
    }

    pub fn contains(&self, id: SchoolId) -> bool {
        self.schools.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    /// Schools in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &School> {
        self.schools.values()
    }
}

impl<'a> IntoIterator for &'a SchoolDataset {
    type Item = &'a School;
    type IntoIter = std::collections::btree_map::Values<'a, SchoolId, School>;

    fn into_iter(self) -> Self::IntoIter {
        self.schools.values()
    }
}

/// Parse a dataset document.
///
/// Each record is decoded and validated on its own; a bad record is logged
/// and reported in `skipped` without affecting the others. Only a document
/// that is not a JSON object fails as a whole.
pub fn parse_dataset(json: &str) -> Result<LoadedDataset, DatasetError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(entries) = document else {
        return Err(DatasetError::NotAnObject);
    };

    let mut schools = BTreeMap::new();
    let mut skipped = Vec::new();

    for (key, value) in entries {
        match parse_record(&key, value) {
            Ok(school) => {
                schools.insert(school.id, school);
            }
            Err(e) => skipped.push(e),
        }
    }

    for e in &skipped {
        tracing::warn!("Skipping school record: {}", e);
    }
    tracing::debug!("Parsed {} schools, skipped {}", schools.len(), skipped.len());

    Ok(LoadedDataset {
        dataset: SchoolDataset { schools },
        skipped,
    })
}

fn parse_record(key: &str, value: serde_json::Value) -> Result<School, DatasetError> {
    let id: SchoolId = key
        .parse()
        .map_err(|e| malformed(key, format!("id is not an integer: {}", e)))?;
    // "01" and "1" would otherwise collide; only the plain form is an id
    if id.to_string() != key {
        return Err(malformed(key, format!("id is not in canonical form, expected {:?}", id.to_string())));
    }

    let record: SchoolRecord =
        serde_json::from_value(value).map_err(|e| malformed(key, e.to_string()))?;

    record
        .validate()
        .map_err(|e| malformed(key, e.to_string()))?;

    Ok(record.into_school(id))
}

fn malformed(id: &str, reason: String) -> DatasetError {
    DatasetError::MalformedRecord {
        id: id.to_string(),
        reason,
    }
}
