use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LabelError, Result};

/// One object of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Size")]
    pub size: u64,
}

/// Bucket listing in the shape of a `list-objects-v2` response.
///
/// Only `Contents[].Key` and `Contents[].Size` are read; a listing without
/// `Contents` (an empty bucket) parses as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectListing {
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ObjectEntry>,
}

impl ObjectListing {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| LabelError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Keys of objects strictly larger than `min_size` bytes.
    ///
    /// Thumbnails and failed uploads fall under the threshold.
    pub fn keys_larger_than(&self, min_size: u64) -> Vec<String> {
        self.contents
            .iter()
            .filter(|entry| entry.size > min_size)
            .map(|entry| entry.key.clone())
            .collect()
    }
}
