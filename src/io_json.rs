use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{GridError, Result};
use crate::{write_atomic, Grid};


/// JSON wrapper holding a grid under the `heights` key
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub heights: Grid,
}

impl Document {
    pub fn new(heights:Grid) -> Document {
        Document { heights }
    }

    pub fn into_grid(self) -> Grid {
        self.heights
    }
}

/// serialize the document fully in memory, then replace the file at `json_file`
pub fn write_json(doc:&Document, json_file:impl AsRef<Path>, pretty:bool) -> Result<()> {
    let path = json_file.as_ref();
    let bytes = if pretty {
        serde_json::to_vec_pretty(doc)
    } else {
        serde_json::to_vec(doc)
    }.map_err(|source| GridError::Json { path: path.to_path_buf(), source })?;
    write_atomic(path,&bytes)
}

/// load a heights document written by `write_json`
pub fn read_json(json_file:impl AsRef<Path>) -> Result<Document> {
    let path = json_file.as_ref();
    let bytes = fs::read(path).map_err(|e| GridError::io(path,e))?;
    serde_json::from_slice(&bytes).map_err(|source| GridError::Json { path: path.to_path_buf(), source })
}
