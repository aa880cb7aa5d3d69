/*
    Minimal library for converting terrain height grids between a space-delimited
    text layout and a JSON document of the form {"heights": [[...], ...]}
    Rows are stored in input order, values within a row in token order
 */
pub mod error;
pub mod io_txt;
pub mod io_json;
pub mod convert;

pub use error::{GridError, Result};
pub use io_json::Document;
pub use convert::GridConverter;

use std::fs;
use std::io::Write;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;


/// An ordered sequence of rows of heights. Rows are expected to share a length
/// but this is not enforced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<f64>>,
}

impl Grid {

    pub fn new() -> Grid {
        Grid { rows: vec![] }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Grid {
        Grid { rows }
    }

    /// number of rows (terrain height)
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// length of the first row (terrain width), 0 for an empty grid
    pub fn n_cols(&self) -> usize {
        self.rows.first().map_or(0,|r| r.len())
    }

    pub fn numel(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_rectangular(&self) -> bool {
        let n_cols = self.n_cols();
        self.rows.iter().all(|r| r.len() == n_cols)
    }

    /// (rows, cols) for rectangular grids, None when rows differ in length
    pub fn shape(&self) -> Option<(usize,usize)> {
        self.is_rectangular().then(|| (self.n_rows(),self.n_cols()))
    }

    #[inline]
    pub fn get(&self, row:usize, col:usize) -> Option<f64> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|r| r.as_slice())
    }

}

/// write bytes to a temporary file next to `path` and move it into place, so a failed
/// write never leaves a truncated file behind
pub(crate) fn write_atomic(path:&Path, bytes:&[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_for(dir,path).map_err(|e| GridError::io(dir,e))?;
    tmp.write_all(bytes).map_err(|e| GridError::io(tmp.path(),e))?;
    tmp.flush().map_err(|e| GridError::io(tmp.path(),e))?;
    tmp.persist(path).map_err(|e| GridError::io(path,e.error))?;
    Ok(())
}

/// temp file whose mode matches what the target has, or would get from a plain create
fn temp_file_for(dir:&Path, target:&Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // masked by the umask on open
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}
