use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::{GridError, Result};
use crate::io_json::{write_json, Document};
use crate::io_txt::read_txt;

const TXT_EXT: &str = "txt";
const JSON_EXT: &str = "json";


/// Converts a space-delimited text grid into a heights document on disk
#[derive(Clone, Debug)]
pub struct GridConverter {
    input: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
}

impl GridConverter {

    pub fn new(input:impl Into<PathBuf>) -> GridConverter {
        GridConverter {
            input: input.into(),
            output: None,
            pretty: false,
        }
    }

    /// explicit output path. Without one it is derived from a `.txt` input
    pub fn with_output(mut self, output:impl Into<PathBuf>) -> GridConverter {
        self.output = Some(output.into());
        self
    }

    /// indent the written json
    pub fn with_pretty(mut self, pretty:bool) -> GridConverter {
        self.pretty = pretty;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// the path `run` will write to
    pub fn output_path(&self) -> Result<PathBuf> {
        let output = match &self.output {
            Some(output) => output.clone(),
            None => derive_output_path(&self.input)?,
        };
        if same_file(&output,&self.input) {
            return Err(GridError::OutputPath(format!(
                "output {} is the same file as the input",
                output.display()
            )));
        }
        Ok(output)
    }

    /// read, convert and write. Nothing is written unless the whole input parses
    pub fn run(&self) -> Result<Document> {
        let output = self.output_path()?;
        let doc = convert(&self.input)?;
        write(&doc,&output,self.pretty)?;
        Ok(doc)
    }

}

/// read a text grid into a heights document
pub fn convert(txt_file:impl AsRef<Path>) -> Result<Document> {
    let path = txt_file.as_ref();
    debug!(input = %path.display(), "reading text grid");
    let grid = read_txt(path)?;
    match grid.shape() {
        Some((rows,cols)) => info!(input = %path.display(), rows, cols, "parsed height grid"),
        None => info!(input = %path.display(), rows = grid.n_rows(), values = grid.numel(), "parsed ragged height grid"),
    }
    Ok(Document::new(grid))
}

/// write the document as json, replacing any existing file
pub fn write(doc:&Document, json_file:impl AsRef<Path>, pretty:bool) -> Result<()> {
    let path = json_file.as_ref();
    write_json(doc,path,pretty)?;
    info!(output = %path.display(), "wrote heights document");
    Ok(())
}

/// literal match, or both exist and resolve to the same file
fn same_file(a:&Path, b:&Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a),fs::canonicalize(b)) {
        (Ok(a),Ok(b)) => a == b,
        _ => false,
    }
}

/// swap a trailing `.txt` extension for `.json`
pub fn derive_output_path(txt_file:impl AsRef<Path>) -> Result<PathBuf> {
    let path = txt_file.as_ref();
    match path.extension() {
        Some(ext) if ext == TXT_EXT => Ok(path.with_extension(JSON_EXT)),
        _ => Err(GridError::OutputPath(format!(
            "cannot derive an output path from {}, expected a .{} extension. Pass the output path explicitly",
            path.display(),
            TXT_EXT
        ))),
    }
}
