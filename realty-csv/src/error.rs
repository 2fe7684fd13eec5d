//! All error types for the realty-csv crate.
//!
//! These are returned from every fallible operation (reading extracts, writing tables,
//! driving a conversion run).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no XML files found in `{}`", .0.display())]
    NoInputFiles(PathBuf),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value `{value}` for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the input file that was being converted when `source` occurred.
    pub fn in_file(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// The underlying error, with any file context stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::File { source, .. } => source.root(),
            other => other,
        }
    }
}
