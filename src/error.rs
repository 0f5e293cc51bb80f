use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading measurement data or preparing a figure
#[derive(Error, Debug)]
pub enum FigureError {
    /// The logfile (or an output file) could not be read or written
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `logfile.json` is not valid JSON
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An expected top-level section is absent from the logfile
    #[error("Missing section `{key}` in logfile")]
    MissingSection { key: &'static str },

    /// A section is present but does not have the expected shape
    #[error("Section `{key}` has an unexpected shape: {source}")]
    Section {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The figure has no embedded dataset and needs an archive
    #[error("Figure `{figure}` requires an archive path")]
    ArchiveRequired { figure: &'static str },

    /// Tool data lacks the numbers a figure needs
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Drawing the figure failed
    #[error("Render error: {0}")]
    Render(String),

    /// The system image viewer could not be launched
    #[error("Could not open viewer for {path}: {source}")]
    Viewer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FigureError>;
