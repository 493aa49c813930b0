use crate::refs::RefType;
use crate::Weight;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling or serialising a PDF document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("no PDF object was generated for {0:?}")]
    /// A page or font referred to an object that was never written
    MissingReference(RefType),
}

/// Errors surfaced by the label renderer and its font sources
#[derive(Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    Pdf(#[from] PDFError),

    #[error("{weight} font is unavailable: {reason}")]
    /// A font source could not supply bytes for a weight
    FontUnavailable { weight: Weight, reason: String },

    #[error("failed to read font file {path}")]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save label to {path}")]
    /// Both the preferred and the fallback location refused the artifact
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while handing a rendered label to the system printer
#[derive(Error, Debug)]
pub enum PrintError {
    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("no print or viewer command is known for {0}")]
    UnsupportedPlatform(String),

    #[error("no print command configured")]
    NoCommands,
}
