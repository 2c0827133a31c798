use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TyphoonError {
    #[error("Invalid window {chrom}:{start}-{end}: {reason}")]
    InvalidWindow {
        chrom: String,
        start: i64,
        end: i64,
        reason: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input file not found: {0:?}")]
    MissingInputFile(PathBuf),

    #[error("Template length {template_length} is outside of the fragment range 0..={max_len}")]
    RecordOutOfRange { template_length: i64, max_len: usize },

    #[error("Can't read gene annotation file {path:?}: {reason}")]
    AnnotationFileError { path: PathBuf, reason: String },

    #[error("Alignment query failed: {0}")]
    AlignmentQuery(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Can't parse configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TyphoonError>;
