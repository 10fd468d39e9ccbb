use thiserror::Error;

/// Failures of the layer wrapped around the numeric core.
///
/// The core itself never returns these: numeric anomalies (division by a
/// zero distance, evanescent frequencies) propagate as `inf`/`NaN` values.
#[derive(Error, Debug)]
pub enum ReconstructionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode hologram: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid hologram dimensions: rows={0}, cols={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid acquisition geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconstructionError>;
