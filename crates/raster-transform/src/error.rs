//! Error types for raster-transform

use thiserror::Error;

/// Errors that can occur during rotation and shear
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] raster_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: {0}")]
    UnsupportedDepth(String),

    /// The operation cannot handle a colormapped raster
    #[error("colormapped raster not supported: {0}")]
    ColormapNotSupported(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
