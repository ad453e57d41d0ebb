//! Error types for raster-core
//!
//! Every fallible operation in the core crate reports through [`Error`].
//! Shapes and parameters are validated before any per-pixel loop runs, so an
//! error never interrupts a half-written row.

use thiserror::Error;

/// Raster engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Colormap not allowed for this depth
    #[error("colormap not allowed for depth {0} bpp")]
    ColormapNotAllowed(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Incompatible pixel depths (rasterop source and destination)
    #[error("incompatible pixel depths: {0} bpp vs {1} bpp")]
    IncompatibleDepths(u32, u32),

    /// Incompatible raster sizes
    #[error("incompatible raster sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Raster op code outside the 16 truth tables
    #[error("invalid raster op code: {0:#x}")]
    InvalidOpCode(u32),

    /// Unsupported pixel depth for this operation
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for raster operations
pub type Result<T> = std::result::Result<T, Error>;
