//! Error types for the test support crate

use thiserror::Error;

/// Errors raised while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Raster construction or access failed
    #[error("raster error: {0}")]
    Raster(#[from] raster_core::Error),

    /// Fixture parameters out of range
    #[error("invalid fixture parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for test fixture operations
pub type TestResult<T> = Result<T, TestError>;
