//! raster-morph - Grayscale morphology for 8-bpp rasters
//!
//! This crate provides:
//!
//! - Linear (1-D) dilation and erosion with a flat element of any odd length
//! - Brick (2-D) dilation, erosion, opening and closing
//! - Morphological gradient, top-hat and bottom-hat transforms
//! - Explicit [`BoundaryCondition`] selection per call
//!
//! All operations run in time independent of the element size.

mod error;
mod gray_low;
pub mod grayscale;

pub use error::{MorphError, MorphResult};

pub use grayscale::{
    BoundaryCondition, Direction, LinearSel, bottom_hat_gray, close_gray,
    close_gray_with_boundary, dilate_1d, dilate_1d_with_boundary, dilate_gray,
    dilate_gray_with_boundary, erode_1d, erode_1d_with_boundary, erode_gray,
    erode_gray_with_boundary, gradient_gray, open_gray, open_gray_with_boundary, top_hat_gray,
};
