//! Raster Core - bit-packed raster buffers and block transfer
//!
//! This crate provides the foundation the morphology and rotation crates
//! build on:
//!
//! - [`Raster`] / [`RasterMut`] - The bit-packed image container (shared / exclusive)
//! - [`RopOp`] - The 16 boolean rasterop truth tables, with clipped
//!   rectangle transfer on [`RasterMut::rasterop`]
//! - In-place band shifts ([`RasterMut::shift_band_vertical`],
//!   [`RasterMut::shift_band_horizontal`]) and whole-image translation
//! - [`Rect`] - Rectangle regions, clipped to the target raster
//! - [`Colormap`] - Palette metadata carried by indexed rasters
//! - [`Heap`] - Binary-heap priority queue with a float key extractor
//!
//! # Pixel format
//!
//! Rows are arrays of 32-bit words, pixels packed MSB first, each row
//! padded to a whole word. 32-bit pixels are `0xRRGGBBAA`.

pub mod colormap;
pub mod error;
pub mod heap;
pub mod pix;
pub mod rect;

pub use colormap::{Colormap, RgbaQuad};
pub use error::{Error, Result};
pub use heap::{Heap, PushError, SortOrder};
pub use pix::{
    CompareResult, InColor, PixelDepth, Raster, RasterMut, RopOp, compose_rgba, extract_rgba,
};
pub use rect::Rect;
