//! Raster - bit-packed image engine
//!
//! Umbrella crate over the workspace:
//!
//! - Core containers, rasterop, band shifts and the priority heap at the
//!   top level (from `raster-core`)
//! - [`morph`]: grayscale morphology with flat linear and brick elements
//! - [`transform`]: shear and area-map rotation
//!
//! # Example
//!
//! ```
//! use raster::{PixelDepth, Raster, Rect, RopOp};
//!
//! let src = Raster::new(64, 64, PixelDepth::Bit1).unwrap();
//! let mut dst = Raster::new(64, 64, PixelDepth::Bit1).unwrap().to_mut();
//! dst.rasterop(Rect::new(8, 8, 32, 32).unwrap(), RopOp::NotSrc, &src, 0, 0)
//!     .unwrap();
//! assert_eq!(dst.get_pixel(8, 8), Some(1));
//! assert_eq!(dst.get_pixel(0, 0), Some(0));
//!
//! let pix: Raster = dst.into();
//! let rotated =
//!     raster::transform::rotate_shear_center(&pix, 0.1, raster::transform::RotateFill::White)
//!         .unwrap();
//! assert_eq!(rotated.width(), 64);
//! ```

pub use raster_core::*;

pub use raster_morph as morph;
pub use raster_transform as transform;
