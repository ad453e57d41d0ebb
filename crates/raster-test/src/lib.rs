//! raster-test - Regression test support for the raster workspace
//!
//! - [`RegParams`]: counted checks that collect every failure and report
//!   them together, so one regression test can cover many cases
//! - Fixture generators: seeded random rasters and simple synthetic
//!   images, reproducible across runs
//!
//! # Usage
//!
//! ```
//! use raster_core::PixelDepth;
//! use raster_test::{RegParams, random_raster};
//!
//! let pix = random_raster(40, 30, PixelDepth::Bit8, 7).unwrap();
//! let mut rp = RegParams::new("usage");
//! rp.compare_pix(&pix, &pix.deep_clone());
//! assert!(rp.cleanup());
//! ```

mod error;
mod generate;
mod params;

pub use error::{TestError, TestResult};
pub use generate::{gray_disk, gray_gradient, random_binary, random_raster};
pub use params::RegParams;
