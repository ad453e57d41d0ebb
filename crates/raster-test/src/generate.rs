//! Seeded fixture generators

use crate::error::{TestError, TestResult};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use raster_core::{PixelDepth, Raster};

/// Raster with every pixel drawn uniformly from `[0, max]` for its depth.
///
/// 32 bpp rasters get four random channels. The same seed always yields
/// the same raster.
pub fn random_raster(width: u32, height: u32, depth: PixelDepth, seed: u64) -> TestResult<Raster> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pm = Raster::new(width, height, depth)?.to_mut();
    let max = depth.max_value();
    for y in 0..height {
        for x in 0..width {
            let v = if depth == PixelDepth::Bit32 {
                rng.random::<u32>()
            } else {
                rng.random_range(0..=max)
            };
            pm.set_pixel_unchecked(x, y, v);
        }
    }
    Ok(pm.into())
}

/// 1 bpp raster with each pixel set with probability `density`.
pub fn random_binary(width: u32, height: u32, density: f64, seed: u64) -> TestResult<Raster> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TestError::InvalidParameter(format!(
            "density {density} not in [0, 1]"
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pm = Raster::new(width, height, PixelDepth::Bit1)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(density) {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(pm.into())
}

/// 8 bpp diagonal ramp from 0 at the top-left to 255 at the bottom-right.
pub fn gray_gradient(width: u32, height: u32) -> TestResult<Raster> {
    let mut pm = Raster::new(width, height, PixelDepth::Bit8)?.to_mut();
    let span = u64::from((width + height).saturating_sub(2).max(1));
    for y in 0..height {
        for x in 0..width {
            let v = 255 * u64::from(x + y) / span;
            pm.set_pixel_unchecked(x, y, v as u32);
        }
    }
    Ok(pm.into())
}

/// 8 bpp raster of `background` with a filled disk of `foreground`.
pub fn gray_disk(
    width: u32,
    height: u32,
    radius: f64,
    background: u8,
    foreground: u8,
) -> TestResult<Raster> {
    let mut pm = Raster::new(width, height, PixelDepth::Bit8)?.to_mut();
    pm.set_all_arbitrary(u32::from(background));
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    for y in 0..height {
        for x in 0..width {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                pm.set_pixel_unchecked(x, y, u32::from(foreground));
            }
        }
    }
    Ok(pm.into())
}
