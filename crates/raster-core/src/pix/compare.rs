//! Image comparison
//!
//! - Pixel equality (pad bits ignored)
//! - Difference statistics over the whole image or a rectangle
//! - Pixel sums
//!
//! For 32 bpp rasters the per-pixel difference is the largest difference
//! over the color channels (alpha included only when spp is 4).

use super::{PixelDepth, Raster};
use crate::error::{Error, Result};
use crate::pix::access::extract_rgba;
use crate::rect::Rect;

/// Result of comparing two rasters
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    /// Whether every compared pixel is equal
    pub equal: bool,
    /// Number of differing pixels
    pub n_diff: u64,
    /// Fraction of compared pixels that differ
    pub fract_diff: f64,
    /// Largest pixel difference
    pub max_diff: u32,
    /// Mean absolute difference
    pub mean_abs_diff: f64,
    /// RMS difference
    pub rms_diff: f64,
}

impl Raster {
    /// Check if two rasters are equal in size, depth, colormap and pixels.
    pub fn equals(&self, other: &Raster) -> bool {
        if !self.sizes_equal(other) || self.colormap() != other.colormap() {
            return false;
        }
        let d = self.depth().bits();
        let full = (self.width() * d / 32) as usize;
        let rem = (self.width() * d) & 31;
        let mask = super::rop_low::lmask(rem);
        (0..self.height()).all(|y| {
            let (a, b) = (self.row_data(y), other.row_data(y));
            a[..full] == b[..full] && (rem == 0 || (a[full] ^ b[full]) & mask == 0)
        })
    }

    /// Compare all pixels of two rasters of equal size and depth.
    ///
    /// # Errors
    ///
    /// Returns error if sizes or depths differ.
    pub fn compare(&self, other: &Raster) -> Result<CompareResult> {
        self.compare_in_rect(other, Rect::full(self.width(), self.height()))
    }

    /// Compare the pixels of two rasters inside `rect`.
    ///
    /// The rect is clipped to the image; an empty clip compares equal.
    ///
    /// # Errors
    ///
    /// Returns error if sizes or depths differ.
    pub fn compare_in_rect(&self, other: &Raster, rect: Rect) -> Result<CompareResult> {
        if self.depth() != other.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                other.depth().bits(),
            ));
        }
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        let mut sum = 0f64;
        let mut sum_sq = 0f64;
        let mut count = 0u64;
        if let Some(r) = rect.clip(self.width(), self.height()) {
            let rgba = self.depth() == PixelDepth::Bit32;
            let channels = if self.spp() == 4 { 4 } else { 3 };
            for y in r.y as u32..r.bottom() as u32 {
                for x in r.x as u32..r.right() as u32 {
                    let a = self.get_pixel_unchecked(x, y);
                    let b = other.get_pixel_unchecked(x, y);
                    let diff = if rgba {
                        channel_diff(a, b, channels)
                    } else {
                        a.abs_diff(b)
                    };
                    if diff > 0 {
                        n_diff += 1;
                        max_diff = max_diff.max(diff);
                    }
                    let df = f64::from(diff);
                    sum += df;
                    sum_sq += df * df;
                    count += 1;
                }
            }
        }

        let n = count.max(1) as f64;
        Ok(CompareResult {
            equal: n_diff == 0,
            n_diff,
            fract_diff: n_diff as f64 / n,
            max_diff,
            mean_abs_diff: sum / n,
            rms_diff: (sum_sq / n).sqrt(),
        })
    }

    /// Sum of all pixel values; for 32 bpp the sum of the RGB channels.
    pub fn pixel_sum(&self) -> u64 {
        let rgba = self.depth() == PixelDepth::Bit32;
        let mut total = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = self.get_pixel_unchecked(x, y);
                total += if rgba {
                    let (r, g, b, _) = extract_rgba(v);
                    u64::from(r) + u64::from(g) + u64::from(b)
                } else {
                    u64::from(v)
                };
            }
        }
        total
    }
}

fn channel_diff(a: u32, b: u32, channels: usize) -> u32 {
    let a = a.to_be_bytes();
    let b = b.to_be_bytes();
    a.iter()
        .zip(&b)
        .take(channels)
        .map(|(&p, &q)| u32::from(p.abs_diff(q)))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_ignores_pad_bits() {
        let a = Raster::new(20, 3, PixelDepth::Bit1).unwrap();
        let mut bm = a.to_mut();
        bm.data_mut()[0] = 0x0000_0fff;
        let b: Raster = bm.into();
        assert!(a.equals(&b));
        let mut cm = b.to_mut();
        cm.set_pixel(19, 0, 1).unwrap();
        assert!(!a.equals(&cm.into()));
    }

    #[test]
    fn test_compare_stats() {
        let a = Raster::new(4, 1, PixelDepth::Bit8).unwrap();
        let mut bm = a.to_mut();
        bm.set_pixel(0, 0, 4).unwrap();
        bm.set_pixel(3, 0, 2).unwrap();
        let b: Raster = bm.into();
        let c = a.compare(&b).unwrap();
        assert!(!c.equal);
        assert_eq!(c.n_diff, 2);
        assert_eq!(c.max_diff, 4);
        assert!((c.mean_abs_diff - 1.5).abs() < 1e-12);
        assert!((c.fract_diff - 0.5).abs() < 1e-12);

        let inner = a
            .compare_in_rect(&b, Rect::new_unchecked(1, 0, 2, 1))
            .unwrap();
        assert!(inner.equal);
    }

    #[test]
    fn test_compare_rgb_channels() {
        let a = Raster::new(1, 1, PixelDepth::Bit32).unwrap();
        let mut bm = a.to_mut();
        bm.set_rgb(0, 0, 3, 9, 1).unwrap();
        let b: Raster = bm.into();
        assert_eq!(a.compare(&b).unwrap().max_diff, 9);
        assert_eq!(b.pixel_sum(), 13);
    }

    #[test]
    fn test_compare_mismatch() {
        let a = Raster::new(4, 4, PixelDepth::Bit8).unwrap();
        let b = Raster::new(4, 4, PixelDepth::Bit16).unwrap();
        assert!(a.compare(&b).is_err());
    }
}
