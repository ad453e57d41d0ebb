//! Rectangle regions
//!
//! A [`Rect`] may extend past the raster it addresses, or have a negative
//! origin. Every operation clips it to the raster bounds first; a rectangle
//! that clips to nothing turns the operation into a no-op.

use crate::error::{Error, Result};

/// A rectangle region
///
/// Small `Copy` type; coordinates are signed so that partially off-image
/// rectangles can be expressed and clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole `width` x `height` raster
    pub fn full(width: u32, height: u32) -> Self {
        Self::new_unchecked(0, 0, width as i32, height as i32)
    }

    /// Right x coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom y coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Check if the rectangle has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Clip to `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing is left.
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(width));
        let y1 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        // Bounded by the raster size, which fits in i32
        Some(Rect::new_unchecked(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as i32,
            (y1 - y0) as i32,
        ))
    }
}
