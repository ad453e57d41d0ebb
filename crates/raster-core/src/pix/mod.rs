//! Raster - the bit-packed image container
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary and occupies exactly `wpl` words
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit rasters, color order is RGBA (red in MSB)
//!
//! A pixel at column `x` of a `d`-bit raster lives at bit `x * d` of its
//! row, i.e. in word `(x * d) >> 5` at bit offset `(x * d) & 31` counted
//! from the MSB. All word-level code in this crate addresses pixels that way.
//!
//! # Ownership model
//!
//! `Raster` wraps its data in an `Arc`; cloning a `Raster` produces an
//! aliasing view, never a second owner. Mutation goes through the unique
//! [`RasterMut`], obtained with [`Raster::try_into_mut`] (fails while other
//! views exist) or [`Raster::to_mut`] (copies). Convert back with `Into`.

mod access;
mod border;
pub mod compare;
pub mod rop;
mod rop_low;
mod shift;

pub use access::*;
pub use compare::CompareResult;
pub use rop::{InColor, RopOp};

use crate::colormap::Colormap;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary raster
    Bit1 = 1,
    /// 2-bit raster (4 levels)
    Bit2 = 2,
    /// 4-bit raster (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale or indexed color
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Check if a colormap is allowed for this depth.
    pub fn colormap_allowed(self) -> bool {
        matches!(
            self,
            PixelDepth::Bit1 | PixelDepth::Bit2 | PixelDepth::Bit4 | PixelDepth::Bit8
        )
    }

    /// Get the maximum pixel value representable at this depth.
    #[inline]
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal raster data
#[derive(Debug, Clone)]
struct RasterData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    colormap: Option<Colormap>,
    data: Vec<u32>,
}

impl RasterData {
    fn with_shape(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width, depth).ok_or(Error::InvalidDimension { width, height })?;
        let size = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(size, 0u32);

        Ok(RasterData {
            width,
            height,
            depth,
            spp: if depth == PixelDepth::Bit32 { 3 } else { 1 },
            wpl,
            colormap: None,
            data,
        })
    }
}

/// Words per line for a row of `width` pixels at `depth`, or `None` when
/// the row would not fit in `u32` words.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> Option<u32> {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    u32::try_from(bits_per_line.div_ceil(32)).ok()
}

/// Raster - main image container
///
/// # Examples
///
/// ```
/// use raster_core::{Raster, PixelDepth};
///
/// let raster = Raster::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.wpl(), 160);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 or the
    /// buffer size overflows, and [`Error::AllocationFailed`] if the buffer
    /// cannot be allocated.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::with_shape(width, height, depth)?),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    #[inline]
    pub fn has_colormap(&self) -> bool {
        self.inner.colormap.is_some()
    }

    #[inline]
    pub fn colormap(&self) -> Option<&Colormap> {
        self.inner.colormap.as_ref()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Number of views sharing this raster's data.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Create a zeroed raster with the same shape, spp and colormap.
    pub fn create_template(&self) -> Self {
        let inner = RasterData {
            data: vec![0u32; self.inner.data.len()],
            ..(*self.inner).clone_shape()
        };
        Raster {
            inner: Arc::new(inner),
        }
    }

    /// Create a zeroed raster of another size with this raster's depth, spp
    /// and colormap.
    ///
    /// # Errors
    ///
    /// Same as [`Raster::new`].
    pub fn create_sized(&self, width: u32, height: u32) -> Result<RasterMut> {
        let mut inner = RasterData::with_shape(width, height, self.inner.depth)?;
        inner.spp = self.inner.spp;
        inner.colormap = self.inner.colormap.clone();
        Ok(RasterMut { inner })
    }

    /// Check if two rasters have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Create an independent copy of this raster.
    ///
    /// Unlike `clone()`, which aliases the data, this copies the buffer.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if this is the only view of the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Get mutable access, copying only when the data is aliased.
    pub fn into_mut(self) -> RasterMut {
        match self.try_into_mut() {
            Ok(pm) => pm,
            Err(shared) => shared.to_mut(),
        }
    }
}

impl RasterData {
    /// Copy of all metadata with an empty buffer.
    fn clone_shape(&self) -> RasterData {
        RasterData {
            width: self.width,
            height: self.height,
            depth: self.depth,
            spp: self.spp,
            wpl: self.wpl,
            colormap: self.colormap.clone(),
            data: Vec::new(),
        }
    }
}

/// Mutable raster
///
/// Exclusive owner of a raster buffer. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set samples per pixel (3 or 4 for 32 bpp, otherwise 1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a value not valid at this depth.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        let ok = match self.inner.depth {
            PixelDepth::Bit32 => spp == 3 || spp == 4,
            _ => spp == 1,
        };
        if !ok {
            return Err(Error::InvalidParameter(format!(
                "spp {} invalid for {} bpp",
                spp,
                self.inner.depth.bits()
            )));
        }
        self.inner.spp = spp;
        Ok(())
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the words of row `y`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Get the words of row `y` mutably.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    #[inline]
    pub fn has_colormap(&self) -> bool {
        self.inner.colormap.is_some()
    }

    #[inline]
    pub fn colormap(&self) -> Option<&Colormap> {
        self.inner.colormap.as_ref()
    }

    /// Attach or remove a colormap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColormapNotAllowed`] if the raster depth cannot carry
    /// a colormap or differs from the colormap's depth.
    pub fn set_colormap(&mut self, cmap: Option<Colormap>) -> Result<()> {
        if let Some(ref c) = cmap {
            let d = self.inner.depth;
            if !d.colormap_allowed() || c.depth() != d.bits() {
                return Err(Error::ColormapNotAllowed(d.bits()));
            }
        }
        self.inner.colormap = cmap;
        Ok(())
    }

    /// Clear all pixels to 0.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set all bits to 1.
    pub fn set_all(&mut self) {
        self.inner.data.fill(0xffff_ffff);
    }

    /// Zero the unused bits at the right end of every row.
    pub fn clear_pad_bits(&mut self) {
        let used = (self.inner.width * self.inner.depth.bits()) & 31;
        if used == 0 {
            return;
        }
        let mask = !(0xffff_ffffu32 >> used);
        let wpl = self.inner.wpl as usize;
        for row in self.inner.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
