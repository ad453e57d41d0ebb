//! Rotation by area mapping
//!
//! Each destination pixel is mapped back into the source, where it
//! overlaps at most four source pixels. The position is quantized onto a
//! subpixel grid and the output is the overlap-weighted average of those
//! four pixels, per channel at 32 bpp. Works on 8 bpp gray and 32 bpp
//! color; binary images should use shear rotation instead.

use crate::{RotateFill, TransformError, TransformResult};
use raster_core::pix::{get_data_byte, get_data_four_bytes, set_data_byte, set_data_four_bytes};
use raster_core::{PixelDepth, Raster};

/// Subpixel grid used to quantize the source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaMapGrid {
    /// 16x16 subpixels, 256 weight levels
    #[default]
    Fine,
    /// 4x4 subpixels, 16 weight levels. Cheaper, with up to a quarter
    /// pixel of positional drift.
    Coarse,
}

impl AreaMapGrid {
    /// log2 of the number of subpixels along each axis
    fn bits(self) -> u32 {
        match self {
            AreaMapGrid::Fine => 4,
            AreaMapGrid::Coarse => 2,
        }
    }
}

/// Rotate about the image center by area mapping.
///
/// A positive angle rotates clockwise. The output has the size of the
/// input; pixels that map outside the source take `fill`.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedDepth`] unless `pix` is 8 or 32
/// bpp, and [`TransformError::ColormapNotSupported`] for a colormapped
/// raster.
pub fn rotate_am(pix: &Raster, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    rotate_am_with_grid(pix, angle, fill, AreaMapGrid::Fine)
}

/// Rotate about the upper-left corner by area mapping.
pub fn rotate_am_corner(pix: &Raster, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    rotate_am_about(pix, 0, 0, angle, fill, AreaMapGrid::Fine)
}

/// Rotate about the image center on the coarse 4x4 grid.
pub fn rotate_am_fast(pix: &Raster, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    rotate_am_with_grid(pix, angle, fill, AreaMapGrid::Coarse)
}

/// Rotate about the image center on the given subpixel grid.
pub fn rotate_am_with_grid(pix: &Raster, angle: f32, fill: RotateFill, grid: AreaMapGrid) -> TransformResult<Raster> {
    let (xcen, ycen) = ((pix.width() / 2) as i32, (pix.height() / 2) as i32);
    rotate_am_about(pix, xcen, ycen, angle, fill, grid)
}

/// Rotate about (`xcen`, `ycen`) by area mapping.
///
/// # Errors
///
/// Same as [`rotate_am`], plus [`TransformError::InvalidParameters`] for a
/// non-finite angle.
pub fn rotate_am_about(
    pix: &Raster,
    xcen: i32,
    ycen: i32,
    angle: f32,
    fill: RotateFill,
    grid: AreaMapGrid,
) -> TransformResult<Raster> {
    let depth = pix.depth();
    if depth != PixelDepth::Bit8 && depth != PixelDepth::Bit32 {
        return Err(TransformError::UnsupportedDepth(format!(
            "area-map rotation needs 8 or 32 bpp, got {} bpp",
            depth.bits()
        )));
    }
    if pix.has_colormap() {
        return Err(TransformError::ColormapNotSupported(
            "area-map rotation averages pixel values".to_string(),
        ));
    }
    if !angle.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle {angle} is not finite"
        )));
    }
    if angle.abs() < crate::MIN_ANGLE_TO_ROTATE {
        return Ok(pix.deep_clone());
    }

    let fillval = match (depth, fill.to_value(depth, None)) {
        (PixelDepth::Bit8, v) if v > 255 => {
            log::warn!("rotate_am: fill value {v} clamped to 255 at 8 bpp");
            255
        }
        (_, v) => v,
    };
    let mut out = pix.create_sized(pix.width(), pix.height())?;
    let mapper = AreaMapper::new(pix, xcen, ycen, angle, grid, fillval);
    for i in 0..pix.height() {
        let line = out.row_data_mut(i);
        for j in 0..pix.width() {
            let Some((v00, v10, v01, v11, xf, yf)) = mapper.neighbours(j as i32, i as i32) else {
                match depth {
                    PixelDepth::Bit8 => set_data_byte(line, j, fillval),
                    _ => set_data_four_bytes(line, j, fillval),
                }
                continue;
            };
            match depth {
                PixelDepth::Bit8 => set_data_byte(line, j, mapper.blend(v00, v10, v01, v11, xf, yf)),
                _ => {
                    let mut pixel = 0u32;
                    for shift in [24, 16, 8, 0] {
                        let c = |v: u32| (v >> shift) & 0xff;
                        let val = mapper.blend(c(v00), c(v10), c(v01), c(v11), xf, yf);
                        pixel |= val << shift;
                    }
                    set_data_four_bytes(line, j, pixel);
                }
            }
        }
    }
    Ok(out.into())
}

/// Inverse mapping from destination to source in fixed point
struct AreaMapper<'a> {
    src: &'a Raster,
    xcen: i32,
    ycen: i32,
    sina: f32,
    cosa: f32,
    bits: u32,
    fill: u32,
}

impl<'a> AreaMapper<'a> {
    fn new(src: &'a Raster, xcen: i32, ycen: i32, angle: f32, grid: AreaMapGrid, fill: u32) -> Self {
        let bits = grid.bits();
        let scale = (1u32 << bits) as f32;
        Self {
            src,
            xcen,
            ycen,
            sina: scale * angle.sin(),
            cosa: scale * angle.cos(),
            bits,
            fill,
        }
    }

    fn fetch(&self, x: i32, y: i32) -> u32 {
        let (w, h) = (self.src.width() as i32, self.src.height() as i32);
        if x < 0 || y < 0 || x >= w || y >= h {
            return self.fill;
        }
        let line = self.src.row_data(y as u32);
        match self.src.depth() {
            PixelDepth::Bit8 => get_data_byte(line, x as u32),
            _ => get_data_four_bytes(line, x as u32),
        }
    }

    /// The four source pixels around the preimage of (`j`, `i`) and the
    /// subpixel offsets into the top-left one.
    ///
    /// Returns `None` when the preimage lies outside
    /// `[0, w-1] x [0, h-1]`. A neighbour past the last row or column
    /// only occurs with zero weight.
    fn neighbours(&self, j: i32, i: i32) -> Option<(u32, u32, u32, u32, u32, u32)> {
        let xdif = (self.xcen - j) as f32;
        let ydif = (self.ycen - i) as f32;
        let xpm = (-xdif * self.cosa - ydif * self.sina) as i32;
        let ypm = (-ydif * self.cosa + xdif * self.sina) as i32;

        let (w, h) = (self.src.width() as i64, self.src.height() as i64);
        let xs = (i64::from(self.xcen) << self.bits) + i64::from(xpm);
        let ys = (i64::from(self.ycen) << self.bits) + i64::from(ypm);
        if xs < 0 || ys < 0 || xs > (w - 1) << self.bits || ys > (h - 1) << self.bits {
            return None;
        }

        let xp = self.xcen + (xpm >> self.bits);
        let yp = self.ycen + (ypm >> self.bits);
        let fmask = (1i32 << self.bits) - 1;
        let (xf, yf) = ((xpm & fmask) as u32, (ypm & fmask) as u32);

        Some((
            self.fetch(xp, yp),
            self.fetch(xp + 1, yp),
            self.fetch(xp, yp + 1),
            self.fetch(xp + 1, yp + 1),
            xf,
            yf,
        ))
    }

    /// Overlap-weighted average of four channel values, rounded.
    #[inline]
    fn blend(&self, v00: u32, v10: u32, v01: u32, v11: u32, xf: u32, yf: u32) -> u32 {
        let scale = 1u32 << self.bits;
        let norm = scale * scale;
        ((scale - xf) * (scale - yf) * v00
            + xf * (scale - yf) * v10
            + (scale - xf) * yf * v01
            + xf * yf * v11
            + norm / 2)
            / norm
    }
}
