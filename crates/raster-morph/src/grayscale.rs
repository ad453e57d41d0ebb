//! Grayscale morphological operations
//!
//! Erosion, dilation and the composite operations for 8-bpp images, with
//! flat linear or rectangular (brick) structuring elements.
//!
//! # Algorithm
//!
//! - **Dilation**: maximum over the structuring element
//! - **Erosion**: minimum over the structuring element
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)
//!
//! A brick is separable, so 2-D operations are a horizontal pass followed
//! by a vertical pass. Each pass uses the van Herk / Gil-Werman moving
//! window, whose cost per pixel does not depend on the element size.
//!
//! The image is padded before each operation: `(size + 1) / 2` pixels on
//! the leading side and `(3 * size + 1) / 2` on the trailing side of every
//! axis that is filtered. The [`BoundaryCondition`] chooses the pad value.

use crate::gray_low::{Extremum, extremum_line};
use crate::{MorphError, MorphResult};
use raster_core::pix::{get_data_byte, set_data_byte};
use raster_core::{PixelDepth, Raster};

/// Orientation of a linear structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Value assumed for pixels outside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    /// Outside pixels never win: 0 for dilation, 255 for erosion.
    /// Opening and closing are then idempotent and erosion does not
    /// darken the image edges.
    #[default]
    Symmetric,
    /// Outside pixels are 0 for both dilation and erosion, so erosion
    /// darkens a band along the edges.
    Asymmetric,
}

impl BoundaryCondition {
    fn pad_value(self, ext: Extremum) -> u32 {
        match (self, ext) {
            (BoundaryCondition::Symmetric, Extremum::Min) => 255,
            _ => 0,
        }
    }
}

/// Flat linear structuring element of odd length
///
/// An even length is rounded up to the next odd value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSel {
    size: u32,
    direction: Direction,
}

impl LinearSel {
    /// Create a linear element.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `size` is 0.
    pub fn new(size: u32, direction: Direction) -> MorphResult<Self> {
        if size == 0 {
            return Err(MorphError::InvalidSel("size must be at least 1".into()));
        }
        let size = if size % 2 == 0 {
            log::warn!("even sel size {} rounded up to {}", size, size + 1);
            size + 1
        } else {
            size
        };
        Ok(Self { size, direction })
    }

    /// Full length (always odd).
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Leading and trailing pad widths for this element.
    fn border(&self) -> (u32, u32) {
        if self.size == 1 {
            (0, 0)
        } else {
            ((self.size + 1) / 2, (3 * self.size + 1) / 2)
        }
    }
}

// ============================================================================
// 1-D operations
// ============================================================================

/// Dilate with a linear element of length `size`.
pub fn dilate_1d(pix: &Raster, size: u32, direction: Direction) -> MorphResult<Raster> {
    dilate_1d_with_boundary(pix, size, direction, BoundaryCondition::default())
}

/// Erode with a linear element of length `size`.
pub fn erode_1d(pix: &Raster, size: u32, direction: Direction) -> MorphResult<Raster> {
    erode_1d_with_boundary(pix, size, direction, BoundaryCondition::default())
}

pub fn dilate_1d_with_boundary(
    pix: &Raster,
    size: u32,
    direction: Direction,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let sel = LinearSel::new(size, direction)?;
    morph_linear(pix, &[sel], Extremum::Max, bc)
}

pub fn erode_1d_with_boundary(
    pix: &Raster,
    size: u32,
    direction: Direction,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let sel = LinearSel::new(size, direction)?;
    morph_linear(pix, &[sel], Extremum::Min, bc)
}

// ============================================================================
// 2-D brick operations
// ============================================================================

/// Dilate a grayscale image with an `hsize` x `vsize` brick
///
/// Dilation computes the maximum pixel value in the neighborhood,
/// which expands bright regions and shrinks dark regions.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp, is colormapped, or either
/// size is 0.
pub fn dilate_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    dilate_gray_with_boundary(pix, hsize, vsize, BoundaryCondition::default())
}

/// Erode a grayscale image with an `hsize` x `vsize` brick
///
/// Erosion computes the minimum pixel value in the neighborhood,
/// which shrinks bright regions and expands dark regions.
pub fn erode_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    erode_gray_with_boundary(pix, hsize, vsize, BoundaryCondition::default())
}

pub fn dilate_gray_with_boundary(
    pix: &Raster,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let sels = brick(hsize, vsize)?;
    morph_linear(pix, &sels, Extremum::Max, bc)
}

pub fn erode_gray_with_boundary(
    pix: &Raster,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let sels = brick(hsize, vsize)?;
    morph_linear(pix, &sels, Extremum::Min, bc)
}

/// Open a grayscale image (erosion followed by dilation)
pub fn open_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    open_gray_with_boundary(pix, hsize, vsize, BoundaryCondition::default())
}

/// Close a grayscale image (dilation followed by erosion)
pub fn close_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    close_gray_with_boundary(pix, hsize, vsize, BoundaryCondition::default())
}

pub fn open_gray_with_boundary(
    pix: &Raster,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let eroded = erode_gray_with_boundary(pix, hsize, vsize, bc)?;
    dilate_gray_with_boundary(&eroded, hsize, vsize, bc)
}

pub fn close_gray_with_boundary(
    pix: &Raster,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    let dilated = dilate_gray_with_boundary(pix, hsize, vsize, bc)?;
    erode_gray_with_boundary(&dilated, hsize, vsize, bc)
}

/// Grayscale morphological gradient (dilation - erosion)
///
/// Highlights edges and boundaries in the image.
pub fn gradient_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    let dilated = dilate_gray(pix, hsize, vsize)?;
    let eroded = erode_gray(pix, hsize, vsize)?;
    subtract_gray(&dilated, &eroded)
}

/// Grayscale top-hat transform (original - opening)
///
/// Extracts bright features smaller than the structuring element.
pub fn top_hat_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    let opened = open_gray(pix, hsize, vsize)?;
    subtract_gray(pix, &opened)
}

/// Grayscale bottom-hat transform (closing - original)
///
/// Extracts dark features smaller than the structuring element.
pub fn bottom_hat_gray(pix: &Raster, hsize: u32, vsize: u32) -> MorphResult<Raster> {
    let closed = close_gray(pix, hsize, vsize)?;
    subtract_gray(&closed, pix)
}

// ============================================================================
// Internals
// ============================================================================

fn brick(hsize: u32, vsize: u32) -> MorphResult<[LinearSel; 2]> {
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidSel(format!(
            "brick sizes must be at least 1: {hsize} x {vsize}"
        )));
    }
    Ok([
        LinearSel::new(hsize, Direction::Horizontal)?,
        LinearSel::new(vsize, Direction::Vertical)?,
    ])
}

fn check_gray(pix: &Raster) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    if pix.has_colormap() {
        return Err(MorphError::InvalidParameters(
            "colormapped images are not supported".into(),
        ));
    }
    Ok(())
}

/// Apply each linear element in turn on one padded copy of `pix`.
fn morph_linear(
    pix: &Raster,
    sels: &[LinearSel],
    ext: Extremum,
    bc: BoundaryCondition,
) -> MorphResult<Raster> {
    check_gray(pix)?;
    let active: Vec<&LinearSel> = sels.iter().filter(|s| s.size() > 1).collect();
    if active.is_empty() {
        return Ok(pix.deep_clone());
    }

    let (mut left, mut right, mut top, mut bot) = (0, 0, 0, 0);
    for sel in &active {
        let (lead, trail) = sel.border();
        match sel.direction() {
            Direction::Horizontal => (left, right) = (lead, trail),
            Direction::Vertical => (top, bot) = (lead, trail),
        }
    }

    let mut work = pix.add_border_general(left, right, top, bot, bc.pad_value(ext))?;
    for sel in &active {
        work = match sel.direction() {
            Direction::Horizontal => pass_horizontal(&work, sel.size() as usize, ext),
            Direction::Vertical => pass_vertical(&work, sel.size() as usize, ext),
        };
    }
    Ok(work.remove_border_general(left, right, top, bot)?)
}

fn pass_horizontal(pix: &Raster, size: usize, ext: Extremum) -> Raster {
    let (w, h) = (pix.width(), pix.height());
    let mut out = pix.to_mut();
    let mut src = vec![0u8; w as usize];
    let mut dst = vec![0u8; w as usize];
    let mut buf = Vec::with_capacity(2 * size);
    for y in 0..h {
        let line = pix.row_data(y);
        for x in 0..w {
            src[x as usize] = get_data_byte(line, x) as u8;
        }
        dst.copy_from_slice(&src);
        extremum_line(&src, &mut dst, size, ext, &mut buf);
        let oline = out.row_data_mut(y);
        for x in 0..w {
            set_data_byte(oline, x, u32::from(dst[x as usize]));
        }
    }
    out.into()
}

fn pass_vertical(pix: &Raster, size: usize, ext: Extremum) -> Raster {
    let (w, h) = (pix.width(), pix.height());
    let mut out = pix.to_mut();
    let mut src = vec![0u8; h as usize];
    let mut dst = vec![0u8; h as usize];
    let mut buf = Vec::with_capacity(2 * size);
    for x in 0..w {
        for y in 0..h {
            src[y as usize] = get_data_byte(pix.row_data(y), x) as u8;
        }
        dst.copy_from_slice(&src);
        extremum_line(&src, &mut dst, size, ext, &mut buf);
        for y in 0..h {
            set_data_byte(out.row_data_mut(y), x, u32::from(dst[y as usize]));
        }
    }
    out.into()
}

/// Per-pixel `a - b`, clipped at 0.
fn subtract_gray(a: &Raster, b: &Raster) -> MorphResult<Raster> {
    let mut out = a.to_mut();
    for (o, &s) in out.data_mut().iter_mut().zip(b.data()) {
        let [a0, a1, a2, a3] = o.to_be_bytes();
        let [b0, b1, b2, b3] = s.to_be_bytes();
        *o = u32::from_be_bytes([
            a0.saturating_sub(b0),
            a1.saturating_sub(b1),
            a2.saturating_sub(b2),
            a3.saturating_sub(b3),
        ]);
    }
    Ok(out.into())
}
