//! Raster operations (ROP)
//!
//! Block transfer of a rectangle from a source raster into a destination
//! raster, combining source and destination bits with one of the 16
//! boolean truth tables:
//!
//! - General two-operand rasterop with clipping ([`RasterMut::rasterop`])
//! - Destination-only ops ([`RasterMut::rasterop_uni`])
//! - Whole-image AND, OR, XOR and invert
//! - Region clear, set and arbitrary-value fill
//! - Whole-image translation with a bring-in color
//!
//! The word-level kernels live in `rop_low`.

use super::{PixelDepth, Raster, RasterMut, rop_low};
use crate::colormap::Colormap;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// Raster operation type
///
/// The discriminant is the 4-bit truth-table code. Bit `(s << 1) | d` of
/// the code is the result for source bit `s` and destination bit `d`, so
/// `Src` is 0xc and `Dst` is 0xa, and any combination of them can be
/// written with the usual bitwise operators on those two constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RopOp {
    /// Clear destination to 0
    Clear = 0x0,
    /// NOT (source OR destination)
    NotSrcAndNotDst = 0x1,
    /// (NOT source) AND destination
    NotSrcAndDst = 0x2,
    /// NOT source
    NotSrc = 0x3,
    /// Source AND (NOT destination)
    SrcAndNotDst = 0x4,
    /// NOT destination
    NotDst = 0x5,
    /// Source XOR destination
    SrcXorDst = 0x6,
    /// NOT (source AND destination)
    NotSrcOrNotDst = 0x7,
    /// Source AND destination
    SrcAndDst = 0x8,
    /// NOT (source XOR destination)
    NotSrcXorDst = 0x9,
    /// Keep destination unchanged
    Dst = 0xa,
    /// (NOT source) OR destination
    NotSrcOrDst = 0xb,
    /// Copy source to destination
    Src = 0xc,
    /// Source OR (NOT destination)
    SrcOrNotDst = 0xd,
    /// Source OR destination
    SrcOrDst = 0xe,
    /// Set destination to all 1s
    Set = 0xf,
}

impl RopOp {
    /// Paint foreground of the source onto the destination.
    pub const PAINT: RopOp = RopOp::SrcOrDst;
    /// Remove source foreground from the destination.
    pub const SUBTRACT: RopOp = RopOp::NotSrcAndDst;
    /// Keep destination only where the source is set.
    pub const MASK: RopOp = RopOp::SrcAndDst;

    /// Look up an operation by its truth-table code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOpCode`] for codes above 0xf.
    pub fn from_code(code: u32) -> Result<Self> {
        use RopOp::*;
        let op = match code {
            0x0 => Clear,
            0x1 => NotSrcAndNotDst,
            0x2 => NotSrcAndDst,
            0x3 => NotSrc,
            0x4 => SrcAndNotDst,
            0x5 => NotDst,
            0x6 => SrcXorDst,
            0x7 => NotSrcOrNotDst,
            0x8 => SrcAndDst,
            0x9 => NotSrcXorDst,
            0xa => Dst,
            0xb => NotSrcOrDst,
            0xc => Src,
            0xd => SrcOrNotDst,
            0xe => SrcOrDst,
            0xf => Set,
            _ => return Err(Error::InvalidOpCode(code)),
        };
        Ok(op)
    }

    /// The truth-table code.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Check if this operation requires a source image.
    ///
    /// `Clear`, `Set`, `Dst` and `NotDst` operate only on the destination.
    pub fn requires_source(self) -> bool {
        !matches!(self, Self::Clear | Self::Set | Self::Dst | Self::NotDst)
    }

    /// The op that undoes this one when applied again with the same source.
    ///
    /// Only ops that are bijective in the destination have an inverse.
    pub fn inverse(self) -> Option<RopOp> {
        match self {
            Self::Dst | Self::NotDst | Self::SrcXorDst | Self::NotSrcXorDst => Some(self),
            _ => None,
        }
    }

    /// Evaluate the op on a source word and a destination word.
    #[inline(always)]
    pub fn apply(self, s: u32, d: u32) -> u32 {
        match self {
            Self::Clear => 0,
            Self::NotSrcAndNotDst => !(s | d),
            Self::NotSrcAndDst => !s & d,
            Self::NotSrc => !s,
            Self::SrcAndNotDst => s & !d,
            Self::NotDst => !d,
            Self::SrcXorDst => s ^ d,
            Self::NotSrcOrNotDst => !(s & d),
            Self::SrcAndDst => s & d,
            Self::NotSrcXorDst => !(s ^ d),
            Self::Dst => d,
            Self::NotSrcOrDst => !s | d,
            Self::Src => s,
            Self::SrcOrNotDst => s | !d,
            Self::SrcOrDst => s | d,
            Self::Set => 0xffff_ffff,
        }
    }
}

/// Color brought in when pixels are shifted into an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InColor {
    #[default]
    White,
    Black,
}

impl InColor {
    /// Pixel value for this color at `depth`.
    ///
    /// A colormapped raster gets the index of its lightest or darkest entry.
    /// Otherwise white is the maximum value, except at 1 bpp where the
    /// foreground bit 1 is black.
    pub fn pixel_value(self, depth: PixelDepth, cmap: Option<&Colormap>) -> u32 {
        if let Some(cmap) = cmap {
            return cmap.extreme_index(self == InColor::White) as u32;
        }
        match (self, depth) {
            (InColor::White, PixelDepth::Bit1) => 0,
            (InColor::Black, PixelDepth::Bit1) => 1,
            (InColor::White, d) => d.max_value(),
            (InColor::Black, _) => 0,
        }
    }
}

/// Word pattern that holds `val` in every pixel slot.
#[inline]
pub(crate) fn replicated_word(val: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit32 => val,
        d => (val & d.max_value()) * (0xffff_ffff / d.max_value()),
    }
}

impl RasterMut {
    /// General rasterop.
    ///
    /// Combines the `rect.w` x `rect.h` block of `src` at (`sx`, `sy`) into
    /// `rect` of this raster. The rectangle is clipped against both rasters,
    /// moving the source origin in step with the destination origin; if
    /// nothing is left the call does nothing. Ops that ignore the source are
    /// forwarded to [`rasterop_uni`](Self::rasterop_uni).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDepths`] if a two-operand op is given
    /// rasters of different depth. Nothing is written in that case.
    pub fn rasterop(&mut self, rect: Rect, op: RopOp, src: &Raster, sx: i32, sy: i32) -> Result<()> {
        if !op.requires_source() {
            return self.rasterop_uni(rect, op);
        }
        if src.depth() != self.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                src.depth().bits(),
            ));
        }

        let Some((dx, sx, dw)) = clip_span(rect.x, sx, rect.w, self.width(), src.width()) else {
            return Ok(());
        };
        let Some((dy, sy, dh)) = clip_span(rect.y, sy, rect.h, self.height(), src.height()) else {
            return Ok(());
        };

        let d = self.depth().bits();
        let dwpl = self.wpl() as usize;
        let swpl = src.wpl() as usize;
        rop_low::rasterop_low(
            self.data_mut(),
            dwpl,
            dx * d,
            dy,
            dw * d,
            dh,
            op,
            src.data(),
            swpl,
            sx * d,
            sy,
        );
        Ok(())
    }

    /// Rasterop that involves only the destination.
    ///
    /// Valid ops are `Clear`, `Set`, `NotDst` and `Dst`; anything else is
    /// evaluated with an all-zero source.
    pub fn rasterop_uni(&mut self, rect: Rect, op: RopOp) -> Result<()> {
        if let Some(r) = rect.clip(self.width(), self.height()) {
            self.rop_uni_clipped(r, op);
        }
        Ok(())
    }

    /// Dest-only rasterop over a rect already clipped to the image.
    pub(crate) fn rop_uni_clipped(&mut self, r: Rect, op: RopOp) {
        if op == RopOp::Dst {
            return;
        }
        let d = self.depth().bits();
        let wpl = self.wpl() as usize;
        rop_low::rasterop_uni_low(
            self.data_mut(),
            wpl,
            r.x as u32 * d,
            r.y as u32,
            r.w as u32 * d,
            r.h as u32,
            op,
        );
    }

    /// Apply `op` between this raster and `other` over the whole image.
    ///
    /// # Errors
    ///
    /// Returns an error if depths or sizes differ.
    pub fn rop_inplace(&mut self, other: &Raster, op: RopOp) -> Result<()> {
        check_same_shape(self.width(), self.height(), self.depth(), other)?;
        self.rasterop(Rect::full(self.width(), self.height()), op, other, 0, 0)
    }

    pub fn and_inplace(&mut self, other: &Raster) -> Result<()> {
        self.rop_inplace(other, RopOp::SrcAndDst)
    }

    pub fn or_inplace(&mut self, other: &Raster) -> Result<()> {
        self.rop_inplace(other, RopOp::SrcOrDst)
    }

    pub fn xor_inplace(&mut self, other: &Raster) -> Result<()> {
        self.rop_inplace(other, RopOp::SrcXorDst)
    }

    /// Invert all pixels in place.
    pub fn invert_inplace(&mut self) {
        for w in self.data_mut() {
            *w = !*w;
        }
        self.clear_pad_bits();
    }

    /// Clear a rectangular region to 0.
    pub fn clear_region(&mut self, rect: Rect) -> Result<()> {
        self.rasterop_uni(rect, RopOp::Clear)
    }

    /// Set all bits of a rectangular region to 1.
    pub fn set_region(&mut self, rect: Rect) -> Result<()> {
        self.rasterop_uni(rect, RopOp::Set)
    }

    /// Set every pixel to `val`.
    ///
    /// Values above the depth's maximum are clamped.
    pub fn set_all_arbitrary(&mut self, val: u32) {
        let full = Rect::full(self.width(), self.height());
        self.set_in_rect_arbitrary(full, val);
    }

    /// Set every pixel inside `rect` to `val`.
    ///
    /// The rect is clipped to the image. Values above the depth's maximum
    /// are clamped.
    pub fn set_in_rect_arbitrary(&mut self, rect: Rect, val: u32) {
        let Some(r) = rect.clip(self.width(), self.height()) else {
            return;
        };
        let depth = self.depth();
        let maxval = depth.max_value();
        let val = if val > maxval {
            log::warn!("set_in_rect_arbitrary: {val} clamped to {maxval}");
            maxval
        } else {
            val
        };
        let pattern = replicated_word(val, depth);
        let d = depth.bits();
        let wpl = self.wpl() as usize;
        rop_low::fill_rect_low(
            self.data_mut(),
            wpl,
            r.x as u32 * d,
            r.y as u32,
            r.w as u32 * d,
            r.h as u32,
            pattern,
        );
    }

    /// Shift the whole image by (`hshift`, `vshift`) in place.
    ///
    /// Pixels shifted out are lost; vacated pixels take `incolor`.
    pub fn rasterop_ip(&mut self, hshift: i32, vshift: i32, incolor: InColor) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        self.rasterop_hip(0, h, hshift, incolor);
        self.rasterop_vip(0, w, vshift, incolor);
    }
}

impl Raster {
    /// Apply `op` between this raster (as destination) and `other` (as
    /// source), returning a new raster.
    ///
    /// # Errors
    ///
    /// Returns an error if depths or sizes differ.
    pub fn rop(&self, other: &Raster, op: RopOp) -> Result<Raster> {
        let mut out = self.to_mut();
        out.rop_inplace(other, op)?;
        Ok(out.into())
    }

    pub fn and(&self, other: &Raster) -> Result<Raster> {
        self.rop(other, RopOp::SrcAndDst)
    }

    pub fn or(&self, other: &Raster) -> Result<Raster> {
        self.rop(other, RopOp::SrcOrDst)
    }

    pub fn xor(&self, other: &Raster) -> Result<Raster> {
        self.rop(other, RopOp::SrcXorDst)
    }

    /// Invert all pixels.
    pub fn invert(&self) -> Raster {
        let mut out = self.to_mut();
        out.invert_inplace();
        out.into()
    }

    /// Return a copy shifted by (`hshift`, `vshift`).
    pub fn translate(&self, hshift: i32, vshift: i32, incolor: InColor) -> Raster {
        let mut out = self.to_mut();
        out.rasterop_ip(hshift, vshift, incolor);
        out.into()
    }
}

fn check_same_shape(width: u32, height: u32, depth: PixelDepth, other: &Raster) -> Result<()> {
    if other.depth() != depth {
        return Err(Error::IncompatibleDepths(depth.bits(), other.depth().bits()));
    }
    if other.width() != width || other.height() != height {
        return Err(Error::IncompatibleSizes(
            width,
            height,
            other.width(),
            other.height(),
        ));
    }
    Ok(())
}

/// Clip one axis of a two-operand rasterop.
///
/// Returns `(dst_start, src_start, len)` in pixels, or `None` if nothing
/// remains.
fn clip_span(d: i32, s: i32, len: i32, dst_len: u32, src_len: u32) -> Option<(u32, u32, u32)> {
    let (mut d, mut s, mut len) = (i64::from(d), i64::from(s), i64::from(len));
    if d < 0 {
        s -= d;
        len += d;
        d = 0;
    }
    if s < 0 {
        d -= s;
        len += s;
        s = 0;
    }
    len = len
        .min(i64::from(dst_len) - d)
        .min(i64::from(src_len) - s);
    if len <= 0 {
        return None;
    }
    Some((d as u32, s as u32, len as u32))
}
