//! Border operations
//!
//! Adding and removing padding around a raster. The morphology and
//! rotation code pads an image, runs a kernel that may read past the
//! original edges, and strips the padding again.

use super::{Raster, RopOp};
use crate::error::{Error, Result};
use crate::rect::Rect;

impl Raster {
    /// Add a uniform border of `npix` pixels with value `val`.
    ///
    /// # Errors
    ///
    /// Returns error if the new dimensions would overflow.
    pub fn add_border(&self, npix: u32, val: u32) -> Result<Raster> {
        self.add_border_general(npix, npix, npix, npix, val)
    }

    /// Add a border with different sizes per side.
    ///
    /// # Arguments
    ///
    /// * `left` - Left border width
    /// * `right` - Right border width
    /// * `top` - Top border height
    /// * `bot` - Bottom border height
    /// * `val` - Border pixel value, clamped to the depth
    ///
    /// # Returns
    ///
    /// New raster of size `(width + left + right, height + top + bot)` with
    /// the same depth, spp and colormap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the dimensions overflow.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<Raster> {
        let overflow = || Error::InvalidDimension {
            width: self.width(),
            height: self.height(),
        };
        let wd = self
            .width()
            .checked_add(left)
            .and_then(|v| v.checked_add(right))
            .ok_or_else(overflow)?;
        let hd = self
            .height()
            .checked_add(top)
            .and_then(|v| v.checked_add(bot))
            .ok_or_else(overflow)?;
        if i32::try_from(wd).is_err() || i32::try_from(hd).is_err() {
            return Err(overflow());
        }

        let mut out = self.create_sized(wd, hd)?;
        if val != 0 {
            out.set_all_arbitrary(val);
        }
        let rect = Rect::new_unchecked(
            left as i32,
            top as i32,
            self.width() as i32,
            self.height() as i32,
        );
        out.rasterop(rect, RopOp::Src, self, 0, 0)?;
        Ok(out.into())
    }

    /// Remove a uniform border of `npix` pixels.
    pub fn remove_border(&self, npix: u32) -> Result<Raster> {
        self.remove_border_general(npix, npix, npix, npix)
    }

    /// Remove a border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if nothing of the image would
    /// remain.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Raster> {
        let wd = i64::from(self.width()) - i64::from(left) - i64::from(right);
        let hd = i64::from(self.height()) - i64::from(top) - i64::from(bot);
        if wd <= 0 || hd <= 0 {
            return Err(Error::InvalidParameter(format!(
                "border ({left}, {right}, {top}, {bot}) removes the whole {}x{} image",
                self.width(),
                self.height()
            )));
        }

        let mut out = self.create_sized(wd as u32, hd as u32)?;
        let rect = Rect::new_unchecked(0, 0, wd as i32, hd as i32);
        out.rasterop(rect, RopOp::Src, self, left as i32, top as i32)?;
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::pix::{PixelDepth, Raster};

    #[test]
    fn test_add_border_values() {
        let mut rm = Raster::new(3, 2, PixelDepth::Bit8).unwrap().to_mut();
        rm.set_all_arbitrary(9);
        let r: Raster = rm.into();
        let b = r.add_border_general(2, 1, 0, 3, 200).unwrap();
        assert_eq!((b.width(), b.height()), (6, 5));
        assert_eq!(b.get_pixel(0, 0), Some(200));
        assert_eq!(b.get_pixel(2, 0), Some(9));
        assert_eq!(b.get_pixel(4, 1), Some(9));
        assert_eq!(b.get_pixel(5, 1), Some(200));
        assert_eq!(b.get_pixel(3, 2), Some(200));
    }

    #[test]
    fn test_border_round_trip_binary() {
        let mut rm = Raster::new(37, 5, PixelDepth::Bit1).unwrap().to_mut();
        for x in (0..37).step_by(3) {
            rm.set_pixel(x, x % 5, 1).unwrap();
        }
        let r: Raster = rm.into();
        let b = r.add_border_general(5, 30, 1, 2, 1).unwrap();
        let back = b.remove_border_general(5, 30, 1, 2).unwrap();
        assert!(back.equals(&r));
    }

    #[test]
    fn test_remove_border_too_large() {
        let r = Raster::new(10, 10, PixelDepth::Bit8).unwrap();
        assert!(r.remove_border(5).is_err());
        assert!(r.remove_border_general(9, 0, 0, 0).is_ok());
    }
}
