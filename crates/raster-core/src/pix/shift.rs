//! In-place band shifts
//!
//! Moves a vertical band of columns up or down, or a horizontal band of
//! rows left or right, by an integer number of pixels inside the same
//! buffer. Rows (or words within a row) are copied starting from the
//! leading edge of the motion so no pixel is overwritten before it has been
//! read. Vacated pixels are cleared and then painted with the fill value.

use super::rop::InColor;
use super::rop_low::{lmask, rmask};
use super::{RasterMut, RopOp};
use crate::rect::Rect;

impl RasterMut {
    /// Shift the column band `[bx, bx + bw)` vertically by `vshift` rows.
    ///
    /// Positive `vshift` moves pixels down. The band is clipped to the
    /// image; rows vacated by the shift are set to `fill`.
    pub fn shift_band_vertical(&mut self, bx: i32, bw: i32, vshift: i32, fill: u32) {
        let h = self.height() as i32;
        let Some(band) = Rect::new_unchecked(bx, 0, bw, h).clip(self.width(), self.height())
        else {
            return;
        };
        if vshift == 0 {
            return;
        }

        let d = self.depth().bits();
        let dbit = band.x as u32 * d;
        let wbits = band.w as u32 * d;
        let first = (dbit >> 5) as usize;
        let last = ((dbit + wbits - 1) >> 5) as usize;
        let fmask = 0xffff_ffffu32 >> (dbit & 31);
        let emask = lmask(dbit + wbits - (last as u32) * 32);
        let wpl = self.wpl() as usize;
        let data = self.data_mut();

        let copy_row = |data: &mut [u32], from: usize, to: usize| {
            for k in first..=last {
                let mut mask = 0xffff_ffff;
                if k == first {
                    mask &= fmask;
                }
                if k == last {
                    mask &= emask;
                }
                let s = data[from * wpl + k];
                let dw = &mut data[to * wpl + k];
                *dw = (*dw & !mask) | (s & mask);
            }
        };

        let amount = vshift.unsigned_abs().min(h as u32) as i32;
        if vshift > 0 {
            for y in (amount..h).rev() {
                copy_row(data, (y - amount) as usize, y as usize);
            }
        } else {
            for y in 0..h - amount {
                copy_row(data, (y + amount) as usize, y as usize);
            }
        }

        let vacated = if vshift > 0 {
            Rect::new_unchecked(band.x, 0, band.w, amount)
        } else {
            Rect::new_unchecked(band.x, h - amount, band.w, amount)
        };
        self.fill_vacated(vacated, fill);
    }

    /// Shift the row band `[by, by + bh)` horizontally by `hshift` columns.
    ///
    /// Positive `hshift` moves pixels right. The band is clipped to the
    /// image; columns vacated by the shift are set to `fill`.
    pub fn shift_band_horizontal(&mut self, by: i32, bh: i32, hshift: i32, fill: u32) {
        let w = self.width() as i32;
        let Some(band) = Rect::new_unchecked(0, by, w, bh).clip(self.width(), self.height())
        else {
            return;
        };
        if hshift == 0 {
            return;
        }

        let d = self.depth().bits();
        let amount = hshift.unsigned_abs().min(w as u32);
        let shift_bits = amount * d;
        let ws = (shift_bits >> 5) as usize;
        let bs = shift_bits & 31;
        let wpl = self.wpl() as usize;
        let used = (self.width() * d) & 31;
        let pad_mask = if used == 0 { 0xffff_ffff } else { !rmask(32 - used) };

        for y in band.y..band.bottom() {
            let row = self.row_data_mut(y as u32);
            if hshift > 0 {
                shift_row_right(row, ws, bs);
            } else {
                shift_row_left(row, ws, bs);
            }
            row[wpl - 1] &= pad_mask;
        }

        let amount = amount as i32;
        let vacated = if hshift > 0 {
            Rect::new_unchecked(0, band.y, amount, band.h)
        } else {
            Rect::new_unchecked(w - amount, band.y, amount, band.h)
        };
        self.fill_vacated(vacated, fill);
    }

    /// Vertical band shift bringing in white or black.
    pub fn rasterop_vip(&mut self, bx: i32, bw: i32, vshift: i32, incolor: InColor) {
        let fill = incolor.pixel_value(self.depth(), self.colormap());
        self.shift_band_vertical(bx, bw, vshift, fill);
    }

    /// Horizontal band shift bringing in white or black.
    pub fn rasterop_hip(&mut self, by: i32, bh: i32, hshift: i32, incolor: InColor) {
        let fill = incolor.pixel_value(self.depth(), self.colormap());
        self.shift_band_horizontal(by, bh, hshift, fill);
    }

    fn fill_vacated(&mut self, rect: Rect, fill: u32) {
        if let Some(r) = rect.clip(self.width(), self.height()) {
            self.rop_uni_clipped(r, RopOp::Clear);
            if fill != 0 {
                self.set_in_rect_arbitrary(r, fill);
            }
        }
    }
}

/// Shift a whole row right by `ws` words plus `bs` bits, zero-filling.
fn shift_row_right(row: &mut [u32], ws: usize, bs: u32) {
    for i in (0..row.len()).rev() {
        row[i] = if i < ws {
            0
        } else {
            let hi = row[i - ws] >> bs;
            let lo = if bs > 0 && i > ws {
                row[i - ws - 1] << (32 - bs)
            } else {
                0
            };
            hi | lo
        };
    }
}

/// Shift a whole row left by `ws` words plus `bs` bits, zero-filling.
fn shift_row_left(row: &mut [u32], ws: usize, bs: u32) {
    let n = row.len();
    for i in 0..n {
        row[i] = if i + ws >= n {
            0
        } else {
            let hi = row[i + ws] << bs;
            let lo = if bs > 0 && i + ws + 1 < n {
                row[i + ws + 1] >> (32 - bs)
            } else {
                0
            };
            hi | lo
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::{PixelDepth, Raster};

    fn ramp8(w: u32, h: u32) -> RasterMut {
        let mut rm = Raster::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                rm.set_pixel(x, y, (x + 10 * y) % 200 + 1).unwrap();
            }
        }
        rm
    }

    #[test]
    fn test_shift_row_words() {
        let mut row = [0x1234_5678, 0x9abc_def0];
        shift_row_right(&mut row, 0, 4);
        assert_eq!(row, [0x0123_4567, 0x89ab_cdef]);
        shift_row_left(&mut row, 0, 8);
        assert_eq!(row, [0x2345_6789, 0xabcd_ef00]);
        shift_row_right(&mut row, 1, 0);
        assert_eq!(row, [0, 0x2345_6789]);
    }

    #[test]
    fn test_vertical_band_down() {
        let orig = ramp8(10, 10);
        let mut rm = ramp8(10, 10);
        rm.shift_band_vertical(2, 3, 4, 7);
        for y in 0..10 {
            for x in 0..10 {
                let want = if !(2..5).contains(&x) {
                    orig.get_pixel(x, y).unwrap()
                } else if y < 4 {
                    7
                } else {
                    orig.get_pixel(x, y - 4).unwrap()
                };
                assert_eq!(rm.get_pixel(x, y), Some(want), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_vertical_band_up_binary() {
        let mut rm = Raster::new(40, 6, PixelDepth::Bit1).unwrap().to_mut();
        rm.set_pixel(33, 5, 1).unwrap();
        rm.set_pixel(2, 5, 1).unwrap();
        rm.shift_band_vertical(30, 10, -5, 0);
        assert_eq!(rm.get_pixel(33, 0), Some(1));
        assert_eq!(rm.get_pixel(33, 5), Some(0));
        // Outside the band
        assert_eq!(rm.get_pixel(2, 5), Some(1));
    }

    #[test]
    fn test_horizontal_band_left_fills_right() {
        let orig = ramp8(9, 4);
        let mut rm = ramp8(9, 4);
        rm.shift_band_horizontal(1, 2, -3, 250);
        for y in 0..4 {
            for x in 0..9 {
                let want = if !(1..3).contains(&y) {
                    orig.get_pixel(x, y).unwrap()
                } else if x >= 6 {
                    250
                } else {
                    orig.get_pixel(x + 3, y).unwrap()
                };
                assert_eq!(rm.get_pixel(x, y), Some(want), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_horizontal_shift_binary_keeps_pad_clear() {
        let mut rm = Raster::new(45, 1, PixelDepth::Bit1).unwrap().to_mut();
        rm.set_all();
        rm.clear_pad_bits();
        rm.shift_band_horizontal(0, 1, 7, 0);
        for x in 0..45 {
            assert_eq!(rm.get_pixel(x, 0), Some(u32::from(x >= 7)));
        }
        assert_eq!(rm.row_data(0)[1] & rmask(19), 0);
    }

    #[test]
    fn test_shift_larger_than_image() {
        let mut rm = ramp8(5, 5);
        rm.shift_band_horizontal(0, 5, 12, 3);
        rm.shift_band_vertical(0, 5, -9, 3);
        assert!((0..5).all(|y| (0..5).all(|x| rm.get_pixel(x, y) == Some(3))));
    }

    #[test]
    fn test_incolor_resolution() {
        let mut rm = ramp8(6, 6);
        rm.rasterop_hip(0, 6, 2, InColor::White);
        assert_eq!(rm.get_pixel(1, 3), Some(255));
        rm.rasterop_vip(0, 6, 1, InColor::Black);
        assert_eq!(rm.get_pixel(4, 0), Some(0));
    }
}
