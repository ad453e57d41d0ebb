//! Shear transformations
//!
//! A shear leaves one line invariant and slides every other row (or column)
//! by an amount proportional to its distance from that line:
//!
//! - Horizontal shear about `y = yloc`: row `y` moves right by
//!   `round(tan(angle) * (yloc - y))` pixels.
//! - Vertical shear about `x = xloc`: column `x` moves down by
//!   `round(tan(angle) * (x - xloc))` pixels.
//!
//! Consecutive rows (or columns) with the same integer shift form a band,
//! and each band is moved with a single rasterop, or with an in-place band
//! shift for the `_ip` variants. Pixels brought in from outside take the
//! fill value; pixels shifted out are lost.
//!
//! # Example
//!
//! ```
//! use raster_core::{PixelDepth, Raster};
//! use raster_transform::{RotateFill, h_shear_center};
//!
//! let pix = Raster::new(100, 100, PixelDepth::Bit8).unwrap();
//! let sheared = h_shear_center(&pix, 0.1, RotateFill::White).unwrap();
//! assert_eq!(sheared.width(), 100);
//! ```

use crate::{RotateFill, TransformError, TransformResult};
use raster_core::{Raster, RasterMut, Rect, RopOp};

/// Shear angles are kept at least this far from +-pi/2.
const MIN_DIFF_FROM_HALF_PI: f32 = 0.04;

/// Bring `radang` into `[-pi/2 + mindif, pi/2 - mindif]`.
///
/// Returns `None` when the angle is effectively zero.
fn normalize_angle_for_shear(mut radang: f32, mindif: f32) -> TransformResult<Option<f32>> {
    if !radang.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "shear angle {radang} is not finite"
        )));
    }
    let pi2 = std::f32::consts::FRAC_PI_2;

    if !(-pi2..=pi2).contains(&radang) {
        radang -= (radang / pi2).trunc() * pi2;
    }
    if radang > pi2 - mindif {
        log::debug!("shear angle {radang} clamped to {}", pi2 - mindif);
        radang = pi2 - mindif;
    } else if radang < -pi2 + mindif {
        log::debug!("shear angle {radang} clamped to {}", -pi2 + mindif);
        radang = -pi2 + mindif;
    }

    if radang.abs() < 1e-7 || radang.tan().abs() < 1e-7 {
        return Ok(None);
    }
    Ok(Some(radang))
}

#[inline]
fn shift_at(tan: f32, dist: i32) -> i32 {
    (tan * dist as f32).round() as i32
}

/// Visit each maximal run of lines `[start, start + len)` that share one
/// shift, in order.
fn for_each_band<S, F>(n: i32, shift: S, mut f: F) -> TransformResult<()>
where
    S: Fn(i32) -> i32,
    F: FnMut(i32, i32, i32) -> TransformResult<()>,
{
    let mut start = 0;
    while start < n {
        let s = shift(start);
        let mut end = start + 1;
        while end < n && shift(end) == s {
            end += 1;
        }
        f(start, end - start, s)?;
        start = end;
    }
    Ok(())
}

fn reject_colormap(pix: &RasterMut, what: &str) -> TransformResult<()> {
    if pix.has_colormap() {
        return Err(TransformError::ColormapNotSupported(format!(
            "{what} cannot bring in an arbitrary colormap index"
        )));
    }
    Ok(())
}

/// Horizontal shear about the line `y = yloc`.
///
/// For a positive angle, rows above `yloc` move right and rows below move
/// left. The result has the size, depth and colormap of `pix`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn h_shear(pix: &Raster, yloc: i32, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    let Some(radang) = normalize_angle_for_shear(radang, MIN_DIFF_FROM_HALF_PI)? else {
        return Ok(pix.deep_clone());
    };
    let tan = radang.tan();
    let (w, h) = (pix.width(), pix.height());

    let mut out = pix.create_sized(w, h)?;
    out.set_all_arbitrary(fill.to_value(pix.depth(), pix.colormap()));
    for_each_band(
        h as i32,
        |y| shift_at(tan, yloc - y),
        |y0, bh, shift| {
            out.rasterop(Rect::new_unchecked(shift, y0, w as i32, bh), RopOp::Src, pix, 0, y0)?;
            Ok(())
        },
    )?;
    Ok(out.into())
}

/// Horizontal shear about the top edge (`y = 0`).
pub fn h_shear_corner(pix: &Raster, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    h_shear(pix, 0, radang, fill)
}

/// Horizontal shear about the middle row (`y = h / 2`).
pub fn h_shear_center(pix: &Raster, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    h_shear(pix, (pix.height() / 2) as i32, radang, fill)
}

/// Vertical shear about the line `x = xloc`.
///
/// For a positive angle, columns right of `xloc` move down and columns to
/// the left move up.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn v_shear(pix: &Raster, xloc: i32, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    let Some(radang) = normalize_angle_for_shear(radang, MIN_DIFF_FROM_HALF_PI)? else {
        return Ok(pix.deep_clone());
    };
    let tan = radang.tan();
    let (w, h) = (pix.width(), pix.height());

    let mut out = pix.create_sized(w, h)?;
    out.set_all_arbitrary(fill.to_value(pix.depth(), pix.colormap()));
    for_each_band(
        w as i32,
        |x| shift_at(tan, x - xloc),
        |x0, bw, shift| {
            out.rasterop(Rect::new_unchecked(x0, shift, bw, h as i32), RopOp::Src, pix, x0, 0)?;
            Ok(())
        },
    )?;
    Ok(out.into())
}

/// Vertical shear about the left edge (`x = 0`).
pub fn v_shear_corner(pix: &Raster, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    v_shear(pix, 0, radang, fill)
}

/// Vertical shear about the middle column (`x = w / 2`).
pub fn v_shear_center(pix: &Raster, radang: f32, fill: RotateFill) -> TransformResult<Raster> {
    v_shear(pix, (pix.width() / 2) as i32, radang, fill)
}

/// In-place horizontal shear about `y = yloc`.
///
/// Gives the same pixels as [`h_shear`].
///
/// # Errors
///
/// Returns [`TransformError::ColormapNotSupported`] for a colormapped
/// raster and [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn h_shear_ip(pix: &mut RasterMut, yloc: i32, radang: f32, fill: RotateFill) -> TransformResult<()> {
    reject_colormap(pix, "h_shear_ip")?;
    let Some(radang) = normalize_angle_for_shear(radang, MIN_DIFF_FROM_HALF_PI)? else {
        return Ok(());
    };
    let tan = radang.tan();
    let fillval = fill.to_value(pix.depth(), None);
    let h = pix.height() as i32;

    for_each_band(
        h,
        |y| shift_at(tan, yloc - y),
        |y0, bh, shift| {
            pix.shift_band_horizontal(y0, bh, shift, fillval);
            Ok(())
        },
    )
}

/// In-place vertical shear about `x = xloc`.
///
/// Gives the same pixels as [`v_shear`].
///
/// # Errors
///
/// Same as [`h_shear_ip`].
pub fn v_shear_ip(pix: &mut RasterMut, xloc: i32, radang: f32, fill: RotateFill) -> TransformResult<()> {
    reject_colormap(pix, "v_shear_ip")?;
    let Some(radang) = normalize_angle_for_shear(radang, MIN_DIFF_FROM_HALF_PI)? else {
        return Ok(());
    };
    let tan = radang.tan();
    let fillval = fill.to_value(pix.depth(), None);
    let w = pix.width() as i32;

    for_each_band(
        w,
        |x| shift_at(tan, x - xloc),
        |x0, bw, shift| {
            pix.shift_band_vertical(x0, bw, shift, fillval);
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::{Colormap, PixelDepth};

    fn ramp(w: u32, h: u32) -> Raster {
        let mut pm = Raster::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel_unchecked(x, y, (x * 7 + y * 3) % 251);
            }
        }
        pm.into()
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle_for_shear(0.0, 0.04).unwrap(), None);
        assert_eq!(normalize_angle_for_shear(0.3, 0.04).unwrap(), Some(0.3));
        let a = normalize_angle_for_shear(1.56, 0.04).unwrap().unwrap();
        assert!((a - (std::f32::consts::FRAC_PI_2 - 0.04)).abs() < 1e-6);
        let a = normalize_angle_for_shear(-1.56, 0.04).unwrap().unwrap();
        assert!((a + (std::f32::consts::FRAC_PI_2 - 0.04)).abs() < 1e-6);
        assert!(normalize_angle_for_shear(f32::NAN, 0.04).is_err());
    }

    #[test]
    fn test_bands_cover_every_line_once() {
        let mut seen = Vec::new();
        for_each_band(
            20,
            |y| shift_at(0.3, 10 - y),
            |start, len, _| {
                seen.extend(start..start + len);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_h_shear_moves_rows() {
        let pix = ramp(40, 21);
        let tan = 0.2f32;
        let out = h_shear(&pix, 10, tan.atan(), RotateFill::Black).unwrap();
        for y in 0..21i32 {
            let shift = (tan * (10 - y) as f32).round() as i32;
            for x in 0..40i32 {
                let sx = x - shift;
                let want = if (0..40).contains(&sx) {
                    pix.get_pixel(sx as u32, y as u32).unwrap()
                } else {
                    0
                };
                assert_eq!(out.get_pixel(x as u32, y as u32), Some(want), "({x}, {y})");
            }
        }
        // Invariant row is untouched
        assert_eq!(out.row_data(10), pix.row_data(10));
    }

    #[test]
    fn test_v_shear_moves_columns() {
        let pix = ramp(23, 30);
        let tan = -0.26f32;
        let out = v_shear(&pix, 5, tan.atan(), RotateFill::White).unwrap();
        for x in 0..23i32 {
            let shift = (tan * (x - 5) as f32).round() as i32;
            for y in 0..30i32 {
                let sy = y - shift;
                let want = if (0..30).contains(&sy) {
                    pix.get_pixel(x as u32, sy as u32).unwrap()
                } else {
                    255
                };
                assert_eq!(out.get_pixel(x as u32, y as u32), Some(want), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_in_place_matches_copy() {
        let pix = ramp(37, 29);
        for angle in [0.05f32, -0.2, 0.7] {
            let want = h_shear(&pix, 11, angle, RotateFill::Black).unwrap();
            let mut pm = pix.to_mut();
            h_shear_ip(&mut pm, 11, angle, RotateFill::Black).unwrap();
            assert!(Raster::from(pm).equals(&want), "h {angle}");

            let want = v_shear(&pix, 20, angle, RotateFill::White).unwrap();
            let mut pm = pix.to_mut();
            v_shear_ip(&mut pm, 20, angle, RotateFill::White).unwrap();
            assert!(Raster::from(pm).equals(&want), "v {angle}");
        }
    }

    #[test]
    fn test_zero_angle_is_copy() {
        let pix = ramp(10, 10);
        assert!(h_shear_center(&pix, 0.0, RotateFill::White).unwrap().equals(&pix));
        assert!(v_shear_corner(&pix, 0.0, RotateFill::White).unwrap().equals(&pix));
    }

    #[test]
    fn test_in_place_rejects_colormap() {
        let mut pm = Raster::new(8, 8, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_colormap(Some(Colormap::linear_gray(8).unwrap())).unwrap();
        assert!(matches!(
            h_shear_ip(&mut pm, 4, 0.1, RotateFill::White),
            Err(TransformError::ColormapNotSupported(_))
        ));
        assert!(v_shear_ip(&mut pm, 4, 0.1, RotateFill::White).is_err());
    }
}
