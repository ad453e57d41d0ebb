//! Rotation by shear
//!
//! A rotation by a small angle can be written as a product of shears:
//!
//! - Two shears (H about `ycen`, then V about `xcen`, both by `angle`)
//!   approximate the rotation with a small scale error. Used up to
//!   [`MAX_TWO_SHEAR_ANGLE`].
//! - Three shears (V by `angle / 2`, H by `atan(sin(angle))`, V by
//!   `angle / 2`) are exact up to pixel rounding. Quality drops off for
//!   angles beyond about 0.35 rad.
//!
//! Every shear moves whole bands with a constant integer offset, so these
//! rotations work at any depth and never mix pixel values. A positive angle
//! rotates clockwise.

use crate::shear::{h_shear, h_shear_ip, v_shear, v_shear_ip};
use crate::{RotateFill, TransformError, TransformResult};
use raster_core::{Raster, RasterMut};

/// Below this angle (radians) rotation returns a copy.
pub const MIN_ANGLE_TO_ROTATE: f32 = 0.001;
/// Largest angle (radians) rotated with two shears.
pub const MAX_TWO_SHEAR_ANGLE: f32 = 0.05;
/// Above this angle (radians) three-shear rotation logs a quality warning.
pub const MAX_THREE_SHEAR_ANGLE: f32 = 0.35;

/// Rotate about (`xcen`, `ycen`) by shear.
///
/// Picks the identity, two shears or three shears from the size of the
/// angle. The result has the size, depth and colormap of `pix`; pixels
/// brought in from outside take `fill`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn rotate_shear(pix: &Raster, xcen: i32, ycen: i32, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    if !angle.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle {angle} is not finite"
        )));
    }
    if angle.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(pix.deep_clone());
    }
    if angle.abs() <= MAX_TWO_SHEAR_ANGLE {
        log::debug!("rotate_shear: two shears for angle {angle}");
        rotate_2_shear(pix, xcen, ycen, angle, fill)
    } else {
        log::debug!("rotate_shear: three shears for angle {angle}");
        rotate_3_shear(pix, xcen, ycen, angle, fill)
    }
}

/// Rotate about the image center by shear.
pub fn rotate_shear_center(pix: &Raster, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    let (xcen, ycen) = ((pix.width() / 2) as i32, (pix.height() / 2) as i32);
    rotate_shear(pix, xcen, ycen, angle, fill)
}

/// Rotate with a horizontal then a vertical shear.
///
/// Only accurate for small angles; the result is slightly stretched along
/// the diagonal as the angle grows.
pub fn rotate_2_shear(pix: &Raster, xcen: i32, ycen: i32, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    if angle.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(pix.deep_clone());
    }
    let pix1 = h_shear(pix, ycen, angle, fill)?;
    v_shear(&pix1, xcen, angle, fill)
}

/// Rotate with vertical, horizontal and vertical shears.
pub fn rotate_3_shear(pix: &Raster, xcen: i32, ycen: i32, angle: f32, fill: RotateFill) -> TransformResult<Raster> {
    if angle.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(pix.deep_clone());
    }
    if angle.abs() > MAX_THREE_SHEAR_ANGLE {
        log::warn!("rotate_3_shear: angle {angle} is large; quality will suffer");
    }
    let hangle = angle.sin().atan();
    let pix1 = v_shear(pix, xcen, angle / 2.0, fill)?;
    let pix2 = h_shear(&pix1, ycen, hangle, fill)?;
    v_shear(&pix2, xcen, angle / 2.0, fill)
}

/// Rotate in place about (`xcen`, `ycen`) with horizontal, vertical and
/// horizontal shears.
///
/// # Errors
///
/// Returns [`TransformError::ColormapNotSupported`] for a colormapped
/// raster and [`TransformError::InvalidParameters`] for a non-finite angle.
pub fn rotate_shear_ip(pix: &mut RasterMut, xcen: i32, ycen: i32, angle: f32, fill: RotateFill) -> TransformResult<()> {
    if pix.has_colormap() {
        return Err(TransformError::ColormapNotSupported(
            "rotate_shear_ip needs a raster without colormap".to_string(),
        ));
    }
    if !angle.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle {angle} is not finite"
        )));
    }
    if angle.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(());
    }
    if angle.abs() > MAX_THREE_SHEAR_ANGLE {
        log::warn!("rotate_shear_ip: angle {angle} is large; quality will suffer");
    }

    let hangle = angle.sin().atan();
    h_shear_ip(pix, ycen, angle / 2.0, fill)?;
    v_shear_ip(pix, xcen, hangle, fill)?;
    h_shear_ip(pix, ycen, angle / 2.0, fill)
}

/// Rotate in place about the image center.
pub fn rotate_shear_center_ip(pix: &mut RasterMut, angle: f32, fill: RotateFill) -> TransformResult<()> {
    let (xcen, ycen) = ((pix.width() / 2) as i32, (pix.height() / 2) as i32);
    rotate_shear_ip(pix, xcen, ycen, angle, fill)
}
