//! Rotation by an arbitrary angle
//!
//! [`rotate`] dispatches to shear or area-map rotation:
//!
//! - **Shear**: moves bands of pixels, never mixes values. Works at every
//!   depth and with colormaps.
//! - **AreaMap**: area-weighted interpolation on a 16x16 subpixel grid.
//!   Smooth results for 8 bpp gray and 32 bpp color.
//! - **AreaMapFast**: area mapping on a 4x4 grid.
//! - **Auto**: area mapping for 8 and 32 bpp without colormap, shear
//!   otherwise.
//!
//! Angles are in radians; positive angles rotate clockwise.

use crate::rotate_am::{AreaMapGrid, rotate_am_about};
use crate::rotate_shear::{MIN_ANGLE_TO_ROTATE, rotate_shear};
use crate::{TransformError, TransformResult};
use raster_core::{Colormap, InColor, PixelDepth, Raster};

/// Rotation algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateMethod {
    /// Two or three shears
    Shear,
    /// Area mapping on a 16x16 subpixel grid
    AreaMap,
    /// Area mapping on a 4x4 subpixel grid
    AreaMapFast,
    /// Automatic selection based on depth and colormap
    #[default]
    Auto,
}

/// Background fill for pixels brought in from outside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateFill {
    /// Fill with white pixels
    #[default]
    White,
    /// Fill with black pixels
    Black,
    /// Fill with a specific pixel value (interpretation depends on depth)
    Color(u32),
}

impl RotateFill {
    /// Pixel value of this fill at `depth`.
    ///
    /// White and black resolve like [`InColor`]: 0 is white at 1 bpp, and a
    /// colormap supplies its lightest or darkest entry.
    pub fn to_value(self, depth: PixelDepth, cmap: Option<&Colormap>) -> u32 {
        match self {
            RotateFill::White => InColor::White.pixel_value(depth, cmap),
            RotateFill::Black => InColor::Black.pixel_value(depth, cmap),
            RotateFill::Color(val) => val,
        }
    }
}

/// Options for [`rotate`]
#[derive(Debug, Clone)]
pub struct RotateOptions {
    /// Rotation algorithm to use
    pub method: RotateMethod,
    /// Background fill color
    pub fill: RotateFill,
    /// Custom rotation center X (None = image center)
    pub center_x: Option<f32>,
    /// Custom rotation center Y (None = image center)
    pub center_y: Option<f32>,
    /// Embed the image in a canvas large enough that no corner is clipped
    pub expand: bool,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            method: RotateMethod::Auto,
            fill: RotateFill::White,
            center_x: None,
            center_y: None,
            expand: false,
        }
    }
}

impl RotateOptions {
    /// Create options with a specific method
    pub fn with_method(method: RotateMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Create options with a specific fill color
    pub fn with_fill(fill: RotateFill) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    /// Set the rotation center
    pub fn center(mut self, x: f32, y: f32) -> Self {
        self.center_x = Some(x);
        self.center_y = Some(y);
        self
    }

    /// Set whether to expand output dimensions
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }
}

/// Rotate `pix` by `angle` radians.
///
/// Without `expand` the result has the input size and corners that rotate
/// out of the frame are lost. With `expand` the image is first centered on
/// a canvas that holds the whole rotated frame, filled with `fill`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle,
/// and [`TransformError::UnsupportedDepth`] when an area-map method is
/// requested for a depth other than 8 or 32 bpp.
///
/// # Example
///
/// ```
/// use raster_core::{PixelDepth, Raster};
/// use raster_transform::{RotateMethod, RotateOptions, rotate};
///
/// let pix = Raster::new(100, 60, PixelDepth::Bit8).unwrap();
/// let options = RotateOptions::with_method(RotateMethod::AreaMap).expand(true);
/// let rotated = rotate(&pix, 0.5, &options).unwrap();
/// assert!(rotated.width() > 100);
/// ```
pub fn rotate(pix: &Raster, angle: f32, options: &RotateOptions) -> TransformResult<Raster> {
    if !angle.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle {angle} is not finite"
        )));
    }
    if angle.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(pix.deep_clone());
    }

    let method = select_rotate_method(options.method, pix);
    log::debug!("rotate: {method:?} for angle {angle}");

    let (w, h) = (pix.width(), pix.height());
    let mut xcen = options.center_x.unwrap_or((w / 2) as f32).round() as i32;
    let mut ycen = options.center_y.unwrap_or((h / 2) as f32).round() as i32;

    let canvas = if options.expand {
        let (nw, nh) = calculate_rotated_bounds(w as f32, h as f32, angle.cos(), angle.sin());
        let (nw, nh) = ((nw as u32).max(w), (nh as u32).max(h));
        let (left, top) = ((nw - w) / 2, (nh - h) / 2);
        let fillval = options.fill.to_value(pix.depth(), pix.colormap());
        xcen += left as i32;
        ycen += top as i32;
        pix.add_border_general(left, nw - w - left, top, nh - h - top, fillval)?
    } else {
        pix.clone()
    };

    match method {
        RotateMethod::AreaMap => rotate_am_about(&canvas, xcen, ycen, angle, options.fill, AreaMapGrid::Fine),
        RotateMethod::AreaMapFast => {
            rotate_am_about(&canvas, xcen, ycen, angle, options.fill, AreaMapGrid::Coarse)
        }
        RotateMethod::Shear | RotateMethod::Auto => rotate_shear(&canvas, xcen, ycen, angle, options.fill),
    }
}

/// Rotate with a specific method about the image center, keeping the size.
pub fn rotate_with_method(pix: &Raster, angle: f32, method: RotateMethod) -> TransformResult<Raster> {
    rotate(pix, angle, &RotateOptions::with_method(method))
}

/// Rotate about a specified center point, keeping the size.
pub fn rotate_about_center(
    pix: &Raster,
    angle: f32,
    center_x: f32,
    center_y: f32,
    fill: RotateFill,
) -> TransformResult<Raster> {
    let options = RotateOptions::with_fill(fill).center(center_x, center_y);
    rotate(pix, angle, &options)
}

/// Resolve `Auto` from the raster's depth and colormap
fn select_rotate_method(method: RotateMethod, pix: &Raster) -> RotateMethod {
    match method {
        RotateMethod::Auto => match pix.depth() {
            PixelDepth::Bit8 | PixelDepth::Bit32 if !pix.has_colormap() => RotateMethod::AreaMap,
            _ => RotateMethod::Shear,
        },
        other => other,
    }
}

/// Width and height of the box holding a `w` x `h` frame rotated by the
/// angle with the given cosine and sine
fn calculate_rotated_bounds(w: f32, h: f32, cos_a: f32, sin_a: f32) -> (f32, f32) {
    let corners = [
        (-w / 2.0, -h / 2.0),
        (w / 2.0, -h / 2.0),
        (w / 2.0, h / 2.0),
        (-w / 2.0, h / 2.0),
    ];

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;

    for (x, y) in corners {
        let rx = x * cos_a - y * sin_a;
        let ry = x * sin_a + y * cos_a;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    ((max_x - min_x).ceil(), (max_y - min_y).ceil())
}
