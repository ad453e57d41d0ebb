//! raster-transform - Rotation and shear for bit-packed rasters
//!
//! This crate provides:
//!
//! - Horizontal and vertical shears, copying or in place, at any depth
//! - Rotation by two or three shears
//! - Rotation by area mapping for 8 bpp gray and 32 bpp color
//! - A [`rotate`] dispatcher with [`RotateOptions`]
//!
//! Angles are in radians and positive angles rotate clockwise.

mod error;
pub mod rotate;
pub mod rotate_am;
pub mod rotate_shear;
pub mod shear;

pub use error::{TransformError, TransformResult};

pub use rotate::{
    RotateFill, RotateMethod, RotateOptions, rotate, rotate_about_center, rotate_with_method,
};
pub use rotate_am::{
    AreaMapGrid, rotate_am, rotate_am_about, rotate_am_corner, rotate_am_fast, rotate_am_with_grid,
};
pub use rotate_shear::{
    MAX_THREE_SHEAR_ANGLE, MAX_TWO_SHEAR_ANGLE, MIN_ANGLE_TO_ROTATE, rotate_2_shear,
    rotate_3_shear, rotate_shear, rotate_shear_center, rotate_shear_center_ip, rotate_shear_ip,
};
pub use shear::{
    h_shear, h_shear_center, h_shear_corner, h_shear_ip, v_shear, v_shear_center, v_shear_corner,
    v_shear_ip,
};
