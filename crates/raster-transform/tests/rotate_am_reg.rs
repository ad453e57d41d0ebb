//! Area-map rotation regression test
//!
//! Tests:
//!   (1) Tiny angles return an identical copy
//!   (2) Total intensity is approximately conserved
//!   (3) Rotating by a then -a nearly restores a smooth image
//!   (4) Area-map and shear rotation turn the same way
//!   (5) 32 bpp channels rotate exactly like the matching gray image
//!   (6) The dispatcher picks a method that handles every depth
//!
//! Run with:
//! ```text
//! cargo test -p raster-transform --test rotate_am_reg
//! ```

use raster_core::{PixelDepth, Raster, Rect, compose_rgba};
use raster_test::{RegParams, gray_disk, gray_gradient, random_raster};
use raster_transform::{
    RotateFill, RotateMethod, RotateOptions, rotate, rotate_am, rotate_am_fast,
    rotate_shear_center,
};

#[test]
fn rotate_am_reg() {
    let mut rp = RegParams::new("rotate_am");

    // (1) Identity
    eprintln!("  Testing tiny angles");
    for depth in [PixelDepth::Bit8, PixelDepth::Bit32] {
        let pix = random_raster(45, 38, depth, 11).unwrap();
        rp.compare_pix(&rotate_am(&pix, 0.0, RotateFill::White).unwrap(), &pix);
        rp.compare_pix(&rotate_am_fast(&pix, 0.0005, RotateFill::White).unwrap(), &pix);
    }

    // (2) Conservation
    eprintln!("  Testing intensity conservation");
    let disk = gray_disk(128, 128, 30.0, 0, 200).unwrap();
    let total = disk.pixel_sum() as f64;
    for angle in [0.3f32, -0.7, 1.2] {
        let fine = rotate_am(&disk, angle, RotateFill::Black).unwrap();
        rp.compare_values(total, fine.pixel_sum() as f64, 0.01 * total);
        let coarse = rotate_am_fast(&disk, angle, RotateFill::Black).unwrap();
        rp.compare_values(total, coarse.pixel_sum() as f64, 0.02 * total);
    }

    // (3) Round trip
    eprintln!("  Testing rotation round trip");
    let grad = gray_gradient(120, 120).unwrap();
    let interior = Rect::new_unchecked(30, 30, 60, 60);
    for angle in [0.2f32, -0.45] {
        let once = rotate_am(&grad, angle, RotateFill::White).unwrap();
        let back = rotate_am(&once, -angle, RotateFill::White).unwrap();
        rp.compare_pix_within(&back, &grad, Some(interior), 3);
    }

    // (4) Same direction as shear rotation
    eprintln!("  Testing against shear rotation");
    for angle in [0.2f32, -0.3] {
        let am = rotate_am(&grad, angle, RotateFill::White).unwrap();
        let sh = rotate_shear_center(&grad, angle, RotateFill::White).unwrap();
        rp.compare_pix_within(&am, &sh, Some(interior), 6);
    }

    // (5) Color channels
    eprintln!("  Testing color channels");
    let mut pm = Raster::new(120, 120, PixelDepth::Bit32).unwrap().to_mut();
    for y in 0..120 {
        for x in 0..120 {
            let g = grad.get_pixel(x, y).unwrap() as u8;
            pm.set_pixel_unchecked(x, y, compose_rgba(g, g, g, 255));
        }
    }
    let color: Raster = pm.into();
    let gray_out = rotate_am(&grad, 0.35, RotateFill::Black).unwrap();
    let color_out = rotate_am(&color, 0.35, RotateFill::Color(compose_rgba(0, 0, 0, 255))).unwrap();
    let mut ok = true;
    for y in 0..120 {
        for x in 0..120 {
            let g = gray_out.get_pixel(x, y).unwrap() as u8;
            ok &= color_out.get_pixel(x, y) == Some(compose_rgba(g, g, g, 255));
        }
    }
    rp.check(ok, "color channels match gray rotation");

    // (6) Dispatcher
    eprintln!("  Testing dispatcher");
    for depth in [
        PixelDepth::Bit1,
        PixelDepth::Bit4,
        PixelDepth::Bit8,
        PixelDepth::Bit16,
        PixelDepth::Bit32,
    ] {
        let pix = random_raster(50, 30, depth, 21).unwrap();
        let out = rotate(&pix, 0.25, &RotateOptions::default()).unwrap();
        rp.check(
            out.width() == 50 && out.height() == 30 && out.depth() == depth,
            &format!("auto rotation at {} bpp", depth.bits()),
        );
    }
    let out = rotate(
        &disk,
        0.25,
        &RotateOptions::with_method(RotateMethod::AreaMapFast).expand(true),
    )
    .unwrap();
    rp.check(out.width() > 128 && out.height() > 128, "expanded canvas");

    eprintln!();
    assert!(rp.cleanup(), "rotate_am regression test failed");
}
