//! Rasterop regression test
//!
//! The word-level rasterop is checked against a per-pixel evaluation of the
//! same truth table, over all 16 ops, every destination bit phase and a
//! spread of source phases, with rectangles that hang off either raster.

use raster_core::{PixelDepth, Raster, RasterMut, Rect, RopOp};
use raster_test::{RegParams, random_raster};

/// Per-pixel rasterop with clipping by definition: a destination pixel is
/// written iff it lies in `rect` and, for ops that read the source, its
/// source pixel lies in `src`. Dest-only ops never look at `src`.
fn reference_rasterop(dst: &Raster, rect: Rect, op: RopOp, src: &Raster, sx: i32, sy: i32) -> Raster {
    let mut out = dst.to_mut();
    let max = dst.depth().max_value();
    for y in 0..dst.height() as i32 {
        for x in 0..dst.width() as i32 {
            if !rect.contains_point(x, y) {
                continue;
            }
            let d = dst.get_pixel(x as u32, y as u32).unwrap();
            if !op.requires_source() {
                out.set_pixel(x as u32, y as u32, op.apply(0, d) & max).unwrap();
                continue;
            }
            let (px, py) = (sx + x - rect.x, sy + y - rect.y);
            if px < 0 || py < 0 || px >= src.width() as i32 || py >= src.height() as i32 {
                continue;
            }
            let s = src.get_pixel(px as u32, py as u32).unwrap();
            out.set_pixel(x as u32, y as u32, op.apply(s, d) & max).unwrap();
        }
    }
    out.into()
}

fn apply(dst: &Raster, rect: Rect, op: RopOp, src: &Raster, sx: i32, sy: i32) -> Raster {
    let mut out: RasterMut = dst.to_mut();
    out.rasterop(rect, op, src, sx, sy).unwrap();
    out.into()
}

#[test]
fn rasterop_reg() {
    let mut rp = RegParams::new("rasterop");

    // All alignments at 1 bpp
    let src = random_raster(150, 5, PixelDepth::Bit1, 1).unwrap();
    let dst = random_raster(160, 6, PixelDepth::Bit1, 2).unwrap();
    for code in 0..16 {
        let op = RopOp::from_code(code).unwrap();
        let mut ok = true;
        for dx in 0..64 {
            for sx in (0..64).step_by(5) {
                let rect = Rect::new_unchecked(dx, 1, 45 + (dx % 7) * 9, 4);
                let got = apply(&dst, rect, op, &src, sx, 0);
                let want = reference_rasterop(&dst, rect, op, &src, sx, 0);
                ok &= got.equals(&want);
            }
        }
        rp.check(ok, &format!("alignment sweep for {op:?}"));
    }

    // Multi-bit depths
    for (i, depth) in [PixelDepth::Bit2, PixelDepth::Bit4, PixelDepth::Bit8, PixelDepth::Bit16]
        .into_iter()
        .enumerate()
    {
        let src = random_raster(45, 9, depth, 10 + i as u64).unwrap();
        let dst = random_raster(50, 11, depth, 20 + i as u64).unwrap();
        for op in [RopOp::Src, RopOp::SrcXorDst, RopOp::NotSrcOrDst, RopOp::SUBTRACT] {
            let mut ok = true;
            for dx in 0..17 {
                for sx in [0, 1, 3, 8, 13] {
                    let rect = Rect::new_unchecked(dx, 2, 30, 6);
                    ok &= apply(&dst, rect, op, &src, sx, 1)
                        .equals(&reference_rasterop(&dst, rect, op, &src, sx, 1));
                }
            }
            rp.check(ok, &format!("{op:?} at {} bpp", depth.bits()));
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn rasterop_clipping_reg() {
    let mut rp = RegParams::new("rasterop_clipping");

    let src = random_raster(30, 20, PixelDepth::Bit8, 5).unwrap();
    let dst = random_raster(40, 25, PixelDepth::Bit8, 6).unwrap();
    let cases = [
        (Rect::new_unchecked(-5, -3, 20, 10), 0, 0),
        (Rect::new_unchecked(30, 20, 20, 20), 2, 2),
        (Rect::new_unchecked(3, 4, 100, 100), -7, -2),
        (Rect::new_unchecked(0, 0, 40, 25), 25, 15),
        (Rect::new_unchecked(-50, 0, 10, 10), 0, 0),
        (Rect::new_unchecked(10, 10, 0, 5), 0, 0),
    ];
    for (rect, sx, sy) in cases {
        let got = apply(&dst, rect, RopOp::SrcXorDst, &src, sx, sy);
        let want = reference_rasterop(&dst, rect, RopOp::SrcXorDst, &src, sx, sy);
        rp.compare_pix(&got, &want);
    }

    assert!(rp.cleanup());
}

#[test]
fn rasterop_inverse_reg() {
    let mut rp = RegParams::new("rasterop_inverse");

    let src = random_raster(77, 13, PixelDepth::Bit1, 7).unwrap();
    let dst = random_raster(80, 15, PixelDepth::Bit1, 8).unwrap();
    let rect = Rect::new_unchecked(3, 1, 70, 12);
    for code in 0..16 {
        let op = RopOp::from_code(code).unwrap();
        let Some(inv) = op.inverse() else {
            continue;
        };
        let once = apply(&dst, rect, op, &src, 5, 0);
        let back = apply(&once, rect, inv, &src, 5, 0);
        rp.compare_pix(&back, &dst);
    }

    assert!(rp.cleanup());
}

#[test]
fn test_rasterop_uni_invert_scenario() {
    let mut pm = Raster::new(32, 32, PixelDepth::Bit1).unwrap().to_mut();
    pm.set_pixel(0, 0, 1).unwrap();
    pm.rasterop_uni(Rect::new_unchecked(0, 0, 32, 32), RopOp::NotDst)
        .unwrap();
    let pix: Raster = pm.into();

    assert_eq!(pix.get_pixel(0, 0), Some(0));
    let ones = (0..32)
        .flat_map(|y| (0..32).map(move |x| (x, y)))
        .filter(|&(x, y)| pix.get_pixel(x, y) == Some(1))
        .count();
    assert_eq!(ones, 32 * 32 - 1);
}

#[test]
fn test_dest_only_op_ignores_source_depth() {
    let src = Raster::new(8, 8, PixelDepth::Bit8).unwrap();
    let mut pm = Raster::new(8, 8, PixelDepth::Bit1).unwrap().to_mut();
    pm.rasterop(Rect::full(8, 8), RopOp::Set, &src, 0, 0)
        .unwrap();
    assert_eq!(pm.get_pixel(7, 7), Some(1));
}

#[test]
fn test_dest_only_op_ignores_source_extent() {
    // The source is far smaller than the rect; dest-only ops still cover it all
    let src = Raster::new(2, 2, PixelDepth::Bit1).unwrap();
    let dst = random_raster(70, 6, PixelDepth::Bit1, 9).unwrap();
    let rect = Rect::new_unchecked(5, 1, 60, 4);

    let set = apply(&dst, rect, RopOp::Set, &src, 40, 0);
    let not = apply(&dst, rect, RopOp::NotDst, &src, 40, 0);
    let clear = apply(&dst, rect, RopOp::Clear, &src, 40, 0);
    for y in 0..6 {
        for x in 0..70 {
            let d = dst.get_pixel(x, y).unwrap();
            let inside = (5..65).contains(&x) && (1..5).contains(&y);
            assert_eq!(set.get_pixel(x, y), Some(if inside { 1 } else { d }));
            assert_eq!(not.get_pixel(x, y), Some(if inside { d ^ 1 } else { d }));
            assert_eq!(clear.get_pixel(x, y), Some(if inside { 0 } else { d }));
        }
    }
}
