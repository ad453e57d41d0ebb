//! Word-level rasterop kernels
//!
//! All positions here are in bits within a row (pixel x times depth), so the
//! kernels are depth-agnostic. Rectangles are already clipped by the caller.
//!
//! A destination row span `[dbit, dbit + wbits)` touches a first word, some
//! full words, and a last word. Partial words are combined as
//! `(d & !mask) | (f(s, d) & mask)`. The source words feeding the span are
//! read one of three ways:
//!
//! - both spans word-aligned: source word `k` feeds destination word `k`
//! - same bit phase (`sbit & 31 == dbit & 31`): the same, offset by a whole
//!   number of words, with edge masks on the ends
//! - anything else: each destination word is assembled from two adjacent
//!   source words with a shift

use super::rop::RopOp;

/// Mask with the `n` most significant bits set.
#[inline]
pub(crate) fn lmask(n: u32) -> u32 {
    match n {
        0 => 0,
        32.. => 0xffff_ffff,
        _ => 0xffff_ffff << (32 - n),
    }
}

/// Mask with the `n` least significant bits set.
#[inline]
pub(crate) fn rmask(n: u32) -> u32 {
    match n {
        32.. => 0xffff_ffff,
        _ => (1u32 << n) - 1,
    }
}

#[inline(always)]
fn combine(d: &mut u32, s: u32, mask: u32, op: RopOp) {
    *d = (*d & !mask) | (op.apply(s, *d) & mask);
}

/// Apply `op` to the bit span `[dbit, dbit + wbits)` of one row, with
/// `src_word(k)` giving the source bits aligned to destination word `k`.
#[inline(always)]
fn rop_span<F: Fn(usize) -> u32>(drow: &mut [u32], dbit: u32, wbits: u32, op: RopOp, src_word: F) {
    let first = (dbit >> 5) as usize;
    let doff = dbit & 31;
    let end = dbit + wbits;
    let last = ((end - 1) >> 5) as usize;

    if first == last {
        let mask = lmask(wbits) >> doff;
        combine(&mut drow[first], src_word(first), mask, op);
        return;
    }

    combine(&mut drow[first], src_word(first), 0xffff_ffff >> doff, op);
    for k in first + 1..last {
        drow[k] = op.apply(src_word(k), drow[k]);
    }
    let tail = end - (last as u32) * 32;
    combine(&mut drow[last], src_word(last), lmask(tail), op);
}

/// Destination-only rasterop over a clipped rectangle.
pub(crate) fn rasterop_uni_low(
    data: &mut [u32],
    wpl: usize,
    dbit: u32,
    dy: u32,
    wbits: u32,
    h: u32,
    op: RopOp,
) {
    for y in dy..dy + h {
        let start = y as usize * wpl;
        rop_span(&mut data[start..start + wpl], dbit, wbits, op, |_| 0);
    }
}

/// Write a replicated word pattern into a clipped rectangle.
pub(crate) fn fill_rect_low(
    data: &mut [u32],
    wpl: usize,
    dbit: u32,
    dy: u32,
    wbits: u32,
    h: u32,
    pattern: u32,
) {
    for y in dy..dy + h {
        let start = y as usize * wpl;
        rop_span(
            &mut data[start..start + wpl],
            dbit,
            wbits,
            RopOp::Src,
            |_| pattern,
        );
    }
}

/// Two-operand rasterop over a clipped rectangle.
#[allow(clippy::too_many_arguments)]
pub(crate) fn rasterop_low(
    ddata: &mut [u32],
    dwpl: usize,
    dbit: u32,
    dy: u32,
    wbits: u32,
    h: u32,
    op: RopOp,
    sdata: &[u32],
    swpl: usize,
    sbit: u32,
    sy: u32,
) {
    let aligned = dbit & 31 == 0 && sbit & 31 == 0;
    let same_phase = dbit & 31 == sbit & 31;

    for i in 0..h as usize {
        let dstart = (dy as usize + i) * dwpl;
        let sstart = (sy as usize + i) * swpl;
        let drow = &mut ddata[dstart..dstart + dwpl];
        let srow = &sdata[sstart..sstart + swpl];

        if aligned {
            rop_row_aligned(drow, dbit, wbits, srow, sbit, op);
        } else if same_phase {
            rop_row_same_phase(drow, dbit, wbits, srow, sbit, op);
        } else {
            rop_row_general(drow, dbit, wbits, srow, sbit, op);
        }
    }
}

/// Both spans start on a word boundary: no first-word mask.
fn rop_row_aligned(drow: &mut [u32], dbit: u32, wbits: u32, srow: &[u32], sbit: u32, op: RopOp) {
    let d0 = (dbit >> 5) as usize;
    let s0 = (sbit >> 5) as usize;
    let nfull = (wbits >> 5) as usize;
    let rem = wbits & 31;

    for (d, &s) in drow[d0..d0 + nfull].iter_mut().zip(&srow[s0..s0 + nfull]) {
        *d = op.apply(s, *d);
    }
    if rem > 0 {
        combine(&mut drow[d0 + nfull], srow[s0 + nfull], lmask(rem), op);
    }
}

/// Source and destination share the bit offset within their words.
fn rop_row_same_phase(drow: &mut [u32], dbit: u32, wbits: u32, srow: &[u32], sbit: u32, op: RopOp) {
    let d0 = (dbit >> 5) as usize;
    let s0 = (sbit >> 5) as usize;
    rop_span(drow, dbit, wbits, op, |k| srow[k - d0 + s0]);
}

/// Arbitrary relative alignment: shift and merge two source words per
/// destination word.
fn rop_row_general(drow: &mut [u32], dbit: u32, wbits: u32, srow: &[u32], sbit: u32, op: RopOp) {
    // Source bit position aligned with the MSB of destination word k is
    // 32 * k + delta; its in-word offset is the same for every k.
    let delta = i64::from(sbit) - i64::from(dbit);
    let shift = delta.rem_euclid(32) as u32;
    let word_base = delta.div_euclid(32);
    let word = |i: i64| -> u32 {
        if i < 0 {
            0
        } else {
            srow.get(i as usize).copied().unwrap_or(0)
        }
    };
    rop_span(drow, dbit, wbits, op, |k| {
        let i = k as i64 + word_base;
        (word(i) << shift) | (word(i + 1) >> (32 - shift))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Per-bit reference for one row.
    fn reference_row(drow: &mut [u32], dbit: u32, wbits: u32, srow: &[u32], sbit: u32, op: RopOp) {
        let bit = |row: &[u32], p: u32| (row[(p >> 5) as usize] >> (31 - (p & 31))) & 1;
        for i in 0..wbits {
            let s = bit(srow, sbit + i);
            let dp = dbit + i;
            let d = bit(drow, dp);
            let v = op.apply(s, d) & 1;
            let w = &mut drow[(dp >> 5) as usize];
            let sh = 31 - (dp & 31);
            *w = (*w & !(1 << sh)) | (v << sh);
        }
    }

    fn pattern(n: usize, seed: u32) -> Vec<u32> {
        let mut x = seed;
        (0..n)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x
            })
            .collect()
    }

    #[test]
    fn test_masks() {
        assert_eq!(lmask(0), 0);
        assert_eq!(lmask(3), 0xe000_0000);
        assert_eq!(lmask(32), 0xffff_ffff);
        assert_eq!(rmask(4), 0xf);
        assert_eq!(rmask(32), 0xffff_ffff);
    }

    #[test]
    fn test_all_paths_match_reference() {
        let src = pattern(6, 0x1234_5678);
        let dst0 = pattern(6, 0x9abc_def0);
        for op in [RopOp::Src, RopOp::SrcXorDst, RopOp::NotSrcAndDst, RopOp::SrcOrNotDst] {
            for dbit in 0..64 {
                for sbit in (0..64).step_by(7) {
                    for wbits in [1, 5, 31, 32, 33, 70, 96] {
                        let mut got = dst0.clone();
                        let mut want = dst0.clone();
                        rasterop_low(&mut got, 6, dbit, 0, wbits, 1, op, &src, 6, sbit, 0);
                        reference_row(&mut want, dbit, wbits, &src, sbit, op);
                        assert_eq!(
                            got, want,
                            "op {op:?} dbit {dbit} sbit {sbit} wbits {wbits}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_uni_low_single_word() {
        let mut row = vec![0u32; 2];
        rasterop_uni_low(&mut row, 2, 4, 0, 8, 1, RopOp::Set);
        assert_eq!(row, vec![0x0ff0_0000, 0]);
        rasterop_uni_low(&mut row, 2, 28, 0, 8, 1, RopOp::NotDst);
        assert_eq!(row, vec![0x0ff0_000f, 0xf000_0000]);
    }

    #[test]
    fn test_fill_rect_low_rows() {
        let mut data = vec![0u32; 4];
        fill_rect_low(&mut data, 2, 8, 1, 40, 1, 0xaaaa_aaaa);
        assert_eq!(data, vec![0, 0, 0x00aa_aaaa, 0xaaaa_0000]);
    }
}
