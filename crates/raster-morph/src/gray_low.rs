//! Moving-window extremum (van Herk / Gil-Werman)
//!
//! For a flat window of odd length `size`, the output positions are split
//! into groups of `size`. All windows of a group overlap at one center
//! sample; a running extremum computed backward from that sample and one
//! computed forward from it bracket every window of the group, so each
//! output costs at most two comparisons whatever the window length.

/// Which extremum to take over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extremum {
    /// Maximum (dilation)
    Max,
    /// Minimum (erosion)
    Min,
}

impl Extremum {
    #[inline(always)]
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extremum::Max => a.max(b),
            Extremum::Min => a.min(b),
        }
    }
}

/// Windowed extremum of `src` into `dst`.
///
/// Writes every position `p` in `[size / 2, n - size / 2)`, the positions
/// whose whole window `[p - size / 2, p + size / 2]` lies inside the line.
/// Other positions of `dst` are left as they are. `buf` is scratch space,
/// reused across lines.
pub(crate) fn extremum_line(src: &[u8], dst: &mut [u8], size: usize, ext: Extremum, buf: &mut Vec<u8>) {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert!(size % 2 == 1);
    let n = src.len();
    let hsize = size / 2;
    if n < size {
        return;
    }
    if size == 1 {
        dst.copy_from_slice(src);
        return;
    }

    let nsteps = (n - 2 * hsize) / size;
    buf.clear();
    buf.resize(2 * size - 1, 0);

    for group in 0..nsteps {
        let center = (group + 1) * size - 1;
        let mid = size - 1;

        buf[mid] = src[center];
        for k in 1..size {
            buf[mid - k] = ext.pick(buf[mid - k + 1], src[center - k]);
            buf[mid + k] = ext.pick(buf[mid + k - 1], src[center + k]);
        }

        let startx = hsize + group * size;
        dst[startx] = buf[0];
        dst[startx + size - 1] = buf[2 * size - 2];
        for k in 1..size - 1 {
            dst[startx + k] = ext.pick(buf[k], buf[k + size - 1]);
        }
    }

    // Positions after the last whole group
    for p in hsize + nsteps * size..n - hsize {
        let window = &src[p - hsize..=p + hsize];
        dst[p] = match ext {
            Extremum::Max => window.iter().copied().max().unwrap_or(0),
            Extremum::Min => window.iter().copied().min().unwrap_or(0),
        };
    }
}
