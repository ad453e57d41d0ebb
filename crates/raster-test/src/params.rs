//! Regression test parameters and checks

use raster_core::{Raster, Rect};

/// Regression test parameters
///
/// Tracks the test name, a running check index and every failure, so a
/// regression test can run all its checks and report them together at
/// [`cleanup`](RegParams::cleanup).
pub struct RegParams {
    /// Name of the test (e.g., "rasterop")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            return self.fail(msg);
        }
        true
    }

    /// Record a boolean check
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!(
                "Failure in {}_reg: check {} failed: {}",
                self.test_name, self.index, what
            );
            return self.fail(msg);
        }
        true
    }

    /// Compare two rasters for exact equality
    ///
    /// Size, depth and every pixel must match; pad bits are ignored.
    pub fn compare_pix(&mut self, pix1: &Raster, pix2: &Raster) -> bool {
        self.compare_pix_within(pix1, pix2, None, 0)
    }

    /// Compare two rasters inside `rect` (or everywhere), allowing each
    /// pixel to differ by up to `max_diff`
    ///
    /// For 32 bpp rasters the difference is taken per color channel.
    pub fn compare_pix_within(
        &mut self,
        pix1: &Raster,
        pix2: &Raster,
        rect: Option<Rect>,
        max_diff: u32,
    ) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            );
            return self.fail(msg);
        }

        let rect = rect.unwrap_or_else(|| Rect::full(pix1.width(), pix1.height()));
        match pix1.compare_in_rect(pix2, rect) {
            Ok(result) if result.max_diff <= max_diff => true,
            Ok(result) => {
                let msg = format!(
                    "Failure in {}_reg: pix comparison for index {} - {} pixels differ, \
                     max diff {} > {}",
                    self.test_name, self.index, result.n_diff, result.max_diff, max_diff
                );
                self.fail(msg)
            }
            Err(e) => {
                let msg = format!(
                    "Failure in {}_reg: pix comparison for index {} - {}",
                    self.test_name, self.index, e
                );
                self.fail(msg)
            }
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::PixelDepth;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_pix_tolerance() {
        let a = Raster::new(8, 8, PixelDepth::Bit8).unwrap();
        let mut bm = a.to_mut();
        bm.set_pixel(3, 3, 2).unwrap();
        let b: Raster = bm.into();

        let mut rp = RegParams::new("test");
        assert!(!rp.compare_pix(&a, &b));
        assert!(rp.compare_pix_within(&a, &b, None, 2));
        assert!(rp.compare_pix_within(&a, &b, Some(Rect::new_unchecked(4, 0, 4, 8)), 0));
        assert_eq!(rp.index(), 3);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_size_mismatch() {
        let a = Raster::new(8, 8, PixelDepth::Bit8).unwrap();
        let b = Raster::new(8, 9, PixelDepth::Bit8).unwrap();
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_pix(&a, &b));
    }
}
