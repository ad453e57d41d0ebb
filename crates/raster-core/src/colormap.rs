//! Colormap attached to indexed rasters
//!
//! The engine never quantizes or converts through a colormap. It only needs
//! to know whether one is present (in-place shears refuse indexed rasters)
//! and which entry is closest to white or black when bringing in a fill
//! color.

use crate::error::{Error, Result};

/// RGBA palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create an RGB entry (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    fn intensity(&self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }
}

/// Palette for 1, 2, 4 and 8 bpp rasters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    colors: Vec<RgbaQuad>,
    depth: u32,
}

impl Colormap {
    /// Create an empty colormap for the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColormapNotAllowed`] unless `depth` is 1, 2, 4 or 8.
    pub fn new(depth: u32) -> Result<Self> {
        if !matches!(depth, 1 | 2 | 4 | 8) {
            return Err(Error::ColormapNotAllowed(depth));
        }
        Ok(Self {
            colors: Vec::new(),
            depth,
        })
    }

    /// Create a linear gray ramp filling every entry.
    pub fn linear_gray(depth: u32) -> Result<Self> {
        let mut cmap = Self::new(depth)?;
        let n = cmap.max_entries();
        for i in 0..n {
            let v = (255 * i / (n - 1)) as u8;
            cmap.colors.push(RgbaQuad::rgb(v, v, v));
        }
        Ok(cmap)
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Maximum number of entries for the depth (2^depth).
    #[inline]
    pub fn max_entries(&self) -> usize {
        1 << self.depth
    }

    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors.get(index)
    }

    /// Append an RGB entry and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the colormap is full.
    pub fn add_rgb(&mut self, red: u8, green: u8, blue: u8) -> Result<usize> {
        if self.colors.len() >= self.max_entries() {
            return Err(Error::InvalidParameter(format!(
                "colormap full: {} entries at depth {}",
                self.colors.len(),
                self.depth
            )));
        }
        self.colors.push(RgbaQuad::rgb(red, green, blue));
        Ok(self.colors.len() - 1)
    }

    /// Index of the lightest (`white == true`) or darkest entry.
    ///
    /// Returns 0 for an empty colormap.
    pub fn extreme_index(&self, white: bool) -> usize {
        let iter = self.colors.iter().enumerate();
        let found = if white {
            iter.max_by_key(|(_, c)| c.intensity())
        } else {
            iter.min_by_key(|(_, c)| c.intensity())
        };
        found.map_or(0, |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_deep_rasters() {
        assert!(Colormap::new(16).is_err());
        assert!(Colormap::new(32).is_err());
        assert!(Colormap::new(8).is_ok());
    }

    #[test]
    fn test_add_until_full() {
        let mut cmap = Colormap::new(1).unwrap();
        assert_eq!(cmap.add_rgb(0, 0, 0).unwrap(), 0);
        assert_eq!(cmap.add_rgb(255, 255, 255).unwrap(), 1);
        assert!(cmap.add_rgb(9, 9, 9).is_err());
    }

    #[test]
    fn test_extreme_index() {
        let mut cmap = Colormap::new(2).unwrap();
        cmap.add_rgb(120, 120, 120).unwrap();
        cmap.add_rgb(250, 240, 255).unwrap();
        cmap.add_rgb(10, 0, 5).unwrap();
        assert_eq!(cmap.extreme_index(true), 1);
        assert_eq!(cmap.extreme_index(false), 2);
    }

    #[test]
    fn test_linear_gray() {
        let cmap = Colormap::linear_gray(2).unwrap();
        assert_eq!(cmap.len(), 4);
        assert_eq!(cmap.get(3).unwrap().red, 255);
        assert_eq!(cmap.get(1).unwrap().green, 85);
    }
}
