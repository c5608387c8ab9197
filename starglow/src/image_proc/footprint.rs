//! Square glow footprints and their clipping against the image buffer.
//!
//! A footprint is the odd-sided square of pixels a bounded glow may touch,
//! centered on the star pixel. Stars near an edge (or entirely outside the
//! buffer) get a clipped region with inclusive bounds, computed independently
//! on all four sides.
//!
//! # Examples
//!
//! ```rust
//! use starglow::image_proc::footprint::Footprint;
//!
//! // Star in the top-left corner of a 100x100 buffer
//! let footprint = Footprint::new(0, 0, 5);
//! let region = footprint.clip(100, 100).unwrap();
//! assert_eq!((region.min_row, region.min_col), (0, 0));
//! assert_eq!((region.max_row, region.max_col), (5, 5));
//! assert_eq!(region.area(), 36);
//! ```

/// Half-width in pixels of the footprint for a glow radius.
///
/// `floor(max_theta / degrees_per_pixel - 0.5)`: the center pixel and the
/// boundary pixels, where the glow is exactly zero, each account for half a
/// pixel. Radii under one pixel degenerate to a lone center pixel.
pub fn half_width_for_radius(max_theta: f64, degrees_per_pixel: f64) -> usize {
    let half_width = (max_theta / degrees_per_pixel - 0.5).floor();
    if half_width > 0.0 {
        half_width as usize
    } else {
        0
    }
}

/// Unclipped square footprint around a star pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Star column
    pub center_x: i64,
    /// Star row
    pub center_y: i64,
    pub half_width: usize,
}

impl Footprint {
    pub fn new(center_x: i64, center_y: i64, half_width: usize) -> Self {
        Self {
            center_x,
            center_y,
            half_width,
        }
    }

    /// Side length of the full square, always odd.
    pub fn side(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Corner pixels as `(x, y)`: top-left, bottom-left, top-right, bottom-right.
    pub fn corners(&self) -> [(i64, i64); 4] {
        let h = self.half_width as i64;
        let (x, y) = (self.center_x, self.center_y);
        [
            (x - h, y - h),
            (x - h, y + h),
            (x + h, y - h),
            (x + h, y + h),
        ]
    }

    /// Intersect the footprint with a `width` x `height` buffer.
    ///
    /// Returns `None` when nothing of the square lands inside the buffer.
    pub fn clip(&self, width: usize, height: usize) -> Option<ClippedRegion> {
        let h = self.half_width as i64;
        let (min_col, max_col) = clip_axis(self.center_x - h, self.center_x + h, width)?;
        let (min_row, max_row) = clip_axis(self.center_y - h, self.center_y + h, height)?;

        Some(ClippedRegion {
            min_row,
            min_col,
            max_row,
            max_col,
        })
    }
}

fn clip_axis(low: i64, high: i64, len: usize) -> Option<(usize, usize)> {
    let last = len as i64 - 1;
    if len == 0 || high < 0 || low > last {
        return None;
    }
    Some((low.max(0) as usize, high.min(last) as usize))
}

/// Part of a footprint inside the buffer, inclusive bounds in (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedRegion {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl ClippedRegion {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains_point(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_width_for_radius() {
        // 0.334 deg at 0.05 deg/px is 6.69 px, minus the half pixel
        assert_eq!(half_width_for_radius(0.334, 0.05), 6);
        assert_eq!(half_width_for_radius(0.05, 0.05), 0);
        assert_eq!(half_width_for_radius(0.0, 0.05), 0);
        assert_eq!(half_width_for_radius(0.076, 0.05), 1);
    }

    #[test]
    fn test_side_is_odd() {
        for half_width in 0..10 {
            assert_eq!(Footprint::new(0, 0, half_width).side() % 2, 1);
        }
    }

    #[test]
    fn test_clip_interior() {
        let region = Footprint::new(50, 40, 3).clip(100, 100).unwrap();
        assert_eq!(region.min_row, 37);
        assert_eq!(region.max_row, 43);
        assert_eq!(region.min_col, 47);
        assert_eq!(region.max_col, 53);
        assert_eq!(region.area(), 49);
    }

    #[test]
    fn test_clip_asymmetric_at_edges() {
        // Near the bottom-right corner only the top-left part survives
        let region = Footprint::new(98, 1, 4).clip(100, 50).unwrap();
        assert_eq!((region.min_col, region.max_col), (94, 99));
        assert_eq!((region.min_row, region.max_row), (0, 5));
        assert_eq!(region.width(), 6);
        assert_eq!(region.height(), 6);
        assert!(region.contains_point(0, 99));
        assert!(!region.contains_point(6, 99));
    }

    #[test]
    fn test_clip_outside_buffer() {
        assert_eq!(Footprint::new(-10, 5, 3).clip(20, 20), None);
        assert_eq!(Footprint::new(5, 30, 3).clip(20, 20), None);
        assert_eq!(Footprint::new(5, 5, 3).clip(0, 20), None);

        // Partially visible from outside
        let region = Footprint::new(-2, 5, 3).clip(20, 20).unwrap();
        assert_eq!((region.min_col, region.max_col), (0, 1));
    }

    #[test]
    fn test_corners() {
        let corners = Footprint::new(10, 20, 2).corners();
        assert_eq!(corners, [(8, 18), (8, 22), (12, 18), (12, 22)]);
    }
}
