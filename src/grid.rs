//! Contains the Region and SampleGrid structs.  A Region describes a
//! rectangle on the complex plane by its four real bounds; a
//! SampleGrid is the evaluation lattice built from a Region and a
//! sampling density, mapping every (row, column) index to the complex
//! coordinate of that sample.
use error::EvalError;
use num::Complex;
use std::cmp;

/// A rectangle on the complex plane.  The real axis runs from `xmin`
/// to `xmax` and the imaginary axis from `ymin` to `ymax`; both spans
/// must be strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Lower bound of the real axis.
    pub xmin: f64,
    /// Upper bound of the real axis.
    pub xmax: f64,
    /// Lower bound of the imaginary axis.
    pub ymin: f64,
    /// Upper bound of the imaginary axis.
    pub ymax: f64,
}

impl Region {
    /// Constructor.  Rejects inverted or degenerate bounds.  A NaN
    /// bound fails the ordering comparison and is rejected the same
    /// way.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Region, EvalError> {
        if !(xmin < xmax) {
            return Err(EvalError::InvalidRegion(format!(
                "xmin ({}) must be less than xmax ({})",
                xmin, xmax
            )));
        }
        if !(ymin < ymax) {
            return Err(EvalError::InvalidRegion(format!(
                "ymin ({}) must be less than ymax ({})",
                ymin, ymax
            )));
        }
        Ok(Region {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// The span of the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// The span of the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// The evaluation lattice: one complex sample coordinate per (row,
/// column) index.  Rows walk the imaginary axis ascending from
/// `ymin`; columns walk the real axis ascending from `xmin`.  Both
/// axis endpoints are included among the samples, and each axis holds
/// at least one sample no matter how small the span or density.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleGrid {
    /// Constructor.  `density` is in samples per unit length; the
    /// per-axis sample count is `max(1, round(span * density))`.
    /// Rejects a non-positive (or NaN) density.
    pub fn new(region: &Region, density: f64) -> Result<SampleGrid, EvalError> {
        if !(density > 0.0) {
            return Err(EvalError::InvalidParameter(format!(
                "density must be positive, got {}",
                density
            )));
        }
        Ok(SampleGrid {
            xs: axis_samples(region.xmin, region.xmax, density),
            ys: axis_samples(region.ymin, region.ymax, density),
        })
    }

    /// The number of rows (imaginary-axis samples).
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// The number of columns (real-axis samples).
    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    /// The total number of samples in the lattice.  Used to size the
    /// orbit-state buffers.
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// A lattice always holds at least one sample, but the
    /// conventional pair to `len` is still worth having.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complex coordinate of the sample at (row, column).
    pub fn point(&self, row: usize, col: usize) -> Complex<f64> {
        Complex::new(self.xs[col], self.ys[row])
    }
}

/// Evenly spaced samples over [lo, hi] with both endpoints included.
/// A single-sample axis sits at the low bound.
fn axis_samples(lo: f64, hi: f64, density: f64) -> Vec<f64> {
    let n = cmp::max(1, ((hi - lo) * density).round() as usize);
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / ((n - 1) as f64);
    (0..n).map(|i| lo + (i as f64) * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_fails_on_inverted_bounds() {
        assert!(Region::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Region::new(-1.0, 1.0, 1.0, -1.0).is_err());
    }

    #[test]
    fn region_fails_on_degenerate_bounds() {
        assert!(Region::new(0.5, 0.5, -1.0, 1.0).is_err());
    }

    #[test]
    fn region_fails_on_nan_bounds() {
        assert!(Region::new(std::f64::NAN, 1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn region_passes_on_good_bounds() {
        assert!(Region::new(-2.0, 1.0, -1.5, 1.5).is_ok());
    }

    #[test]
    fn grid_fails_on_bad_density() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        assert!(SampleGrid::new(&region, 0.0).is_err());
        assert!(SampleGrid::new(&region, -3.0).is_err());
    }

    #[test]
    fn grid_dimensions_follow_span_times_density() {
        let region = Region::new(-2.0, 2.0, -1.0, 1.0).unwrap();
        let grid = SampleGrid::new(&region, 10.0).unwrap();
        assert_eq!(grid.cols(), 40);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.len(), 800);
        assert!(!grid.is_empty());
    }

    #[test]
    fn grid_holds_at_least_one_sample_per_axis() {
        let region = Region::new(0.0, 0.1, 0.0, 0.1).unwrap();
        let grid = SampleGrid::new(&region, 1.0).unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.point(0, 0), Complex::new(0.0, 0.0));
    }

    #[test]
    fn grid_includes_both_endpoints() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        // span 2.0 at density 1.5 rounds to 3 samples per axis
        let grid = SampleGrid::new(&region, 1.5).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.point(0, 0), Complex::new(-1.0, -1.0));
        assert_eq!(grid.point(1, 1), Complex::new(0.0, 0.0));
        assert_eq!(grid.point(2, 2), Complex::new(1.0, 1.0));
    }

    #[test]
    fn rows_walk_the_imaginary_axis() {
        let region = Region::new(0.0, 2.0, -1.0, 1.0).unwrap();
        let grid = SampleGrid::new(&region, 1.5).unwrap();
        assert_eq!(grid.point(0, 1), Complex::new(1.0, -1.0));
        assert_eq!(grid.point(2, 1), Complex::new(1.0, 1.0));
    }
}
