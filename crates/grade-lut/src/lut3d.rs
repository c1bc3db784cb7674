//! 3-dimensional lookup table grid.

use crate::{LutError, LutResult};

/// A cubic RGB-to-RGB lookup grid.
///
/// Stores `size^3` rows of `[r, g, b]` in [0, 1], in file order: r varies
/// fastest, then g, then b (b-outer, g-middle, r-inner). Row index for a
/// grid coordinate is `r + g*size + b*size^2`.
///
/// # Example
///
/// ```rust
/// use grade_lut::Lut3D;
///
/// let lut = Lut3D::identity(16);
/// assert_eq!(lut.rows().len(), 16 * 16 * 16);
/// assert_eq!(lut.row_clamped(0), [0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    data: Vec<[f32; 3]>,
    size: usize,
}

impl Lut3D {
    /// Creates an identity (pass-through) LUT.
    ///
    /// # Panics
    ///
    /// Panics if `size` is below 2, the smallest grid with distinct
    /// endpoints per axis.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 2, "LUT size must be at least 2, got {size}");
        let last = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f32 / last, g as f32 / last, b as f32 / last]);
                }
            }
        }
        Self { data, size }
    }

    /// Builds a LUT from rows already in file order.
    ///
    /// The row count must be a perfect cube of at least 2 per axis.
    pub fn from_rows(data: Vec<[f32; 3]>) -> LutResult<Self> {
        let size = (data.len() as f64).cbrt().round() as usize;
        if size < 2 || size * size * size != data.len() {
            return Err(LutError::Malformed(format!(
                "row count {} is not a perfect cube",
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Grid size per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All rows in file order.
    #[inline]
    pub fn rows(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Row index for grid coordinate `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Row at `idx`, clamped to the last valid row when out of range.
    #[inline]
    pub fn row_clamped(&self, idx: usize) -> [f32; 3] {
        self.data[idx.min(self.data.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_maps_grid_to_itself() {
        let lut = Lut3D::identity(4);
        let row = lut.rows()[lut.index(1, 2, 3)];
        assert_relative_eq!(row[0], 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(row[1], 2.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(row[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn from_rows_rejects_non_cube_counts() {
        assert!(Lut3D::from_rows(vec![[0.0; 3]; 4095]).is_err());
        assert!(Lut3D::from_rows(vec![[0.0; 3]; 4096]).is_ok());
        assert!(Lut3D::from_rows(vec![[0.0; 3]; 1]).is_err());
    }

    #[test]
    #[should_panic(expected = "at least 2")]
    fn identity_rejects_degenerate_size() {
        let _ = Lut3D::identity(1);
    }

    #[test]
    fn out_of_range_index_clamps() {
        let lut = Lut3D::identity(2);
        assert_eq!(lut.row_clamped(999), lut.rows()[7]);
    }
}
