//! Temperature field storage
//!
//! A [`TemperatureField`] is a dense `(nx, ny)` array of temperatures backed by
//! `ndarray::Array2<f64>`. Row index `i` runs along x, column index `j` along y,
//! matching the `(i·dx, j·dy)` cell coordinates of [`DomainSpec`](super::DomainSpec).
//!
//! # Memory Layout
//!
//! Always standard (row-major) layout: each row `i` is contiguous, which is
//! what the row-parallel stencil in the solver iterates over.
//!
//! # Example
//!
//! ```rust
//! use heat2d_rs::physics::TemperatureField;
//!
//! let field = TemperatureField::uniform(4, 3, 300.0);
//! assert_eq!(field.shape(), (4, 3));
//! assert_eq!(field[(2, 1)], 300.0);
//! ```

use ndarray::{Array2, ArrayView2, Axis};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{DiffusionError, Result};

/// Dense 2D temperature grid
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    values: Array2<f64>,
}

impl TemperatureField {
    // ======================================= constructors =======================================

    /// Field of shape `(nx, ny)` filled with `value`
    pub fn uniform(nx: usize, ny: usize, value: f64) -> Self {
        Self {
            values: Array2::from_elem((nx, ny), value),
        }
    }

    /// Field built cell by cell from `f(i, j)`
    pub fn from_fn<F>(nx: usize, ny: usize, f: F) -> Self
    where
        F: FnMut((usize, usize)) -> f64,
    {
        Self {
            values: Array2::from_shape_fn((nx, ny), f),
        }
    }

    /// Wrap an existing array
    ///
    /// Arrays in non-standard layout (transposed views, Fortran order) are
    /// copied into standard layout.
    pub fn from_array(values: Array2<f64>) -> Self {
        let values = if values.is_standard_layout() {
            values
        } else {
            values.as_standard_layout().into_owned()
        };
        Self { values }
    }

    // ========================================== Queries ==========================================

    /// Shape `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of rows (x direction)
    pub fn nx(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (y direction)
    pub fn ny(&self) -> usize {
        self.values.ncols()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `(i, j)`, or `None` outside the grid
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    /// Whether `(i, j)` lies on the outer ring of the grid
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        let (nx, ny) = self.shape();
        i == 0 || j == 0 || i + 1 == nx || j + 1 == ny
    }

    /// Read-only view of the underlying array
    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Give the underlying array to the caller
    pub fn into_array(self) -> Array2<f64> {
        self.values
    }

    pub(crate) fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut Array2<f64> {
        &mut self.values
    }

    // ======================================== Statistics ========================================

    /// Smallest temperature (`+inf` for an empty field)
    pub fn min(&self) -> f64 {
        self.values.fold(f64::INFINITY, |acc, &v| acc.min(v))
    }

    /// Largest temperature (`-inf` for an empty field)
    pub fn max(&self) -> f64 {
        self.values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
    }

    /// Sum of all cell values
    pub fn sum(&self) -> f64 {
        self.values.sum()
    }

    /// Mean cell value, `None` for an empty field
    pub fn mean(&self) -> Option<f64> {
        self.values.mean()
    }

    /// Values along the outer ring, in row-major order
    pub fn boundary_values(&self) -> Vec<f64> {
        let (nx, ny) = self.shape();
        let mut ring = Vec::with_capacity(2 * (nx + ny));
        for i in 0..nx {
            for j in 0..ny {
                if self.is_boundary(i, j) {
                    ring.push(self.values[(i, j)]);
                }
            }
        }
        ring
    }

    /// Cells whose value satisfies `pred`, as `(i, j, value)`
    pub fn cells_where<P>(&self, mut pred: P) -> Vec<(usize, usize, f64)>
    where
        P: FnMut(f64) -> bool,
    {
        self.values
            .indexed_iter()
            .filter(|&(_, &v)| pred(v))
            .map(|((i, j), &v)| (i, j, v))
            .collect()
    }

    /// Copy of row `i`, useful for profile plots
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.values.index_axis(Axis(0), i).to_vec()
    }

    // ======================================== Validation ========================================

    /// Fail with [`DiffusionError::NonFinite`] if any cell is NaN or infinite
    pub fn ensure_finite(&self, step: usize) -> Result<()> {
        if self.values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(DiffusionError::NonFinite { step })
        }
    }

    /// Fail with [`DiffusionError::ShapeMismatch`] unless the field is `expected`
    pub fn ensure_shape(&self, expected: (usize, usize)) -> Result<()> {
        let found = self.shape();
        if found == expected {
            Ok(())
        } else {
            Err(DiffusionError::ShapeMismatch { expected, found })
        }
    }

    /// Memory used by the cell values, in bytes
    pub fn memory(&self) -> usize {
        std::mem::size_of::<f64>() * self.len()
    }
}

impl Index<(usize, usize)> for TemperatureField {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<(usize, usize)> for TemperatureField {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.values[index]
    }
}

impl From<Array2<f64>> for TemperatureField {
    fn from(values: Array2<f64>) -> Self {
        Self::from_array(values)
    }
}

impl fmt::Display for TemperatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nx, ny) = self.shape();
        write!(f, "TemperatureField [{} * {}]", nx, ny)
    }
}

// ==================== Tests ====================
