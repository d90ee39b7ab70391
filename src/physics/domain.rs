//! Rectangular grid geometry
//!
//! A [`DomainSpec`] stores the physical extents of the plate (`w`, `h`) and the
//! cell spacing (`dx`, `dy`). The cell counts are derived on every read:
//!
//! ```text
//! nx = floor(w / dx)
//! ny = floor(h / dy)
//! ```
//!
//! Cell `(i, j)` sits at physical position `(i·dx, j·dy)`.

use crate::error::{DiffusionError, Result, ensure_positive};

/// Grid geometry of the simulated plate
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::DomainSpec;
///
/// let domain = DomainSpec::new(2.0, 4.0, 0.1, 0.1)?;
/// assert_eq!(domain.nx(), 20);
/// assert_eq!(domain.ny(), 40);
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainSpec {
    /// Physical width (x extent)
    w: f64,
    /// Physical height (y extent)
    h: f64,
    /// Cell spacing along x
    dx: f64,
    /// Cell spacing along y
    dy: f64,
}

impl DomainSpec {
    /// Validate the geometry and build the domain
    ///
    /// # Errors
    ///
    /// [`DiffusionError::InvalidParameter`] when any input is not a positive
    /// finite number, when a spacing exceeds its extent (the grid would
    /// have no cell along that axis), or when the grid is too large to
    /// allocate as a single array.
    pub fn new(w: f64, h: f64, dx: f64, dy: f64) -> Result<Self> {
        ensure_positive("w", w)?;
        ensure_positive("h", h)?;
        ensure_positive("dx", dx)?;
        ensure_positive("dy", dy)?;

        if dx > w {
            return Err(DiffusionError::invalid("dx", dx, "must not exceed the width w"));
        }
        if dy > h {
            return Err(DiffusionError::invalid("dy", dy, "must not exceed the height h"));
        }
        if !addressable(w / dx) {
            return Err(DiffusionError::invalid("dx", dx, "too fine for the width w"));
        }
        if !addressable(h / dy) {
            return Err(DiffusionError::invalid("dy", dy, "too fine for the height h"));
        }
        let fits = cell_count(w, dx)
            .checked_mul(cell_count(h, dy))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(DiffusionError::invalid("dx", dx, "grid has too many cells to allocate"));
        }

        let domain = Self { w, h, dx, dy };
        log::debug!(
            "Domain {} x {} with spacing ({}, {}) -> grid {} x {}",
            w,
            h,
            dx,
            dy,
            domain.nx(),
            domain.ny()
        );
        Ok(domain)
    }

    /// Physical width
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Physical height
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Cell spacing along x
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell spacing along y
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Number of cells along x
    pub fn nx(&self) -> usize {
        cell_count(self.w, self.dx)
    }

    /// Number of cells along y
    pub fn ny(&self) -> usize {
        cell_count(self.h, self.dy)
    }

    /// Field shape `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nx(), self.ny())
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Physical x coordinate of row `i`
    pub fn x(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    /// Physical y coordinate of column `j`
    pub fn y(&self, j: usize) -> f64 {
        j as f64 * self.dy
    }

    /// Whether the grid has at least one cell not on the boundary
    pub fn has_interior(&self) -> bool {
        self.nx() >= 3 && self.ny() >= 3
    }
}

// Cell count along one axis must fit an array index
fn addressable(quotient: f64) -> bool {
    quotient.is_finite() && quotient < isize::MAX as f64
}

// Construction guarantees spacing <= extent, so the quotient is >= 1.
fn cell_count(extent: f64, spacing: f64) -> usize {
    (extent / spacing).floor() as usize
}
