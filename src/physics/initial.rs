//! Initial temperature fields
//!
//! The reference experiment seeds a cold plate with a hot disc of radius
//! `r = 2` centred at `(5, 5)`:
//!
//! ```text
//! u(i, j) = T_hot   if (i·dx − cx)² + (j·dy − cy)² < r²
//!         = T_cold  otherwise
//! ```
//!
//! The inequality is strict, so cells lying exactly on the circle stay cold.
//! No blending is performed: every cell is exactly `T_cold` or exactly `T_hot`.
//!
//! Other initial conditions plug in through the [`InitialCondition`] trait.

use nalgebra::{Point2, Vector2};

use crate::error::{DiffusionError, Result};
use crate::physics::{DomainSpec, PhysicalParameters, TemperatureField};

/// Disc centre used by [`set_initial_condition`]
pub const DEFAULT_CENTRE: (f64, f64) = (5.0, 5.0);

/// Disc radius used by [`set_initial_condition`]
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Grid description needed to lay down an initial field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl From<&DomainSpec> for GridLayout {
    fn from(domain: &DomainSpec) -> Self {
        Self {
            nx: domain.nx(),
            ny: domain.ny(),
            dx: domain.dx(),
            dy: domain.dy(),
        }
    }
}

/// Generator of an initial temperature field
///
/// Implementations must be pure: the same layout and temperatures always give
/// the same field.
pub trait InitialCondition: Send + Sync {
    /// Build the field for `grid` using the given temperature levels
    fn build(&self, grid: &GridLayout, t_cold: f64, t_hot: f64) -> TemperatureField;

    /// Name used in logs and result metadata
    fn name(&self) -> &str;
}

/// Hot disc on a cold background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotDisc {
    centre: Point2<f64>,
    radius: f64,
}

impl HotDisc {
    /// Disc with the given centre and radius (physical units)
    ///
    /// # Errors
    ///
    /// [`DiffusionError::InvalidParameter`] if the radius is not positive or a
    /// coordinate is not finite.
    pub fn new(cx: f64, cy: f64, radius: f64) -> Result<Self> {
        crate::error::ensure_finite("cx", cx)?;
        crate::error::ensure_finite("cy", cy)?;
        crate::error::ensure_positive("radius", radius)?;
        Ok(Self {
            centre: Point2::new(cx, cy),
            radius,
        })
    }

    /// Centre of the disc
    pub fn centre(&self) -> (f64, f64) {
        (self.centre.x, self.centre.y)
    }

    /// Radius of the disc
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the cell at physical position `(x, y)` lies strictly inside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let offset: Vector2<f64> = Point2::new(x, y) - self.centre;
        offset.norm_squared() < self.radius * self.radius
    }
}

impl Default for HotDisc {
    fn default() -> Self {
        Self {
            centre: Point2::new(DEFAULT_CENTRE.0, DEFAULT_CENTRE.1),
            radius: DEFAULT_RADIUS,
        }
    }
}

impl InitialCondition for HotDisc {
    fn build(&self, grid: &GridLayout, t_cold: f64, t_hot: f64) -> TemperatureField {
        TemperatureField::from_fn(grid.nx, grid.ny, |(i, j)| {
            if self.contains(i as f64 * grid.dx, j as f64 * grid.dy) {
                t_hot
            } else {
                t_cold
            }
        })
    }

    fn name(&self) -> &str {
        "Hot Disc"
    }
}

/// Whole plate at `T_cold`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Uniform;

impl InitialCondition for Uniform {
    fn build(&self, grid: &GridLayout, t_cold: f64, _t_hot: f64) -> TemperatureField {
        TemperatureField::uniform(grid.nx, grid.ny, t_cold)
    }

    fn name(&self) -> &str {
        "Uniform"
    }
}

/// Initial field of the reference experiment
///
/// Hot disc of radius 2 centred at `(5, 5)` on a `T_cold` plate.
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::{DomainSpec, PhysicalParameters, set_initial_condition};
///
/// let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
/// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
/// let u = set_initial_condition(&domain, &params);
///
/// assert_eq!(u.shape(), (100, 100));
/// assert_eq!(u[(0, 0)], 300.0);
/// assert_eq!(u[(50, 50)], 700.0);
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
pub fn set_initial_condition(domain: &DomainSpec, params: &PhysicalParameters) -> TemperatureField {
    FieldInitializer::new(HotDisc::default()).initialize(domain, params)
}

/// Builds initial fields from a domain and physical parameters
pub struct FieldInitializer {
    condition: Box<dyn InitialCondition>,
}

impl FieldInitializer {
    /// Initializer using `condition`
    pub fn new<C: InitialCondition + 'static>(condition: C) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }

    /// Name of the wrapped condition
    pub fn name(&self) -> &str {
        self.condition.name()
    }

    /// Field for the typed pipeline
    pub fn initialize(&self, domain: &DomainSpec, params: &PhysicalParameters) -> TemperatureField {
        let grid = GridLayout::from(domain);
        log::debug!(
            "Initial condition '{}' on {} x {} grid",
            self.condition.name(),
            grid.nx,
            grid.ny
        );
        self.condition.build(&grid, params.t_cold(), params.t_hot())
    }

    /// Field from bare grid values
    ///
    /// # Errors
    ///
    /// [`DiffusionError::PrerequisiteNotSet`] when `nx`/`ny` is zero, a spacing
    /// is not a positive finite number, or a temperature is not finite.
    pub fn from_grid(
        &self,
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        t_cold: f64,
        t_hot: f64,
    ) -> Result<TemperatureField> {
        if nx == 0 || ny == 0 {
            return Err(DiffusionError::PrerequisiteNotSet {
                what: "grid dimensions nx/ny must be set before building the initial field",
            });
        }
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(DiffusionError::PrerequisiteNotSet {
                what: "cell spacing dx/dy must be set before building the initial field",
            });
        }
        if !(t_cold.is_finite() && t_hot.is_finite()) {
            return Err(DiffusionError::PrerequisiteNotSet {
                what: "temperatures T_cold/T_hot must be set before building the initial field",
            });
        }

        let grid = GridLayout { nx, ny, dx, dy };
        Ok(self.condition.build(&grid, t_cold, t_hot))
    }
}

impl Default for FieldInitializer {
    fn default() -> Self {
        Self::new(HotDisc::default())
    }
}

impl std::fmt::Debug for FieldInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldInitializer")
            .field("condition", &self.name())
            .finish()
    }
}
