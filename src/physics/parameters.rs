//! Physical parameters and the explicit stability bound
//!
//! # Stability
//!
//! The forward-Euler five-point stencil for `∂u/∂t = D·∇²u` is stable
//! (von Neumann) when
//!
//! ```text
//! dt ≤ dx²·dy² / (2·D·(dx² + dy²))
//! ```
//!
//! [`PhysicalParameters`] always stores this maximum stable step. There is no
//! setter for `dt`: changing `D` goes through [`PhysicalParameters::with_diffusivity`],
//! which recomputes it.

use crate::error::{DiffusionError, Result, ensure_finite, ensure_positive};
use crate::physics::DomainSpec;

/// Maximum stable explicit time step for spacing `(dx, dy)` and diffusivity `d`
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::stability_limit;
///
/// let dt = stability_limit(0.1, 0.1, 4.0);
/// assert!((dt - 0.000625).abs() < 1e-15);
/// ```
pub fn stability_limit(dx: f64, dy: f64, d: f64) -> f64 {
    let dx2 = dx * dx;
    let dy2 = dy * dy;
    // dx²·dy² underflows long before the bound itself does
    dx2 / (2.0 * d * (1.0 + dx2 / dy2))
}

/// Diffusion coefficient, temperature levels and the derived time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParameters {
    /// Diffusion coefficient D
    d: f64,
    /// Cold (background) temperature
    t_cold: f64,
    /// Hot (seeded region) temperature
    t_hot: f64,
    /// Spacing the time step was derived from
    dx: f64,
    dy: f64,
    /// Maximum stable time step
    dt: f64,
}

impl PhysicalParameters {
    /// Build the parameters for a given domain
    ///
    /// # Errors
    ///
    /// [`DiffusionError::InvalidParameter`] when `d` is not a positive finite
    /// number, when a temperature is not finite, or when the stable time step
    /// is not representable as a positive `f64`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
    ///
    /// let domain = DomainSpec::new(2.0, 4.0, 0.1, 0.1)?;
    /// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
    /// assert!((params.dt() - 0.000625).abs() < 1e-15);
    /// # Ok::<(), heat2d_rs::DiffusionError>(())
    /// ```
    pub fn new(domain: &DomainSpec, d: f64, t_cold: f64, t_hot: f64) -> Result<Self> {
        Self::build(domain.dx(), domain.dy(), d, t_cold, t_hot)
    }

    /// Build the parameters from a bare cell spacing
    ///
    /// This is the entry point for callers that do not hold a [`DomainSpec`].
    ///
    /// # Errors
    ///
    /// [`DiffusionError::PrerequisiteNotSet`] when `dx` or `dy` is not a
    /// positive finite number, otherwise the same errors as [`Self::new`].
    pub fn from_spacing(dx: f64, dy: f64, d: f64, t_cold: f64, t_hot: f64) -> Result<Self> {
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(DiffusionError::PrerequisiteNotSet {
                what: "cell spacing dx/dy must be set to positive values before deriving dt",
            });
        }
        Self::build(dx, dy, d, t_cold, t_hot)
    }

    fn build(dx: f64, dy: f64, d: f64, t_cold: f64, t_hot: f64) -> Result<Self> {
        ensure_positive("D", d)?;
        ensure_finite("T_cold", t_cold)?;
        ensure_finite("T_hot", t_hot)?;

        if t_hot < t_cold {
            log::warn!("T_hot ({}) is below T_cold ({})", t_hot, t_cold);
        }

        let dt = stability_limit(dx, dy, d);
        if !(dt.is_finite() && dt > 0.0) {
            return Err(DiffusionError::invalid("dx", dx, "stable time step is not a positive f64"));
        }
        log::debug!("D = {}, spacing ({}, {}) -> stable dt = {:e}", d, dx, dy, dt);

        Ok(Self { d, t_cold, t_hot, dx, dy, dt })
    }

    /// Same temperatures and spacing with a new diffusion coefficient
    ///
    /// The time step is recomputed.
    pub fn with_diffusivity(&self, d: f64) -> Result<Self> {
        Self::build(self.dx, self.dy, d, self.t_cold, self.t_hot)
    }

    /// Diffusion coefficient D
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Cold temperature level
    pub fn t_cold(&self) -> f64 {
        self.t_cold
    }

    /// Hot temperature level
    pub fn t_hot(&self) -> f64 {
        self.t_hot
    }

    /// Spacing along x used for `dt`
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Spacing along y used for `dt`
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Maximum stable time step
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The stable time step as a [`TimeStep`]
    pub fn time_step(&self) -> TimeStep {
        TimeStep(self.dt)
    }

    /// Whether these parameters were derived for the spacing of `domain`
    pub fn matches(&self, domain: &DomainSpec) -> bool {
        self.dx == domain.dx() && self.dy == domain.dy()
    }
}

/// A time step known to respect the stability bound of some [`PhysicalParameters`]
///
/// Values can only be obtained from [`PhysicalParameters::time_step`] or
/// [`TimeStep::checked`], so a `TimeStep` never exceeds the bound it was
/// checked against.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(f64);

impl TimeStep {
    /// Accept `dt` if it is positive and does not exceed `params.dt()`
    ///
    /// # Errors
    ///
    /// [`DiffusionError::UnstableTimestep`] otherwise. A `dt` above the bound
    /// by at most a relative `1e-12` still counts as within it.
    pub fn checked(dt: f64, params: &PhysicalParameters) -> Result<Self> {
        check_time_step(dt, params.dt())?;
        Ok(Self(dt))
    }

    /// Step length
    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Relative slack allowed when comparing a caller-supplied `dt` with the bound
pub(crate) const STABILITY_TOLERANCE: f64 = 1e-12;

/// Reject `dt` when it is not positive, lies above `limit`, or `limit` itself is unusable
pub(crate) fn check_time_step(dt: f64, limit: f64) -> Result<()> {
    let usable_limit = limit.is_finite() && limit > 0.0;
    if !(dt.is_finite() && dt > 0.0) || !usable_limit || dt > limit * (1.0 + STABILITY_TOLERANCE) {
        return Err(DiffusionError::UnstableTimestep { dt, limit });
    }
    Ok(())
}
