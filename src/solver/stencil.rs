//! Explicit five-point diffusion stencil
//!
//! # Update Rule
//!
//! For every interior cell `1 ≤ i < nx−1`, `1 ≤ j < ny−1`:
//!
//! ```text
//! u'[i,j] = u[i,j] + D·dt·( (u[i+1,j] − 2u[i,j] + u[i−1,j]) / dx²
//!                         + (u[i,j+1] − 2u[i,j] + u[i,j−1]) / dy² )
//! ```
//!
//! Boundary cells are never written, so they keep their value (Dirichlet).
//!
//! # Double Buffering
//!
//! A step reads only from `current` and writes only into `scratch`; the two
//! buffers are swapped afterwards. Both buffers start as copies of the same
//! field and only interior cells are ever written, so their boundary rings
//! stay identical for the whole run.
//!
//! With the `parallel` feature, interior rows are distributed over rayon
//! workers once the grid is larger than [`parallel_threshold`](super::parallel_threshold).
//! Every cell is computed by the same expression from the same read-only
//! buffer, so serial and parallel results are bit-identical.

use ndarray::{Array2, ArrayViewMut1, Axis};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, ensure_positive};
use crate::physics::TemperatureField;
use crate::physics::parameters::check_time_step;
use crate::physics::stability_limit;

/// Constants of the update rule for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilCoefficients {
    /// D·dt
    d_dt: f64,
    /// dx²
    dx2: f64,
    /// dy²
    dy2: f64,
}

impl StencilCoefficients {
    /// Coefficients for diffusivity `d`, step `dt` and spacing `(dx, dy)`
    ///
    /// No validation happens here; callers check the stability bound first.
    pub fn new(d: f64, dt: f64, dx: f64, dy: f64) -> Self {
        Self {
            d_dt: d * dt,
            dx2: dx * dx,
            dy2: dy * dy,
        }
    }

    /// Stencil weight of a neighbour along x, `D·dt/dx²`
    pub fn weight_x(&self) -> f64 {
        self.d_dt / self.dx2
    }

    /// Stencil weight of a neighbour along y, `D·dt/dy²`
    pub fn weight_y(&self) -> f64 {
        self.d_dt / self.dy2
    }
}

/// Advance `field` by `n_steps` explicit steps
///
/// The field is updated in place through an internal scratch buffer; on
/// return it holds the state after the last step. `n_steps = 0` leaves it
/// untouched.
///
/// # Errors
///
/// - [`DiffusionError::InvalidParameter`](crate::DiffusionError::InvalidParameter)
///   when `dx`, `dy` or `d` is not a positive finite number
/// - [`DiffusionError::UnstableTimestep`](crate::DiffusionError::UnstableTimestep)
///   when `dt` is not positive or exceeds `stability_limit(dx, dy, d)` by more
///   than a relative `1e-12`
///
/// Validation happens before any write.
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::{TemperatureField, stability_limit};
/// use heat2d_rs::solver::step;
///
/// let mut field = TemperatureField::uniform(5, 5, 0.0);
/// field[(2, 2)] = 1.0;
///
/// let dt = stability_limit(1.0, 1.0, 1.0);
/// step(&mut field, dt, 1.0, 1.0, 1.0, 1)?;
///
/// // At the bound with dx = dy the update is the average of the four neighbours
/// assert_eq!(field[(2, 2)], 0.0);
/// assert_eq!(field[(1, 2)], 0.25);
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
pub fn step(
    field: &mut TemperatureField,
    dt: f64,
    dx: f64,
    dy: f64,
    d: f64,
    n_steps: usize,
) -> Result<()> {
    ensure_positive("dx", dx)?;
    ensure_positive("dy", dy)?;
    ensure_positive("D", d)?;
    check_time_step(dt, stability_limit(dx, dy, d))?;

    let coefficients = StencilCoefficients::new(d, dt, dx, dy);
    let mut scratch = field.clone();
    for _ in 0..n_steps {
        advance(field, &mut scratch, &coefficients);
    }
    Ok(())
}

/// One step: read `current`, write `scratch`, then swap the two
///
/// Both fields must have the same shape and the same boundary values.
pub(crate) fn advance(
    current: &mut TemperatureField,
    scratch: &mut TemperatureField,
    coefficients: &StencilCoefficients,
) {
    relax(current.values(), scratch.values_mut(), coefficients);
    std::mem::swap(current, scratch);
}

#[cfg(feature = "parallel")]
fn relax(current: &Array2<f64>, next: &mut Array2<f64>, coefficients: &StencilCoefficients) {
    if current.len() > super::parallel_threshold() {
        relax_parallel(current, next, coefficients);
    } else {
        relax_serial(current, next, coefficients);
    }
}

#[cfg(not(feature = "parallel"))]
fn relax(current: &Array2<f64>, next: &mut Array2<f64>, coefficients: &StencilCoefficients) {
    relax_serial(current, next, coefficients);
}

pub(crate) fn relax_serial(
    current: &Array2<f64>,
    next: &mut Array2<f64>,
    coefficients: &StencilCoefficients,
) {
    for (i, row) in next.axis_iter_mut(Axis(0)).enumerate() {
        relax_row(current, i, row, coefficients);
    }
}

#[cfg(feature = "parallel")]
pub(crate) fn relax_parallel(
    current: &Array2<f64>,
    next: &mut Array2<f64>,
    coefficients: &StencilCoefficients,
) {
    next.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, row)| relax_row(current, i, row, coefficients));
}

/// Update the interior of row `i` of the next field from `current`
fn relax_row(
    current: &Array2<f64>,
    i: usize,
    mut row: ArrayViewMut1<'_, f64>,
    coefficients: &StencilCoefficients,
) {
    let (nx, ny) = current.dim();
    if i == 0 || i + 1 >= nx || ny < 3 {
        return;
    }

    let above = current.row(i - 1);
    let centre = current.row(i);
    let below = current.row(i + 1);
    let StencilCoefficients { d_dt, dx2, dy2 } = *coefficients;

    for j in 1..ny - 1 {
        let u = centre[j];
        let uxx = below[j] - 2.0 * u + above[j];
        let uyy = centre[j + 1] - 2.0 * u + centre[j - 1];
        row[j] = u + d_dt * (uxx / dx2 + uyy / dy2);
    }
}
