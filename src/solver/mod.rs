//! Time stepping
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - grid, physical parameters, initial field
//!    - the time step, checked against the stability bound
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - number of steps
//!    - which snapshots to keep (`SnapshotSchedule`)
//!    - NaN/Inf checking
//!
//! 3. **Solver** (`Solver` trait) - the numerical method
//!    - `EulerSolver`: explicit five-point stencil
//!
//! # Three Entry Points
//!
//! | Entry point | Input | Output |
//! |-------------|-------|--------|
//! | [`step`] | bare field and numbers | field mutated in place |
//! | [`Scenario::evolve`] | scenario | lazy iterator of fields |
//! | [`Solver::solve`] | scenario + configuration | [`SimulationResult`] |
//!
//! All three run the same stencil through a double buffer.
//!
//! # Workflow Diagram
//!
//! ```text
//! DomainSpec + PhysicalParameters + initial field
//!                     │
//!            ┌────────▼────────┐
//!            │    Scenario     │ ← WHAT to solve
//!            └────────┬────────┘
//!                     │
//!            ┌────────▼─────────────┐
//!            │ SolverConfiguration  │ ← HOW to solve
//!            └────────┬─────────────┘
//!                     │
//!            ┌────────▼────────┐
//!            │   EulerSolver   │ ← the method
//!            └────────┬────────┘
//!                     │
//!            ┌────────▼────────────┐
//!            │ SimulationResult    │ ← snapshots + metadata
//!            └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
//! use heat2d_rs::solver::{EulerSolver, Scenario, SnapshotSchedule, Solver, SolverConfiguration};
//!
//! let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
//! let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
//! let scenario = Scenario::hot_disc(domain, params)?;
//!
//! let config = SolverConfiguration::time_evolution(100)
//!     .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
//! let result = EulerSolver::new().solve(&scenario, &config)?;
//!
//! assert_eq!(result.len(), 4);
//! assert_eq!(result.final_field[(0, 0)], 300.0);
//! # Ok::<(), heat2d_rs::DiffusionError>(())
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod scenario;
pub mod stencil;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// When to hand a sweep to rayon is an execution concern, so it lives with the
// solver rather than with the field. Relaxed ordering is enough: the value is
// a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid cells above which a sweep runs on rayon
///
/// Below a 128 x 128 grid the dispatch overhead outweighs one sweep.
const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold, in grid cells.
///
/// Sweeps over grids with more cells than this run row-parallel, but only
/// when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use heat2d_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// Results do not depend on it: serial and parallel sweeps are bit-identical.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use heat2d_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(4096);
/// assert_eq!(parallel_threshold(), 4096);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Saves the current threshold on construction and restores it on drop.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use methods::{EulerSolver, Evolution};
pub use scenario::Scenario;
pub use stencil::{StencilCoefficients, step};
pub use traits::{SimulationResult, SnapshotSchedule, Solver, SolverConfiguration};

// =================================================================================================
// Tests
// =================================================================================================
