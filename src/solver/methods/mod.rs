//! Time-stepping methods
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The abstract interface (`solver::traits`) is kept apart from the methods
//! (`solver::methods`), so a new scheme is added here without touching the
//! trait, the scenario or the configuration.
//!
//! # Available Methods
//!
//! - **[`EulerSolver`]**: forward Euler with the explicit five-point stencil
//!   - Order: first order in time, second order in space
//!   - Cost: one stencil sweep per step
//!   - Constraint: `dt` bounded by the von Neumann limit
//!
//! [`Evolution`] is the lazy counterpart of [`EulerSolver`]: it yields one
//! field per step instead of collecting a [`SimulationResult`](crate::solver::SimulationResult).
//!
//! # Performance Considerations
//!
//! With the `parallel` feature, the stencil sweep distributes rows over
//! rayon workers once the grid exceeds
//! [`parallel_threshold`](crate::solver::parallel_threshold) cells.

pub mod euler;

pub use euler::{EulerSolver, Evolution};
