//! Forward Euler time stepping of the heat equation
//!
//! # Mathematical Background
//!
//! The semi-discrete heat equation on the grid is the ODE system
//!
//! ```text
//! du/dt = D·L(u)
//! ```
//!
//! where `L` is the five-point Laplacian. Forward Euler advances it with
//!
//! ```text
//! u_{n+1} = u_n + dt·D·L(u_n)
//! ```
//!
//! which is exactly the stencil of [`crate::solver::stencil`].
//!
//! # Characteristics
//!
//! - **Order**: first order in time, second order in space
//! - **Stability**: conditional, `dt ≤ dx²·dy² / (2·D·(dx² + dy²))`
//! - **Memory**: two field buffers, plus the retained snapshots
//!
//! # Two Ways to Run
//!
//! - [`Evolution`]: lazy iterator, one field per step, nothing retained
//! - [`EulerSolver`]: batch run returning a [`SimulationResult`] with the
//!   snapshots selected by a [`SnapshotSchedule`](crate::solver::SnapshotSchedule)

use std::time::Instant;

use crate::error::Result;
use crate::physics::TemperatureField;
use crate::solver::stencil::{StencilCoefficients, advance};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Lazy evolution
// =================================================================================================

/// Unbounded iterator over the fields after step 1, 2, ...
///
/// Each item is an owned snapshot. Use [`Evolution::advance`] to step without
/// copying the field.
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
/// use heat2d_rs::solver::Scenario;
///
/// let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
/// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
/// let scenario = Scenario::hot_disc(domain, params)?;
///
/// let peaks: Vec<f64> = scenario.evolve().take(3).map(|u| u.max()).collect();
/// assert_eq!(peaks.len(), 3);
/// assert!(peaks.iter().all(|&p| p < 700.0 + 1e-9));
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evolution {
    current: TemperatureField,
    scratch: TemperatureField,
    coefficients: StencilCoefficients,
    dt: f64,
    step: usize,
}

impl Evolution {
    pub(crate) fn new(scenario: &Scenario) -> Self {
        let params = scenario.parameters();
        let dt = scenario.time_step().get();
        let current = scenario.initial().clone();

        Self {
            scratch: current.clone(),
            current,
            coefficients: StencilCoefficients::new(params.d(), dt, params.dx(), params.dy()),
            dt,
            step: 0,
        }
    }

    /// Take one step and return the new field
    pub fn advance(&mut self) -> &TemperatureField {
        advance(&mut self.current, &mut self.scratch, &self.coefficients);
        self.step += 1;
        &self.current
    }

    /// Number of steps taken so far
    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Physical time of the current field, computed from the step index
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    /// Update-rule constants used for every step
    pub fn coefficients(&self) -> &StencilCoefficients {
        &self.coefficients
    }

    /// Field after the last step taken (the initial field before any)
    pub fn current(&self) -> &TemperatureField {
        &self.current
    }

    /// Stop iterating and keep the current field
    pub fn into_field(self) -> TemperatureField {
        self.current
    }
}

impl Iterator for Evolution {
    type Item = TemperatureField;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.advance().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Batch forward Euler solver
///
/// # Algorithm
///
/// 1. Validate the configuration
/// 2. Keep the initial field if the schedule asks for step 0
/// 3. For each step `k = 1..=N`:
///    - apply the stencil (double buffered)
///    - check for NaN/Inf when `check_finite` is set
///    - keep the field if the schedule asks for step `k`
/// 4. Return the snapshots, their times `k·dt` and the final field
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
/// use heat2d_rs::solver::{EulerSolver, Scenario, SnapshotSchedule, Solver, SolverConfiguration};
///
/// let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
/// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
/// let scenario = Scenario::hot_disc(domain, params)?;
/// let config = SolverConfiguration::time_evolution(100)
///     .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
///
/// let result = EulerSolver::new().solve(&scenario, &config)?;
/// assert_eq!(result.steps, vec![0, 10, 50, 100]);
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver
    ///
    /// ```rust
    /// use heat2d_rs::solver::{EulerSolver, Solver};
    ///
    /// let solver = EulerSolver::new();
    /// assert_eq!(solver.name(), "Forward Euler");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;

        let time_steps = config.time_steps;
        let schedule = &config.schedule;
        let dt = scenario.time_step().get();
        let (nx, ny) = scenario.domain().shape();

        log::debug!(
            "{}: {} x {} grid, {} steps, dt = {:e}, initial condition '{}'",
            self.name(),
            nx,
            ny,
            time_steps,
            dt,
            scenario.initial_condition()
        );

        // ====== Step 2: Setup ======

        let started = Instant::now();
        let capacity = schedule.capacity(time_steps);
        let mut time_points = Vec::with_capacity(capacity);
        let mut steps = Vec::with_capacity(capacity);
        let mut snapshots = Vec::with_capacity(capacity);

        if config.check_finite {
            scenario.initial().ensure_finite(0)?;
        }
        if schedule.retains(0, time_steps) {
            time_points.push(0.0);
            steps.push(0);
            snapshots.push(scenario.initial().clone());
        }

        // ====== Step 3: Time Integration ======

        let mut evolution = scenario.evolve();
        let coefficients = *evolution.coefficients();
        for step in 1..=time_steps {
            let field = evolution.advance();

            if config.check_finite {
                field.ensure_finite(step)?;
            }

            if schedule.retains(step, time_steps) {
                // t_k from the index: no accumulated rounding
                let t = step as f64 * dt;
                log::trace!("Snapshot at step {} (t = {:e}), max = {}", step, t, field.max());

                time_points.push(t);
                steps.push(step);
                snapshots.push(field.clone());
            }
        }

        // ====== Step 4: Build Result ======

        let final_field = evolution.into_field();
        let memory = final_field.memory();
        let elapsed = started.elapsed();

        log::info!(
            "{} finished {} steps on {} x {} grid in {:.3?} ({} snapshots kept)",
            self.name(),
            time_steps,
            nx,
            ny,
            elapsed,
            snapshots.len()
        );

        let mut result = SimulationResult::new(time_points, steps, snapshots, final_field);

        result.add_metadata("solver", self.name());
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &(time_steps as f64 * dt).to_string());
        result.add_metadata("grid", &format!("{} x {}", nx, ny));
        result.add_metadata(
            "stencil weights",
            &format!("{:.4} / {:.4}", coefficients.weight_x(), coefficients.weight_y()),
        );
        result.add_metadata("field memory", &format!("{} bytes", memory));
        result.add_metadata("initial condition", scenario.initial_condition());
        result.add_metadata("elapsed", &format!("{:?}", elapsed));

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiffusionError;
    use crate::physics::{DomainSpec, PhysicalParameters};
    use crate::solver::{SnapshotSchedule, step};
    use approx::assert_relative_eq;

    fn small_scenario() -> Scenario {
        // 20 x 20 grid, disc centred at (1, 1) with radius 0.5
        let domain = DomainSpec::new(2.0, 2.0, 0.1, 0.1).unwrap();
        let params = PhysicalParameters::new(&domain, 1.0, 0.0, 1.0).unwrap();
        let disc = crate::physics::HotDisc::new(1.0, 1.0, 0.5).unwrap();
        Scenario::with_initializer(domain, params, &crate::physics::FieldInitializer::new(disc)).unwrap()
    }

    // ====== Solver Creation Tests ======

    #[test]
    fn test_euler_solver_creation() {
        assert_eq!(EulerSolver::new().name(), "Forward Euler");
        assert_eq!(EulerSolver.name(), "Forward Euler");
    }

    // ====== Configuration Tests ======

    #[test]
    fn test_zero_steps_rejected() {
        let result = EulerSolver::new().solve(&small_scenario(), &SolverConfiguration::time_evolution(0));
        assert!(matches!(result, Err(DiffusionError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let config = SolverConfiguration::time_evolution(10).with_schedule(SnapshotSchedule::At(vec![0, 11]));
        assert!(EulerSolver::new().solve(&small_scenario(), &config).is_err());
    }

    // ====== Trajectory Tests ======

    #[test]
    fn test_every_step_kept_by_default() {
        let scenario = small_scenario();
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(10))
            .unwrap();

        assert_eq!(result.len(), 11);
        assert_eq!(result.steps, (0..=10).collect::<Vec<_>>());
        assert_eq!(&result.snapshots[0], scenario.initial());
        assert_eq!(result.snapshots.last(), Some(&result.final_field));
    }

    #[test]
    fn test_listed_snapshots_only() {
        let config = SolverConfiguration::time_evolution(100)
            .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
        let result = EulerSolver::new().solve(&small_scenario(), &config).unwrap();

        assert_eq!(result.steps, vec![0, 10, 50, 100]);
        assert_eq!(result.snapshots.len(), 4);
        assert_eq!(result.time_points.len(), 4);
    }

    #[test]
    fn test_final_only() {
        let config = SolverConfiguration::time_evolution(25).with_schedule(SnapshotSchedule::FinalOnly);
        let result = EulerSolver::new().solve(&small_scenario(), &config).unwrap();

        assert_eq!(result.steps, vec![25]);
        assert_eq!(result.snapshots[0], result.final_field);
    }

    #[test]
    fn test_time_points_from_index() {
        let scenario = small_scenario();
        let dt = scenario.time_step().get();
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(1000).with_schedule(SnapshotSchedule::Every(100)))
            .unwrap();

        for (step, time, _) in result.iter() {
            assert_eq!(time, step as f64 * dt);
        }
        assert_relative_eq!(*result.time_points.last().unwrap(), 1000.0 * dt, epsilon = 1e-15);
    }

    #[test]
    fn test_metadata() {
        let result = EulerSolver::new()
            .solve(&small_scenario(), &SolverConfiguration::time_evolution(3))
            .unwrap();

        assert_eq!(result.metadata.get("solver").map(String::as_str), Some("Forward Euler"));
        assert_eq!(result.metadata.get("time steps").map(String::as_str), Some("3"));
        assert_eq!(result.metadata.get("grid").map(String::as_str), Some("20 x 20"));
        assert_eq!(result.metadata.get("initial condition").map(String::as_str), Some("Hot Disc"));
        assert!(result.metadata.contains_key("dt"));
        assert!(result.metadata.contains_key("elapsed"));

        // D = 1, dx = dy = 0.1 at the bound: each neighbour weighs 1/4
        assert_eq!(result.metadata.get("stencil weights").map(String::as_str), Some("0.2500 / 0.2500"));
        assert_eq!(result.metadata.get("field memory").map(String::as_str), Some("3200 bytes"));
    }

    // ====== Consistency Tests ======

    #[test]
    fn test_final_field_matches_raw_step() {
        let scenario = small_scenario();
        let params = scenario.parameters();
        let result = EulerSolver::new()
            .solve(&scenario, &SolverConfiguration::time_evolution(40).with_schedule(SnapshotSchedule::FinalOnly))
            .unwrap();

        let mut field = scenario.initial().clone();
        step(&mut field, params.dt(), params.dx(), params.dy(), params.d(), 40).unwrap();

        assert_eq!(result.final_field, field);
    }

    #[test]
    fn test_evolution_matches_repeated_steps() {
        let scenario = small_scenario();
        let params = scenario.parameters();
        let mut field = scenario.initial().clone();

        for (k, evolved) in scenario.evolve().take(5).enumerate() {
            step(&mut field, params.dt(), params.dx(), params.dy(), params.d(), 1).unwrap();
            assert_eq!(evolved, field, "step {}", k + 1);
        }
    }

    #[test]
    fn test_evolution_bookkeeping() {
        let scenario = small_scenario();
        let mut evolution = scenario.evolve();

        assert_eq!(evolution.step_index(), 0);
        assert_eq!(evolution.current(), scenario.initial());

        evolution.advance();
        evolution.advance();

        assert_eq!(evolution.step_index(), 2);
        assert_eq!(evolution.time(), 2.0 * scenario.time_step().get());
    }

    #[test]
    fn test_smaller_time_step_is_used() {
        let scenario = small_scenario();
        let dt = scenario.parameters().dt() / 4.0;
        let slow = scenario.clone().with_time_step(dt).unwrap();

        let result = EulerSolver::new().solve(&slow, &SolverConfiguration::time_evolution(2)).unwrap();

        assert_eq!(result.time_points, vec![0.0, dt, 2.0 * dt]);
        assert_ne!(result.final_field, scenario.evolve().nth(1).unwrap());
    }

    // ====== Validation Tests ======

    #[test]
    fn test_non_finite_initial_field_detected() {
        let scenario = small_scenario();
        let mut initial = scenario.initial().clone();
        initial[(5, 5)] = f64::NAN;
        let scenario = Scenario::new(*scenario.domain(), *scenario.parameters(), initial).unwrap();

        let result = EulerSolver::new().solve(&scenario, &SolverConfiguration::time_evolution(5));
        assert_eq!(result.unwrap_err(), DiffusionError::NonFinite { step: 0 });
    }

    #[test]
    fn test_overflow_detected_at_first_step() {
        // Checkerboard of ±1e308: the -2u term overflows
        let scenario = small_scenario();
        let initial = TemperatureField::from_fn(20, 20, |(i, j)| if (i + j) % 2 == 0 { 1e308 } else { -1e308 });
        let scenario = Scenario::new(*scenario.domain(), *scenario.parameters(), initial).unwrap();

        let result = EulerSolver::new().solve(&scenario, &SolverConfiguration::time_evolution(5));
        assert_eq!(result.unwrap_err(), DiffusionError::NonFinite { step: 1 });

        let unchecked = SolverConfiguration::time_evolution(5).without_finite_check();
        let result = EulerSolver::new().solve(&scenario, &unchecked).unwrap();
        assert!(result.final_field.ensure_finite(5).is_err());
    }
}
