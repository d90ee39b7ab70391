//! Solver interface, configuration and results
//!
//! # Design Philosophy
//!
//! - `Solver` trait: one entry point, `solve(&Scenario, &SolverConfiguration)`
//! - `SolverConfiguration`: HOW long to run and which states to keep
//! - `SimulationResult`: retained snapshots plus string metadata
//!
//! A scenario never changes during a run, and a configuration carries no
//! physics, so the same pair can be handed to any solver.

use std::collections::HashMap;

use crate::error::{DiffusionError, Result};
use crate::physics::TemperatureField;
use crate::solver::Scenario;

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method advancing a [`Scenario`] in time
///
/// # Example
///
/// ```rust
/// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
/// use heat2d_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
///
/// let domain = DomainSpec::new(1.0, 1.0, 0.1, 0.1)?;
/// let params = PhysicalParameters::new(&domain, 1.0, 0.0, 1.0)?;
/// let scenario = Scenario::uniform(domain, params)?;
///
/// let result = EulerSolver::new().solve(&scenario, &SolverConfiguration::time_evolution(5))?;
/// assert_eq!(result.len(), 6);
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
pub trait Solver {
    /// Run the configured number of steps on the scenario's initial field
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Human readable method name, recorded in the result metadata
    fn name(&self) -> &str;
}

// =================================================================================================
// Snapshot schedule
// =================================================================================================

/// Which steps of a run end up in [`SimulationResult::snapshots`]
///
/// Step `0` is the initial field, step `k` the field after `k` updates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotSchedule {
    /// Every `n`-th step starting at 0, plus the final step
    Every(usize),

    /// Exactly these steps (strictly increasing, none past the last step)
    At(Vec<usize>),

    /// Only the final step
    FinalOnly,
}

impl SnapshotSchedule {
    /// Whether step `step` of a run of `last` steps is kept
    pub fn retains(&self, step: usize, last: usize) -> bool {
        match self {
            SnapshotSchedule::Every(stride) => (*stride > 0 && step % stride == 0) || step == last,
            SnapshotSchedule::At(steps) => steps.binary_search(&step).is_ok(),
            SnapshotSchedule::FinalOnly => step == last,
        }
    }

    /// Check the schedule against a run of `time_steps` steps
    pub fn validate(&self, time_steps: usize) -> Result<()> {
        match self {
            SnapshotSchedule::Every(0) => Err(DiffusionError::InvalidConfiguration(
                "snapshot stride must be greater than 0".to_string(),
            )),
            SnapshotSchedule::At(steps) => {
                if steps.is_empty() {
                    return Err(DiffusionError::InvalidConfiguration(
                        "snapshot list is empty".to_string(),
                    ));
                }
                if steps.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(DiffusionError::InvalidConfiguration(
                        "snapshot steps must be strictly increasing".to_string(),
                    ));
                }
                if let Some(&last) = steps.last()
                    && last > time_steps
                {
                    return Err(DiffusionError::InvalidConfiguration(format!(
                        "snapshot step {} is past the last step {}",
                        last, time_steps
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Number of snapshots to preallocate for
    pub(crate) fn capacity(&self, time_steps: usize) -> usize {
        let retained = match self {
            SnapshotSchedule::Every(stride) => (time_steps / (*stride).max(1)).saturating_add(2),
            SnapshotSchedule::At(steps) => steps.len(),
            SnapshotSchedule::FinalOnly => 1,
        };
        retained.min(MAX_PREALLOCATED_SNAPSHOTS)
    }
}

const MAX_PREALLOCATED_SNAPSHOTS: usize = 1024;

impl Default for SnapshotSchedule {
    fn default() -> Self {
        SnapshotSchedule::Every(1)
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Run length and retention policy
///
/// # Examples
///
/// ```rust
/// use heat2d_rs::solver::{SnapshotSchedule, SolverConfiguration};
///
/// let config = SolverConfiguration::time_evolution(100)
///     .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfiguration {
    /// Number of explicit steps to take
    pub time_steps: usize,

    /// Steps to keep in the result
    pub schedule: SnapshotSchedule,

    /// Scan the field for NaN/Inf after every step
    pub check_finite: bool,
}

impl SolverConfiguration {
    /// Run `time_steps` steps and keep every intermediate field
    pub fn time_evolution(time_steps: usize) -> Self {
        Self {
            time_steps,
            schedule: SnapshotSchedule::default(),
            check_finite: true,
        }
    }

    /// Same run with another retention policy
    pub fn with_schedule(mut self, schedule: SnapshotSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Skip the per-step NaN/Inf scan
    pub fn without_finite_check(mut self) -> Self {
        self.check_finite = false;
        self
    }

    /// Reject zero-length runs and inconsistent schedules
    pub fn validate(&self) -> Result<()> {
        if self.time_steps == 0 {
            return Err(DiffusionError::InvalidConfiguration(
                "time steps must be greater than 0".to_string(),
            ));
        }
        self.schedule.validate(self.time_steps)
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Retained fields of a run
///
/// `steps[k]`, `time_points[k]` and `snapshots[k]` describe the same state.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Physical time of each snapshot, `step · dt`
    pub time_points: Vec<f64>,

    /// Step index of each snapshot
    pub steps: Vec<usize>,

    /// Retained fields, in step order
    pub snapshots: Vec<TemperatureField>,

    /// Field after the last step
    pub final_field: TemperatureField,

    /// Free-form run information (solver name, dt, elapsed time...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Bundle retained states with the final field
    pub fn new(
        time_points: Vec<f64>,
        steps: Vec<usize>,
        snapshots: Vec<TemperatureField>,
        final_field: TemperatureField,
    ) -> Self {
        Self {
            time_points,
            steps,
            snapshots,
            final_field,
            metadata: HashMap::new(),
        }
    }

    /// Record a metadata entry, replacing any previous value for `key`
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot taken at step `step`, if it was retained
    pub fn snapshot_at(&self, step: usize) -> Option<&TemperatureField> {
        self.steps
            .binary_search(&step)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// `(step, time, field)` for every retained snapshot
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, &TemperatureField)> {
        self.steps
            .iter()
            .zip(&self.time_points)
            .zip(&self.snapshots)
            .map(|((&step, &time), field)| (step, time, field))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
