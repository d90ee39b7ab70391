//! Flat run settings
//!
//! [`SimulationSettings`] holds every caller input of a run as plain numbers,
//! the shape a CLI or configuration file naturally produces. [`SimulationSettings::build`]
//! pushes them through the typed pipeline, so every check of
//! [`DomainSpec::new`], [`PhysicalParameters::new`] and
//! [`SolverConfiguration::validate`] applies.
//!
//! With the `serde` feature the struct can be read from any serde format.
//! Missing fields take their default value:
//!
//! ```text
//! (
//!     diffusivity: 1.0,
//!     time_steps: 500,
//!     snapshots: [0, 250, 500],
//! )
//! ```

use crate::error::Result;
use crate::physics::{DomainSpec, PhysicalParameters};
use crate::solver::{Scenario, SnapshotSchedule, SolverConfiguration};

/// Inputs of a hot-disc run
///
/// Defaults reproduce the reference experiment: a 10 x 10 plate at
/// `dx = dy = 0.1`, `D = 4`, `T_cold = 300`, `T_hot = 700`, 100 steps with
/// snapshots at steps 0, 10, 50 and 100.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationSettings {
    /// Plate width
    pub w: f64,
    /// Plate height
    pub h: f64,
    /// Cell spacing along x
    pub dx: f64,
    /// Cell spacing along y
    pub dy: f64,
    /// Diffusion coefficient D
    pub diffusivity: f64,
    pub t_cold: f64,
    pub t_hot: f64,
    /// Step length; `None` means the stability bound
    pub dt: Option<f64>,
    /// Number of steps to run
    pub time_steps: usize,
    /// Steps to keep; empty keeps every step
    pub snapshots: Vec<usize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            w: 10.0,
            h: 10.0,
            dx: 0.1,
            dy: 0.1,
            diffusivity: 4.0,
            t_cold: 300.0,
            t_hot: 700.0,
            dt: None,
            time_steps: 100,
            snapshots: vec![0, 10, 50, 100],
        }
    }
}

impl SimulationSettings {
    /// Validate the settings into a hot-disc scenario and a run configuration
    ///
    /// # Errors
    ///
    /// Any error of the typed constructors, reported for the first invalid input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heat2d_rs::settings::SimulationSettings;
    ///
    /// let (scenario, config) = SimulationSettings::default().build()?;
    /// assert_eq!(scenario.domain().shape(), (100, 100));
    /// assert_eq!(config.time_steps, 100);
    /// # Ok::<(), heat2d_rs::DiffusionError>(())
    /// ```
    pub fn build(&self) -> Result<(Scenario, SolverConfiguration)> {
        let domain = DomainSpec::new(self.w, self.h, self.dx, self.dy)?;
        let parameters = PhysicalParameters::new(&domain, self.diffusivity, self.t_cold, self.t_hot)?;

        let mut scenario = Scenario::hot_disc(domain, parameters)?;
        if let Some(dt) = self.dt {
            scenario = scenario.with_time_step(dt)?;
        }

        let schedule = if self.snapshots.is_empty() {
            SnapshotSchedule::Every(1)
        } else {
            SnapshotSchedule::At(self.snapshots.clone())
        };
        let config = SolverConfiguration::time_evolution(self.time_steps).with_schedule(schedule);
        config.validate()?;

        log::debug!(
            "Settings: {} x {} grid, D = {}, {} steps, snapshots {:?}",
            domain.nx(),
            domain.ny(),
            self.diffusivity,
            self.time_steps,
            config.schedule
        );

        Ok((scenario, config))
    }
}
