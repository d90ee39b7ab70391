//! heat2d-rs: explicit finite-difference solver for the 2D heat equation
//!
//! Solves `∂u/∂t = D·∇²u` on a rectangular plate with fixed (Dirichlet)
//! boundary values, using the forward-Euler five-point stencil at the largest
//! stable time step.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`]: grid, parameters, temperature field, initial conditions (WHAT)
//!    - [`solver`]: stencil, double buffer, time stepping (HOW)
//!
//! 2. **Typed Pipeline**
//!    - `PhysicalParameters` can only be built from a `DomainSpec`
//!    - the initial field needs both
//!    - a `Scenario` owns all three and checks they agree
//!
//! # Quick Start
//!
//! ```rust
//! use heat2d_rs::prelude::*;
//!
//! # fn main() -> heat2d_rs::Result<()> {
//! // 1. Grid and material
//! let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
//! let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
//!
//! // 2. Scenario: hot disc on a cold plate
//! let scenario = Scenario::hot_disc(domain, params)?;
//!
//! // 3. Run 100 steps, keep four snapshots
//! let config = SolverConfiguration::time_evolution(100)
//!     .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
//! let result = EulerSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Hand the arrays to a plotting layer
//! for (step, time, field) in result.iter() {
//!     println!("step {step} (t = {time:.4}): max {:.1}", field.max());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: problem description
//! - [`solver`]: time stepping
//! - [`settings`]: flat run settings for CLI/config layers
//! - [`error`]: the crate error type
//!
//! # Features
//!
//! - `parallel` (default): row-parallel stencil sweeps with rayon
//! - `serde`: `Serialize`/`Deserialize` for [`settings::SimulationSettings`]

pub mod error;
pub mod physics;
pub mod settings;
pub mod solver;

pub use error::{DiffusionError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use heat2d_rs::prelude::*;
    //! ```
    pub use crate::error::DiffusionError;
    pub use crate::physics::{
        DomainSpec,
        FieldInitializer,
        HotDisc,
        PhysicalParameters,
        TemperatureField,
        TimeStep,
        set_initial_condition,
        stability_limit,
    };
    pub use crate::settings::SimulationSettings;
    pub use crate::solver::{
        EulerSolver,
        Evolution,
        Scenario,
        SimulationResult,
        SnapshotSchedule,
        Solver,
        SolverConfiguration,
        step,
    };
}
