//! Physical description of the heat problem
//!
//! This module defines WHAT is simulated: the grid, the material and
//! temperature parameters, and the temperature field with its initial state.
//! How the field is advanced in time lives in [`crate::solver`].
//!
//! # Core Concepts
//!
//! - **DomainSpec**: plate extents and cell spacing, derived cell counts
//! - **PhysicalParameters**: diffusion coefficient, temperature levels, stable time step
//! - **TemperatureField**: dense `(nx, ny)` grid of temperatures
//! - **FieldInitializer**: builds the field at `t = 0`
//!
//! # Pipeline
//!
//! Each stage takes the previous stage's output, so nothing can be computed
//! before its inputs exist:
//!
//! ```text
//! DomainSpec ──► PhysicalParameters ──► set_initial_condition ──► TemperatureField
//!     │                                        ▲
//!     └────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use heat2d_rs::physics::{DomainSpec, PhysicalParameters, set_initial_condition};
//!
//! let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
//! let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
//! let field = set_initial_condition(&domain, &params);
//!
//! assert_eq!(field.shape(), domain.shape());
//! # Ok::<(), heat2d_rs::DiffusionError>(())
//! ```

pub mod domain;
pub mod field;
pub mod initial;
pub mod parameters;

pub use domain::DomainSpec;
pub use field::TemperatureField;
pub use initial::{
    FieldInitializer,
    GridLayout,
    HotDisc,
    InitialCondition,
    Uniform,
    set_initial_condition,
};
pub use parameters::{PhysicalParameters, TimeStep, stability_limit};
