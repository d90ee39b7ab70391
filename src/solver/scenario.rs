//! Simulation scenario definition
//!
//! A scenario bundles the grid, the physical parameters and the initial
//! field. It is the "WHAT to solve": the same scenario can be run by any
//! [`Solver`](crate::solver::Solver) under any configuration.

use crate::error::{DiffusionError, Result};
use crate::physics::{
    DomainSpec,
    FieldInitializer,
    HotDisc,
    PhysicalParameters,
    TemperatureField,
    TimeStep,
    Uniform,
};
use crate::solver::methods::Evolution;

/// Immutable problem definition
///
/// # Invariants
///
/// - `parameters` were derived for the spacing of `domain`
/// - `initial` has shape `domain.shape()`
/// - `time_step` respects the stability bound of `parameters`
///
/// # Examples
///
/// ```rust
/// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
/// use heat2d_rs::solver::Scenario;
///
/// let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
/// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
/// let scenario = Scenario::hot_disc(domain, params)?;
///
/// assert_eq!(scenario.initial().shape(), (100, 100));
/// assert_eq!(scenario.time_step().get(), params.dt());
/// # Ok::<(), heat2d_rs::DiffusionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    domain: DomainSpec,
    parameters: PhysicalParameters,
    initial: TemperatureField,
    time_step: TimeStep,
    initial_condition: String,
}

impl Scenario {
    /// Scenario with a caller-built initial field
    ///
    /// # Errors
    ///
    /// - [`DiffusionError::InvalidParameter`] when `parameters` were derived
    ///   for another cell spacing than `domain`
    /// - [`DiffusionError::ShapeMismatch`] when `initial` is not `(nx, ny)`
    pub fn new(
        domain: DomainSpec,
        parameters: PhysicalParameters,
        initial: TemperatureField,
    ) -> Result<Self> {
        Self::assemble(domain, parameters, initial, "Custom")
    }

    /// Scenario whose initial field comes from `initializer`
    pub fn with_initializer(
        domain: DomainSpec,
        parameters: PhysicalParameters,
        initializer: &FieldInitializer,
    ) -> Result<Self> {
        Self::check_spacing(&domain, &parameters)?;
        let initial = initializer.initialize(&domain, &parameters);
        Self::assemble(domain, parameters, initial, initializer.name())
    }

    /// The reference experiment: hot disc of radius 2 centred at `(5, 5)`
    pub fn hot_disc(domain: DomainSpec, parameters: PhysicalParameters) -> Result<Self> {
        Self::with_initializer(domain, parameters, &FieldInitializer::new(HotDisc::default()))
    }

    /// Whole plate at `T_cold`
    pub fn uniform(domain: DomainSpec, parameters: PhysicalParameters) -> Result<Self> {
        Self::with_initializer(domain, parameters, &FieldInitializer::new(Uniform))
    }

    fn assemble(
        domain: DomainSpec,
        parameters: PhysicalParameters,
        initial: TemperatureField,
        initial_condition: &str,
    ) -> Result<Self> {
        Self::check_spacing(&domain, &parameters)?;
        initial.ensure_shape(domain.shape())?;

        if !domain.has_interior() {
            log::warn!(
                "Grid {} x {} has no interior cells, stepping will not change the field",
                domain.nx(),
                domain.ny()
            );
        }

        Ok(Self {
            domain,
            time_step: parameters.time_step(),
            parameters,
            initial,
            initial_condition: initial_condition.to_string(),
        })
    }

    fn check_spacing(domain: &DomainSpec, parameters: &PhysicalParameters) -> Result<()> {
        if parameters.matches(domain) {
            Ok(())
        } else {
            Err(DiffusionError::InvalidParameter {
                name: "dx",
                value: parameters.dx(),
                reason: "parameters were derived for a different cell spacing than the domain",
            })
        }
    }

    /// Same scenario stepped with a smaller `dt`
    ///
    /// # Errors
    ///
    /// [`DiffusionError::UnstableTimestep`] when `dt` is not positive or exceeds
    /// the stability bound.
    pub fn with_time_step(mut self, dt: f64) -> Result<Self> {
        self.time_step = TimeStep::checked(dt, &self.parameters)?;
        Ok(self)
    }

    pub fn domain(&self) -> &DomainSpec {
        &self.domain
    }

    pub fn parameters(&self) -> &PhysicalParameters {
        &self.parameters
    }

    /// Field at step 0
    pub fn initial(&self) -> &TemperatureField {
        &self.initial
    }

    /// Step length used by solvers
    pub fn time_step(&self) -> TimeStep {
        self.time_step
    }

    /// Name of the initial condition ("Hot Disc", "Uniform", "Custom"...)
    pub fn initial_condition(&self) -> &str {
        &self.initial_condition
    }

    /// Lazy sequence of the fields after step 1, 2, ...
    ///
    /// ```rust
    /// use heat2d_rs::physics::{DomainSpec, PhysicalParameters};
    /// use heat2d_rs::solver::Scenario;
    ///
    /// let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1)?;
    /// let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0)?;
    /// let scenario = Scenario::hot_disc(domain, params)?;
    ///
    /// let tenth = scenario.evolve().nth(9).unwrap();
    /// assert_eq!(tenth[(0, 0)], 300.0);
    /// # Ok::<(), heat2d_rs::DiffusionError>(())
    /// ```
    pub fn evolve(&self) -> Evolution {
        Evolution::new(self)
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> (DomainSpec, PhysicalParameters) {
        let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1).unwrap();
        let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0).unwrap();
        (domain, params)
    }

    #[test]
    fn test_hot_disc_scenario() {
        let (domain, params) = reference();
        let scenario = Scenario::hot_disc(domain, params).unwrap();

        assert_eq!(scenario.initial_condition(), "Hot Disc");
        assert_eq!(scenario.initial()[(50, 50)], 700.0);
        assert_eq!(scenario.domain(), &domain);
        assert_eq!(scenario.parameters(), &params);
    }

    #[test]
    fn test_custom_field_shape_checked() {
        let (domain, params) = reference();
        let wrong = TemperatureField::uniform(100, 99, 300.0);

        let err = Scenario::new(domain, params, wrong).unwrap_err();
        assert_eq!(
            err,
            DiffusionError::ShapeMismatch { expected: (100, 100), found: (100, 99) }
        );

        let right = TemperatureField::uniform(100, 100, 300.0);
        let scenario = Scenario::new(domain, params, right).unwrap();
        assert_eq!(scenario.initial_condition(), "Custom");
    }

    #[test]
    fn test_parameters_from_other_spacing_rejected() {
        let (domain, _) = reference();
        let coarse = DomainSpec::new(10.0, 10.0, 0.2, 0.2).unwrap();
        let params = PhysicalParameters::new(&coarse, 4.0, 300.0, 700.0).unwrap();

        let err = Scenario::uniform(domain, params).unwrap_err();
        assert!(matches!(err, DiffusionError::InvalidParameter { name: "dx", .. }));
    }

    #[test]
    fn test_smaller_time_step() {
        let (domain, params) = reference();
        let scenario = Scenario::uniform(domain, params).unwrap();

        let halved = scenario.clone().with_time_step(params.dt() / 2.0).unwrap();
        assert_eq!(halved.time_step().get(), params.dt() / 2.0);

        let err = scenario.with_time_step(params.dt() * 2.0).unwrap_err();
        assert!(matches!(err, DiffusionError::UnstableTimestep { .. }));
    }

    #[test]
    fn test_grid_without_interior_accepted() {
        let domain = DomainSpec::new(0.2, 1.0, 0.1, 0.1).unwrap();
        let params = PhysicalParameters::new(&domain, 1.0, 0.0, 1.0).unwrap();

        let scenario = Scenario::uniform(domain, params).unwrap();
        assert_eq!(scenario.initial().shape(), (2, 10));
    }

    #[test]
    fn test_fine_grid_typed_and_raw_paths_agree() {
        let domain = DomainSpec::new(1e-159, 1e-159, 1e-160, 1e-160).unwrap();
        let params = PhysicalParameters::new(&domain, 1.0, 300.0, 300.0).unwrap();
        let scenario = Scenario::uniform(domain, params).unwrap();

        assert!(scenario.time_step().get() > 0.0);

        let mut field = scenario.initial().clone();
        crate::solver::step(&mut field, params.dt(), domain.dx(), domain.dy(), params.d(), 1).unwrap();
        let mut evolution = scenario.evolve();
        assert_eq!(&field, evolution.advance());
    }
}
