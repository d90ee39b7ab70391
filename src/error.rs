//! Error types shared by every stage of the solver pipeline
//!
//! All failures are contract violations detected synchronously at the call
//! that received the bad input. No operation mutates state before it has
//! finished validating, so an `Err` always leaves the caller's values intact.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, DiffusionError>;

/// Errors raised by domain setup, parameter derivation and time stepping
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffusionError {
    /// A geometry or physical input is non-positive, non-finite or inconsistent
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A derived quantity was requested before the values it depends on were set
    #[error("Prerequisite not set: {what}")]
    PrerequisiteNotSet { what: &'static str },

    /// Stepping was requested with a time step above the explicit stability bound
    #[error("Unstable time step dt = {dt:e} (stability limit is {limit:e})")]
    UnstableTimestep { dt: f64, limit: f64 },

    /// A field does not have the shape of the grid it is used with
    #[error("Field shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// NaN or infinity appeared in the field
    #[error("Non-finite temperature detected at step {step}")]
    NonFinite { step: usize },

    /// Solver configuration rejected before any step was taken
    #[error("Invalid solver configuration: {0}")]
    InvalidConfiguration(String),
}

impl DiffusionError {
    /// Shorthand used by the validation helpers
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }
}

/// Require `value` to be finite and strictly positive
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DiffusionError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(DiffusionError::invalid(name, value, "must be strictly positive"));
    }
    Ok(())
}

/// Require `value` to be finite
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DiffusionError::invalid(name, value, "must be finite"))
    }
}
