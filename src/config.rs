//! Configuration types shared by every model.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::spring::DampingMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global parameters applied to every particle of a model.
///
/// # Builder Pattern
/// ```
/// use springy::config::SimulationConfig;
/// use springy::spring::DampingMode;
///
/// let config: SimulationConfig<f32> = SimulationConfig::new()
///     .with_gravity(9.81)
///     .with_air_resistance(0.05)
///     .with_damping_mode(DampingMode::Relative);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig<F: Float> {
    /// Downward gravitational acceleration. Default: 9.81.
    pub gravity: F,
    /// Linear air drag coefficient. Default: 0.1.
    pub air_k: F,
    /// How springs damp endpoint velocities. Default: relative.
    pub damping_mode: DampingMode,
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            gravity: F::from_f64(9.81),
            air_k: F::from_f64(0.1),
            damping_mode: DampingMode::Relative,
        }
    }

    /// Set the gravitational acceleration (positive pulls towards -y).
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the air drag coefficient.
    pub fn with_air_resistance(mut self, air_k: F) -> Self {
        self.air_k = air_k;
        self
    }

    /// Set the spring damping strategy.
    pub fn with_damping_mode(mut self, damping_mode: DampingMode) -> Self {
        self.damping_mode = damping_mode;
        self
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mass and spring parameters every generated topology is built from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material<F: Float> {
    pub particle_mass: F,
    /// Distance between neighbouring particles at construction.
    pub spacing: F,
    pub stiffness: F,
    pub damping: F,
}

impl<F: Float> Material<F> {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.particle_mass.is_finite() && self.particle_mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(self.spacing.is_finite() && self.spacing > F::zero()) {
            return Err(PhysicsError::InvalidSpacing);
        }
        check_spring(self.stiffness, self.damping)
    }
}

pub(crate) fn check_spring<F: Float>(stiffness: F, damping: F) -> Result<(), PhysicsError> {
    if !(stiffness.is_finite() && stiffness > F::zero()) {
        return Err(PhysicsError::InvalidStiffness);
    }
    if !(damping.is_finite() && damping >= F::zero()) {
        return Err(PhysicsError::InvalidDamping);
    }
    Ok(())
}

pub(crate) fn check_rest_length<F: Float>(rest_length: F) -> Result<(), PhysicsError> {
    if !(rest_length.is_finite() && rest_length >= F::zero()) {
        return Err(PhysicsError::InvalidRestLength);
    }
    Ok(())
}

pub(crate) fn check_resolution(resolution: usize, min: usize) -> Result<(), PhysicsError> {
    if resolution < min {
        return Err(PhysicsError::InvalidResolution { resolution, min });
    }
    Ok(())
}
