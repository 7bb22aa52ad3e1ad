//! Error types for model construction.

use core::fmt;

/// Errors that can occur while building a model.
///
/// Stepping never fails: degenerate geometry is handled locally as zero
/// force, so these only come out of constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Spring stiffness must be positive and finite.
    InvalidStiffness,
    /// Spring damping must be non-negative and finite.
    InvalidDamping,
    /// Spacing between neighbouring particles must be positive and finite.
    InvalidSpacing,
    /// Spring rest length must be non-negative and finite.
    InvalidRestLength,
    /// Grid or cube resolution is too small for the model.
    InvalidResolution { resolution: usize, min: usize },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidStiffness => write!(f, "stiffness must be positive and finite"),
            PhysicsError::InvalidDamping => write!(f, "damping must be non-negative and finite"),
            PhysicsError::InvalidSpacing => write!(f, "spacing must be positive and finite"),
            PhysicsError::InvalidRestLength => write!(f, "rest length must be non-negative and finite"),
            PhysicsError::InvalidResolution { resolution, min } => {
                write!(f, "resolution {} is below the minimum of {}", resolution, min)
            }
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

impl core::error::Error for PhysicsError {}
