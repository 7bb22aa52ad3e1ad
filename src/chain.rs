//! Spring chain hanging from a fixed head.

use crate::config::{check_rest_length, Material, SimulationConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::model::{Model, ModelBuilder};
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for creating a chain.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig<F: Float> {
    /// Free particles after the head.
    pub particle_count: usize,
    /// `spacing` is the distance between consecutive particles at
    /// construction.
    pub material: Material<F>,
    pub rest_length: F,
    pub simulation: SimulationConfig<F>,
}

impl<F: Float> ChainConfig<F> {
    pub fn with_particles(particle_count: usize) -> Self {
        ChainConfig { particle_count, ..Self::default() }
    }
}

impl<F: Float> Default for ChainConfig<F> {
    fn default() -> Self {
        ChainConfig {
            particle_count: 1,
            material: Material {
                particle_mass: F::one(),
                spacing: F::two(),
                stiffness: F::from_f64(10.0),
                damping: F::half(),
            },
            rest_length: F::two(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl<F: Float> Model<F> {
    /// One mass on one spring.
    pub fn single_spring() -> Self {
        Self::build_chain(&ChainConfig::with_particles(1))
    }

    /// Twelve masses in a row.
    pub fn spring_chain() -> Self {
        Self::build_chain(&ChainConfig::with_particles(12))
    }

    /// A stationary head at the origin (particle 0) followed by
    /// `particle_count` free particles laid out along +x.
    pub fn chain_with(config: &ChainConfig<F>) -> Result<Self, PhysicsError> {
        config.material.validate()?;
        check_rest_length(config.rest_length)?;
        Ok(Self::build_chain(config))
    }

    fn build_chain(config: &ChainConfig<F>) -> Self {
        let n = config.particle_count;
        let m = &config.material;
        let mut builder = ModelBuilder::with_capacity(n + 1, n);
        let head = builder.add_particle(Particle::stationary(Vec3::zero(), m.particle_mass));

        let mut prev = head;
        for i in 0..n {
            let x = F::from_usize(i + 1) * m.spacing;
            let idx = builder.add_particle(Particle::new(Vec3::new(x, F::zero(), F::zero()), m.particle_mass));
            // Particles start `spacing` apart, which need not equal the rest length.
            builder.add_spring_unchecked(Spring::new(prev, idx, config.rest_length, m.stiffness, m.damping));
            prev = idx;
        }

        tracing::debug!(particles = n, "building chain");
        builder.build(config.simulation)
    }
}
