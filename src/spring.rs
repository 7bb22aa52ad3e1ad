//! Damped linear springs between two particles of the same arena.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a spring's damping force is derived from endpoint velocities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DampingMode {
    /// Damp the relative velocity along the spring axis. Equal and opposite
    /// on both ends, so it vanishes when the pair moves rigidly.
    #[default]
    Relative,
    /// Damp each endpoint's own velocity along the spring axis. Also slows
    /// rigid translation along the axis.
    Projected,
}

/// A damped linear connector. `head` and `tail` index the owning model's
/// particle list.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    head: usize,
    tail: usize,
    rest_length: F,
    stiffness: F,
    damping: F,
}

impl<F: Float> Spring<F> {
    pub fn new(head: usize, tail: usize, rest_length: F, stiffness: F, damping: F) -> Self {
        Spring { head, tail, rest_length, stiffness, damping }
    }

    /// Rest length is the current distance between the two particles,
    /// frozen at construction.
    pub fn from_particles(
        head: usize,
        tail: usize,
        particles: &[Particle<F>],
        stiffness: F,
        damping: F,
    ) -> Self {
        let rest_length = particles[head].pos.distance(particles[tail].pos);
        Spring { head, tail, rest_length, stiffness, damping }
    }

    pub fn head(&self) -> usize { self.head }
    pub fn tail(&self) -> usize { self.tail }
    pub fn rest_length(&self) -> F { self.rest_length }
    pub fn stiffness(&self) -> F { self.stiffness }
    pub fn damping(&self) -> F { self.damping }

    /// Unit vector from tail to head and the current length, or `None`
    /// when the endpoints coincide.
    fn axis(&self, particles: &[Particle<F>]) -> Option<(Vec3<F>, F)> {
        let delta = particles[self.head].pos - particles[self.tail].pos;
        let len = delta.length();
        if len.is_near_zero(F::from_f64(1e-10)) {
            None
        } else {
            Some((delta.scale(F::one() / len), len))
        }
    }

    /// Restoring force on the head: pulls together when stretched, pushes
    /// apart when compressed. Zero for coincident endpoints.
    pub fn spring_force(&self, particles: &[Particle<F>]) -> Vec3<F> {
        match self.axis(particles) {
            Some((dir, len)) => dir.scale(-self.stiffness * (len - self.rest_length)),
            None => Vec3::zero(),
        }
    }

    pub fn head_spring_force(&self, particles: &[Particle<F>]) -> Vec3<F> {
        self.spring_force(particles)
    }

    pub fn tail_spring_force(&self, particles: &[Particle<F>]) -> Vec3<F> {
        -self.spring_force(particles)
    }

    /// Damping forces on (head, tail).
    ///
    /// The damping axis is the spring axis itself, so a spring sitting
    /// exactly at its rest length is still damped. Only coincident
    /// endpoints give zero.
    pub fn damping_forces(&self, particles: &[Particle<F>], mode: DampingMode) -> (Vec3<F>, Vec3<F>) {
        let Some((dir, _)) = self.axis(particles) else {
            return (Vec3::zero(), Vec3::zero());
        };
        let head_vel = particles[self.head].velocity;
        let tail_vel = particles[self.tail].velocity;
        match mode {
            DampingMode::Relative => {
                let f = (head_vel - tail_vel).project_onto(dir).scale(-self.damping);
                (f, -f)
            }
            DampingMode::Projected => (
                head_vel.project_onto(dir).scale(-self.damping),
                tail_vel.project_onto(dir).scale(-self.damping),
            ),
        }
    }

    /// Total force on (head, tail), both computed from the same state.
    pub fn forces(&self, particles: &[Particle<F>], mode: DampingMode) -> (Vec3<F>, Vec3<F>) {
        let spring = self.spring_force(particles);
        let (head_damp, tail_damp) = self.damping_forces(particles, mode);
        (spring + head_damp, -spring + tail_damp)
    }

    pub fn apply(&self, particles: &mut [Particle<F>], dt: F, mode: DampingMode) {
        let (head_force, tail_force) = self.forces(particles, mode);
        particles[self.head].apply_force(head_force, dt);
        particles[self.tail].apply_force(tail_force, dt);
    }

    pub fn potential_energy(&self, particles: &[Particle<F>]) -> F {
        let len = particles[self.head].pos.distance(particles[self.tail].pos);
        let stretch = len - self.rest_length;
        F::half() * self.stiffness * stretch * stretch
    }
}
