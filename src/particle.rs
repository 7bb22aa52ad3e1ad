//! Point masses integrated with semi-implicit Euler.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// A point mass with explicit velocity.
///
/// Forces only ever touch `velocity`; `integrate` is the single place that
/// moves `pos`. A stationary particle ignores both.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub velocity: Vec3<F>,
    initial_pos: Vec3<F>,
    mass: F,
    inv_mass: F,
    stationary: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec3<F>, mass: F) -> Self {
        let inv_mass = if mass.is_near_zero(F::from_f64(1e-10)) {
            F::zero()
        } else {
            F::one() / mass
        };
        Particle {
            pos,
            velocity: Vec3::zero(),
            initial_pos: pos,
            mass,
            inv_mass,
            stationary: false,
        }
    }

    /// A particle that never moves, whatever forces reach it.
    pub fn stationary(pos: Vec3<F>, mass: F) -> Self {
        Particle { stationary: true, ..Particle::new(pos, mass) }
    }

    pub fn with_stationary(self, stationary: bool) -> Self {
        Particle { stationary, ..self }
    }

    pub fn apply_force(&mut self, force: Vec3<F>, dt: F) {
        if !self.stationary {
            self.velocity = self.velocity + force.scale(self.inv_mass * dt);
        }
    }

    /// Gravity as an acceleration: heavier particles fall just as fast.
    pub fn apply_gravity(&mut self, g: F, dt: F) {
        if !self.stationary {
            self.velocity.y = self.velocity.y - g * dt;
        }
    }

    /// Linear drag opposing the current velocity.
    pub fn apply_air_resistance(&mut self, k: F, dt: F) {
        let drag = self.velocity.scale(-k);
        self.apply_force(drag, dt);
    }

    /// Advance position by the (already updated) velocity.
    pub fn integrate(&mut self, dt: F) {
        if !self.stationary {
            self.pos = self.pos + self.velocity.scale(dt);
        }
    }

    /// Position the particle would reach this step without further forces.
    pub fn predicted_pos(&self, dt: F) -> Vec3<F> {
        if self.stationary {
            self.pos
        } else {
            self.pos + self.velocity.scale(dt)
        }
    }

    pub fn reset(&mut self) {
        self.pos = self.initial_pos;
        self.velocity = Vec3::zero();
    }

    pub fn initial_pos(&self) -> Vec3<F> { self.initial_pos }
    pub fn mass(&self) -> F { self.mass }
    pub fn is_stationary(&self) -> bool { self.stationary }

    pub fn kinetic_energy(&self) -> F {
        F::half() * self.mass * self.velocity.length_sq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_scales_with_inverse_mass() {
        let mut p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 2.0);
        p.apply_force(Vec3::new(4.0, 0.0, 0.0), 0.5);
        assert!((p.velocity.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn gravity_ignores_mass() {
        let mut light = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        let mut heavy = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 50.0);
        light.apply_gravity(9.81, 0.1);
        heavy.apply_gravity(9.81, 0.1);
        assert_eq!(light.velocity, heavy.velocity);
        assert!((light.velocity.y + 0.981).abs() < 1e-6);
    }

    #[test]
    fn air_resistance_opposes_motion() {
        let mut p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        p.velocity = Vec3::new(10.0, -4.0, 0.0);
        p.apply_air_resistance(0.5, 0.1);
        assert!((p.velocity.x - 9.5).abs() < 1e-5);
        assert!((p.velocity.y + 3.8).abs() < 1e-5);
    }

    #[test]
    fn stationary_ignores_everything() {
        let start = Vec3::new(1.0f32, 2.0, 3.0);
        let mut p = Particle::stationary(start, 1.0);
        p.apply_force(Vec3::new(1000.0, 1000.0, 1000.0), 1.0);
        p.apply_gravity(9.81, 1.0);
        p.apply_air_resistance(3.0, 1.0);
        p.integrate(1.0);
        assert_eq!(p.pos, start);
        assert_eq!(p.velocity, Vec3::zero());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut p = Particle::new(Vec3::new(0.0f32, 5.0, 0.0), 1.0);
        p.velocity = Vec3::new(1.0, 1.0, 1.0);
        p.integrate(2.0);
        p.reset();
        assert_eq!(p.pos, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(p.velocity, Vec3::zero());
    }
}
