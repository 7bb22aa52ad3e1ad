//! Model-specific external forces: floor bounce, table contact, face wind.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The external-force hook a model runs after gravity and drag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExternalForce<F: Float> {
    #[default]
    None,
    FloorBounce(FloorContact<F>),
    TableContact(TableContact<F>),
    FaceWind(FaceWind<F>),
}

impl<F: Float> ExternalForce<F> {
    /// Per-particle part of the hook.
    pub fn apply_to_particle(&self, particle: &mut Particle<F>, dt: F) {
        match self {
            ExternalForce::FloorBounce(floor) => floor.apply(particle),
            ExternalForce::TableContact(table) => table.apply(particle, dt),
            ExternalForce::None | ExternalForce::FaceWind(_) => {}
        }
    }

    /// Per-face part of the hook. Runs after every particle has been
    /// through `apply_to_particle`.
    pub fn apply_to_faces(&self, particles: &mut [Particle<F>], faces: &[[usize; 3]], time: F, dt: F) {
        if let ExternalForce::FaceWind(wind) = self {
            wind.apply(particles, faces, time, dt);
        }
    }
}

/// Bouncy, sticky ground plane at `y = ground`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloorContact<F: Float> {
    pub ground: F,
    /// Fraction of downward speed returned as upward speed. Default: 0.3.
    pub restitution: F,
    /// Height above ground still counted as touching. Default: 1e-4.
    pub contact_band: F,
    /// Below this speed a touching particle is slowed by friction. Default: 0.5.
    pub friction_speed: F,
    /// Velocity multiplier applied by friction. Default: 0.1.
    pub friction: F,
}

impl<F: Float> FloorContact<F> {
    pub fn at(ground: F) -> Self {
        FloorContact {
            ground,
            restitution: F::from_f64(0.3),
            contact_band: F::from_f64(1e-4),
            friction_speed: F::from_f64(0.5),
            friction: F::from_f64(0.1),
        }
    }

    pub fn apply(&self, p: &mut Particle<F>) {
        if p.is_stationary() {
            return;
        }
        let height = p.pos.y - self.ground;
        if height < F::zero() {
            p.velocity.y = p.velocity.y.abs() * self.restitution;
        } else if height < self.contact_band && p.velocity.length() < self.friction_speed {
            p.velocity = p.velocity.scale(self.friction);
        }
    }
}

impl<F: Float> Default for FloorContact<F> {
    fn default() -> Self {
        Self::at(F::zero())
    }
}

/// A round table top: a horizontal disc at `center.y`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableContact<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
    /// Multiplier on the reflected vertical speed. Default: 0.01.
    pub damping: F,
}

impl<F: Float> TableContact<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        TableContact { center, radius, damping: F::from_f64(0.01) }
    }

    fn covers(&self, pos: Vec3<F>) -> bool {
        pos.horizontal_distance(self.center) <= self.radius
    }

    /// Reflect and kill vertical speed for a particle about to pass through
    /// the table top this step.
    pub fn apply(&self, p: &mut Particle<F>, dt: F) {
        if p.is_stationary() {
            return;
        }
        let next = p.predicted_pos(dt);
        if !(self.covers(p.pos) && self.covers(next)) {
            return;
        }
        let above_now = p.pos.y >= self.center.y;
        let above_next = next.y >= self.center.y;
        if above_now != above_next {
            p.velocity.y = -p.velocity.y * self.damping;
        }
    }
}

/// Time-varying wind pushing on triangle faces.
///
/// The wind is `direction * strength` modulated by a gust wave travelling
/// over the surface, plus a smaller flutter along x.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceWind<F: Float> {
    pub direction: Vec3<F>,
    pub strength: F,
    /// Relative amplitude of the gust wave.
    pub gust: F,
    /// Gust angular frequency (rad/s).
    pub frequency: F,
    /// How fast the gust phase changes across the surface (rad/unit).
    pub spatial_frequency: F,
    /// Relative amplitude of the sideways flutter.
    pub flutter: F,
    /// Force per unit area per unit relative speed.
    pub drag: F,
}

impl<F: Float> Default for FaceWind<F> {
    fn default() -> Self {
        FaceWind {
            direction: Vec3::new(F::zero(), F::zero(), F::one()),
            strength: F::from_f64(12.0),
            gust: F::from_f64(0.5),
            frequency: F::from_f64(1.5),
            spatial_frequency: F::from_f64(0.4),
            flutter: F::from_f64(0.3),
            drag: F::from_f64(0.5),
        }
    }
}

impl<F: Float> FaceWind<F> {
    pub fn wind_at(&self, point: Vec3<F>, time: F) -> Vec3<F> {
        let phase = time * self.frequency + (point.x + point.y) * self.spatial_frequency;
        let base = self.direction.scale(self.strength * (F::one() + self.gust * phase.sin()));
        let sway = (phase * F::half() + point.z * self.spatial_frequency).cos();
        base + Vec3::new(self.strength * self.flutter * sway, F::zero(), F::zero())
    }

    /// Force on each vertex of one face.
    pub fn face_force(&self, particles: &[Particle<F>], face: [usize; 3], time: F) -> Vec3<F> {
        let [a, b, c] = face;
        let (pa, pb, pc) = (particles[a].pos, particles[b].pos, particles[c].pos);
        let third = F::one() / F::from_f64(3.0);
        let centroid = (pa + pb + pc).scale(third);
        let avg_vel = (particles[a].velocity + particles[b].velocity + particles[c].velocity).scale(third);
        let area = (pb - pa).cross(pc - pa).length() * F::half();
        (self.wind_at(centroid, time) - avg_vel).scale(self.drag * area)
    }

    pub fn apply(&self, particles: &mut [Particle<F>], faces: &[[usize; 3]], time: F, dt: F) {
        for &face in faces {
            let force = self.face_force(particles, face, time);
            for i in face {
                particles[i].apply_force(force, dt);
            }
        }
    }
}
