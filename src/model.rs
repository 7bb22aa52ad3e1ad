//! Particle/spring arena and the semi-implicit Euler step.

use crate::config::{check_rest_length, check_spring, SimulationConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::forces::ExternalForce;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec3;
use crate::{cube, grid};
use alloc::vec::Vec as AllocVec;

/// How particle indices map to lattice coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// No coordinate addressing.
    Free,
    /// Square grid, `index = x * resolution + y`.
    Grid { resolution: usize },
    /// Cube, `index = x * resolution² + y * resolution + z`.
    Cube { resolution: usize },
}

/// A mass-spring model: owns its particles and the springs between them.
///
/// Springs refer to particles by index, so a model is self-contained and
/// dropping it releases the whole graph.
#[derive(Clone, Debug)]
pub struct Model<F: Float> {
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<Spring<F>>,
    faces: AllocVec<[usize; 3]>,
    external: ExternalForce<F>,
    layout: Layout,
    config: SimulationConfig<F>,
    time: F,
}

impl<F: Float> Model<F> {
    /// Advance the model by `dt` seconds.
    pub fn step(&mut self, dt: F) {
        self.step_observed(dt, &mut NoOpStepObserver);
    }

    /// Advance the model by `dt`, reporting each phase to `observer`.
    ///
    /// Phases never interleave: all spring forces land in velocities, then
    /// all external forces, and only then does any particle move.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        let mode = self.config.damping_mode;
        for spring in self.springs.iter() {
            spring.apply(&mut self.particles, dt, mode);
        }
        observer.on_spring_forces();

        for p in self.particles.iter_mut() {
            p.apply_gravity(self.config.gravity, dt);
            p.apply_air_resistance(self.config.air_k, dt);
            self.external.apply_to_particle(p, dt);
        }
        self.external.apply_to_faces(&mut self.particles, &self.faces, self.time, dt);
        observer.on_external_forces();

        for p in self.particles.iter_mut() {
            p.integrate(dt);
        }
        observer.on_integrate();

        self.time = self.time + dt;
        tracing::trace!(time = ?self.time, "model stepped");
        observer.on_step_complete();
    }

    /// Put every particle back where it started, at rest.
    pub fn reset(&mut self) {
        for p in self.particles.iter_mut() {
            p.reset();
        }
        self.time = F::zero();
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    /// Triangles over particle indices, for wind and for drawing.
    pub fn faces(&self) -> &[[usize; 3]] { &self.faces }
    pub fn external_force(&self) -> &ExternalForce<F> { &self.external }
    pub fn layout(&self) -> Layout { self.layout }
    pub fn config(&self) -> &SimulationConfig<F> { &self.config }
    pub fn config_mut(&mut self) -> &mut SimulationConfig<F> { &mut self.config }
    /// Simulated seconds since construction or the last reset.
    pub fn time(&self) -> F { self.time }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Particle at grid coordinate `(x, y)`; `None` unless this is a grid
    /// model and the coordinate is inside it.
    pub fn grid_particle(&self, x: usize, y: usize) -> Option<&Particle<F>> {
        match self.layout {
            Layout::Grid { resolution } if x < resolution && y < resolution => {
                self.particles.get(grid::index(resolution, x, y))
            }
            _ => None,
        }
    }

    /// Particle at cube coordinate `(x, y, z)`; `None` unless this is a
    /// cube model and the coordinate is inside it.
    pub fn cube_particle(&self, x: usize, y: usize, z: usize) -> Option<&Particle<F>> {
        match self.layout {
            Layout::Cube { resolution } if x < resolution && y < resolution && z < resolution => {
                self.particles.get(cube::index(resolution, x, y, z))
            }
            _ => None,
        }
    }

    /// Kinetic energy plus stored spring energy (gravity not included).
    pub fn mechanical_energy(&self) -> F {
        let kinetic = self.particles.iter().fold(F::zero(), |acc, p| acc + p.kinetic_energy());
        self.springs
            .iter()
            .fold(kinetic, |acc, s| acc + s.potential_energy(&self.particles))
    }
}

/// Incrementally assembles a [`Model`]. Topology generators use this, and
/// so can callers wiring up their own graphs.
pub struct ModelBuilder<F: Float> {
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<Spring<F>>,
    faces: AllocVec<[usize; 3]>,
    external: ExternalForce<F>,
    layout: Layout,
}

impl<F: Float> ModelBuilder<F> {
    pub fn new() -> Self {
        ModelBuilder {
            particles: AllocVec::new(),
            springs: AllocVec::new(),
            faces: AllocVec::new(),
            external: ExternalForce::None,
            layout: Layout::Free,
        }
    }

    pub fn with_capacity(particles: usize, springs: usize) -> Self {
        ModelBuilder {
            particles: AllocVec::with_capacity(particles),
            springs: AllocVec::with_capacity(springs),
            ..Self::new()
        }
    }

    /// Add a particle, returning its index.
    pub fn add_particle(&mut self, particle: Particle<F>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    fn check_index(&self, index: usize) -> Result<(), PhysicsError> {
        if index >= self.particles.len() {
            return Err(PhysicsError::ParticleOutOfBounds { index, count: self.particles.len() });
        }
        Ok(())
    }

    /// Connect two particles with an explicit rest length.
    pub fn add_spring(
        &mut self,
        head: usize,
        tail: usize,
        rest_length: F,
        stiffness: F,
        damping: F,
    ) -> Result<(), PhysicsError> {
        self.check_index(head)?;
        self.check_index(tail)?;
        check_rest_length(rest_length)?;
        check_spring(stiffness, damping)?;
        self.springs.push(Spring::new(head, tail, rest_length, stiffness, damping));
        Ok(())
    }

    /// Connect two particles at their current distance.
    pub fn connect(&mut self, head: usize, tail: usize, stiffness: F, damping: F) -> Result<(), PhysicsError> {
        self.check_index(head)?;
        self.check_index(tail)?;
        check_spring(stiffness, damping)?;
        self.springs.push(Spring::from_particles(head, tail, &self.particles, stiffness, damping));
        Ok(())
    }

    pub fn add_face(&mut self, face: [usize; 3]) -> Result<(), PhysicsError> {
        for i in face {
            self.check_index(i)?;
        }
        self.faces.push(face);
        Ok(())
    }

    /// Generators call this after laying out indices they know are valid.
    pub(crate) fn connect_unchecked(&mut self, head: usize, tail: usize, stiffness: F, damping: F) {
        self.springs.push(Spring::from_particles(head, tail, &self.particles, stiffness, damping));
    }

    pub(crate) fn add_spring_unchecked(&mut self, spring: Spring<F>) {
        self.springs.push(spring);
    }

    pub(crate) fn add_face_unchecked(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    pub fn with_external_force(mut self, external: ExternalForce<F>) -> Self {
        self.external = external;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn particle_count(&self) -> usize { self.particles.len() }

    pub fn build(self, config: SimulationConfig<F>) -> Model<F> {
        tracing::debug!(
            particles = self.particles.len(),
            springs = self.springs.len(),
            faces = self.faces.len(),
            layout = ?self.layout,
            "model built"
        );
        Model {
            particles: self.particles,
            springs: self.springs,
            faces: self.faces,
            external: self.external,
            layout: self.layout,
            config,
            time: F::zero(),
        }
    }
}

impl<F: Float> Default for ModelBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
