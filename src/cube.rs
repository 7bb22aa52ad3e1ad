//! Volumetric spring lattice: the jelly cube.

use crate::config::{check_resolution, Material, SimulationConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::forces::{ExternalForce, FloorContact};
use crate::model::{Layout, Model, ModelBuilder};
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighbour offsets `(dx, dy, dz)`. Each class of neighbour appears with
/// exactly one sign, so bounds-checking them at every particle wires each
/// pair once.
pub const CUBE_OFFSETS: [(isize, isize, isize); 16] = [
    // structural
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, -1),
    // shear across the faces of a cell
    (-1, -1, 0),
    (1, -1, 0),
    (-1, 0, -1),
    (1, 0, -1),
    (0, -1, -1),
    (0, 1, -1),
    // shear through the body of a cell
    (-1, -1, -1),
    (1, -1, -1),
    (-1, 1, -1),
    (1, 1, -1),
    // flexion
    (-2, 0, 0),
    (0, -2, 0),
    (0, 0, -2),
];

/// Flat particle index of cube coordinate `(x, y, z)`.
pub fn index(resolution: usize, x: usize, y: usize, z: usize) -> usize {
    x * resolution * resolution + y * resolution + z
}

fn neighbour(
    resolution: usize,
    (x, y, z): (usize, usize, usize),
    (dx, dy, dz): (isize, isize, isize),
) -> Option<usize> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    let nz = z.checked_add_signed(dz)?;
    (nx < resolution && ny < resolution && nz < resolution).then(|| index(resolution, nx, ny, nz))
}

/// Every `(particle, neighbour)` index pair the offset rule produces, in
/// construction order.
pub fn spring_pairs(resolution: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..resolution).flat_map(move |x| {
        (0..resolution).flat_map(move |y| {
            (0..resolution).flat_map(move |z| {
                CUBE_OFFSETS.into_iter().filter_map(move |offset| {
                    neighbour(resolution, (x, y, z), offset).map(|n| (index(resolution, x, y, z), n))
                })
            })
        })
    })
}

/// Two triangles per surface cell on each of the six sides.
pub fn surface_faces(resolution: usize) -> AllocVec<[usize; 3]> {
    let mut faces = AllocVec::new();
    if resolution < 2 {
        return faces;
    }
    let last = resolution - 1;
    for axis in 0..3 {
        for side in [0, last] {
            let at = |u: usize, v: usize| {
                let mut c = [0usize; 3];
                c[axis] = side;
                c[(axis + 1) % 3] = u;
                c[(axis + 2) % 3] = v;
                index(resolution, c[0], c[1], c[2])
            };
            for u in 1..resolution {
                for v in 1..resolution {
                    faces.push([at(u - 1, v - 1), at(u - 1, v), at(u, v - 1)]);
                    faces.push([at(u - 1, v), at(u, v), at(u, v - 1)]);
                }
            }
        }
    }
    faces
}

/// A block of jelly dropped onto the floor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JellyCubeConfig<F: Float> {
    pub resolution: usize,
    pub material: Material<F>,
    pub simulation: SimulationConfig<F>,
    /// Height of the cube's bottom face above the floor.
    pub drop_height: F,
    pub floor: FloorContact<F>,
}

impl<F: Float> Default for JellyCubeConfig<F> {
    fn default() -> Self {
        let resolution = 10;
        let mass = F::half();
        let stiffness = F::from_f64(150.0);
        let spacing = F::one();
        JellyCubeConfig {
            resolution,
            material: Material {
                particle_mass: mass,
                spacing,
                stiffness,
                // 90% of critical damping for a single mass on a single spring
                damping: F::two() * (mass * stiffness).sqrt() * F::from_f64(0.9),
            },
            simulation: SimulationConfig::default(),
            drop_height: F::from_usize(resolution) * spacing * F::two(),
            floor: FloorContact::at(F::zero()),
        }
    }
}

impl<F: Float> Model<F> {
    /// Jelly cube with the default 10×10×10 parameters.
    pub fn jelly_cube() -> Self {
        Self::build_jelly_cube(&JellyCubeConfig::default())
    }

    pub fn jelly_cube_with(config: &JellyCubeConfig<F>) -> Result<Self, PhysicsError> {
        check_resolution(config.resolution, 2)?;
        config.material.validate()?;
        Ok(Self::build_jelly_cube(config))
    }

    fn build_jelly_cube(config: &JellyCubeConfig<F>) -> Self {
        let res = config.resolution;
        let m = &config.material;
        let count = res * res * res;
        let mut builder = ModelBuilder::with_capacity(count, count * CUBE_OFFSETS.len())
            .with_layout(Layout::Cube { resolution: res })
            .with_external_force(ExternalForce::FloorBounce(config.floor));

        for x in 0..res {
            for y in 0..res {
                for z in 0..res {
                    let pos = Vec3::new(
                        F::from_usize(x) * m.spacing,
                        F::from_usize(y) * m.spacing + config.drop_height,
                        F::from_usize(z) * m.spacing,
                    );
                    builder.add_particle(Particle::new(pos, m.particle_mass));
                }
            }
        }
        for (a, b) in spring_pairs(res) {
            builder.connect_unchecked(a, b, m.stiffness, m.damping);
        }
        for face in surface_faces(res) {
            builder.add_face_unchecked(face);
        }

        tracing::debug!(resolution = res, "building jelly cube");
        builder.build(config.simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_pairs(resolution: usize) -> usize {
        CUBE_OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| {
                [dx, dy, dz]
                    .iter()
                    .map(|d| resolution.saturating_sub(d.unsigned_abs()))
                    .product::<usize>()
            })
            .sum()
    }

    #[test]
    fn three_cube_spring_count() {
        // structural 54, face shear 72, body shear 32, flexion 27
        assert_eq!(spring_pairs(3).count(), 185);
        assert_eq!(expected_pairs(3), 185);
        assert_eq!(spring_pairs(5).count(), expected_pairs(5));
    }

    #[test]
    fn no_pair_is_wired_twice() {
        let mut pairs: AllocVec<(usize, usize)> = spring_pairs(4)
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        let total = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }

    #[test]
    fn surface_faces_cover_six_sides() {
        assert_eq!(surface_faces(4).len(), 6 * 3 * 3 * 2);
        assert!(surface_faces(1).is_empty());
    }

    #[test]
    fn cube_accessor_matches_index_rule() {
        let config = JellyCubeConfig { resolution: 3, ..JellyCubeConfig::<f32>::default() };
        let model = Model::jelly_cube_with(&config).unwrap();
        assert_eq!(model.particle_count(), 27);
        let p = model.cube_particle(1, 2, 0).unwrap();
        assert_eq!(p, model.particle(9 + 2 * 3));
        assert!((p.pos.x - 1.0).abs() < 1e-6);
        assert!((p.pos.y - (2.0 + 20.0)).abs() < 1e-4);
        assert!(model.cube_particle(0, 3, 0).is_none());
        assert!(model.grid_particle(0, 0).is_none());
    }

    #[test]
    fn default_damping_is_ninety_percent_critical() {
        let config = JellyCubeConfig::<f64>::default();
        let critical = 2.0 * (0.5f64 * 150.0).sqrt();
        assert!((config.material.damping - 0.9 * critical).abs() < 1e-5);
    }
}
