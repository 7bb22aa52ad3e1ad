//! Square spring grids: hanging cloth, table cloth and flag.
//!
//! Every grid shares one connectivity pattern, applied at each cell through
//! [`GRID_OFFSETS`]:
//! - Structural: `(-1, 0)` and `(0, -1)`
//! - Shear: `(-1, -1)` and `(+1, -1)`
//! - Flexion: `(-2, 0)` and `(0, -2)`
//!
//! Only offsets that land inside the grid produce a spring. Because each
//! offset's opposite is absent from the list, every pair is wired once.

use crate::config::{check_resolution, Material, SimulationConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::forces::{ExternalForce, FaceWind, TableContact};
use crate::model::{Layout, Model, ModelBuilder};
use crate::particle::Particle;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighbour offsets `(dx, dy)` each particle is connected to.
pub const GRID_OFFSETS: [(isize, isize); 6] = [(-1, 0), (0, -1), (-1, -1), (1, -1), (-2, 0), (0, -2)];

/// Flat particle index of grid coordinate `(x, y)`.
pub fn index(resolution: usize, x: usize, y: usize) -> usize {
    x * resolution + y
}

fn neighbour(resolution: usize, x: usize, y: usize, (dx, dy): (isize, isize)) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < resolution && ny < resolution).then_some((nx, ny))
}

/// Every `(particle, neighbour)` index pair the offset rule produces, in
/// construction order.
pub fn spring_pairs(resolution: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..resolution).flat_map(move |x| {
        (0..resolution).flat_map(move |y| {
            GRID_OFFSETS.into_iter().filter_map(move |offset| {
                neighbour(resolution, x, y, offset)
                    .map(|(nx, ny)| (index(resolution, x, y), index(resolution, nx, ny)))
            })
        })
    })
}

/// Two triangles per grid cell.
pub fn faces(resolution: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..resolution).flat_map(move |x| {
        (1..resolution).flat_map(move |y| {
            let p1 = index(resolution, x - 1, y - 1);
            let p2 = index(resolution, x - 1, y);
            let p3 = index(resolution, x, y - 1);
            let p4 = index(resolution, x, y);
            [[p1, p2, p3], [p2, p4, p3]]
        })
    })
}

/// Lay out `resolution²` particles in index order, then wire and
/// triangulate them.
fn build_grid<F, P>(resolution: usize, material: &Material<F>, mut place: P) -> ModelBuilder<F>
where
    F: Float,
    P: FnMut(usize, usize) -> Particle<F>,
{
    let mut builder = ModelBuilder::with_capacity(resolution * resolution, resolution * resolution * GRID_OFFSETS.len())
        .with_layout(Layout::Grid { resolution });
    for x in 0..resolution {
        for y in 0..resolution {
            builder.add_particle(place(x, y));
        }
    }
    for (a, b) in spring_pairs(resolution) {
        builder.connect_unchecked(a, b, material.stiffness, material.damping);
    }
    for face in faces(resolution) {
        builder.add_face_unchecked(face);
    }
    builder
}

/// A sheet hanging from two corners of its first row.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClothConfig<F: Float> {
    pub resolution: usize,
    pub material: Material<F>,
    pub simulation: SimulationConfig<F>,
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        ClothConfig {
            resolution: 40,
            material: Material {
                particle_mass: F::one(),
                spacing: F::from_f64(25.0 / 40.0),
                stiffness: F::from_f64(2500.0),
                damping: F::one(),
            },
            simulation: SimulationConfig::default(),
        }
    }
}

/// A horizontal sheet dropped onto a round table.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableClothConfig<F: Float> {
    pub resolution: usize,
    pub material: Material<F>,
    pub simulation: SimulationConfig<F>,
    /// Starting height of the sheet above the table top.
    pub drop_height: F,
    /// Table radius as a fraction of the sheet's half-width.
    pub table_radius_ratio: F,
}

impl<F: Float> Default for TableClothConfig<F> {
    fn default() -> Self {
        TableClothConfig {
            resolution: 40,
            material: Material {
                particle_mass: F::from_f64(3.0),
                spacing: F::from_f64(25.0 / 40.0),
                stiffness: F::from_f64(3000.0),
                damping: F::from_f64(8.0),
            },
            simulation: SimulationConfig::default(),
            drop_height: F::two(),
            table_radius_ratio: F::from_f64(0.7),
        }
    }
}

impl<F: Float> TableClothConfig<F> {
    fn half_width(&self) -> F {
        F::from_usize(self.resolution.saturating_sub(1)) * self.material.spacing * F::half()
    }

    /// The table the sheet falls onto, centred under the sheet.
    pub fn table(&self) -> TableContact<F> {
        let offset = self.half_width();
        TableContact::new(
            Vec3::new(offset, F::zero(), offset),
            offset * self.table_radius_ratio,
        )
    }
}

/// A vertical sheet clipped along its top row and blown by wind.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagConfig<F: Float> {
    pub resolution: usize,
    pub material: Material<F>,
    pub simulation: SimulationConfig<F>,
    /// Clip every Nth column of the top row (0 behaves as 1).
    pub pin_every: usize,
    pub wind: FaceWind<F>,
}

impl<F: Float> Default for FlagConfig<F> {
    fn default() -> Self {
        FlagConfig {
            resolution: 40,
            material: Material {
                particle_mass: F::one(),
                spacing: F::from_f64(25.0 / 40.0),
                stiffness: F::from_f64(2500.0),
                damping: F::from_f64(0.7),
            },
            simulation: SimulationConfig::default(),
            pin_every: 4,
            wind: FaceWind::default(),
        }
    }
}

impl<F: Float> Model<F> {
    /// Hanging cloth with the default 40×40 parameters.
    pub fn cloth() -> Self {
        Self::build_cloth(&ClothConfig::default())
    }

    pub fn cloth_with(config: &ClothConfig<F>) -> Result<Self, PhysicsError> {
        check_resolution(config.resolution, 2)?;
        config.material.validate()?;
        Ok(Self::build_cloth(config))
    }

    fn build_cloth(config: &ClothConfig<F>) -> Self {
        let res = config.resolution;
        let m = &config.material;
        let offset = F::from_usize(res - 1) * m.spacing * F::half();
        let builder = build_grid(res, m, |x, y| {
            let pos = Vec3::new(F::from_usize(y) * m.spacing - offset, F::zero(), F::from_usize(x) * m.spacing);
            let pinned = x == 0 && (y == 0 || y == res - 1);
            Particle::new(pos, m.particle_mass).with_stationary(pinned)
        });
        tracing::debug!(resolution = res, "building cloth");
        builder.build(config.simulation)
    }

    /// Table cloth with the default 40×40 parameters.
    pub fn table_cloth() -> Self {
        Self::build_table_cloth(&TableClothConfig::default())
    }

    pub fn table_cloth_with(config: &TableClothConfig<F>) -> Result<Self, PhysicsError> {
        check_resolution(config.resolution, 2)?;
        config.material.validate()?;
        Ok(Self::build_table_cloth(config))
    }

    fn build_table_cloth(config: &TableClothConfig<F>) -> Self {
        let m = &config.material;
        let builder = build_grid(config.resolution, m, |x, y| {
            let pos = Vec3::new(F::from_usize(x) * m.spacing, config.drop_height, F::from_usize(y) * m.spacing);
            Particle::new(pos, m.particle_mass)
        });
        tracing::debug!(resolution = config.resolution, "building table cloth");
        builder
            .with_external_force(ExternalForce::TableContact(config.table()))
            .build(config.simulation)
    }

    /// Flag with the default 40×40 parameters.
    pub fn flag() -> Self {
        Self::build_flag(&FlagConfig::default())
    }

    pub fn flag_with(config: &FlagConfig<F>) -> Result<Self, PhysicsError> {
        check_resolution(config.resolution, 2)?;
        config.material.validate()?;
        Ok(Self::build_flag(config))
    }

    fn build_flag(config: &FlagConfig<F>) -> Self {
        let res = config.resolution;
        let m = &config.material;
        let pin_every = config.pin_every.max(1);
        let builder = build_grid(res, m, |x, y| {
            let pos = Vec3::new(F::from_usize(x) * m.spacing, F::from_usize(y) * m.spacing, F::zero());
            let pinned = y == res - 1 && x % pin_every == 0;
            Particle::new(pos, m.particle_mass).with_stationary(pinned)
        });
        tracing::debug!(resolution = res, pin_every, "building flag");
        builder
            .with_external_force(ExternalForce::FaceWind(config.wind))
            .build(config.simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small<F: Float>(material: Material<F>) -> Material<F> {
        Material { spacing: F::one(), ..material }
    }

    #[test]
    fn four_by_four_spring_count() {
        // structural 12 + 12, shear 9 + 9, flexion 8 + 8
        assert_eq!(spring_pairs(4).count(), 58);
    }

    #[test]
    fn no_pair_is_wired_twice() {
        let mut pairs: alloc::vec::Vec<(usize, usize)> = spring_pairs(6)
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        let total = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }

    #[test]
    fn face_count() {
        assert_eq!(faces(5).count(), 2 * 4 * 4);
    }

    #[test]
    fn cloth_pins_two_corners() {
        let config = ClothConfig {
            resolution: 5,
            material: small(ClothConfig::<f32>::default().material),
            ..ClothConfig::default()
        };
        let model = Model::cloth_with(&config).unwrap();
        let pinned: alloc::vec::Vec<usize> = model
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_stationary())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(pinned, [index(5, 0, 0), index(5, 0, 4)]);
    }

    #[test]
    fn grid_accessor_matches_index_rule() {
        let config = ClothConfig { resolution: 4, ..ClothConfig::<f32>::default() };
        let model = Model::cloth_with(&config).unwrap();
        let p = model.grid_particle(2, 3).unwrap();
        assert_eq!(p, model.particle(2 * 4 + 3));
        assert!(model.grid_particle(4, 0).is_none());
    }

    #[test]
    fn flag_clips_every_nth_top_column() {
        let config = FlagConfig { resolution: 9, pin_every: 4, ..FlagConfig::<f32>::default() };
        let model = Model::flag_with(&config).unwrap();
        for x in 0..9 {
            let top = model.grid_particle(x, 8).unwrap();
            assert_eq!(top.is_stationary(), x % 4 == 0, "column {}", x);
            assert!(!model.grid_particle(x, 0).unwrap().is_stationary());
        }
    }

    #[test]
    fn table_sits_under_sheet_centre() {
        let config = TableClothConfig { resolution: 5, ..TableClothConfig::<f32>::default() };
        let table = config.table();
        let offset = 4.0 * 0.625 * 0.5;
        assert!((table.center.x - offset).abs() < 1e-6);
        assert!((table.center.z - offset).abs() < 1e-6);
        assert!((table.radius - offset * 0.7).abs() < 1e-6);
    }

    #[test]
    fn rejects_single_particle_grid() {
        let config = ClothConfig { resolution: 1, ..ClothConfig::<f32>::default() };
        assert_eq!(
            Model::cloth_with(&config).unwrap_err(),
            PhysicsError::InvalidResolution { resolution: 1, min: 2 }
        );
    }
}
