use springy::grid;
use springy::{ClothConfig, FlagConfig, Model, TableClothConfig};

#[test]
fn four_by_four_grid_has_58_springs() {
    let config = ClothConfig { resolution: 4, ..ClothConfig::<f32>::default() };
    let model = Model::cloth_with(&config).unwrap();
    assert_eq!(model.particle_count(), 16);
    assert_eq!(model.spring_count(), 58);

    let spacing = config.material.spacing;
    let count_with = |len: f32| {
        model.springs().iter().filter(|s| (s.rest_length() - len).abs() < 1e-4).count()
    };
    assert_eq!(count_with(spacing), 24);
    assert_eq!(count_with(spacing * 2f32.sqrt()), 18);
    assert_eq!(count_with(spacing * 2.0), 16);
}

#[test]
fn default_cloth_pins_two_corners() {
    let model: Model<f32> = Model::cloth();
    let pinned: Vec<usize> = model
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_stationary())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pinned, vec![grid::index(40, 0, 0), grid::index(40, 0, 39)]);
    assert_eq!(model.faces().len(), 39 * 39 * 2);
}

#[test]
fn cloth_hangs_from_its_pins() {
    let config = ClothConfig { resolution: 6, ..ClothConfig::<f32>::default() };
    let mut model = Model::cloth_with(&config).unwrap();
    for _ in 0..200 {
        model.step(0.005);
    }
    let far_edge = model.grid_particle(5, 2).unwrap();
    assert!(far_edge.pos.y < -0.5, "far edge at {:?}", far_edge.pos);
    assert_eq!(model.grid_particle(0, 0).unwrap().pos, model.grid_particle(0, 0).unwrap().initial_pos());
}

#[test]
fn table_holds_the_centre_and_drops_the_corners() {
    let config = TableClothConfig { resolution: 9, ..TableClothConfig::<f32>::default() };
    let mut model = Model::table_cloth_with(&config).unwrap();
    let mut centre_low = f32::MAX;
    let mut corner_low = f32::MAX;
    for _ in 0..600 {
        model.step(0.005);
        centre_low = centre_low.min(model.grid_particle(4, 4).unwrap().pos.y);
        corner_low = corner_low.min(model.grid_particle(0, 0).unwrap().pos.y);
    }
    assert!(centre_low > -1e-3, "centre sank to {}", centre_low);
    assert!(corner_low < -1.0, "corner only reached {}", corner_low);
}

#[test]
fn flag_blows_downwind() {
    let config = FlagConfig { resolution: 8, ..FlagConfig::<f32>::default() };
    let mut model = Model::flag_with(&config).unwrap();
    for _ in 0..500 {
        model.step(0.002);
    }
    let mean_z = model.particles().iter().map(|p| p.pos.z).sum::<f32>() / model.particle_count() as f32;
    assert!(mean_z > 0.5, "mean z {}", mean_z);
    assert!(model.particles().iter().all(|p| p.pos.is_finite()));
}
