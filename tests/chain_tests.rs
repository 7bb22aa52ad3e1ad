use springy::{ChainConfig, Model};
use springy::Vec as _;

#[test]
fn single_spring_sags_below_start() {
    let mut model: Model<f32> = Model::single_spring();
    for _ in 0..100 {
        model.step(0.01);
    }
    assert!(model.particle(1).pos.y < 0.0);
    assert_eq!(model.particle(0).pos, model.particle(0).initial_pos());
}

#[test]
fn single_spring_settles_at_static_stretch() {
    let mut model: Model<f64> = Model::single_spring();
    let mut farthest = 0.0f64;
    for _ in 0..20_000 {
        model.step(0.01);
        farthest = farthest.max(model.particle(1).pos.length());
    }
    // rest + m g / k
    let expected = 2.0 + 9.81 / 10.0;
    let settled = model.particle(1).pos.length();
    assert!((settled - expected).abs() < 1e-3, "settled at {}", settled);
    assert!(farthest < 5.0, "swing reached {}", farthest);
    assert!(model.particle(1).pos.x.abs() < 1e-3);
}

#[test]
fn spring_chain_stays_finite() {
    let mut model: Model<f32> = Model::spring_chain();
    for _ in 0..300 {
        model.step(0.01);
    }
    assert!(model.particles().iter().all(|p| p.pos.is_finite()));
    let tail = model.particle(model.particle_count() - 1);
    assert!(tail.pos.y < model.particle(1).pos.y);
}

#[test]
fn custom_chain_length() {
    let model: Model<f32> = Model::chain_with(&ChainConfig::with_particles(30)).unwrap();
    assert_eq!(model.particle_count(), 31);
    assert_eq!(model.spring_count(), 30);
    assert!(model.faces().is_empty());
}
