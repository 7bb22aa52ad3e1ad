use springy::{Command, ModelKind, Scene};

#[test]
fn every_kind_loads_and_ticks() {
    let mut scene: Scene<f32> = Scene::default();
    for kind in ModelKind::ALL {
        scene.apply(Command::Load(kind));
        assert_eq!(scene.kind(), kind);
        scene.apply(Command::Step);
        assert!(scene.tick());
        assert!(scene.model().particles().iter().all(|p| p.pos.is_finite()), "{:?}", kind);
    }
}

#[test]
fn toggle_play_runs_until_paused() {
    let mut scene: Scene<f64> = Scene::new(ModelKind::SpringChain);
    scene.apply(Command::TogglePlay);
    for _ in 0..5 {
        assert!(scene.tick());
    }
    scene.apply(Command::TogglePlay);
    assert!(!scene.tick());
    assert!((scene.model().time() - 0.05).abs() < 1e-12);
}

#[test]
fn reset_keeps_the_active_kind() {
    let mut scene: Scene<f32> = Scene::new(ModelKind::Cloth);
    scene.apply(Command::SetDt(0.005));
    scene.apply(Command::TogglePlay);
    scene.tick();
    scene.apply(Command::Reset);
    assert_eq!(scene.kind(), ModelKind::Cloth);
    assert!(scene.is_playing());
    assert_eq!(scene.model().time(), 0.0);
}
