//! Model selection and playback control for an interactive host.

use crate::float::Float;
use crate::model::Model;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The built-in demo models.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelKind {
    SingleSpring,
    SpringChain,
    Cloth,
    JellyCube,
    TableCloth,
    Flag,
}

impl ModelKind {
    pub const ALL: [ModelKind; 6] = [
        ModelKind::SingleSpring,
        ModelKind::SpringChain,
        ModelKind::Cloth,
        ModelKind::JellyCube,
        ModelKind::TableCloth,
        ModelKind::Flag,
    ];

    /// Build a fresh model of this kind with default parameters.
    pub fn build<F: Float>(self) -> Model<F> {
        match self {
            ModelKind::SingleSpring => Model::single_spring(),
            ModelKind::SpringChain => Model::spring_chain(),
            ModelKind::Cloth => Model::cloth(),
            ModelKind::JellyCube => Model::jelly_cube(),
            ModelKind::TableCloth => Model::table_cloth(),
            ModelKind::Flag => Model::flag(),
        }
    }
}

/// Input a host feeds into a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command<F: Float> {
    /// Replace the active model and pause.
    Load(ModelKind),
    Reset,
    TogglePlay,
    /// Advance one tick on the next [`Scene::tick`], even while paused.
    Step,
    /// Change the tick length; non-positive or non-finite values are ignored.
    SetDt(F),
}

/// The active model plus playback state.
#[derive(Clone, Debug)]
pub struct Scene<F: Float> {
    kind: ModelKind,
    model: Model<F>,
    playing: bool,
    step_requested: bool,
    dt: F,
    sub_steps: usize,
}

impl<F: Float> Scene<F> {
    pub fn new(kind: ModelKind) -> Self {
        Scene {
            kind,
            model: kind.build(),
            playing: false,
            step_requested: false,
            dt: F::from_f64(0.01),
            sub_steps: 1,
        }
    }

    /// Split every tick into `sub_steps` equal model steps (at least one).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn apply(&mut self, command: Command<F>) {
        tracing::debug!(?command, "scene command");
        match command {
            Command::Load(kind) => {
                self.kind = kind;
                self.model = kind.build();
                self.playing = false;
                self.step_requested = false;
            }
            Command::Reset => self.model.reset(),
            Command::TogglePlay => self.playing = !self.playing,
            Command::Step => self.step_requested = true,
            Command::SetDt(dt) => {
                if dt.is_finite() && dt > F::zero() {
                    self.dt = dt;
                }
            }
        }
    }

    /// Advance the active model by one tick if playing or a step was
    /// requested. Returns whether the model moved.
    pub fn tick(&mut self) -> bool {
        if !(self.playing || self.step_requested) {
            return false;
        }
        self.step_requested = false;
        let h = self.dt / F::from_usize(self.sub_steps);
        for _ in 0..self.sub_steps {
            self.model.step(h);
        }
        true
    }

    pub fn kind(&self) -> ModelKind { self.kind }
    pub fn model(&self) -> &Model<F> { &self.model }
    pub fn model_mut(&mut self) -> &mut Model<F> { &mut self.model }
    pub fn is_playing(&self) -> bool { self.playing }
    pub fn dt(&self) -> F { self.dt }
    pub fn sub_steps(&self) -> usize { self.sub_steps }
}

impl<F: Float> Default for Scene<F> {
    fn default() -> Self {
        Self::new(ModelKind::Flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_on_the_flag() {
        let mut scene: Scene<f32> = Scene::default();
        assert_eq!(scene.kind(), ModelKind::Flag);
        assert!(!scene.is_playing());
        assert!((scene.dt() - 0.01).abs() < 1e-7);
        assert!(!scene.tick());
        assert_eq!(scene.model().time(), 0.0);
        assert_eq!(Scene::<f64>::default().dt(), 0.01);
    }

    #[test]
    fn step_advances_once_while_paused() {
        let mut scene: Scene<f32> = Scene::new(ModelKind::SingleSpring);
        scene.apply(Command::Step);
        assert!(scene.tick());
        assert!(!scene.tick());
        assert!((scene.model().time() - 0.01).abs() < 1e-7);
    }

    #[test]
    fn load_replaces_model_and_pauses() {
        let mut scene: Scene<f32> = Scene::new(ModelKind::SingleSpring);
        scene.apply(Command::TogglePlay);
        scene.tick();
        scene.apply(Command::Load(ModelKind::SpringChain));
        assert!(!scene.is_playing());
        assert_eq!(scene.kind(), ModelKind::SpringChain);
        assert_eq!(scene.model().particle_count(), 13);
        assert_eq!(scene.model().time(), 0.0);
    }

    #[test]
    fn set_dt_ignores_bad_values() {
        let mut scene: Scene<f64> = Scene::new(ModelKind::SingleSpring);
        scene.apply(Command::SetDt(0.02));
        scene.apply(Command::SetDt(0.0));
        scene.apply(Command::SetDt(f64::NAN));
        assert_eq!(scene.dt(), 0.02);
    }

    #[test]
    fn sub_steps_cover_one_tick() {
        let mut scene: Scene<f64> = Scene::new(ModelKind::SingleSpring).with_sub_steps(4);
        scene.apply(Command::TogglePlay);
        scene.tick();
        assert!((scene.model().time() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_initial_positions() {
        let mut scene: Scene<f32> = Scene::new(ModelKind::SpringChain);
        let start = scene.model().positions();
        scene.apply(Command::TogglePlay);
        for _ in 0..10 {
            scene.tick();
        }
        assert_ne!(scene.model().positions(), start);
        scene.apply(Command::Reset);
        assert_eq!(scene.model().positions(), start);
    }
}
