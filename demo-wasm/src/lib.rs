use springy::{Command, ModelKind, Scene};
use wasm_bindgen::prelude::*;

fn kind_from_index(index: usize) -> Option<ModelKind> {
    ModelKind::ALL.get(index).copied()
}

#[wasm_bindgen]
pub struct SceneDemo {
    scene: Scene<f32>,
}

#[wasm_bindgen]
impl SceneDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(sub_steps: usize) -> Self {
        SceneDemo { scene: Scene::default().with_sub_steps(sub_steps) }
    }

    /// Load a model by its position in the menu:
    /// 0 single spring, 1 chain, 2 cloth, 3 jelly cube, 4 table cloth, 5 flag.
    /// Returns false for an unknown index.
    pub fn load(&mut self, index: usize) -> bool {
        match kind_from_index(index) {
            Some(kind) => {
                self.scene.apply(Command::Load(kind));
                true
            }
            None => false,
        }
    }

    pub fn toggle_play(&mut self) {
        self.scene.apply(Command::TogglePlay);
    }

    pub fn step(&mut self) {
        self.scene.apply(Command::Step);
    }

    pub fn reset(&mut self) {
        self.scene.apply(Command::Reset);
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.scene.apply(Command::SetDt(dt));
    }

    /// Advance one frame. Returns whether anything moved.
    pub fn tick(&mut self) -> bool {
        self.scene.tick()
    }

    pub fn is_playing(&self) -> bool {
        self.scene.is_playing()
    }

    pub fn dt(&self) -> f32 {
        self.scene.dt()
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] positions
    pub fn positions(&self) -> Vec<f32> {
        let particles = self.scene.model().particles();
        let mut out = Vec::with_capacity(particles.len() * 3);
        for p in particles {
            out.push(p.pos.x);
            out.push(p.pos.y);
            out.push(p.pos.z);
        }
        out
    }

    /// Returns flat [a0, b0, c0, a1, b1, c1, ...] triangle indices
    pub fn faces(&self) -> Vec<u32> {
        let faces = self.scene.model().faces();
        let mut out = Vec::with_capacity(faces.len() * 3);
        for face in faces {
            out.extend(face.iter().map(|&i| i as u32));
        }
        out
    }

    /// Returns flat [head0, tail0, head1, tail1, ...] spring endpoints
    pub fn springs(&self) -> Vec<u32> {
        let springs = self.scene.model().springs();
        let mut out = Vec::with_capacity(springs.len() * 2);
        for s in springs {
            out.push(s.head() as u32);
            out.push(s.tail() as u32);
        }
        out
    }

    pub fn particle_count(&self) -> usize {
        self.scene.model().particle_count()
    }
}
