//! Mass-spring physics with semi-implicit Euler integration.
//!
//! `springy` simulates particles joined by damped springs: hanging chains,
//! cloth, a flag in the wind, a table cloth draped over a table and a jelly
//! cube bouncing on the floor.
//!
//! # Features
//!
//! - **Arena models**: a [`Model`] owns its particles; springs refer to them by index
//! - **Phased step**: spring forces, then external forces, then integration
//! - **Topology builders**: chains, cloth grids and cubes with structural, shear and flexion springs
//! - **External hooks**: floor bounce, table contact and per-face wind via [`ExternalForce`]
//! - **Observable**: monitor step phases via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! # Example
//! ```
//! use springy::Model;
//!
//! let mut model: Model<f32> = Model::single_spring();
//! for _ in 0..100 {
//!     model.step(0.01);
//! }
//! assert!(model.particle(1).pos.y < 0.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod forces;
pub mod model;
pub mod chain;
pub mod grid;
pub mod cube;
pub mod scene;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use spring::{Spring, DampingMode};
pub use forces::{ExternalForce, FloorContact, TableContact, FaceWind};
pub use model::{Model, ModelBuilder, Layout};
pub use chain::ChainConfig;
pub use grid::{ClothConfig, TableClothConfig, FlagConfig};
pub use cube::JellyCubeConfig;
pub use scene::{Scene, ModelKind, Command};
pub use config::{SimulationConfig, Material};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
