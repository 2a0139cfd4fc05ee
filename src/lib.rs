//! Helpers for small 3D demo scenes: asset loading, element placement and
//! time-bounded linear movement toward a target, layered on glam and Rapier.

pub mod assets;
pub mod camera;
pub mod config;
pub mod demo;
pub mod lighting;
pub mod mesh;
pub mod movement;
pub mod physics;
pub mod scene;
pub mod surface;

pub use camera::Camera;
pub use lighting::Light;
pub use mesh::MeshData;
pub use movement::{step, MoveTarget, Movement, SceneNode};
pub use physics::PhysicsWorld;
pub use scene::{ElementId, ElementKind, Scene, SceneElement, Transform};
