//! Surface construction helpers: shape + material = mesh instance.

use anyhow::Result;
use glam::{Quat, Vec3};
use rapier3d::dynamics::RigidBodyHandle;
use std::path::Path;

use crate::assets::{self, Texture};
use crate::mesh::MeshData;
use crate::movement::SceneNode;
use crate::scene::Transform;

/// Parametric shapes the surface helpers know how to build
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Box(Vec3),
    Plane { width: f32, depth: f32 },
    Sphere { radius: f32 },
}

impl Shape {
    pub fn build(&self) -> MeshData {
        match *self {
            Shape::Box(size) => MeshData::create_box(size),
            Shape::Plane { width, depth } => MeshData::create_plane(width, depth),
            Shape::Sphere { radius } => MeshData::create_sphere(radius, 32, 16),
        }
    }
}

/// Shadow participation flags
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowOptions {
    pub cast: bool,
    pub receive: bool,
}

/// Optional knobs for surface creation
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceOptions {
    /// Opacity in [0, 1]; any value (including 0) marks the material transparent
    pub opacity: Option<f32>,
    pub shadow: Option<ShadowOptions>,
    /// Physics body to back the element with; the scene teleports it to the
    /// element's position when the surface is added or loaded
    pub body: Option<RigidBodyHandle>,
}

/// Simple material: flat color or texture map, with optional transparency
pub struct Material {
    pub color: Vec3,
    pub texture: Option<Texture>,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    pub fn from_color(color: Vec3) -> Self {
        Self {
            color,
            texture: None,
            opacity: 1.0,
            transparent: false,
        }
    }

    pub fn from_texture(texture: Texture) -> Self {
        Self {
            color: Vec3::ONE,
            texture: Some(texture),
            opacity: 1.0,
            transparent: false,
        }
    }
}

/// A placed mesh: geometry, material and transform
pub struct MeshInstance {
    pub mesh: MeshData,
    pub material: Material,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshInstance {
    pub fn new(mesh: MeshData, material: Material, position: Vec3) -> Self {
        Self {
            mesh,
            material,
            transform: Transform::from_position(position),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// Rotate additively around each axis (radians)
    pub fn rotate(&mut self, axes: Vec3) {
        let delta = Quat::from_euler(glam::EulerRot::XYZ, axes.x, axes.y, axes.z);
        self.transform.rotation = (self.transform.rotation * delta).normalize();
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

impl SceneNode for MeshInstance {
    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        let direction = target - self.transform.position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        self.transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, direction.normalize());
    }
}

/// Build a colored surface at the given position
pub fn create_surface(
    shape: Shape,
    color: Vec3,
    position: Vec3,
    options: &SurfaceOptions,
) -> MeshInstance {
    let material = Material::from_color(color);
    create_mesh_with_material(shape, material, position, options)
}

/// Build a textured surface at the given position.
///
/// Fails if the texture cannot be loaded; no instance is produced then.
pub fn create_surface_with_texture(
    shape: Shape,
    texture_path: &Path,
    position: Vec3,
    options: &SurfaceOptions,
) -> Result<MeshInstance> {
    let texture = assets::load_texture(texture_path)?;
    let material = Material::from_texture(texture);
    Ok(create_mesh_with_material(shape, material, position, options))
}

fn create_mesh_with_material(
    shape: Shape,
    mut material: Material,
    position: Vec3,
    options: &SurfaceOptions,
) -> MeshInstance {
    if let Some(opacity) = options.opacity {
        material.transparent = true;
        material.opacity = opacity;
    }

    let mut instance = MeshInstance::new(shape.build(), material, position);

    if let Some(shadow) = options.shadow {
        instance.cast_shadow = shadow.cast;
        instance.receive_shadow = shadow.receive;
    }

    instance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_surface_places_mesh() {
        let surface = create_surface(
            Shape::Box(Vec3::ONE),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            &SurfaceOptions::default(),
        );
        assert_eq!(surface.position(), Vec3::new(0.0, 2.0, 0.0));
        assert!(!surface.material.transparent);
        assert!(!surface.mesh.is_empty());

        let translation = surface.transform.model_matrix().w_axis;
        assert_eq!(translation.truncate(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_zero_opacity_still_marks_transparent() {
        let options = SurfaceOptions {
            opacity: Some(0.0),
            ..Default::default()
        };
        let surface = create_surface(Shape::Box(Vec3::ONE), Vec3::ONE, Vec3::ZERO, &options);
        assert!(surface.material.transparent);
        assert_eq!(surface.material.opacity, 0.0);
    }

    #[test]
    fn test_shadow_flags_applied() {
        let options = SurfaceOptions {
            shadow: Some(ShadowOptions {
                cast: true,
                receive: false,
            }),
            ..Default::default()
        };
        let surface = create_surface(Shape::Sphere { radius: 1.0 }, Vec3::ONE, Vec3::ZERO, &options);
        assert!(surface.cast_shadow);
        assert!(!surface.receive_shadow);
    }

    #[test]
    fn test_missing_texture_produces_no_instance() {
        let result = create_surface_with_texture(
            Shape::Plane {
                width: 1.0,
                depth: 1.0,
            },
            Path::new("nope/missing.png"),
            Vec3::ZERO,
            &SurfaceOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rotate_is_additive() {
        let mut surface = create_surface(
            Shape::Box(Vec3::ONE),
            Vec3::ONE,
            Vec3::ZERO,
            &SurfaceOptions::default(),
        );
        let before = surface.transform.rotation;
        surface.rotate(Vec3::new(0.0, 0.1, 0.0));
        surface.rotate(Vec3::new(0.0, 0.1, 0.0));
        let (_, yaw, _) = surface.transform.rotation.to_euler(glam::EulerRot::XYZ);
        assert_ne!(surface.transform.rotation, before);
        assert!((yaw - 0.2).abs() < 1e-4);
    }
}
