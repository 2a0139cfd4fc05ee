use anyhow::Result;
use glam::{Mat4, Quat, Vec3};
use rapier3d::dynamics::RigidBodyHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::assets::{self, Texture};
use crate::camera::Camera;
use crate::lighting::Light;
use crate::movement::{self, Movement, MoveTarget, SceneNode};
use crate::physics::PhysicsWorld;
use crate::surface::{Material, MeshInstance, SurfaceOptions};

/// Unique identifier for scene elements
pub type ElementId = usize;

/// Transform component for positioning objects in 3D space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Get the model matrix for this transform
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// The kinds of element a scene can hold
pub enum ElementKind {
    Camera(Camera),
    Light(Light),
    Mesh(MeshInstance),
}

impl ElementKind {
    /// View the element as a plain positionable node
    pub fn node_mut(&mut self) -> &mut dyn SceneNode {
        match self {
            ElementKind::Camera(camera) => camera,
            ElementKind::Light(light) => light,
            ElementKind::Mesh(mesh) => mesh,
        }
    }

    /// Current world position, wherever the kind stores it
    pub fn position(&self) -> Vec3 {
        match self {
            ElementKind::Camera(camera) => camera.position(),
            ElementKind::Light(light) => light.position(),
            ElementKind::Mesh(mesh) => mesh.position(),
        }
    }
}

/// A scene element: a camera, light or mesh, optionally animated and
/// optionally backed by a physics body
pub struct SceneElement {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
    pub movement: Option<Movement>,
    pub body: Option<RigidBodyHandle>,
    pub visible: bool,
}

/// Container owning every element of a demo scene
pub struct Scene {
    elements: HashMap<ElementId, SceneElement>,
    next_id: ElementId,
    background: Option<Texture>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 0,
            background: None,
        }
    }

    fn insert(&mut self, name: String, kind: ElementKind) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;

        self.elements.insert(
            id,
            SceneElement {
                id,
                name,
                kind,
                movement: None,
                body: None,
                visible: true,
            },
        );
        id
    }

    pub fn add_camera(&mut self, name: &str, camera: Camera) -> ElementId {
        self.insert(name.to_string(), ElementKind::Camera(camera))
    }

    pub fn add_light(&mut self, name: &str, light: Light) -> ElementId {
        self.insert(name.to_string(), ElementKind::Light(light))
    }

    pub fn add_mesh(&mut self, name: &str, mesh: MeshInstance) -> ElementId {
        self.insert(name.to_string(), ElementKind::Mesh(mesh))
    }

    /// Add a created surface, honoring the body carried by its options.
    ///
    /// When `options.body` is set the body is teleported to the surface
    /// position and backs the element from then on.
    pub fn add_surface(
        &mut self,
        name: &str,
        mesh: MeshInstance,
        options: &SurfaceOptions,
        physics: &mut PhysicsWorld,
    ) -> ElementId {
        let id = self.add_mesh(name, mesh);
        if let Some(handle) = options.body {
            self.attach_body(id, handle, physics);
        }
        id
    }

    /// Load a model from disk and add it to the scene at `position`.
    ///
    /// On a loader error nothing is added. When `options.body` is set the
    /// body is co-positioned with the loaded object and backs it.
    pub fn load_object(
        &mut self,
        name: &str,
        path: &Path,
        position: Vec3,
        options: &SurfaceOptions,
        physics: &mut PhysicsWorld,
    ) -> Result<ElementId> {
        let mesh = assets::load_model(path)?;

        let mut instance = MeshInstance::new(mesh, Material::from_color(Vec3::ONE), position);
        if let Some(opacity) = options.opacity {
            instance.material.transparent = true;
            instance.material.opacity = opacity;
        }
        if let Some(shadow) = options.shadow {
            instance.cast_shadow = shadow.cast;
            instance.receive_shadow = shadow.receive;
        }

        log::info!("loaded object '{}' from {}", name, path.display());
        Ok(self.add_surface(name, instance, options, physics))
    }

    /// Back an element with a physics body, teleporting the body to the
    /// element's current position so the two start in agreement.
    pub fn attach_body(
        &mut self,
        id: ElementId,
        handle: RigidBodyHandle,
        physics: &mut PhysicsWorld,
    ) {
        if let Some(element) = self.elements.get_mut(&id) {
            physics.set_body_position(handle, element.kind.position());
            element.body = Some(handle);
        }
    }

    /// Start (or replace) a movement on an element
    pub fn set_movement(&mut self, id: ElementId, movement: Movement) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.movement = Some(movement);
        }
    }

    /// Re-aim an element's in-flight movement at a new target
    pub fn retarget(&mut self, id: ElementId, to: Vec3, time: f32) {
        if let Some(element) = self.elements.get_mut(&id) {
            if let Some(movement) = &mut element.movement {
                movement.retarget(to, time);
            }
        }
    }

    pub fn remove(&mut self, id: ElementId) -> Option<SceneElement> {
        self.elements.remove(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.elements.get_mut(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SceneElement> {
        self.elements.values().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements sorted by id, for stable iteration
    pub fn elements_sorted(&self) -> Vec<&SceneElement> {
        let mut elements: Vec<&SceneElement> = self.elements.values().collect();
        elements.sort_by_key(|e| e.id);
        elements
    }

    pub fn set_background(&mut self, texture: Texture) {
        self.background = Some(texture);
    }

    pub fn background(&self) -> Option<&Texture> {
        self.background.as_ref()
    }

    /// Advance every in-flight movement by `delta_time`.
    ///
    /// Body-backed elements receive impulses through the physics world;
    /// everything else has its transform written directly.
    pub fn update(&mut self, delta_time: f32, physics: &mut PhysicsWorld) {
        for element in self.elements.values_mut() {
            let SceneElement {
                kind,
                movement,
                body,
                ..
            } = element;

            let Some(movement) = movement else { continue };

            match body.and_then(|handle| physics.body_mut(handle)) {
                Some(rigid_body) => {
                    movement::step(delta_time, movement, MoveTarget::Body(rigid_body));
                }
                None => movement::step(delta_time, movement, MoveTarget::Node(kind.node_mut())),
            }
        }
    }

    /// Copy simulated body transforms back into the scene after a physics
    /// step, so rendering and physics agree.
    pub fn sync_bodies(&mut self, physics: &PhysicsWorld) {
        for element in self.elements.values_mut() {
            let Some(handle) = element.body else { continue };
            let Some(position) = physics.body_position(handle) else {
                continue;
            };

            element.kind.node_mut().set_position(position);
            if let (ElementKind::Mesh(mesh), Some(rotation)) =
                (&mut element.kind, physics.body_rotation(handle))
            {
                mesh.transform.rotation = rotation;
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
