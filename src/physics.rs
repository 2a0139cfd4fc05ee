/// Physics integration with Rapier
///
/// Wraps the rigid body and collider sets plus the stepping pipeline so the
/// scene only ever deals in handles and glam vectors. Body-backed elements
/// receive movement impulses through here and their transforms are read back
/// after every step.

use glam::{Quat, Vec3};
use nalgebra as na;
use rapier3d::prelude::*;

/// Physics world wrapper
pub struct PhysicsWorld {
    /// Rapier rigid body set
    pub rigid_body_set: RigidBodySet,

    /// Rapier collider set
    pub collider_set: ColliderSet,

    /// Gravity configuration
    pub gravity: Vector<Real>,

    /// Integration parameters
    pub integration_params: IntegrationParameters,

    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity
    pub fn new(gravity: Vec3) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vec3_to_vector(gravity),
            integration_params: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Step the simulation by `delta_time` seconds
    pub fn step(&mut self, delta_time: f32) {
        self.integration_params.dt = delta_time;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,  // No query pipeline modifications
            &(),   // No hooks
            &(),   // No events
        );
    }

    /// Add a dynamic body with a box collider
    pub fn add_dynamic_box(&mut self, position: Vec3, half_extents: Vec3, mass: f32) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vec3_to_vector(position))
            .build();
        let rb_handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .mass(mass)
            .build();
        self.collider_set
            .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        rb_handle
    }

    /// Add a dynamic body with a ball collider
    pub fn add_dynamic_ball(&mut self, position: Vec3, radius: f32, mass: f32) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vec3_to_vector(position))
            .build();
        let rb_handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::ball(radius).mass(mass).build();
        self.collider_set
            .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        rb_handle
    }

    /// Add a fixed body with a box collider (floors, walls)
    pub fn add_fixed_box(&mut self, position: Vec3, half_extents: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vec3_to_vector(position))
            .build();
        let rb_handle = self.rigid_body_set.insert(rigid_body);

        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        rb_handle
    }

    /// Remove a body and its colliders
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Mutable access to a body, for impulse application
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Apply a one-off impulse to a body
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.apply_impulse(vec3_to_vector(impulse), true);
        }
    }

    /// Read a body's current translation
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| vector_to_vec3(*body.translation()))
    }

    /// Read a body's current rotation
    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Option<Quat> {
        self.rigid_body_set
            .get(handle)
            .map(|body| unit_quat_to_quat(body.rotation()))
    }

    /// Teleport a body, waking it up
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vec3_to_vector(position), true);
        }
    }

    /// Read a body's current linear velocity
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| vector_to_vec3(*body.linvel()))
    }
}

impl Default for PhysicsWorld {
    /// Earth-like gravity, matching the physics demos
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.81, 0.0))
    }
}

/// Convert Vec3 to a Rapier Vector
pub fn vec3_to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// Convert a Rapier Vector to Vec3
pub fn vector_to_vec3(v: Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a Rapier UnitQuaternion to Quat
pub fn unit_quat_to_quat(q: &na::UnitQuaternion<Real>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}
