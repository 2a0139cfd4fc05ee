//! The demo scenes and the route layer that selects between them.
//!
//! Each route reproduces one of the original demo pages: a textured survey
//! scene, a physics-backed object, and lights that chase the cursor.

use anyhow::{bail, Result};
use glam::Vec3;
use std::path::Path;

use crate::camera::Camera;
use crate::config::DemoConfig;
use crate::lighting::{self, Light};
use crate::movement::{Movement, SceneNode};
use crate::physics::PhysicsWorld;
use crate::scene::{ElementId, Scene};
use crate::surface::{create_surface, create_surface_with_texture, Shape, ShadowOptions, SurfaceOptions};

/// The demo pages this crate ships
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoRoute {
    Survey,
    AddPhysics,
    FollowCursor,
}

impl DemoRoute {
    /// Resolve a route from its page name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "survey" => Ok(Self::Survey),
            "add-physics" | "addPhysics" => Ok(Self::AddPhysics),
            "follow-cursor" | "followCursor" => Ok(Self::FollowCursor),
            _ => bail!("unknown demo route '{name}' (try survey, add-physics or follow-cursor)"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Survey => "survey",
            Self::AddPhysics => "add-physics",
            Self::FollowCursor => "follow-cursor",
        }
    }

    /// Build the scene and physics world for this route
    pub fn build(&self, config: &DemoConfig) -> Result<DemoScene> {
        match self {
            Self::Survey => build_survey(config),
            Self::AddPhysics => build_add_physics(config),
            Self::FollowCursor => build_follow_cursor(config),
        }
    }
}

/// A fully assembled demo: the scene, its physics world, and the elements
/// that track the cursor (empty for routes without cursor interaction)
pub struct DemoScene {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub followers: Vec<ElementId>,
}

impl DemoScene {
    /// Aim every cursor-following element at a new world-space point.
    ///
    /// Each follower eases toward the point over a tenth of a second, the
    /// cadence the follow-cursor page uses.
    pub fn set_cursor_target(&mut self, point: Vec3) {
        for &id in &self.followers {
            self.scene.retarget(id, point, 0.1);
        }
    }
}

/// Survey page: textured floor piece, sky background, fixed camera and a
/// simple light rig.
fn build_survey(config: &DemoConfig) -> Result<DemoScene> {
    let mut scene = Scene::new();
    let physics = PhysicsWorld::new(Vec3::ZERO);

    let surface_shape = Shape::Box(Vec3::new(1.0, 0.15, 1.0));
    let surface_position = Vec3::new(0.0, -1.0, 0.0);
    let surface_options = SurfaceOptions {
        shadow: Some(ShadowOptions {
            cast: false,
            receive: true,
        }),
        ..Default::default()
    };

    // Missing demo assets downgrade to flat color so the page still shows.
    let surface = match create_surface_with_texture(
        surface_shape,
        Path::new(&config.assets.surface_texture),
        surface_position,
        &surface_options,
    ) {
        Ok(surface) => surface,
        Err(err) => {
            log::warn!("survey surface texture unavailable: {err:#}");
            create_surface(
                surface_shape,
                Vec3::new(0.55, 0.4, 0.25),
                surface_position,
                &surface_options,
            )
        }
    };
    scene.add_mesh("surface", surface);

    match crate::assets::load_texture(Path::new(&config.assets.background)) {
        Ok(texture) => scene.set_background(texture),
        Err(err) => log::warn!("survey background unavailable: {err:#}"),
    }

    let mut camera = Camera::from(config.camera.clone());
    camera.set_position(Vec3::new(5.0, 6.0, 5.0));
    camera.look_at(Vec3::ZERO);
    scene.add_camera("camera", camera);

    let mut sun = Light::directional(Vec3::new(5.0, 5.0, 5.0), lighting::WHITE, 0.6);
    sun.look_at(Vec3::ZERO);
    scene.add_light("sun", sun);
    scene.add_light(
        "fill",
        Light::point(Vec3::new(-3.0, 4.0, -3.0), lighting::WHITE, 0.8),
    );

    Ok(DemoScene {
        scene,
        physics,
        followers: Vec::new(),
    })
}

/// Add-physics page: a camera and light parked with snap movements, plus a
/// body-backed box driven toward a target by impulses while gravity pulls it
/// down onto a fixed floor.
fn build_add_physics(config: &DemoConfig) -> Result<DemoScene> {
    let mut scene = Scene::new();
    let mut physics = PhysicsWorld::new(config.world.gravity);

    let camera_position = Vec3::new(5.0, 5.0, 5.0);
    let mut camera = Camera::from(config.camera.clone());
    camera.set_position(camera_position);
    camera.look_at(Vec3::ZERO);
    let camera_id = scene.add_camera("camera", camera);
    scene.set_movement(camera_id, Movement::snap_to(camera_position));

    let light_position = Vec3::new(1.0, 5.0, 2.0);
    let light = Light::point(light_position, lighting::WHITE, 10.0).with_helper(1.0);
    let light_id = scene.add_light("light", light);
    scene.set_movement(
        light_id,
        Movement::snap_to(light_position).with_look_at(Vec3::ZERO),
    );

    // Slab mesh and collider share a center so the floor top sits at y = 0.
    let floor_position = Vec3::new(0.0, -0.05, 0.0);
    let floor_body = physics.add_fixed_box(floor_position, Vec3::new(5.0, 0.05, 5.0));
    let floor_options = SurfaceOptions {
        shadow: Some(ShadowOptions {
            cast: false,
            receive: true,
        }),
        body: Some(floor_body),
        ..Default::default()
    };
    let floor = create_surface(
        Shape::Box(Vec3::new(10.0, 0.1, 10.0)),
        Vec3::new(0.3, 0.3, 0.35),
        floor_position,
        &floor_options,
    );
    scene.add_surface("floor", floor, &floor_options, &mut physics);

    // The object the page adds physics to. If the configured model is
    // missing we fall back to a plain box so the demo still runs.
    let object_position = Vec3::new(0.0, 3.0, 0.0);
    let body = physics.add_dynamic_box(object_position, Vec3::splat(0.5), 1.0);
    let object_options = SurfaceOptions {
        shadow: Some(ShadowOptions {
            cast: true,
            receive: false,
        }),
        body: Some(body),
        ..Default::default()
    };
    let object_id = match scene.load_object(
        "object",
        Path::new(&config.assets.model),
        object_position,
        &object_options,
        &mut physics,
    ) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("demo model unavailable, using a box: {err:#}");
            let cube = create_surface(
                Shape::Box(Vec3::ONE),
                Vec3::new(0.8, 0.3, 0.2),
                object_position,
                &object_options,
            );
            scene.add_surface("object", cube, &object_options, &mut physics)
        }
    };

    scene.set_movement(
        object_id,
        Movement::new(object_position, Vec3::new(3.0, 0.5, 0.0), 2.0),
    );

    Ok(DemoScene {
        scene,
        physics,
        followers: Vec::new(),
    })
}

/// Follow-cursor page: three point lights on short movements aimed at the
/// origin; the cursor retargets them.
fn build_follow_cursor(config: &DemoConfig) -> Result<DemoScene> {
    let mut scene = Scene::new();
    let physics = PhysicsWorld::new(Vec3::ZERO);

    let mut camera = Camera::from(config.camera.clone());
    camera.set_position(Vec3::new(5.0, 5.0, 5.0));
    camera.look_at(Vec3::ZERO);
    scene.add_camera("camera", camera);

    let light_positions = [
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 5.0),
    ];

    let mut followers = Vec::new();
    for (index, &position) in light_positions.iter().enumerate() {
        let light = Light::point(position, lighting::WHITE, 10.0).with_helper(1.0);
        let id = scene.add_light(&format!("light{}", index + 1), light);
        scene.set_movement(
            id,
            Movement::new(position, position, 0.1).with_look_at(Vec3::ZERO),
        );
        followers.push(id);
    }

    Ok(DemoScene {
        scene,
        physics,
        followers,
    })
}
