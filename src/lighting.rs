use glam::Vec3;

use crate::movement::SceneNode;

/// White light at full intensity, the default for the demo rigs
pub const WHITE: Vec3 = Vec3::ONE;

#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Cone half-angle in radians
    pub angle: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// A light of any kind, plus an optional debug helper marker
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub kind: LightKind,
    /// Radius of the debug helper gizmo, when one is wanted
    pub helper: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
pub enum LightKind {
    Directional(DirectionalLight),
    Spot(SpotLight),
    Point(PointLight),
}

impl Light {
    pub fn directional(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional(DirectionalLight {
                position,
                direction: Vec3::NEG_Y,
                color,
                intensity,
            }),
            helper: None,
        }
    }

    pub fn spot(position: Vec3, color: Vec3, intensity: f32, angle: f32) -> Self {
        Self {
            kind: LightKind::Spot(SpotLight {
                position,
                direction: Vec3::NEG_Y,
                color,
                intensity,
                angle,
            }),
            helper: None,
        }
    }

    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point(PointLight {
                position,
                color,
                intensity,
            }),
            helper: None,
        }
    }

    /// Attach a debug helper gizmo of the given radius
    pub fn with_helper(mut self, radius: f32) -> Self {
        self.helper = Some(radius);
        self
    }

    pub fn position(&self) -> Vec3 {
        match &self.kind {
            LightKind::Directional(light) => light.position,
            LightKind::Spot(light) => light.position,
            LightKind::Point(light) => light.position,
        }
    }
}

impl SceneNode for Light {
    fn set_position(&mut self, position: Vec3) {
        match &mut self.kind {
            LightKind::Directional(light) => light.position = position,
            LightKind::Spot(light) => light.position = position,
            LightKind::Point(light) => light.position = position,
        }
    }

    fn look_at(&mut self, target: Vec3) {
        let position = self.position();
        let direction = target - position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        let direction = direction.normalize();

        match &mut self.kind {
            LightKind::Directional(light) => light.direction = direction,
            LightKind::Spot(light) => light.direction = direction,
            // A point light radiates in all directions; orienting it does nothing.
            LightKind::Point(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_aims_spot_light() {
        let mut light = Light::spot(Vec3::new(0.0, 5.0, 0.0), WHITE, 10.0, 0.5);
        light.look_at(Vec3::ZERO);

        match light.kind {
            LightKind::Spot(spot) => {
                assert!((spot.direction - Vec3::NEG_Y).length() < 1e-5);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_point_light_ignores_look_at() {
        let mut light = Light::point(Vec3::new(1.0, 5.0, 2.0), WHITE, 10.0);
        light.look_at(Vec3::ZERO);
        assert_eq!(light.position(), Vec3::new(1.0, 5.0, 2.0));
    }
}
