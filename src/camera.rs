use glam::{Mat4, Quat, Vec3};

use crate::movement::SceneNode;

/// Perspective camera for the demo scenes
pub struct Camera {
    /// Camera position in world space
    position: Vec3,
    /// Camera rotation (pitch, yaw, roll in radians)
    pitch: f32,
    yaw: f32,
    roll: f32,
    /// Field of view in radians
    fov: f32,
    /// Viewport aspect ratio (width / height)
    aspect: f32,
    /// Near clipping plane distance
    near_plane: f32,
    /// Far clipping plane distance
    far_plane: f32,
}

impl Camera {
    /// Create a new camera at the given position with default projection settings
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }

    /// Get the camera's position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the camera's rotation as quaternion
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// Get the view matrix for rendering
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = self.rotation();
        let forward = rotation * Vec3::NEG_Z;
        let target = self.position + forward;
        let up = rotation * Vec3::Y;

        Mat4::look_at_rh(self.position, target, up)
    }

    /// Get the projection matrix for rendering
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near_plane, self.far_plane)
    }

    /// Get field of view in radians
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Get the aspect ratio
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Get near clipping plane distance
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    /// Get far clipping plane distance
    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Set all projection parameters at once, as done on viewport resize
    pub fn set_projection(&mut self, fov: f32, aspect: f32, near_plane: f32, far_plane: f32) {
        self.fov = fov;
        self.aspect = aspect;
        self.near_plane = near_plane;
        self.far_plane = far_plane;
    }

    /// Set the camera position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the camera rotation
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pitch = pitch;
        self.yaw = yaw;
        self.roll = roll;
    }

    /// Point the camera at a world-space target
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }

        let rotation = Quat::from_rotation_arc(Vec3::NEG_Z, direction.normalize());
        let (yaw, pitch, roll) = rotation.to_euler(glam::EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
    }
}

impl SceneNode for Camera {
    fn set_position(&mut self, position: Vec3) {
        Camera::set_position(self, position);
    }

    fn look_at(&mut self, target: Vec3) {
        Camera::look_at(self, target);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl From<crate::config::CameraConfigData> for Camera {
    fn from(data: crate::config::CameraConfigData) -> Self {
        let mut camera = Self::new(data.position);
        camera.set_projection(
            data.fov.to_radians(),
            data.aspect,
            data.near_plane,
            data.far_plane,
        );
        if let Some(look_at) = data.look_at {
            camera.look_at(look_at);
        }
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_faces_target() {
        let mut camera = Camera::new(Vec3::new(5.0, 5.0, 5.0));
        camera.look_at(Vec3::ZERO);

        let forward = camera.rotation() * Vec3::NEG_Z;
        let expected = (Vec3::ZERO - camera.position()).normalize();
        assert!((forward - expected).length() < 1e-4);
    }

    #[test]
    fn test_look_at_own_position_is_ignored() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let before = camera.rotation();
        camera.look_at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.rotation(), before);
    }

    #[test]
    fn test_set_projection_updates_matrix() {
        let mut camera = Camera::default();
        let before = camera.projection_matrix();
        camera.set_projection(70.0_f32.to_radians(), 4.0 / 3.0, 0.5, 500.0);
        assert_ne!(camera.projection_matrix(), before);
        assert_eq!(camera.fov(), 70.0_f32.to_radians());
        assert_eq!(camera.aspect(), 4.0 / 3.0);
        assert_eq!(camera.near_plane(), 0.5);
        assert_eq!(camera.far_plane(), 500.0);
    }

    #[test]
    fn test_default_view_matrix_looks_down_neg_z() {
        let camera = Camera::default();
        let expected = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        assert_eq!(camera.view_matrix(), expected);
    }
}
