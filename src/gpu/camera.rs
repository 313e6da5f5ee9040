//! Perspective camera with a slow idle sway.

use glam::{Mat4, Vec3};

/// Camera looking at the origin from `+z`, drifting on a small circle.
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along `+z`.
    pub distance: f32,
    /// Radius of the sway circle in the xy plane.
    pub sway_radius: f32,
    /// Sway angular speed in radians per millisecond.
    pub sway_rate: f32,
    /// Point the camera looks at.
    pub target: Vec3,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
            distance: 50.0,
            sway_radius: 2.0,
            sway_rate: 0.0001,
            target: Vec3::ZERO,
        }
    }

    /// World position at `elapsed` seconds.
    pub fn position(&self, elapsed: f32) -> Vec3 {
        let angle = elapsed * 1000.0 * self.sway_rate;
        Vec3::new(
            angle.sin() * self.sway_radius,
            angle.cos() * self.sway_radius,
            self.distance,
        )
    }

    pub fn view_matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::look_at_rh(self.position(elapsed), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection and the camera's world-space right/up axes
    /// (for camera-facing billboards).
    pub fn view_proj(&self, elapsed: f32) -> (Mat4, Vec3, Vec3) {
        let view = self.view_matrix(elapsed);
        // Rows of the view rotation are the camera axes in world space
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        (self.projection_matrix() * view, right, up)
    }
}
