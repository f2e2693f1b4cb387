//! Orbit camera: view/projection math, world-to-screen projection and
//! screen-to-world ray casting for the collaborating display layer.

use glam::{DMat4, DVec2, DVec3, DVec4};

use super::picking::Ray;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Arc-ball orbit camera around a target point.
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f64,
    /// Vertical rotation angle (radians)
    pub pitch: f64,
    /// Distance from target
    pub distance: f64,
    /// Camera target point
    pub target: DVec3,
    /// Vertical field of view (radians)
    pub fov: f64,
    /// Orbit input gate: cleared for the duration of a gizmo drag.
    pub orbit_enabled: bool,
}

impl OrbitCamera {
    /// Default pose: eye at (20, 10, 20) looking at the origin.
    pub fn new() -> Self {
        let distance = (20.0_f64 * 20.0 + 10.0 * 10.0 + 20.0 * 20.0).sqrt();
        Self {
            yaw: std::f64::consts::FRAC_PI_4,
            pitch: (10.0 / distance).asin(),
            distance,
            target: DVec3::ZERO,
            fov: 60.0_f64.to_radians(),
            orbit_enabled: true,
        }
    }

    /// Orbit by pixel deltas. Ignored while the gate is cleared.
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        if !self.orbit_enabled {
            return;
        }
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.5, 500.0);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !self.orbit_enabled {
            return;
        }
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Restore the default pose.
    pub fn reset(&mut self) {
        let enabled = self.orbit_enabled;
        *self = Self::new();
        self.orbit_enabled = enabled;
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> DVec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + DVec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera).
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, DVec3::Y)
    }

    /// Projection matrix (camera -> clip).
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov, aspect, 0.1, 1000.0)
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self, aspect: f64) -> DMat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a world point into normalized device coordinates.
    /// Returns `None` for points behind the camera.
    pub fn project_ndc(&self, point: DVec3, aspect: f64) -> Option<DVec2> {
        let clip = self.view_projection(aspect) * DVec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(DVec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Project a world point to pixel coordinates (origin top-left).
    pub fn project_px(&self, point: DVec3, viewport: ViewportSize) -> Option<DVec2> {
        let ndc = self.project_ndc(point, viewport.aspect())?;
        Some(DVec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ))
    }

    /// Cast a ray from a pixel position into the scene.
    pub fn screen_ray(&self, pixel: DVec2, viewport: ViewportSize) -> Ray {
        let ndc_x = pixel.x / viewport.width * 2.0 - 1.0;
        let ndc_y = 1.0 - pixel.y / viewport.height * 2.0;

        let vp_inv = self.view_projection(viewport.aspect()).inverse();

        let near = vp_inv * DVec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = vp_inv * DVec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }

    fn right_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(DVec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn default_eye_position() {
        let camera = OrbitCamera::new();
        let eye = camera.eye_position();
        assert_relative_eq!(eye.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(eye.y, 10.0, epsilon = 1e-9);
        assert_relative_eq!(eye.z, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let camera = OrbitCamera::new();
        let ndc = camera.project_ndc(DVec3::ZERO, VIEWPORT.aspect()).unwrap();
        assert!(ndc.length() < 1e-9);
        let px = camera.project_px(DVec3::ZERO, VIEWPORT).unwrap();
        assert_relative_eq!(px.x, 400.0, epsilon = 1e-6);
        assert_relative_eq!(px.y, 300.0, epsilon = 1e-6);
    }

    #[test]
    fn point_behind_camera_rejected() {
        let camera = OrbitCamera::new();
        let behind = camera.eye_position() * 2.0;
        assert!(camera.project_ndc(behind, VIEWPORT.aspect()).is_none());
    }

    #[test]
    fn screen_ray_through_center_hits_target() {
        let camera = OrbitCamera::new();
        let ray = camera.screen_ray(DVec2::new(400.0, 300.0), VIEWPORT);
        // The ray through the viewport center passes through the target.
        let to_target = (camera.target - ray.origin).normalize();
        assert!((ray.direction - to_target).length() < 1e-9);
    }

    #[test]
    fn project_unproject_roundtrip() {
        let camera = OrbitCamera::new();
        let point = DVec3::new(1.0, 2.0, -0.5);
        let px = camera.project_px(point, VIEWPORT).unwrap();
        let ray = camera.screen_ray(px, VIEWPORT);
        // The reconstructed ray passes within numerical noise of the point.
        let t = (point - ray.origin).dot(ray.direction);
        let closest = ray.origin + ray.direction * t;
        assert!((closest - point).length() < 1e-6);
    }

    #[test]
    fn orbit_gate_blocks_rotation() {
        let mut camera = OrbitCamera::new();
        let yaw = camera.yaw;
        camera.orbit_enabled = false;
        camera.rotate(45.0, 0.0);
        assert_eq!(camera.yaw, yaw);
        camera.orbit_enabled = true;
        camera.rotate(45.0, 0.0);
        assert!(camera.yaw != yaw);
    }

    #[test]
    fn reset_preserves_orbit_gate() {
        let mut camera = OrbitCamera::new();
        camera.orbit_enabled = false;
        camera.rotate(45.0, 0.0);
        camera.reset();
        assert!(!camera.orbit_enabled);
        assert_relative_eq!(camera.eye_position().x, 20.0, epsilon = 1e-9);
    }
}
