use glam::{Mat4, Vec3};

/// Perspective camera that always looks at a fixed target.
///
/// Projection uses wgpu's 0..1 depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    /// Aspect from viewport dimensions; zero-sized viewports keep the old aspect
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Move `factor` of the remaining way toward `goal` on X and Y.
    ///
    /// With `0 < factor < 1` the distance shrinks geometrically and never
    /// overshoots.
    pub fn ease_toward(&mut self, goal: Vec3, factor: f32) {
        self.position.x += (goal.x - self.position.x) * factor;
        self.position.y += (goal.y - self.position.y) * factor;
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_follows_viewport() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);

        camera.set_viewport(0, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let mut camera = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);

        let clip = camera.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn ease_toward_leaves_z_alone() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.ease_toward(Vec3::new(1.0, -1.0, 100.0), 0.5);
        assert_eq!(camera.position, Vec3::new(0.5, -0.5, 5.0));
    }
}
