use std::fmt::Display;

use rand::Rng;

use super::driver::{CanvasHandle, SceneDriver};
use super::fallback::{Fallback2d, FallbackAnimation};
use super::SceneConfig;

/// The page background: the 3D wireframe when it can run, the 2D fallback
/// when it cannot, nothing when the page has no canvas for it
#[derive(Debug, Clone)]
pub enum Background {
    Wireframe(SceneDriver),
    Fallback(FallbackAnimation),
    Absent,
}

impl Background {
    /// Pick the rendering path.
    ///
    /// `gpu_available` is the capability probe: when false, or when building
    /// the scene fails, the fallback is used and a warning logged.
    pub fn select<R: Rng + ?Sized>(
        canvas: Option<&CanvasHandle>,
        gpu_available: bool,
        viewport: (u32, u32),
        config: &SceneConfig,
        rng: &mut R,
    ) -> Self {
        let Some(handle) = canvas.filter(|c| c.id() == config.canvas_id) else {
            return Background::Absent;
        };

        if !gpu_available {
            log::warn!("3D rendering not supported, using fallback");
            return Self::fallback(viewport, config);
        }

        match SceneDriver::initialize(Some(handle), viewport, config, rng) {
            Ok(Some(driver)) => Background::Wireframe(driver),
            Ok(None) => Background::Absent,
            Err(err) => {
                log::warn!("3D scene unavailable, using fallback: {err}");
                Self::fallback(viewport, config)
            }
        }
    }

    fn fallback(viewport: (u32, u32), config: &SceneConfig) -> Self {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        Background::Fallback(FallbackAnimation::new(Fallback2d::with_color(config.color), width, height))
    }

    /// Switch a running wireframe to the fallback, e.g. after the GPU
    /// pipeline could not be built. Other states are left as they are.
    pub fn fall_back(&mut self, reason: &dyn Display) {
        if let Background::Wireframe(driver) = self {
            log::warn!("3D rendering failed, using fallback: {reason}");
            let viewport = driver.viewport();
            let config = driver.config().clone();
            *self = Self::fallback(viewport, &config);
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        // The fallback ignores the pointer
        if let Background::Wireframe(driver) = self {
            driver.on_pointer_move(x, y);
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        match self {
            Background::Wireframe(driver) => driver.on_resize(width, height),
            Background::Fallback(animation) => animation.on_resize(width, height),
            Background::Absent => {}
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        match self {
            Background::Wireframe(driver) => driver.update(elapsed),
            Background::Fallback(animation) => animation.update(elapsed),
            Background::Absent => {}
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Background::Fallback(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Background::Wireframe(_) => "wireframe",
            Background::Fallback(_) => "fallback",
            Background::Absent => "absent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn canvas() -> CanvasHandle {
        CanvasHandle::new("wireframe-canvas")
    }

    #[test]
    fn no_canvas_means_no_background() {
        let mut rng = StdRng::seed_from_u64(3);
        let bg = Background::select(None, true, (800, 600), &SceneConfig::default(), &mut rng);
        assert_eq!(bg.name(), "absent");

        let bg = Background::select(None, false, (800, 600), &SceneConfig::default(), &mut rng);
        assert_eq!(bg.name(), "absent");
    }

    #[test]
    fn missing_gpu_selects_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let bg = Background::select(Some(&canvas()), false, (800, 600), &SceneConfig::default(), &mut rng);
        assert!(bg.is_fallback());
    }

    #[test]
    fn construction_error_selects_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = SceneConfig { fov_degrees: 0.0, ..SceneConfig::default() };
        let bg = Background::select(Some(&canvas()), true, (800, 600), &config, &mut rng);
        assert!(bg.is_fallback());
    }

    #[test]
    fn fall_back_keeps_viewport() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bg = Background::select(Some(&canvas()), true, (640, 480), &SceneConfig::default(), &mut rng);
        assert_eq!(bg.name(), "wireframe");

        bg.fall_back(&"pipeline creation failed");
        match &bg {
            Background::Fallback(animation) => assert_eq!(animation.canvas().dimensions(), (640, 480)),
            other => panic!("expected fallback, got {}", other.name()),
        }
    }
}
