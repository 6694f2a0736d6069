//! Decorative wireframe scene: a torus, a ring of orbiting markers and a
//! wobbling connecting loop, plus the 2D fallback drawn when no 3D pipeline
//! is available.

pub mod background;
pub mod camera;
pub mod driver;
pub mod fallback;
pub mod geometry;
pub mod graph;

pub use background::Background;
pub use camera::PerspectiveCamera;
pub use driver::{CanvasHandle, SceneDriver};
pub use fallback::{Fallback2d, FallbackAnimation};
pub use graph::{MarkerOrbit, NodeKind, Scene, SceneNode, Transform};

use serde::Deserialize;

/// Identity of the canvas the scene binds to
pub const WIREFRAME_CANVAS_ID: &str = "wireframe-canvas";

/// Scene construction and motion parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas_id: String,
    /// Line colour as 0xRRGGBB
    pub color: u32,

    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    /// Fraction of the remaining distance the camera covers each frame
    pub camera_ease: f32,
    /// Pointer pixels per unit of offset
    pub pointer_divisor: f32,

    pub torus_radius: f32,
    pub tube_radius: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub torus_opacity: f32,

    pub marker_count: u32,
    pub marker_radius: f32,
    pub marker_width_segments: u32,
    pub marker_height_segments: u32,
    pub marker_opacity: f32,
    pub orbit_radius: f32,
    pub orbit_depth: f32,
    /// Radians advanced per frame by every marker
    pub marker_base_speed: f32,
    /// Upper bound of the random per-marker speed added to the base
    pub marker_speed_jitter: f32,

    pub loop_points: u32,
    pub loop_opacity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: WIREFRAME_CANVAS_ID.to_string(),
            color: 0x00FF88,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            camera_ease: 0.05,
            pointer_divisor: 500.0,
            torus_radius: 5.0,
            tube_radius: 2.8,
            radial_segments: 16,
            tubular_segments: 100,
            torus_opacity: 0.07,
            marker_count: 8,
            marker_radius: 0.015,
            marker_width_segments: 8,
            marker_height_segments: 20,
            marker_opacity: 0.08,
            orbit_radius: 4.0,
            orbit_depth: 2.0,
            marker_base_speed: 0.005,
            marker_speed_jitter: 0.0005,
            loop_points: 50,
            loop_opacity: 0.3,
        }
    }
}
