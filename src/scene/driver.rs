use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

use super::camera::PerspectiveCamera;
use super::geometry::{closed_polyline, connecting_loop_points, sphere, torus};
use super::graph::{MarkerOrbit, NodeId, NodeKind, Scene, SceneNode, Transform};
use super::SceneConfig;
use crate::core::canvas::Rgba;
use crate::error::{EffectsError, Result};

/// Handle to the drawing surface the scene is asked to bind to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasHandle {
    id: String,
}

impl CanvasHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Owns the wireframe scene graph and advances it from elapsed time and
/// pointer offset
#[derive(Debug, Clone)]
pub struct SceneDriver {
    config: SceneConfig,
    scene: Scene,
    camera: PerspectiveCamera,
    mesh: NodeId,
    viewport: (u32, u32),
    pointer: Vec2,
    frames: u64,
}

impl SceneDriver {
    /// Bind to `canvas` and build the scene.
    ///
    /// Returns `Ok(None)` when no canvas with the configured identity is
    /// given; the scene is then simply absent.
    pub fn initialize<R: Rng + ?Sized>(
        canvas: Option<&CanvasHandle>,
        viewport: (u32, u32),
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Option<Self>> {
        match canvas {
            Some(handle) if handle.id() == config.canvas_id => {
                Self::build(viewport, config, rng).map(Some)
            }
            _ => {
                log::debug!("No '{}' canvas, wireframe scene not attached", config.canvas_id);
                Ok(None)
            }
        }
    }

    /// Build the scene for a viewport without a canvas check
    pub fn build<R: Rng + ?Sized>(
        viewport: (u32, u32),
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self> {
        Self::validate(config)?;

        let (width, height) = viewport;
        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };

        let mut camera = PerspectiveCamera::new(config.fov_degrees, aspect, config.near, config.far);
        camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
        camera.look_at(Vec3::ZERO);

        let mut scene = Scene::new();

        let torus_geometry = scene.add_geometry(torus(
            config.torus_radius,
            config.tube_radius,
            config.radial_segments,
            config.tubular_segments,
        ));
        let mesh = scene.add(SceneNode {
            name: "torus",
            geometry: torus_geometry,
            transform: Transform::IDENTITY,
            color: Rgba::hex(config.color, config.torus_opacity),
            kind: NodeKind::Mesh,
        });

        // All markers share one sphere geometry
        let marker_geometry = scene.add_geometry(sphere(
            config.marker_radius,
            config.marker_width_segments,
            config.marker_height_segments,
        ));
        for i in 0..config.marker_count {
            let angle = i as f32 / config.marker_count as f32 * TAU;
            let origin = orbit_position(angle, config.orbit_radius, config.orbit_depth);
            let jitter = if config.marker_speed_jitter > 0.0 {
                rng.gen_range(0.0..config.marker_speed_jitter)
            } else {
                0.0
            };

            scene.add(SceneNode {
                name: "marker",
                geometry: marker_geometry,
                transform: Transform::at(origin),
                color: Rgba::hex(config.color, config.marker_opacity),
                kind: NodeKind::Marker(MarkerOrbit {
                    origin,
                    angle,
                    speed: config.marker_base_speed + jitter,
                }),
            });
        }

        let loop_geometry = scene.add_geometry(closed_polyline(&connecting_loop_points(config.loop_points)));
        scene.add(SceneNode {
            name: "connecting-loop",
            geometry: loop_geometry,
            transform: Transform::IDENTITY,
            color: Rgba::hex(config.color, config.loop_opacity),
            kind: NodeKind::Line,
        });

        log::info!(
            "Wireframe scene built: {} nodes, {} segments",
            scene.nodes().len(),
            scene.segment_count()
        );

        Ok(Self {
            config: config.clone(),
            scene,
            camera,
            mesh,
            viewport,
            pointer: Vec2::ZERO,
            frames: 0,
        })
    }

    fn validate(config: &SceneConfig) -> Result<()> {
        if !(config.fov_degrees > 0.0 && config.fov_degrees < 180.0) {
            return Err(EffectsError::SceneConstruction(format!(
                "field of view {} outside (0, 180)",
                config.fov_degrees
            )));
        }
        if !(config.near > 0.0 && config.near < config.far) {
            return Err(EffectsError::SceneConstruction(format!(
                "invalid clip planes near={} far={}",
                config.near, config.far
            )));
        }
        if config.radial_segments == 0 || config.tubular_segments == 0 {
            return Err(EffectsError::SceneConstruction("torus needs at least one segment".into()));
        }
        if config.pointer_divisor == 0.0 {
            return Err(EffectsError::SceneConstruction("pointer divisor must be non-zero".into()));
        }
        Ok(())
    }

    /// Record the pointer's offset from the viewport centre
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let half = Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32) * 0.5;
        self.pointer = (Vec2::new(x, y) - half) / self.config.pointer_divisor;
    }

    pub fn set_pointer_offset(&mut self, offset: Vec2) {
        self.pointer = offset;
    }

    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer
    }

    /// Track new viewport dimensions; zero-sized viewports are ignored
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
    }

    /// Advance one frame. `elapsed` is wall-clock seconds since start and is
    /// the only driver of motion apart from the pointer bias.
    pub fn update(&mut self, elapsed: f32) {
        let t = elapsed;
        let bias = self.pointer;

        if let Some(mesh) = self.scene.node_mut(self.mesh) {
            mesh.transform.rotation = Vec3::new(
                t * 0.02 + bias.y * 0.1,
                t * 0.03 + bias.x * 0.1,
                t * 0.01,
            );
            let pulse = 1.0 + (t * 2.0).sin() * 0.005;
            mesh.transform.scale = Vec3::splat(pulse);
        }

        let (radius, depth) = (self.config.orbit_radius, self.config.orbit_depth);
        for node in self.scene.nodes_mut() {
            if let NodeKind::Marker(orbit) = &mut node.kind {
                orbit.angle += orbit.speed;
                node.transform.position = orbit_position(orbit.angle, radius, depth);
                node.transform.rotation.x = t * 2.0;
                node.transform.rotation.y = t * 3.0;
            }
        }

        self.camera.ease_toward(self.camera_goal(), self.config.camera_ease);
        self.camera.look_at(Vec3::ZERO);
        self.frames += 1;
    }

    /// Where the camera is heading for the current pointer offset
    pub fn camera_goal(&self) -> Vec3 {
        Vec3::new(self.pointer.x, -self.pointer.y, self.camera.position.z)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn mesh(&self) -> Option<&SceneNode> {
        self.scene.node(self.mesh)
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

fn orbit_position(angle: f32, radius: f32, depth: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, angle.sin() * radius, (angle * 2.0).sin() * depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn driver() -> SceneDriver {
        let mut rng = StdRng::seed_from_u64(7);
        SceneDriver::build((1000, 800), &SceneConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn missing_canvas_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SceneConfig::default();

        let none = SceneDriver::initialize(None, (800, 600), &config, &mut rng).unwrap();
        assert!(none.is_none());

        let wrong = CanvasHandle::new("hero-canvas");
        let none = SceneDriver::initialize(Some(&wrong), (800, 600), &config, &mut rng).unwrap();
        assert!(none.is_none());

        let right = CanvasHandle::new("wireframe-canvas");
        let some = SceneDriver::initialize(Some(&right), (800, 600), &config, &mut rng).unwrap();
        assert!(some.is_some());
    }

    #[test]
    fn invalid_camera_config_fails_construction() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SceneConfig { near: 10.0, far: 1.0, ..SceneConfig::default() };
        let err = SceneDriver::build((800, 600), &config, &mut rng).unwrap_err();
        assert!(matches!(err, EffectsError::SceneConstruction(_)));
    }

    #[test]
    fn camera_starts_on_axis() {
        let driver = driver();
        let camera = driver.camera();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.fov_y_degrees, 75.0);
        assert!((camera.aspect - 1.25).abs() < 1e-6);
    }

    #[test]
    fn pointer_offset_is_relative_to_centre() {
        let mut driver = driver();
        driver.on_pointer_move(1000.0, 400.0);
        assert_eq!(driver.pointer_offset(), Vec2::new(1.0, 0.0));

        driver.on_pointer_move(0.0, 0.0);
        assert_eq!(driver.pointer_offset(), Vec2::new(-1.0, -0.8));
    }

    #[test]
    fn markers_advance_by_their_speed() {
        let mut driver = driver();
        let before: Vec<MarkerOrbit> = driver.scene().markers().map(|(_, o)| *o).collect();

        driver.update(0.5);

        for ((node, after), before) in driver.scene().markers().zip(&before) {
            assert!((after.angle - (before.angle + before.speed)).abs() < 1e-6);
            assert!((node.transform.rotation.x - 1.0).abs() < 1e-6);
            assert!((node.transform.rotation.y - 1.5).abs() < 1e-6);
            assert!((node.transform.position.truncate().length() - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn resize_updates_aspect() {
        let mut driver = driver();
        driver.on_resize(1600, 800);
        assert_eq!(driver.viewport(), (1600, 800));
        assert!((driver.camera().aspect - 2.0).abs() < 1e-6);
    }
}
