use glam::Vec2;
use serde::Deserialize;

use super::{Bounds, ElementId};
use crate::config::{parse_float_attr, Attributes, FromAttributes};
use crate::core::canvas::Rgba;

/// Environment variable that requests reduced motion
pub const REDUCED_MOTION_ENV: &str = "LANDING_FX_REDUCED_MOTION";

/// User preference for minimised animation, read once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReducedMotion(bool);

impl ReducedMotion {
    pub const fn new(reduced: bool) -> Self {
        Self(reduced)
    }

    /// Combine the command-line flag with `LANDING_FX_REDUCED_MOTION`
    pub fn detect(flag: bool) -> Self {
        let env = std::env::var(REDUCED_MOTION_ENV).ok();
        let motion = Self::from_sources(flag, env.as_deref());
        if motion.is_reduced() {
            log::info!("Reduced motion enabled");
        }
        motion
    }

    pub fn from_sources(flag: bool, env: Option<&str>) -> Self {
        let from_env = env
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "reduce"))
            .unwrap_or(false);
        Self(flag || from_env)
    }

    pub fn is_reduced(self) -> bool {
        self.0
    }
}

/// `data-magnetic`: element drifts toward the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnetic {
    pub strength: f32,
}

impl Default for Magnetic {
    fn default() -> Self {
        Self { strength: 0.3 }
    }
}

impl FromAttributes for Magnetic {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-magnetic")?;
        let strength = parse_float_attr(attrs, "data-magnetic")
            .filter(|s| *s != 0.0 && s.is_finite())
            .unwrap_or(Magnetic::default().strength);
        Some(Self { strength })
    }
}

impl Magnetic {
    /// Translation for a pointer over `bounds`; `None` under reduced motion
    pub fn translation(&self, pointer: Vec2, bounds: &Bounds, motion: ReducedMotion) -> Option<Vec2> {
        if motion.is_reduced() {
            return None;
        }
        Some((pointer - bounds.center()) * self.strength)
    }

    /// Transform once the pointer leaves
    pub fn neutral(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Rotation in degrees about the element's x and y axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltRotation {
    pub x_degrees: f32,
    pub y_degrees: f32,
}

/// `data-tilt`: card leans toward the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub max_degrees: f32,
    /// Perspective distance in pixels used when projecting the tilted card
    pub perspective: f32,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            max_degrees: 10.0,
            perspective: 1000.0,
        }
    }
}

impl FromAttributes for Tilt {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-tilt")?;
        let max_degrees = parse_float_attr(attrs, "data-tilt")
            .filter(|d| *d > 0.0 && d.is_finite())
            .unwrap_or(Tilt::default().max_degrees);
        Some(Self {
            max_degrees,
            ..Tilt::default()
        })
    }
}

impl Tilt {
    pub fn rotation(&self, pointer: Vec2, bounds: &Bounds, motion: ReducedMotion) -> Option<TiltRotation> {
        if motion.is_reduced() {
            return None;
        }
        let half = bounds.size() * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return Some(TiltRotation::default());
        }

        let local = pointer - bounds.min;
        Some(TiltRotation {
            x_degrees: -(local.y - half.y) / half.y * self.max_degrees,
            y_degrees: (local.x - half.x) / half.x * self.max_degrees,
        })
    }

    pub fn neutral(&self) -> TiltRotation {
        TiltRotation::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub duration_ms: f32,
    pub max_scale: f32,
    pub color: u32,
    pub opacity: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600.0,
            max_scale: 4.0,
            color: 0xFFFFFF,
            opacity: 0.3,
        }
    }
}

/// Expanding circle left by a button click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Top-left of the ripple square, relative to the button
    pub offset: Vec2,
    /// Side of the ripple square before scaling
    pub size: f32,
    pub born_at: f32,
    duration: f32,
    max_scale: f32,
}

impl Ripple {
    pub fn spawn(button: &Bounds, click: Vec2, now: f32, config: &RippleConfig) -> Self {
        let size = button.width().max(button.height());
        Self {
            offset: click - button.min - Vec2::splat(size / 2.0),
            size,
            born_at: now,
            duration: config.duration_ms / 1000.0,
            max_scale: config.max_scale,
        }
    }

    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.born_at) / self.duration).clamp(0.0, 1.0)
    }

    /// Linear 0 -> max scale
    pub fn scale(&self, now: f32) -> f32 {
        self.progress(now) * self.max_scale
    }

    /// Linear 1 -> 0, multiplied into the ripple colour
    pub fn opacity(&self, now: f32) -> f32 {
        1.0 - self.progress(now)
    }

    pub fn center(&self) -> Vec2 {
        self.offset + Vec2::splat(self.size / 2.0)
    }

    pub fn is_expired(&self, now: f32) -> bool {
        now - self.born_at >= self.duration
    }
}

/// Live ripples across every button on the page
#[derive(Debug, Clone, Default)]
pub struct RippleSet {
    config: RippleConfig,
    ripples: Vec<(ElementId, Ripple)>,
}

impl RippleSet {
    pub fn new(config: RippleConfig) -> Self {
        Self {
            config,
            ripples: Vec::new(),
        }
    }

    pub fn spawn(&mut self, button: impl Into<ElementId>, bounds: &Bounds, click: Vec2, now: f32) -> Ripple {
        let ripple = Ripple::spawn(bounds, click, now, &self.config);
        self.ripples.push((button.into(), ripple));
        ripple
    }

    /// Drop finished ripples; returns how many were removed
    pub fn expire(&mut self, now: f32) -> usize {
        let before = self.ripples.len();
        self.ripples.retain(|(_, r)| !r.is_expired(now));
        before - self.ripples.len()
    }

    pub fn for_button<'a>(&'a self, button: &'a str) -> impl Iterator<Item = &'a Ripple> + 'a {
        self.ripples.iter().filter(move |(id, _)| id == button).map(|(_, r)| r)
    }

    pub fn color(&self) -> Rgba {
        Rgba::hex(self.config.color, self.config.opacity)
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}
