use serde::Deserialize;

use super::interaction::ReducedMotion;
use super::{Bounds, ElementId};
use crate::config::{parse_float_attr, Attributes, FromAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Duration of an anchor-link scroll
    pub scroll_duration_ms: f32,
    /// Scroll offset past which the header turns more opaque
    pub header_solid_after: f32,
    /// Scroll offset past which scrolling down hides the header
    pub header_hide_after: f32,
    pub header_alpha: f32,
    pub header_solid_alpha: f32,
    /// Quiet period before a resize is handled
    pub resize_debounce_ms: f32,
    /// Minimum gap between handled scroll events
    pub scroll_throttle_ms: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_duration_ms: 600.0,
            header_solid_after: 100.0,
            header_hide_after: 200.0,
            header_alpha: 0.9,
            header_solid_alpha: 0.95,
            resize_debounce_ms: 250.0,
            scroll_throttle_ms: 16.0,
        }
    }
}

/// A page section that anchor links can point at
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: ElementId,
    pub bounds: Bounds,
}

impl Section {
    pub fn new(id: impl Into<ElementId>, bounds: Bounds) -> Self {
        Self { id: id.into(), bounds }
    }

    pub fn top(&self) -> f32 {
        self.bounds.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: f32,
}

/// Animated scrolling to in-page anchors
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    duration: f32,
    animation: Option<ScrollAnimation>,
}

impl SmoothScroll {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            duration: config.scroll_duration_ms / 1000.0,
            animation: None,
        }
    }

    /// Start scrolling from `from` to the section named by `anchor`
    /// (`"#faq"` or `"faq"`), leaving room for a fixed header.
    ///
    /// Returns false, and leaves any running scroll alone, when no section
    /// matches.
    pub fn scroll_to(
        &mut self,
        anchor: &str,
        sections: &[Section],
        header_height: f32,
        from: f32,
        now: f32,
    ) -> bool {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        let Some(section) = sections.iter().find(|s| s.id == id) else {
            log::debug!("No section for anchor '{anchor}'");
            return false;
        };

        self.animation = Some(ScrollAnimation {
            from,
            to: (section.top() - header_height).max(0.0),
            started_at: now,
        });
        true
    }

    /// Scroll position at `now`, or `None` when no scroll was started
    pub fn position(&self, now: f32) -> Option<f32> {
        let anim = self.animation?;
        let t = if self.duration > 0.0 {
            ((now - anim.started_at) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some(anim.from + (anim.to - anim.from) * ease_in_out(t))
    }

    pub fn target(&self) -> Option<f32> {
        self.animation.map(|a| a.to)
    }

    pub fn is_finished(&self, now: f32) -> bool {
        match self.animation {
            Some(anim) => now - anim.started_at >= self.duration,
            None => true,
        }
    }

    /// Drop the running scroll, e.g. when the user scrolls by hand
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}

/// Cubic ease-in-out on `[0, 1]`
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    /// Opacity of the black header background
    pub background_alpha: f32,
    /// Header slid out of view
    pub hidden: bool,
}

/// Fixed header that darkens after scrolling and hides while scrolling down
#[derive(Debug, Clone)]
pub struct HeaderState {
    config: NavigationConfig,
    last_y: f32,
    style: HeaderStyle,
}

impl HeaderState {
    pub fn new(config: &NavigationConfig, initial_y: f32) -> Self {
        let mut state = Self {
            config: *config,
            last_y: initial_y,
            style: HeaderStyle {
                background_alpha: config.header_alpha,
                hidden: false,
            },
        };
        state.on_scroll(initial_y);
        state
    }

    pub fn on_scroll(&mut self, y: f32) -> HeaderStyle {
        let background_alpha = if y > self.config.header_solid_after {
            self.config.header_solid_alpha
        } else {
            self.config.header_alpha
        };
        let hidden = y > self.last_y && y > self.config.header_hide_after;

        self.last_y = y;
        self.style = HeaderStyle {
            background_alpha,
            hidden,
        };
        self.style
    }

    pub fn style(&self) -> HeaderStyle {
        self.style
    }
}

/// `data-parallax` element that scrolls at a fraction of the page speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub speed: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self { speed: 0.5 }
    }
}

impl FromAttributes for Parallax {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-parallax")?;
        // Zero counts as unset
        let speed = parse_float_attr(attrs, "data-parallax")
            .filter(|s| *s != 0.0 && s.is_finite())
            .unwrap_or(Parallax::default().speed);
        Some(Self { speed })
    }
}

impl Parallax {
    /// Vertical translation for a scroll offset; `None` under reduced motion
    pub fn offset(&self, scroll_y: f32, motion: ReducedMotion) -> Option<f32> {
        if motion.is_reduced() {
            return None;
        }
        Some(-(scroll_y * self.speed))
    }
}
