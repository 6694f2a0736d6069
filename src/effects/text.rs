use rand::Rng;
use serde::Deserialize;

use crate::config::{parse_int_attr, Attributes, FromAttributes};
use crate::core::timer::Countdown;

/// `data-typing` element with its `data-typing-speed`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingConfig {
    /// Milliseconds per character
    pub speed_ms: f32,
    /// How long the cursor lingers after the last character, seconds
    pub cursor_linger: f32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            speed_ms: 50.0,
            cursor_linger: 1.0,
        }
    }
}

impl FromAttributes for TypingConfig {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-typing")?;
        let speed_ms = parse_int_attr(attrs, "data-typing-speed")
            .filter(|&s| s > 0)
            .map(|s| s as f32)
            .unwrap_or(TypingConfig::default().speed_ms);
        Some(Self {
            speed_ms,
            ..TypingConfig::default()
        })
    }
}

/// Types its text out one character per tick once it first becomes visible
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    chars: usize,
    config: TypingConfig,
    started_at: Option<f32>,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, config: TypingConfig) -> Self {
        let text = text.into();
        Self {
            chars: text.chars().count(),
            text,
            config,
            started_at: None,
        }
    }

    /// Start typing; only the first call has an effect
    pub fn on_visible(&mut self, now: f32) {
        self.started_at.get_or_insert(now);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    fn step(&self) -> f32 {
        self.config.speed_ms / 1000.0
    }

    /// Characters shown at `now`. The first appears as soon as typing starts.
    pub fn typed_chars(&self, now: f32) -> usize {
        let Some(start) = self.started_at else {
            return 0;
        };
        if now < start {
            return 0;
        }
        let ticks = ((now - start) / self.step()).floor() as usize;
        (ticks + 1).min(self.chars)
    }

    pub fn visible_text(&self, now: f32) -> &str {
        let n = self.typed_chars(now);
        let end = self
            .text
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    /// When the last character has been shown and the typing loop has ended
    pub fn completed_at(&self) -> Option<f32> {
        self.started_at.map(|start| start + self.chars as f32 * self.step())
    }

    pub fn is_complete(&self, now: f32) -> bool {
        self.completed_at().is_some_and(|done| now >= done)
    }

    /// The cursor shows from setup until it lingers past completion
    pub fn cursor_visible(&self, now: f32) -> bool {
        match self.completed_at() {
            Some(done) => now < done + self.config.cursor_linger,
            None => true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `data-progress` bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressConfig {
    /// Target fill, percent
    pub percent: f32,
    /// Wait after first becoming visible, seconds
    pub delay: f32,
    /// Width transition length, seconds
    pub transition: f32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            percent: 0.0,
            delay: 0.5,
            transition: 2.0,
        }
    }
}

impl FromAttributes for ProgressConfig {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-progress")?;
        let percent = parse_int_attr(attrs, "data-progress").unwrap_or(0).clamp(0, 100) as f32;
        Some(Self {
            percent,
            ..ProgressConfig::default()
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    config: ProgressConfig,
    visible_at: Option<f32>,
}

impl ProgressBar {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            visible_at: None,
        }
    }

    pub fn on_visible(&mut self, now: f32) {
        self.visible_at.get_or_insert(now);
    }

    /// Fill width in percent at `now`, easing out toward the target
    pub fn width(&self, now: f32) -> f32 {
        let Some(visible_at) = self.visible_at else {
            return 0.0;
        };
        let fill_start = visible_at + self.config.delay;
        if now < fill_start {
            return 0.0;
        }
        let t = if self.config.transition > 0.0 {
            ((now - fill_start) / self.config.transition).min(1.0)
        } else {
            1.0
        };
        let eased = 1.0 - (1.0 - t).powi(3);
        self.config.percent * eased
    }

    pub fn target(&self) -> f32 {
        self.config.percent
    }
}

/// Placeholder timing for `.skeleton` elements
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Shortest load delay, seconds
    pub min_delay: f32,
    /// Random extra delay on top of `min_delay`, seconds
    pub delay_spread: f32,
    /// One shimmer sweep, seconds
    pub shimmer_period: f32,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            min_delay: 1.0,
            delay_spread: 2.0,
            shimmer_period: 2.0,
        }
    }
}

/// Loading placeholder that shimmers until a random delay has passed,
/// then stays loaded
#[derive(Debug, Clone, Copy)]
pub struct Skeleton {
    config: SkeletonConfig,
    started_at: f32,
    load: Countdown,
}

impl Skeleton {
    pub fn new<R: Rng>(config: SkeletonConfig, now: f32, rng: &mut R) -> Self {
        let delay = config.min_delay + rng.gen::<f32>() * config.delay_spread.max(0.0);
        Self {
            config,
            started_at: now,
            load: Countdown::new(now, delay),
        }
    }

    /// Returns true on the tick the placeholder loads
    pub fn tick(&mut self, now: f32) -> bool {
        self.load.tick(now)
    }

    pub fn is_loaded(&self, now: f32) -> bool {
        self.load.is_done() || self.load.progress(now) >= 1.0
    }

    /// Position of the shimmer sweep in [0, 1), `None` once loaded
    pub fn shimmer_phase(&self, now: f32) -> Option<f32> {
        if self.is_loaded(now) {
            return None;
        }
        if self.config.shimmer_period <= 0.0 {
            return Some(0.0);
        }
        let elapsed = (now - self.started_at).max(0.0);
        Some((elapsed / self.config.shimmer_period).fract())
    }
}
