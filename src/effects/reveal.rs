use serde::Deserialize;

use super::{Bounds, ElementId};
use crate::config::{parse_int_attr, Attributes, FromAttributes};

/// Trigger parameters for scroll reveal
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction of an element that triggers its reveal
    pub threshold: f32,
    /// Pixels cut from the bottom of the viewport before testing visibility
    pub bottom_margin: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    Section,
    /// The stats section; revealing it starts the counters
    Stats,
    /// Cards, FAQ items, partner logos
    Item,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevealEvent {
    Revealed { id: ElementId, stagger_index: usize },
    StatsVisible,
}

#[derive(Debug, Clone)]
struct RevealTarget {
    id: ElementId,
    kind: RevealKind,
    bounds: Option<Bounds>,
    revealed: bool,
    stagger_index: usize,
}

/// Watches element bounds against the viewport and marks each element
/// revealed, once, the first time enough of it is visible
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    config: RevealConfig,
    targets: Vec<RevealTarget>,
    items: usize,
}

impl RevealObserver {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            items: 0,
        }
    }

    /// Start watching an element at `bounds` (page coordinates). Items get
    /// consecutive stagger indices in the order they are observed;
    /// re-observing an id only updates its bounds.
    pub fn observe(&mut self, id: impl Into<ElementId>, bounds: Bounds, kind: RevealKind) -> usize {
        let id = id.into();
        if let Some(existing) = self.targets.iter_mut().find(|t| t.id == id) {
            existing.bounds = Some(bounds);
            return existing.stagger_index;
        }

        let stagger_index = if kind == RevealKind::Item {
            self.items += 1;
            self.items - 1
        } else {
            0
        };

        self.targets.push(RevealTarget {
            id,
            kind,
            bounds: Some(bounds),
            revealed: false,
            stagger_index,
        });
        stagger_index
    }

    /// Move an element, e.g. after a relayout
    pub fn set_bounds(&mut self, id: &str, bounds: Bounds) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.bounds = Some(bounds);
        }
    }

    /// Fraction of `element` inside the trigger region of `viewport`
    pub fn visible_fraction(&self, element: &Bounds, viewport: &Bounds) -> f32 {
        let root = viewport.shrink_bottom(self.config.bottom_margin);
        let overlap = element.intersect(&root);

        if element.area() <= 0.0 {
            // Zero-size elements count as fully visible once inside the root
            return if root.contains(element.center()) { 1.0 } else { 0.0 };
        }
        overlap.area() / element.area()
    }

    /// Test every unrevealed element against `viewport`, the visible part of
    /// the page in the same coordinates as the observed bounds
    pub fn on_scroll(&mut self, viewport: &Bounds) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        let threshold = self.config.threshold;

        for i in 0..self.targets.len() {
            let target = &self.targets[i];
            if target.revealed {
                continue;
            }
            let Some(bounds) = target.bounds else {
                continue;
            };

            let fraction = self.visible_fraction(&bounds, viewport);
            if fraction > 0.0 && fraction >= threshold {
                let target = &mut self.targets[i];
                target.revealed = true;
                events.push(RevealEvent::Revealed {
                    id: target.id.clone(),
                    stagger_index: target.stagger_index,
                });
                if target.kind == RevealKind::Stats {
                    events.push(RevealEvent::StatsVisible);
                }
            }
        }

        events
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t.id == id && t.revealed)
    }

    pub fn stagger_index(&self, id: &str) -> Option<usize> {
        self.targets.iter().find(|t| t.id == id).map(|t| t.stagger_index)
    }

    pub fn revealed_count(&self) -> usize {
        self.targets.iter().filter(|t| t.revealed).count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// `data-stagger-group` config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggerConfig {
    /// Milliseconds between consecutive children
    pub delay_ms: f32,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self { delay_ms: 100.0 }
    }
}

impl FromAttributes for StaggerConfig {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-stagger-group")?;
        let delay_ms = parse_int_attr(attrs, "data-stagger-delay")
            .filter(|&d| d > 0)
            .map(|d| d as f32)
            .unwrap_or(StaggerConfig::default().delay_ms);
        Some(Self { delay_ms })
    }
}

/// Children that fade in one after another once their group is visible
#[derive(Debug, Clone)]
pub struct StaggerGroup {
    config: StaggerConfig,
    children: usize,
    started_at: Option<f32>,
}

impl StaggerGroup {
    pub fn new(config: StaggerConfig, children: usize) -> Self {
        Self {
            config,
            children,
            started_at: None,
        }
    }

    /// The group became visible at `now`; later calls are ignored
    pub fn on_visible(&mut self, now: f32) {
        self.started_at.get_or_insert(now);
    }

    /// Whether child `index` has faded in by `now`
    pub fn is_child_visible(&self, index: usize, now: f32) -> bool {
        match self.started_at {
            Some(start) if index < self.children => {
                now >= start + index as f32 * self.config.delay_ms / 1000.0
            }
            _ => false,
        }
    }

    pub fn visible_children(&self, now: f32) -> usize {
        (0..self.children).filter(|&i| self.is_child_visible(i, now)).count()
    }

    pub fn children(&self) -> usize {
        self.children
    }
}
