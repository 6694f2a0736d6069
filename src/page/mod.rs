//! The landing page: every effect component wired to one layout, driven by
//! scroll, pointer, click and time inputs

pub mod content;
pub mod layout;

use std::collections::HashMap;

use glam::{Mat3, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{EffectsConfig, FromAttributes};
use crate::core::input_adapter::NavKey;
use crate::core::timer::{Debounce, Throttle};
use crate::effects::accordion::{Accordion, FaqItem};
use crate::effects::counter::{Counter, CounterConfig};
use crate::effects::interaction::{Magnetic, ReducedMotion, RippleSet, Tilt, TiltRotation};
use crate::effects::navigation::{HeaderState, HeaderStyle, Parallax, Section, SmoothScroll};
use crate::effects::particles::{BouncePool, DriftSpawner};
use crate::effects::registry::AnimationRegistry;
use crate::effects::reveal::{RevealConfig, RevealEvent, RevealKind, RevealObserver, StaggerConfig, StaggerGroup};
use crate::effects::text::{ProgressBar, ProgressConfig, Skeleton, TypingConfig, Typewriter};
use crate::effects::{Bounds, ElementId};
use content::{ButtonSpec, NavLinkSpec};
use layout::{compute_layout, LayoutCounts, PageLayout, HEADER_HEIGHT};

/// Seconds a revealed element takes to fade in
pub const REVEAL_FADE: f32 = 0.6;
/// Extra reveal delay per stagger index
pub const REVEAL_STAGGER: f32 = 0.1;

const HERO_TITLE_ID: &str = "hero-title";
const FEATURE_GRID_ID: &str = "features-grid";

/// Clickable button with optional magnetic pull
#[derive(Debug, Clone)]
pub struct Button {
    pub spec: ButtonSpec,
    pub bounds: Bounds,
    pub magnetic: Option<Magnetic>,
    /// Current magnetic translation
    pub offset: Vec2,
}

#[derive(Debug, Clone)]
pub struct StatCard {
    pub id: ElementId,
    pub label: &'static str,
    pub counter: Counter,
    pub bounds: Bounds,
}

#[derive(Debug, Clone)]
pub struct FeatureCard {
    pub id: ElementId,
    pub title: &'static str,
    pub body: &'static str,
    pub bounds: Bounds,
    pub tilt: Option<Tilt>,
    pub rotation: TiltRotation,
    pub progress: ProgressBar,
    pub progress_bounds: Bounds,
}

impl FeatureCard {
    fn progress_id(&self) -> String {
        format!("{}-progress", self.id)
    }

    /// Card corners after tilting, in page coordinates
    pub fn tilted_corners(&self) -> [Vec2; 4] {
        let perspective = self.tilt.map(|t| t.perspective).unwrap_or(1000.0);
        tilt_quad(&self.bounds, self.rotation, perspective)
    }
}

/// State the registry's animations act on
#[derive(Debug, Default)]
pub struct PageFx {
    pub ripples: RippleSet,
    pub time: f32,
    targets: HashMap<ElementId, Bounds>,
}

impl PageFx {
    /// Ripple from the centre of a known element
    pub fn pulse(&mut self, id: &str) -> bool {
        match self.targets.get(id) {
            Some(bounds) => {
                let bounds = *bounds;
                self.ripples.spawn(id, &bounds, bounds.center(), self.time);
                true
            }
            None => false,
        }
    }
}

/// Animation time that stops while animations are paused
#[derive(Debug, Clone, Copy, Default)]
struct AnimationClock {
    time: f32,
    last_wall: Option<f32>,
}

impl AnimationClock {
    fn advance(&mut self, now: f32, running: bool) -> f32 {
        let delta = self.last_wall.map(|last| (now - last).max(0.0)).unwrap_or(0.0);
        self.last_wall = Some(now);
        if running {
            self.time += delta;
        }
        self.time
    }
}

/// What a click landed on
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    NavLink(String),
    Button(ElementId),
    FaqQuestion(usize),
    Nothing,
}

pub struct LandingPage {
    config: EffectsConfig,
    motion: ReducedMotion,
    layout: PageLayout,
    scroll_y: f32,

    nav: Vec<NavLinkSpec>,
    hero_title: Typewriter,
    hero_parallax: Parallax,
    buttons: Vec<Button>,
    stats: Vec<StatCard>,
    features: Vec<FeatureCard>,
    feature_group: StaggerGroup,
    faq: Accordion,
    partners: Vec<&'static str>,
    partner_skeletons: Vec<Skeleton>,

    reveal: RevealObserver,
    triggers: RevealObserver,
    revealed_at: HashMap<ElementId, (f32, usize)>,

    header: HeaderState,
    smooth: SmoothScroll,
    scroll_throttle: Throttle,
    scroll_dirty: bool,
    resize: Debounce<Vec2>,

    drift: DriftSpawner,
    bounce: BouncePool,
    fx: PageFx,
    registry: AnimationRegistry<PageFx>,
    clock: AnimationClock,
    rng: StdRng,
}

impl LandingPage {
    /// Build the page for a viewport in logical points. `seed` drives every
    /// random particle parameter.
    pub fn new(config: &EffectsConfig, motion: ReducedMotion, viewport: Vec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let nav = content::NAV_LINKS.to_vec();
        let hero_title = Typewriter::new(
            content::HERO_TITLE,
            TypingConfig::from_attributes(&content::hero_title_attributes()).unwrap_or_default(),
        );
        let hero_parallax = Parallax::from_attributes(&content::hero_background_attributes()).unwrap_or_default();

        let buttons = [content::HERO_BUTTON, content::CTA_BUTTON]
            .into_iter()
            .map(|spec| Button {
                spec,
                bounds: Bounds::default(),
                magnetic: Magnetic::from_attributes(&content::button_attributes()),
                offset: Vec2::ZERO,
            })
            .collect();

        let stats = content::STATS
            .iter()
            .map(|stat| StatCard {
                id: stat.id.to_string(),
                label: stat.label,
                counter: CounterConfig::from_attributes(&content::stat_attributes(stat))
                    .map(|c| Counter::from_config(c, config.counter))
                    .unwrap_or_else(|| Counter::with_timing(0, config.counter)),
                bounds: Bounds::default(),
            })
            .collect();

        let features: Vec<FeatureCard> = content::FEATURES
            .iter()
            .map(|feature| {
                let attrs = content::feature_attributes(feature);
                FeatureCard {
                    id: feature.id.to_string(),
                    title: feature.title,
                    body: feature.body,
                    bounds: Bounds::default(),
                    tilt: Tilt::from_attributes(&attrs),
                    rotation: TiltRotation::default(),
                    progress: ProgressBar::new(ProgressConfig::from_attributes(&attrs).unwrap_or_default()),
                    progress_bounds: Bounds::default(),
                }
            })
            .collect();

        let stagger = StaggerConfig::from_attributes(&content::feature_grid_attributes()).unwrap_or_default();
        let feature_group = StaggerGroup::new(stagger, features.len());

        let faq = Accordion::new(content::FAQ.iter().map(|(q, a)| FaqItem::new(*q, *a)).collect());

        let bounce = BouncePool::new(config.bounce, &mut rng);
        let partners = content::PARTNERS.to_vec();
        let partner_skeletons = partners
            .iter()
            .map(|_| Skeleton::new(config.skeleton, 0.0, &mut rng))
            .collect();

        let nav_config = config.navigation;
        let fx = PageFx {
            ripples: RippleSet::new(config.ripple),
            ..PageFx::default()
        };

        let mut registry = AnimationRegistry::new(motion);
        for spec in [content::HERO_BUTTON, content::CTA_BUTTON] {
            let id = spec.id;
            registry.add(format!("{id}-pulse"), id, move |fx: &mut PageFx| {
                fx.pulse(id);
            });
        }

        let mut page = Self {
            config: config.clone(),
            motion,
            layout: PageLayout::default(),
            scroll_y: 0.0,
            nav,
            hero_title,
            hero_parallax,
            buttons,
            stats,
            features,
            feature_group,
            faq,
            partners,
            partner_skeletons,
            reveal: RevealObserver::new(config.reveal),
            // Effect triggers fire on any overlap with the full viewport
            triggers: RevealObserver::new(RevealConfig {
                threshold: 0.0,
                bottom_margin: 0.0,
            }),
            revealed_at: HashMap::new(),
            header: HeaderState::new(&nav_config, 0.0),
            smooth: SmoothScroll::new(&nav_config),
            scroll_throttle: Throttle::from_millis(nav_config.scroll_throttle_ms),
            scroll_dirty: true,
            resize: Debounce::from_millis(nav_config.resize_debounce_ms),
            drift: DriftSpawner::new(config.drift, 0.0),
            bounce,
            fx,
            registry,
            clock: AnimationClock::default(),
            rng,
        };

        page.apply_layout(viewport);
        page.observe_elements();
        log::info!(
            "Landing page initialized: {} sections, {} reveal targets",
            page.layout.sections().len(),
            page.reveal.len()
        );
        page
    }

    fn layout_counts(&self) -> LayoutCounts {
        LayoutCounts {
            nav_links: self.nav.len(),
            stats: self.stats.len(),
            features: self.features.len(),
            faq: self.faq.len(),
            partners: self.partners.len(),
        }
    }

    fn apply_layout(&mut self, viewport: Vec2) {
        self.layout = compute_layout(viewport, self.layout_counts(), self.faq.open_index());

        for (button, bounds) in self
            .buttons
            .iter_mut()
            .zip([self.layout.hero_button, self.layout.cta_button])
        {
            button.bounds = bounds;
            self.fx.targets.insert(button.spec.id.to_string(), bounds);
        }
        for (card, bounds) in self.stats.iter_mut().zip(&self.layout.stat_cards) {
            card.bounds = *bounds;
        }
        for ((card, bounds), bar) in self
            .features
            .iter_mut()
            .zip(&self.layout.feature_cards)
            .zip(&self.layout.progress_bars)
        {
            card.bounds = *bounds;
            card.progress_bounds = *bar;
        }

        self.scroll_y = self.scroll_y.clamp(0.0, self.layout.max_scroll());
        self.scroll_dirty = true;

        // Re-observing only moves already known elements
        if !self.reveal.is_empty() {
            self.observe_elements();
        }
    }

    fn observe_elements(&mut self) {
        for (id, bounds) in self.layout.sections() {
            let kind = if id == "stats" { RevealKind::Stats } else { RevealKind::Section };
            self.reveal.observe(id, bounds, kind);
        }
        for card in &self.stats {
            self.reveal.observe(card.id.clone(), card.bounds, RevealKind::Item);
        }
        for (i, question) in self.layout.faq_questions.iter().enumerate() {
            self.reveal.observe(format!("faq-{i}"), *question, RevealKind::Item);
        }
        for (name, logo) in self.partners.iter().zip(&self.layout.partner_logos) {
            self.reveal.observe(format!("partner-{name}"), *logo, RevealKind::Item);
        }

        self.triggers
            .observe(HERO_TITLE_ID, self.layout.hero_title, RevealKind::Section);
        self.triggers
            .observe(FEATURE_GRID_ID, self.layout.features_grid, RevealKind::Section);
        for card in &self.features {
            self.triggers
                .observe(card.progress_id(), card.progress_bounds, RevealKind::Section);
        }
    }

    // ---------------------------------------------------------------- input

    /// Wheel or trackpad scroll by `delta` points
    pub fn on_scroll_delta(&mut self, delta: f32) {
        self.smooth.cancel();
        self.set_scroll(self.scroll_y + delta);
    }

    pub fn navigate(&mut self, key: NavKey) {
        let page = self.layout.viewport.y * 0.9;
        match key {
            NavKey::LineDown => self.on_scroll_delta(crate::core::input_adapter::LINE_HEIGHT),
            NavKey::LineUp => self.on_scroll_delta(-crate::core::input_adapter::LINE_HEIGHT),
            NavKey::PageDown => self.on_scroll_delta(page),
            NavKey::PageUp => self.on_scroll_delta(-page),
            NavKey::Home => self.on_scroll_delta(-self.scroll_y),
            NavKey::End => self.on_scroll_delta(self.layout.max_scroll() - self.scroll_y),
        }
    }

    fn set_scroll(&mut self, y: f32) {
        let y = y.clamp(0.0, self.layout.max_scroll());
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scroll_dirty = true;
        }
    }

    /// Smooth-scroll to `#anchor`; false when no section has that id
    pub fn scroll_to(&mut self, anchor: &str, now: f32) -> bool {
        let sections: Vec<Section> = self
            .layout
            .sections()
            .into_iter()
            .map(|(id, bounds)| Section::new(id, bounds))
            .collect();
        self.smooth
            .scroll_to(anchor, &sections, HEADER_HEIGHT, self.scroll_y, now)
    }

    /// New window size in points; applied after the resize settles
    pub fn on_resize(&mut self, viewport: Vec2, now: f32) {
        self.resize.trigger(now, viewport);
    }

    /// Pointer at `pointer` (screen points): update magnetic and tilt hovers
    pub fn on_pointer_move(&mut self, pointer: Vec2) {
        let page_point = self.to_page(pointer);
        let motion = self.motion;

        for button in &mut self.buttons {
            button.offset = match button.magnetic {
                Some(magnetic) if button.bounds.contains(page_point) => magnetic
                    .translation(page_point, &button.bounds, motion)
                    .unwrap_or(Vec2::ZERO),
                Some(magnetic) => magnetic.neutral(),
                None => Vec2::ZERO,
            };
        }
        for card in &mut self.features {
            card.rotation = match card.tilt {
                Some(tilt) if card.bounds.contains(page_point) => tilt
                    .rotation(page_point, &card.bounds, motion)
                    .unwrap_or_default(),
                Some(tilt) => tilt.neutral(),
                None => TiltRotation::default(),
            };
        }
    }

    pub fn on_pointer_leave(&mut self) {
        for button in &mut self.buttons {
            button.offset = Vec2::ZERO;
        }
        for card in &mut self.features {
            card.rotation = TiltRotation::default();
        }
    }

    /// Find what sits under a screen point
    pub fn hit_test(&self, pointer: Vec2) -> ClickTarget {
        if !self.header.style().hidden && pointer.y <= HEADER_HEIGHT {
            for (link, bounds) in self.nav.iter().zip(&self.layout.nav_links) {
                if bounds.contains(pointer) {
                    return ClickTarget::NavLink(link.href.to_string());
                }
            }
            return ClickTarget::Nothing;
        }

        let page_point = self.to_page(pointer);
        for button in &self.buttons {
            if button.bounds.translate(button.offset).contains(page_point) {
                return ClickTarget::Button(button.spec.id.to_string());
            }
        }
        for (i, question) in self.layout.faq_questions.iter().enumerate() {
            if question.contains(page_point) {
                return ClickTarget::FaqQuestion(i);
            }
        }
        ClickTarget::Nothing
    }

    /// Handle a primary click at a screen point
    pub fn click(&mut self, pointer: Vec2, now: f32) -> ClickTarget {
        let target = self.hit_test(pointer);
        match &target {
            ClickTarget::NavLink(href) => {
                self.scroll_to(href, now);
            }
            ClickTarget::Button(id) => {
                let page_point = self.to_page(pointer);
                if let Some(button) = self.buttons.iter().find(|b| b.spec.id == id.as_str()) {
                    let bounds = button.bounds.translate(button.offset);
                    let href = button.spec.href;
                    self.fx.ripples.spawn(id.clone(), &bounds, page_point, self.clock.time);
                    if let Some(href) = href {
                        self.scroll_to(href, now);
                    }
                }
            }
            ClickTarget::FaqQuestion(i) => {
                self.faq.toggle(*i);
                let viewport = self.layout.viewport;
                self.apply_layout(viewport);
            }
            ClickTarget::Nothing => {}
        }
        target
    }

    /// Run a registered animation by name
    pub fn play(&mut self, name: &str) -> bool {
        self.fx.time = self.clock.time;
        self.registry.play(name, &mut self.fx)
    }

    pub fn toggle_pause(&mut self) {
        if self.registry.is_paused() {
            self.registry.resume_all();
            log::info!("Animations resumed");
        } else {
            self.registry.pause_all();
            log::info!("Animations paused");
        }
    }

    // --------------------------------------------------------------- update

    /// Advance every time-driven effect to wall time `now` (seconds)
    pub fn update(&mut self, now: f32) {
        let running = !self.registry.is_paused();
        let t = self.clock.advance(now, running);
        self.fx.time = t;

        if let Some(y) = self.smooth.position(now) {
            self.set_scroll(y);
            if self.smooth.is_finished(now) {
                self.smooth.cancel();
            }
        }

        if let Some(viewport) = self.resize.poll(now) {
            log::debug!("Window resized to {:.0}x{:.0}", viewport.x, viewport.y);
            self.apply_layout(viewport);
        }

        if self.scroll_dirty && self.scroll_throttle.ready(now) {
            self.scroll_dirty = false;
            self.handle_scroll(t);
        }

        if running {
            for card in &mut self.stats {
                card.counter.tick();
            }
            self.drift.tick(t, &mut self.rng);
            self.bounce.step();
            self.fx.ripples.expire(t);

            let loaded = self.partner_skeletons.iter_mut().map(|s| s.tick(t)).filter(|&loaded| loaded).count();
            if loaded > 0 {
                log::debug!("{loaded} partner placeholders loaded");
            }
        }
    }

    fn handle_scroll(&mut self, t: f32) {
        self.header.on_scroll(self.scroll_y);
        let viewport = self.viewport_bounds();

        let events = self.reveal.on_scroll(&viewport);
        if !events.is_empty() {
            log::debug!("{}/{} elements revealed", self.reveal.revealed_count(), self.reveal.len());
        }
        for event in events {
            match event {
                RevealEvent::Revealed { id, stagger_index } => {
                    self.revealed_at.insert(id, (t, stagger_index));
                }
                RevealEvent::StatsVisible => {
                    let started = self
                        .stats
                        .iter_mut()
                        .map(|card| card.counter.start())
                        .filter(|started| *started)
                        .count();
                    log::debug!("Stats visible, started {started} counters");
                }
            }
        }

        for event in self.triggers.on_scroll(&viewport) {
            let RevealEvent::Revealed { id, .. } = event else {
                continue;
            };
            if id == HERO_TITLE_ID {
                self.hero_title.on_visible(t);
            } else if id == FEATURE_GRID_ID {
                self.feature_group.on_visible(t);
            } else if let Some(card) = self.features.iter_mut().find(|c| c.progress_id() == id) {
                card.progress.on_visible(t);
            }
        }
    }

    /// Paint the page into an egui frame
    pub fn draw(&self, ctx: &egui::Context) {
        crate::ui::draw_page(ctx, self);
    }

    // ------------------------------------------------------------- queries

    fn to_page(&self, screen: Vec2) -> Vec2 {
        screen + Vec2::new(0.0, self.scroll_y)
    }

    /// Screen position of a page-space rectangle
    pub fn to_screen(&self, bounds: &Bounds) -> Bounds {
        bounds.translate(Vec2::new(0.0, -self.scroll_y))
    }

    /// The visible part of the page, in page coordinates
    pub fn viewport_bounds(&self) -> Bounds {
        Bounds::from_xywh(0.0, self.scroll_y, self.layout.viewport.x, self.layout.viewport.y)
    }

    /// Fade-in progress of a revealed element, `None` if not yet revealed
    pub fn reveal_progress(&self, id: &str) -> Option<f32> {
        let (at, stagger) = self.revealed_at.get(id)?;
        if self.motion.is_reduced() {
            return Some(1.0);
        }
        let start = at + *stagger as f32 * REVEAL_STAGGER;
        Some(((self.clock.time - start) / REVEAL_FADE).clamp(0.0, 1.0))
    }

    /// Parallax shift of the hero decoration
    pub fn hero_offset(&self) -> f32 {
        self.hero_parallax.offset(self.scroll_y, self.motion).unwrap_or(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn time(&self) -> f32 {
        self.clock.time
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn header_style(&self) -> HeaderStyle {
        self.header.style()
    }

    pub fn nav_links(&self) -> &[NavLinkSpec] {
        &self.nav
    }

    pub fn hero_title(&self) -> &Typewriter {
        &self.hero_title
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn stats(&self) -> &[StatCard] {
        &self.stats
    }

    pub fn features(&self) -> &[FeatureCard] {
        &self.features
    }

    pub fn feature_group(&self) -> &StaggerGroup {
        &self.feature_group
    }

    pub fn faq(&self) -> &Accordion {
        &self.faq
    }

    pub fn partners(&self) -> &[&'static str] {
        &self.partners
    }

    /// Loading placeholders, one per partner logo
    pub fn partner_skeletons(&self) -> &[Skeleton] {
        &self.partner_skeletons
    }

    pub fn drift(&self) -> &DriftSpawner {
        &self.drift
    }

    pub fn bounce(&self) -> &BouncePool {
        &self.bounce
    }

    pub fn ripples(&self) -> &RippleSet {
        &self.fx.ripples
    }

    pub fn is_paused(&self) -> bool {
        self.registry.is_paused()
    }

    pub fn motion(&self) -> ReducedMotion {
        self.motion
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }
}

/// Project a rectangle rotated about its centre by `rotation`, viewed from
/// `perspective` pixels away, back onto the page plane
pub fn tilt_quad(bounds: &Bounds, rotation: TiltRotation, perspective: f32) -> [Vec2; 4] {
    let center = bounds.center();
    let half = bounds.size() * 0.5;
    let rotate = Mat3::from_rotation_y(rotation.y_degrees.to_radians())
        * Mat3::from_rotation_x(rotation.x_degrees.to_radians());

    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| {
        // Screen y points down, so flip into a y-up frame and back
        let p = rotate * Vec3::new(corner.x, -corner.y, 0.0);
        let scale = perspective / (perspective - p.z).max(1.0);
        center + Vec2::new(p.x, -p.y) * scale
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> LandingPage {
        LandingPage::new(&EffectsConfig::default(), ReducedMotion::default(), Vec2::new(1280.0, 800.0), 42)
    }

    #[test]
    fn untilted_quad_is_the_rectangle() {
        let bounds = Bounds::from_xywh(10.0, 20.0, 100.0, 50.0);
        let quad = tilt_quad(&bounds, TiltRotation::default(), 1000.0);
        assert!((quad[0] - Vec2::new(10.0, 20.0)).length() < 1e-4);
        assert!((quad[2] - Vec2::new(110.0, 70.0)).length() < 1e-4);
    }

    #[test]
    fn tilting_toward_viewer_enlarges_that_edge() {
        let bounds = Bounds::from_xywh(0.0, 0.0, 200.0, 200.0);
        // Positive y rotation brings the left edge toward the viewer
        let quad = tilt_quad(&bounds, TiltRotation { x_degrees: 0.0, y_degrees: 10.0 }, 1000.0);
        let left = (quad[3].y - quad[0].y).abs();
        let right = (quad[2].y - quad[1].y).abs();
        assert!(left != right);
    }

    #[test]
    fn clock_freezes_while_paused() {
        let mut clock = AnimationClock::default();
        assert_eq!(clock.advance(10.0, true), 0.0);
        assert_eq!(clock.advance(11.0, true), 1.0);
        assert_eq!(clock.advance(12.0, false), 1.0);
        assert_eq!(clock.advance(12.5, true), 1.5);
    }

    #[test]
    fn registered_pulse_spawns_ripple() {
        let mut page = page();
        assert!(page.play("cta-button-pulse"));
        assert_eq!(page.ripples().for_button("cta-button").count(), 1);
        assert!(!page.play("missing"));
    }

    #[test]
    fn hero_is_revealed_on_first_update() {
        let mut page = page();
        page.update(0.0);
        assert!(page.reveal_progress("hero").is_some());
        assert!(page.reveal_progress("faq").is_none());
        assert!(page.hero_title().is_started());
    }
}
