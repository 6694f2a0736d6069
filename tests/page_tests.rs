use glam::Vec2;
use landing_fx::config::EffectsConfig;
use landing_fx::core::input_adapter::NavKey;
use landing_fx::effects::interaction::ReducedMotion;
use landing_fx::page::layout::HEADER_HEIGHT;
use landing_fx::page::{ClickTarget, LandingPage};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);
const FRAME: f32 = 1.0 / 60.0;

fn page() -> LandingPage {
    LandingPage::new(&EffectsConfig::default(), ReducedMotion::new(false), VIEWPORT, 1)
}

/// Run frames from `from` until `until` seconds; returns the last time
fn run(page: &mut LandingPage, from: f32, until: f32) -> f32 {
    let mut now = from;
    while now < until {
        page.update(now);
        now += FRAME;
    }
    now
}

// ============================================================================
// Scrolling Tests
// ============================================================================

#[test]
fn test_scroll_is_clamped_to_page() {
    let mut page = page();
    page.on_scroll_delta(-500.0);
    assert_eq!(page.scroll_y(), 0.0);

    page.on_scroll_delta(1_000_000.0);
    assert_eq!(page.scroll_y(), page.layout().max_scroll());

    page.navigate(NavKey::Home);
    assert_eq!(page.scroll_y(), 0.0);
    page.navigate(NavKey::LineDown);
    assert_eq!(page.scroll_y(), 40.0);
    page.navigate(NavKey::End);
    assert_eq!(page.scroll_y(), page.layout().max_scroll());
}

#[test]
fn test_header_darkens_then_hides_when_scrolling_down() {
    let mut page = page();
    page.update(0.0);
    assert_eq!(page.header_style().background_alpha, 0.9);
    assert!(!page.header_style().hidden);

    page.on_scroll_delta(150.0);
    page.update(0.1);
    assert_eq!(page.header_style().background_alpha, 0.95);
    assert!(!page.header_style().hidden);

    page.on_scroll_delta(150.0);
    page.update(0.2);
    assert!(page.header_style().hidden);

    page.on_scroll_delta(-10.0);
    page.update(0.3);
    assert!(!page.header_style().hidden);
}

#[test]
fn test_nav_link_scrolls_smoothly_below_header() {
    let mut page = page();
    page.update(0.0);

    let link = page.layout().nav_links[2];
    let target = page.click(link.center(), 1.0);
    assert_eq!(target, ClickTarget::NavLink("#faq".to_string()));

    page.update(1.3);
    let midway = page.scroll_y();
    run(&mut page, 1.3, 2.0);

    let expected = page.layout().faq.min.y - HEADER_HEIGHT;
    assert!(midway > 0.0 && midway < expected);
    assert!((page.scroll_y() - expected).abs() < 1e-3);
}

#[test]
fn test_unknown_anchor_is_ignored() {
    let mut page = page();
    assert!(!page.scroll_to("#pricing", 0.0));
    assert!(page.scroll_to("cta", 0.0));
}

#[test]
fn test_manual_scroll_cancels_smooth_scroll() {
    let mut page = page();
    assert!(page.scroll_to("#cta", 0.0));
    page.update(0.1);
    page.on_scroll_delta(-1_000_000.0);
    run(&mut page, 0.2, 1.0);
    assert_eq!(page.scroll_y(), 0.0);
}

// ============================================================================
// Reveal and Counter Tests
// ============================================================================

#[test]
fn test_counters_start_when_stats_come_into_view() {
    let mut page = page();
    run(&mut page, 0.0, 0.5);
    assert!(page.stats().iter().all(|s| !s.counter.is_animated()));

    page.on_scroll_delta(page.layout().stats.min.y);
    let now = run(&mut page, 0.5, 1.0);
    assert!(page.stats().iter().all(|s| s.counter.is_animated()));
    assert!(page.reveal_progress("stats").is_some());

    // 125 ticks finish every counter
    run(&mut page, now, now + 3.0);
    for stat in page.stats() {
        assert!(stat.counter.is_done());
        assert_eq!(stat.counter.value(), stat.counter.target());
    }
    assert_eq!(page.stats()[0].counter.frame().text, "250,000");
}

#[test]
fn test_reveal_fades_in_with_stagger() {
    let mut page = page();
    page.on_scroll_delta(page.layout().stats.min.y);
    page.update(0.0);
    page.update(0.3);

    let first = page.reveal_progress(&page.stats()[0].id).unwrap();
    let last = page.reveal_progress(&page.stats()[3].id).unwrap();
    assert!(first > last);

    run(&mut page, 0.3, 2.0);
    assert_eq!(page.reveal_progress(&page.stats()[3].id), Some(1.0));
}

#[test]
fn test_features_stagger_and_progress_fill() {
    let mut page = page();
    page.on_scroll_delta(page.layout().features.min.y);
    page.update(0.0);

    let group = page.feature_group();
    assert_eq!(group.visible_children(0.0), 1);
    assert_eq!(group.visible_children(0.2), 2);
    assert_eq!(group.visible_children(0.3), 3);

    run(&mut page, 0.0, 4.0);
    for card in page.features() {
        assert!((card.progress.width(page.time()) - card.progress.target()).abs() < 1e-3);
    }
}

// ============================================================================
// Click Tests
// ============================================================================

#[test]
fn test_faq_click_opens_single_item_and_relayouts() {
    let mut page = page();
    let height = page.layout().page_height;
    page.on_scroll_delta(page.layout().faq.min.y);
    page.update(0.0);

    let screen = |page: &LandingPage, i: usize| page.to_screen(&page.layout().faq_questions[i]).center();

    let first = screen(&page, 0);
    assert_eq!(page.click(first, 0.1), ClickTarget::FaqQuestion(0));
    assert!(page.faq().is_open(0));
    assert!(page.layout().faq_answer.is_some());
    assert!(page.layout().page_height > height);

    let second = screen(&page, 1);
    page.click(second, 0.2);
    assert!(!page.faq().is_open(0));
    assert!(page.faq().is_open(1));

    let second = screen(&page, 1);
    page.click(second, 0.3);
    assert_eq!(page.faq().open_index(), None);
    assert_eq!(page.layout().page_height, height);
}

#[test]
fn test_hero_button_ripples_and_scrolls_to_cta() {
    let mut page = page();
    page.update(0.0);
    let button = page.layout().hero_button.center();

    assert_eq!(page.click(button, 0.0), ClickTarget::Button("hero-button".to_string()));
    assert_eq!(page.ripples().for_button("hero-button").count(), 1);

    run(&mut page, 0.0, 1.0);
    assert!(page.ripples().is_empty());
    let expected = (page.layout().cta.min.y - HEADER_HEIGHT).min(page.layout().max_scroll());
    assert!((page.scroll_y() - expected).abs() < 1e-3);
}

#[test]
fn test_click_on_empty_space_does_nothing() {
    let mut page = page();
    assert_eq!(page.click(Vec2::new(5.0, 700.0), 0.0), ClickTarget::Nothing);
    assert_eq!(page.scroll_y(), 0.0);
}

// ============================================================================
// Pointer Tests
// ============================================================================

#[test]
fn test_button_follows_pointer_and_resets_on_leave() {
    let mut page = page();
    let bounds = page.layout().hero_button;
    page.on_pointer_move(bounds.max - Vec2::splat(1.0));
    assert!(page.buttons()[0].offset.x > 0.0);
    assert!(page.buttons()[0].offset.y > 0.0);

    page.on_pointer_leave();
    assert_eq!(page.buttons()[0].offset, Vec2::ZERO);
}

#[test]
fn test_reduced_motion_page() {
    let mut page = LandingPage::new(&EffectsConfig::default(), ReducedMotion::new(true), VIEWPORT, 1);
    let bounds = page.layout().hero_button;
    page.on_pointer_move(bounds.max - Vec2::splat(1.0));
    assert_eq!(page.buttons()[0].offset, Vec2::ZERO);

    page.on_scroll_delta(300.0);
    assert_eq!(page.hero_offset(), 0.0);
    assert!(!page.play("cta-button-pulse"));

    page.update(0.0);
    assert_eq!(page.reveal_progress("hero"), Some(1.0));
}

// ============================================================================
// Timing Tests
// ============================================================================

#[test]
fn test_pause_freezes_animation_time() {
    let mut page = page();
    run(&mut page, 0.0, 1.0);
    let frozen = page.time();

    page.toggle_pause();
    assert!(page.is_paused());
    run(&mut page, 1.0, 3.0);
    assert_eq!(page.time(), frozen);

    page.toggle_pause();
    run(&mut page, 3.0, 4.0);
    assert!(page.time() > frozen);
}

#[test]
fn test_resize_is_debounced() {
    let mut page = page();
    page.on_resize(Vec2::new(900.0, 700.0), 0.0);
    page.update(0.1);
    assert_eq!(page.layout().viewport, VIEWPORT);

    page.on_resize(Vec2::new(800.0, 600.0), 0.2);
    page.update(0.3);
    assert_eq!(page.layout().viewport, VIEWPORT);

    page.update(0.5);
    assert_eq!(page.layout().viewport, Vec2::new(800.0, 600.0));
}

#[test]
fn test_drift_particles_appear_over_time() {
    let mut page = page();
    run(&mut page, 0.0, 3.0);
    assert!(!page.drift().is_empty());
    assert!(page.drift().len() <= page.config().drift.max_particles);
    assert_eq!(page.bounce().len(), page.config().bounce.count);
}

#[test]
fn test_partner_placeholders_shimmer_then_load() {
    let mut page = page();
    run(&mut page, 0.0, 0.5);
    let t = page.time();
    assert_eq!(page.partner_skeletons().len(), page.partners().len());
    assert!(page.partner_skeletons().iter().all(|s| s.shimmer_phase(t).is_some()));

    run(&mut page, 0.5, 3.2);
    let t = page.time();
    assert!(page.partner_skeletons().iter().all(|s| s.is_loaded(t)));
}

#[test]
fn test_page_can_move_to_worker_thread() {
    fn assert_send<T: Send>() {}
    assert_send::<LandingPage>();
}
