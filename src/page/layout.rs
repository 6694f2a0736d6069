use glam::Vec2;

use crate::effects::Bounds;

pub const HEADER_HEIGHT: f32 = 70.0;
const MAX_CONTENT_WIDTH: f32 = 1100.0;
const SIDE_PADDING: f32 = 48.0;
const GAP: f32 = 24.0;

const STATS_HEIGHT: f32 = 340.0;
const FEATURES_HEIGHT: f32 = 560.0;
const PARTNERS_HEIGHT: f32 = 260.0;
const CTA_HEIGHT: f32 = 380.0;

const FAQ_HEADING: f32 = 160.0;
pub const FAQ_QUESTION_HEIGHT: f32 = 60.0;
pub const FAQ_ANSWER_HEIGHT: f32 = 72.0;
const FAQ_ITEM_GAP: f32 = 12.0;

/// Geometry of every page element, in page coordinates except the header
/// and nav links which are fixed to the screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub viewport: Vec2,
    pub content: Bounds,
    pub nav_links: Vec<Bounds>,

    pub hero: Bounds,
    pub hero_title: Bounds,
    pub hero_subtitle: Bounds,
    pub hero_button: Bounds,

    pub stats: Bounds,
    pub stat_cards: Vec<Bounds>,

    pub features: Bounds,
    pub features_grid: Bounds,
    pub feature_cards: Vec<Bounds>,
    pub progress_bars: Vec<Bounds>,

    pub faq: Bounds,
    pub faq_questions: Vec<Bounds>,
    pub faq_answer: Option<Bounds>,

    pub partners: Bounds,
    pub partner_logos: Vec<Bounds>,

    pub cta: Bounds,
    pub cta_button: Bounds,

    pub page_height: f32,
}

/// Item counts the layout has to make room for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCounts {
    pub nav_links: usize,
    pub stats: usize,
    pub features: usize,
    pub faq: usize,
    pub partners: usize,
}

/// `count` equal cells across `area`, separated by `GAP`
fn row(area: Bounds, count: usize, height: f32) -> Vec<Bounds> {
    if count == 0 {
        return Vec::new();
    }
    let width = ((area.width() - GAP * (count - 1) as f32) / count as f32).max(0.0);
    (0..count)
        .map(|i| Bounds::from_xywh(area.min.x + i as f32 * (width + GAP), area.min.y, width, height))
        .collect()
}

fn centered(x_center: f32, y: f32, width: f32, height: f32) -> Bounds {
    Bounds::from_xywh(x_center - width / 2.0, y, width, height)
}

pub fn compute_layout(viewport: Vec2, counts: LayoutCounts, faq_open: Option<usize>) -> PageLayout {
    let viewport = viewport.max(Vec2::ONE);
    let content_width = (viewport.x - 2.0 * SIDE_PADDING).clamp(1.0, MAX_CONTENT_WIDTH);
    let left = (viewport.x - content_width) / 2.0;
    let mid = viewport.x / 2.0;

    // Header nav, right-aligned
    let link_width = 96.0;
    let nav_links = (0..counts.nav_links)
        .map(|i| {
            let from_right = (counts.nav_links - i) as f32;
            Bounds::from_xywh(left + content_width - from_right * link_width, 20.0, link_width - 8.0, 30.0)
        })
        .collect();

    let mut y = 0.0;

    let hero_height = viewport.y.max(600.0);
    let hero = Bounds::from_xywh(0.0, y, viewport.x, hero_height);
    let hero_title = centered(mid, hero_height * 0.34, content_width, 64.0);
    let hero_subtitle = centered(mid, hero_title.max.y + 16.0, content_width, 28.0);
    let hero_button = centered(mid, hero_subtitle.max.y + 40.0, 200.0, 52.0);
    y += hero_height;

    let stats = Bounds::from_xywh(0.0, y, viewport.x, STATS_HEIGHT);
    let stat_cards = row(Bounds::from_xywh(left, y + 120.0, content_width, 0.0), counts.stats, 160.0);
    y += STATS_HEIGHT;

    let features = Bounds::from_xywh(0.0, y, viewport.x, FEATURES_HEIGHT);
    let features_grid = Bounds::from_xywh(left, y + 140.0, content_width, 340.0);
    let feature_cards = row(features_grid, counts.features, features_grid.height());
    let progress_bars = feature_cards
        .iter()
        .map(|card| Bounds::from_xywh(card.min.x + 24.0, card.max.y - 44.0, card.width() - 48.0, 8.0))
        .collect();
    y += FEATURES_HEIGHT;

    let faq_top = y;
    let mut item_y = y + FAQ_HEADING;
    let mut faq_questions = Vec::with_capacity(counts.faq);
    let mut faq_answer = None;
    for i in 0..counts.faq {
        let question = Bounds::from_xywh(left, item_y, content_width, FAQ_QUESTION_HEIGHT);
        item_y = question.max.y;
        if faq_open == Some(i) {
            faq_answer = Some(Bounds::from_xywh(left, item_y, content_width, FAQ_ANSWER_HEIGHT));
            item_y += FAQ_ANSWER_HEIGHT;
        }
        item_y += FAQ_ITEM_GAP;
        faq_questions.push(question);
    }
    let faq = Bounds::from_xywh(0.0, faq_top, viewport.x, item_y - faq_top + 80.0);
    y = faq.max.y;

    let partners = Bounds::from_xywh(0.0, y, viewport.x, PARTNERS_HEIGHT);
    let partner_logos = row(Bounds::from_xywh(left, y + 120.0, content_width, 0.0), counts.partners, 72.0);
    y += PARTNERS_HEIGHT;

    let cta = Bounds::from_xywh(0.0, y, viewport.x, CTA_HEIGHT);
    let cta_button = centered(mid, y + 200.0, 240.0, 56.0);
    y += CTA_HEIGHT;

    PageLayout {
        viewport,
        content: Bounds::from_xywh(left, 0.0, content_width, y),
        nav_links,
        hero,
        hero_title,
        hero_subtitle,
        hero_button,
        stats,
        stat_cards,
        features,
        features_grid,
        feature_cards,
        progress_bars,
        faq,
        faq_questions,
        faq_answer,
        partners,
        partner_logos,
        cta,
        cta_button,
        page_height: y,
    }
}

impl PageLayout {
    /// Furthest the page can scroll
    pub fn max_scroll(&self) -> f32 {
        (self.page_height - self.viewport.y).max(0.0)
    }

    /// Sections in page order, with the ids anchor links use
    pub fn sections(&self) -> [(&'static str, Bounds); 6] {
        [
            ("hero", self.hero),
            ("stats", self.stats),
            ("features", self.features),
            ("faq", self.faq),
            ("partners", self.partners),
            ("cta", self.cta),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: LayoutCounts = LayoutCounts {
        nav_links: 4,
        stats: 4,
        features: 3,
        faq: 4,
        partners: 5,
    };

    #[test]
    fn sections_are_contiguous() {
        let layout = compute_layout(Vec2::new(1280.0, 800.0), COUNTS, None);
        let sections = layout.sections();
        assert_eq!(sections[0].1.min.y, 0.0);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].1.max.y, pair[1].1.min.y);
        }
        assert_eq!(sections[5].1.max.y, layout.page_height);
    }

    #[test]
    fn cards_sit_inside_their_sections() {
        let layout = compute_layout(Vec2::new(1280.0, 800.0), COUNTS, None);
        assert_eq!(layout.stat_cards.len(), 4);
        for card in &layout.stat_cards {
            assert!(layout.stats.contains(card.min) && layout.stats.contains(card.max));
        }
        for card in &layout.feature_cards {
            assert!(layout.features.contains(card.min) && layout.features.contains(card.max));
        }
        for bar in &layout.progress_bars {
            assert!(layout.features.contains(bar.center()));
        }
    }

    #[test]
    fn content_width_is_capped() {
        let layout = compute_layout(Vec2::new(3000.0, 900.0), COUNTS, None);
        assert_eq!(layout.content.width(), 1100.0);
        assert_eq!(layout.content.center().x, 1500.0);
    }

    #[test]
    fn opening_faq_pushes_later_sections_down() {
        let closed = compute_layout(Vec2::new(1280.0, 800.0), COUNTS, None);
        let open = compute_layout(Vec2::new(1280.0, 800.0), COUNTS, Some(1));

        assert!(open.faq_answer.is_some());
        assert_eq!(open.faq_questions[1], closed.faq_questions[1]);
        assert_eq!(open.faq_questions[2].min.y, closed.faq_questions[2].min.y + FAQ_ANSWER_HEIGHT);
        assert_eq!(open.page_height, closed.page_height + FAQ_ANSWER_HEIGHT);
    }

    #[test]
    fn hero_fills_at_least_the_viewport() {
        let layout = compute_layout(Vec2::new(800.0, 400.0), COUNTS, None);
        assert_eq!(layout.hero.height(), 600.0);
        assert!(layout.max_scroll() > 0.0);
    }
}
