//! egui overlay that paints the landing page from [`LandingPage`] state.
//! Drawing only reads the page; all input goes through the page directly.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind};
use glam::Vec2;

use crate::core::canvas::Rgba;
use crate::effects::Bounds;
use crate::page::content;
use crate::page::layout::HEADER_HEIGHT;
use crate::page::LandingPage;

const BACKGROUND: Color32 = Color32::from_rgb(10, 10, 14);
const TEXT: Color32 = Color32::from_rgb(232, 236, 240);
const MUTED: Color32 = Color32::from_rgb(140, 148, 160);
const CARD: Color32 = Color32::from_rgb(22, 24, 30);
const ACCENT: Color32 = Color32::from_rgb(0, 255, 136);
const SHIMMER: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);

/// Distance a revealing element rises while it fades in
const REVEAL_RISE: f32 = 30.0;

fn pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn rect(bounds: &Bounds) -> Rect {
    Rect::from_min_max(pos(bounds.min), pos(bounds.max))
}

fn color(rgba: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn faded(c: Color32, alpha: f32) -> Color32 {
    c.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Paint the whole page for this frame
pub fn draw_page(ctx: &egui::Context, page: &LandingPage) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let painter = ui.painter();
            let t = page.time();

            draw_bounce(painter, page);
            draw_hero(painter, page, t);
            draw_stats(painter, page);
            draw_features(painter, page, t);
            draw_faq(painter, page);
            draw_partners(painter, page);
            draw_cta(painter, page, t);
            draw_header(painter, page);
        });
}

/// Alpha and vertical lift of a revealed element
fn reveal(page: &LandingPage, id: &str) -> (f32, f32) {
    match page.reveal_progress(id) {
        Some(p) => (p, (1.0 - p) * REVEAL_RISE),
        None => (0.0, REVEAL_RISE),
    }
}

fn screen(page: &LandingPage, bounds: &Bounds, lift: f32) -> Rect {
    rect(&page.to_screen(bounds).translate(Vec2::new(0.0, lift)))
}

fn draw_bounce(painter: &Painter, page: &LandingPage) {
    let viewport = page.layout().viewport;
    let fill = color(page.bounce().color());
    let radius = (page.bounce().size() / 2.0).max(0.5);
    for particle in page.bounce().particles() {
        let at = particle.position / 100.0 * viewport;
        painter.circle_filled(pos(at), radius, fill);
    }
}

fn draw_hero(painter: &Painter, page: &LandingPage, t: f32) {
    let layout = page.layout();
    let hero = page.to_screen(&layout.hero);

    // Parallax glow behind the title
    let glow_center = hero.center() + Vec2::new(0.0, page.hero_offset());
    painter.circle_filled(pos(glow_center), hero.width().min(hero.height()) * 0.3, faded(ACCENT, 0.04));

    for particle in page.drift().particles() {
        let Some(phase) = particle.phase(t) else {
            continue;
        };
        let x = hero.min.x + particle.left / 100.0 * hero.width();
        let y = hero.max.y - phase * hero.height();
        painter.circle_filled(Pos2::new(x, y), 2.0, faded(ACCENT, 0.6 * (1.0 - phase)));
    }

    let title = page.hero_title();
    let mut typed = title.visible_text(t).to_string();
    if title.cursor_visible(t) {
        typed.push('|');
    }
    let title_rect = screen(page, &layout.hero_title, 0.0);
    painter.text(title_rect.center(), Align2::CENTER_CENTER, typed, FontId::proportional(48.0), TEXT);

    let subtitle = screen(page, &layout.hero_subtitle, 0.0);
    painter.text(
        subtitle.center(),
        Align2::CENTER_CENTER,
        content::HERO_SUBTITLE,
        FontId::proportional(18.0),
        MUTED,
    );

    draw_button(painter, page, 0, t, 1.0);
}

fn draw_button(painter: &Painter, page: &LandingPage, index: usize, t: f32, alpha: f32) {
    let Some(button) = page.buttons().get(index) else {
        return;
    };
    let bounds = page.to_screen(&button.bounds.translate(button.offset));
    let area = rect(&bounds);
    painter.rect_filled(area, CornerRadius::same(8), faded(ACCENT, alpha));

    let ripple_color = color(page.ripples().color());
    for ripple in page.ripples().for_button(button.spec.id) {
        let center = bounds.min + ripple.center();
        let radius = ripple.size / 2.0 * ripple.scale(t);
        let fill = ripple_color.gamma_multiply(ripple.opacity(t));
        // Clip to the button like overflow: hidden
        painter
            .with_clip_rect(area)
            .circle_filled(pos(center), radius, fill);
    }

    painter.text(
        area.center(),
        Align2::CENTER_CENTER,
        button.spec.label,
        FontId::proportional(16.0),
        faded(BACKGROUND, alpha),
    );
}

fn draw_header(painter: &Painter, page: &LandingPage) {
    let style = page.header_style();
    if style.hidden {
        return;
    }
    let width = page.layout().viewport.x;
    let bar = Rect::from_min_size(Pos2::ZERO, egui::vec2(width, HEADER_HEIGHT));
    painter.rect_filled(bar, CornerRadius::ZERO, faded(BACKGROUND, style.background_alpha));

    let column = &page.layout().content;
    painter.text(
        Pos2::new(column.min.x, HEADER_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        content::BRAND,
        FontId::proportional(22.0),
        ACCENT,
    );
    for (link, bounds) in page.nav_links().iter().zip(&page.layout().nav_links) {
        painter.text(
            rect(bounds).center(),
            Align2::CENTER_CENTER,
            link.label,
            FontId::proportional(15.0),
            TEXT,
        );
    }
}

fn heading(painter: &Painter, page: &LandingPage, section: &Bounds, id: &str, text: &str) {
    let (alpha, lift) = reveal(page, id);
    let top = screen(page, section, lift);
    painter.text(
        Pos2::new(top.center().x, top.min.y + 60.0),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(32.0),
        faded(TEXT, alpha),
    );
}

fn draw_stats(painter: &Painter, page: &LandingPage) {
    let layout = page.layout();
    heading(painter, page, &layout.stats, "stats", "By the numbers");

    for card in page.stats() {
        let (alpha, lift) = reveal(page, &card.id);
        let area = screen(page, &card.bounds, lift);
        painter.rect_filled(area, CornerRadius::same(12), faded(CARD, alpha));

        let frame = card.counter.frame();
        painter.text(
            area.center() - egui::vec2(0.0, 14.0),
            Align2::CENTER_CENTER,
            frame.text,
            FontId::proportional(36.0),
            faded(ACCENT, alpha),
        );
        painter.text(
            area.center() + egui::vec2(0.0, 30.0),
            Align2::CENTER_CENTER,
            card.label,
            FontId::proportional(14.0),
            faded(MUTED, alpha),
        );
    }
}

fn draw_features(painter: &Painter, page: &LandingPage, t: f32) {
    let layout = page.layout();
    heading(painter, page, &layout.features, "features", "Features");

    let offset = Vec2::new(0.0, -page.scroll_y());
    for (i, card) in page.features().iter().enumerate() {
        if !page.feature_group().is_child_visible(i, t) {
            continue;
        }
        let quad: Vec<Pos2> = card.tilted_corners().iter().map(|c| pos(*c + offset)).collect();
        painter.add(Shape::convex_polygon(quad, CARD, Stroke::new(1.0, faded(ACCENT, 0.2))));

        let area = rect(&page.to_screen(&card.bounds));
        painter.text(
            area.min + egui::vec2(24.0, 40.0),
            Align2::LEFT_CENTER,
            card.title,
            FontId::proportional(20.0),
            TEXT,
        );
        painter.text(
            area.min + egui::vec2(24.0, 80.0),
            Align2::LEFT_TOP,
            card.body,
            FontId::proportional(14.0),
            MUTED,
        );

        let track = rect(&page.to_screen(&card.progress_bounds));
        painter.rect_filled(track, CornerRadius::same(4), faded(TEXT, 0.1));
        let mut fill = track;
        fill.set_width(track.width() * card.progress.width(t) / 100.0);
        painter.rect_filled(fill, CornerRadius::same(4), ACCENT);
    }
}

fn draw_faq(painter: &Painter, page: &LandingPage) {
    let layout = page.layout();
    heading(painter, page, &layout.faq, "faq", "Questions");

    for (i, (item, question)) in page.faq().items().iter().zip(&layout.faq_questions).enumerate() {
        let (alpha, lift) = reveal(page, &format!("faq-{i}"));
        let area = screen(page, question, lift);
        painter.rect_stroke(
            area,
            CornerRadius::same(6),
            Stroke::new(1.0, faded(MUTED, 0.4 * alpha)),
            StrokeKind::Inside,
        );
        painter.text(
            area.left_center() + egui::vec2(20.0, 0.0),
            Align2::LEFT_CENTER,
            &item.question,
            FontId::proportional(17.0),
            faded(TEXT, alpha),
        );
        let marker = if page.faq().is_open(i) { "-" } else { "+" };
        painter.text(
            area.right_center() - egui::vec2(20.0, 0.0),
            Align2::RIGHT_CENTER,
            marker,
            FontId::proportional(22.0),
            faded(ACCENT, alpha),
        );
    }

    if let (Some(open), Some(answer)) = (page.faq().open_index(), layout.faq_answer) {
        if let Some(item) = page.faq().items().get(open) {
            let area = screen(page, &answer, 0.0);
            painter.text(
                area.left_top() + egui::vec2(20.0, 12.0),
                Align2::LEFT_TOP,
                &item.answer,
                FontId::proportional(15.0),
                MUTED,
            );
        }
    }
}

fn draw_partners(painter: &Painter, page: &LandingPage) {
    let layout = page.layout();
    heading(painter, page, &layout.partners, "partners", "Trusted by");

    let t = page.time();
    let logos = page.partners().iter().zip(&layout.partner_logos);
    for ((name, logo), skeleton) in logos.zip(page.partner_skeletons()) {
        let (alpha, lift) = reveal(page, &format!("partner-{name}"));
        let area = screen(page, logo, lift);
        painter.rect_filled(area, CornerRadius::same(8), faded(CARD, alpha));

        if let Some(phase) = skeleton.shimmer_phase(t) {
            painter
                .with_clip_rect(area)
                .rect_filled(shimmer_band(area, phase), CornerRadius::ZERO, faded(SHIMMER, alpha));
            continue;
        }
        painter.text(
            area.center(),
            Align2::CENTER_CENTER,
            *name,
            FontId::proportional(16.0),
            faded(MUTED, alpha),
        );
    }
}

/// Shimmer highlight for `phase` in [0, 1): enters from one card width to
/// the left and leaves one width to the right
fn shimmer_band(area: Rect, phase: f32) -> Rect {
    area.translate(egui::vec2((phase * 2.0 - 1.0) * area.width(), 0.0))
}

fn draw_cta(painter: &Painter, page: &LandingPage, t: f32) {
    let layout = page.layout();
    heading(painter, page, &layout.cta, "cta", content::CTA_TITLE);
    let (alpha, _) = reveal(page, "cta");
    draw_button(painter, page, 1, t, alpha);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_map_to_rects() {
        let r = rect(&Bounds::from_xywh(10.0, 20.0, 30.0, 40.0));
        assert_eq!(r.min, Pos2::new(10.0, 20.0));
        assert_eq!(r.max, Pos2::new(40.0, 60.0));
    }

    #[test]
    fn colours_keep_straight_alpha() {
        let c = color(Rgba::hex(0x00FF88, 1.0));
        assert_eq!(c, Color32::from_rgb(0, 255, 136));
    }

    #[test]
    fn shimmer_band_sweeps_across_the_card() {
        let area = Rect::from_min_size(Pos2::new(100.0, 0.0), egui::vec2(200.0, 72.0));
        assert_eq!(shimmer_band(area, 0.0).min.x, -100.0);
        assert_eq!(shimmer_band(area, 0.5), area);
        assert!(shimmer_band(area, 0.99).min.x > 290.0);
    }
}
