use std::f32::consts::TAU;

use crate::core::canvas::{Canvas, DrawOp, Rgba};

/// Procedural 2D stand-in for the wireframe: concentric breathing circles,
/// each joined to the centre by rotating spokes.
///
/// Drawing only queues canvas operations and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fallback2d {
    pub color: Rgba,
    pub circles: u32,
    pub spokes: u32,
    pub base_radius: f32,
    pub ring_spacing: f32,
    pub wobble: f32,
    /// Spoke rotation in radians per second
    pub spin: f32,
}

impl Default for Fallback2d {
    fn default() -> Self {
        Self {
            color: Rgba::hex(0x00FF88, 0.6),
            circles: 5,
            spokes: 8,
            base_radius: 100.0,
            ring_spacing: 50.0,
            wobble: 20.0,
            spin: 0.5,
        }
    }
}

impl Fallback2d {
    pub fn with_color(rgb: u32) -> Self {
        Self {
            color: Rgba::hex(rgb, 0.6),
            ..Self::default()
        }
    }

    /// Radius of circle `i` at time `t`
    pub fn radius(&self, i: u32, t: f32) -> f32 {
        self.base_radius + i as f32 * self.ring_spacing + (t + i as f32).sin() * self.wobble
    }

    /// Angle of spoke `j` at time `t`
    pub fn spoke_angle(&self, j: u32, t: f32) -> f32 {
        j as f32 / self.spokes as f32 * TAU + t * self.spin
    }

    /// Clear the canvas and draw the frame for time `t` (seconds)
    pub fn draw(&self, canvas: &mut Canvas, t: f32) {
        let (width, height) = canvas.dimensions();
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let color = self.color;

        canvas.push(DrawOp::Clear(Rgba::TRANSPARENT));

        for i in 0..self.circles {
            let radius = self.radius(i, t).max(0.0);
            canvas.push(DrawOp::Circle {
                cx: cx.round() as i32,
                cy: cy.round() as i32,
                radius: radius.round() as u32,
                color,
            });

            for j in 0..self.spokes {
                let angle = self.spoke_angle(j, t);
                canvas.push(DrawOp::Line {
                    x1: cx.round() as i32,
                    y1: cy.round() as i32,
                    x2: (cx + angle.cos() * radius).round() as i32,
                    y2: (cy + angle.sin() * radius).round() as i32,
                    color,
                });
            }
        }

        canvas.flush();
    }
}

/// Fallback painter plus the canvas it paints into
#[derive(Debug, Clone)]
pub struct FallbackAnimation {
    painter: Fallback2d,
    canvas: Canvas,
    time: f32,
}

impl FallbackAnimation {
    pub fn new(painter: Fallback2d, width: u32, height: u32) -> Self {
        Self {
            painter,
            canvas: Canvas::new(width, height),
            time: 0.0,
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.canvas.resize(width, height);
    }

    /// Repaint for `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) {
        self.time = elapsed;
        self.painter.draw(&mut self.canvas, elapsed);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn painter(&self) -> &Fallback2d {
        &self.painter
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_breathe_around_their_base() {
        let painter = Fallback2d::default();
        for i in 0..5 {
            for step in 0..100 {
                let r = painter.radius(i, step as f32 * 0.1);
                let base = 100.0 + i as f32 * 50.0;
                assert!((r - base).abs() <= 20.0 + 1e-4);
            }
        }
        assert!((painter.radius(0, 0.0) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn spokes_rotate_half_a_radian_per_second() {
        let painter = Fallback2d::default();
        let delta = painter.spoke_angle(3, 2.0) - painter.spoke_angle(3, 0.0);
        assert!((delta - 1.0).abs() < 1e-6);
        assert!((painter.spoke_angle(2, 0.0) - TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn draw_paints_centre_and_outer_ring() {
        let mut canvas = Canvas::new(800, 600);
        Fallback2d::default().draw(&mut canvas, 0.0);

        // Spokes meet at the centre
        assert_eq!(canvas.pixel(400, 300).map(|p| (p.r, p.g, p.b)), Some((0, 255, 136)));
        // Circle 0 has radius 100 at t = 0; spoke 0 points along +x
        assert!(canvas.pixel(500, 300).unwrap().a > 0);
        assert_eq!(canvas.pending_ops(), 0);
    }

    #[test]
    fn draw_clears_previous_frame() {
        let mut canvas = Canvas::new(400, 400);
        let painter = Fallback2d::default();
        painter.draw(&mut canvas, 0.0);
        let first = canvas.painted_pixels();
        painter.draw(&mut canvas, 0.0);
        assert_eq!(canvas.painted_pixels(), first);
    }

    #[test]
    fn tiny_canvas_never_panics() {
        let mut animation = FallbackAnimation::new(Fallback2d::default(), 1, 1);
        for frame in 0..10 {
            animation.update(frame as f32 / 60.0);
        }
        animation.on_resize(0, 0);
        assert_eq!(animation.canvas().dimensions(), (1, 1));
    }
}
