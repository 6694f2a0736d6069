/// RGBA colour with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Colour from a 0xRRGGBB literal with the given opacity [0, 1]
    pub fn hex(rgb: u32, opacity: f32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Normalised [r, g, b, a] for GPU uniforms
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// 2D drawing operations, queued and then executed in order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Replace every pixel with the colour (no blending)
    Clear(Rgba),

    /// Blend a single pixel
    Pixel { x: i32, y: i32, color: Rgba },

    /// One-pixel circle outline
    Circle { cx: i32, cy: i32, radius: u32, color: Rgba },

    /// One-pixel line segment
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba },
}

/// CPU pixel buffer with source-over blending, used where no GPU pipeline is
/// available
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<u8>,
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Queue a draw operation - builder style
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue a draw operation in place
    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    /// Run all queued operations against the pixel buffer
    pub fn execute_ops(mut self) -> Self {
        self.flush();
        self
    }

    /// Run all queued operations in place
    pub fn flush(&mut self) {
        let ops = std::mem::take(&mut self.operations);
        for op in &ops {
            self.execute_op(op);
        }
    }

    /// Reallocate for new dimensions; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn pending_ops(&self) -> usize {
        self.operations.len()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Colour at (x, y), if inside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[idx..idx + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Number of pixels with non-zero alpha
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] > 0).count()
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.blend_pixel(x, y, color),
            DrawOp::Circle { cx, cy, radius, color } => self.draw_circle(cx, cy, radius, color),
            DrawOp::Line { x1, y1, x2, y2, color } => self.draw_line(x1, y1, x2, y2, color),
        }
    }

    fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Source-over blend of `color` onto the pixel at (x, y); out of bounds
    /// writes are dropped
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let dst = &mut self.pixels[idx..idx + 4];

        let src_a = color.a as f32 / 255.0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            dst.copy_from_slice(&[0, 0, 0, 0]);
            return;
        }

        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        dst[0] = mix(color.r, dst[0]);
        dst[1] = mix(color.g, dst[1]);
        dst[2] = mix(color.b, dst[2]);
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Midpoint circle; each octant point is plotted once
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        if radius == 0 {
            self.blend_pixel(cx, cy, color);
            return;
        }

        let (mut x, mut y) = (radius as i32, 0i32);
        let mut p = 1 - radius as i32;

        while x >= y {
            let mut points = vec![
                (cx + x, cy + y), (cx - x, cy + y),
                (cx + x, cy - y), (cx - x, cy - y),
                (cx + y, cy + x), (cx - y, cy + x),
                (cx + y, cy - x), (cx - y, cy - x),
            ];
            // Octant boundaries produce duplicates; blending twice would darken them
            points.sort_unstable();
            points.dedup();
            for (px, py) in points {
                self.blend_pixel(px, py, color);
            }

            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    /// Bresenham line, endpoints inclusive
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgba = Rgba::new(0, 255, 136, 255);

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 50);
        assert_eq!(canvas.dimensions(), (100, 50));
        assert_eq!(canvas.pixels().len(), 100 * 50 * 4);
        assert_eq!(canvas.painted_pixels(), 0);
    }

    #[test]
    fn hex_colour_and_opacity() {
        let c = Rgba::hex(0x00FF88, 0.6);
        assert_eq!((c.r, c.g, c.b), (0, 255, 136));
        assert_eq!(c.a, 153);
        assert_eq!(Rgba::hex(0xFFFFFF, 2.0).a, 255);
    }

    #[test]
    fn clear_replaces_without_blending() {
        let canvas = Canvas::new(4, 4)
            .draw(DrawOp::Clear(Rgba::new(255, 0, 0, 255)))
            .draw(DrawOp::Clear(Rgba::TRANSPARENT))
            .execute_ops();

        assert_eq!(canvas.painted_pixels(), 0);
        assert_eq!(canvas.pending_ops(), 0);
    }

    #[test]
    fn translucent_pixel_over_transparent_keeps_colour() {
        let canvas = Canvas::new(4, 4)
            .draw(DrawOp::Pixel { x: 1, y: 1, color: Rgba::hex(0x00FF88, 0.6) })
            .execute_ops();

        assert_eq!(canvas.pixel(1, 1), Some(Rgba::new(0, 255, 136, 153)));
    }

    #[test]
    fn translucent_pixels_accumulate_alpha() {
        let half = Rgba::new(255, 255, 255, 128);
        let canvas = Canvas::new(2, 2)
            .draw(DrawOp::Pixel { x: 0, y: 0, color: half })
            .draw(DrawOp::Pixel { x: 0, y: 0, color: half })
            .execute_ops();

        let a = canvas.pixel(0, 0).unwrap().a;
        assert!(a > 128 && a < 255);
    }

    #[test]
    fn circle_hits_cardinal_points() {
        let canvas = Canvas::new(50, 50)
            .draw(DrawOp::Circle { cx: 25, cy: 25, radius: 10, color: GREEN })
            .execute_ops();

        assert_eq!(canvas.pixel(25, 15), Some(GREEN));
        assert_eq!(canvas.pixel(35, 25), Some(GREEN));
        assert_eq!(canvas.pixel(25, 25).map(|p| p.a), Some(0));
    }

    #[test]
    fn line_includes_both_endpoints() {
        let canvas = Canvas::new(50, 50)
            .draw(DrawOp::Line { x1: 10, y1: 10, x2: 20, y2: 20, color: GREEN })
            .execute_ops();

        assert_eq!(canvas.pixel(10, 10), Some(GREEN));
        assert_eq!(canvas.pixel(15, 15), Some(GREEN));
        assert_eq!(canvas.pixel(20, 20), Some(GREEN));
    }

    #[test]
    fn offscreen_geometry_is_clipped() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Circle { cx: 5, cy: 5, radius: 40, color: GREEN })
            .draw(DrawOp::Line { x1: -20, y1: 5, x2: 30, y2: 5, color: GREEN })
            .execute_ops();

        assert_eq!(canvas.pixels().len(), 10 * 10 * 4);
        // Only the line row survives clipping
        assert_eq!(canvas.painted_pixels(), 10);
    }

    #[test]
    fn resize_discards_contents() {
        let mut canvas = Canvas::new(4, 4)
            .draw(DrawOp::Clear(GREEN))
            .execute_ops();
        canvas.resize(8, 2);
        assert_eq!(canvas.dimensions(), (8, 2));
        assert_eq!(canvas.painted_pixels(), 0);
    }
}
