//! Landing-page effect components. Each one is plain state driven by explicit
//! time, pointer and geometry inputs; none of them talk to each other.

pub mod accordion;
pub mod counter;
pub mod interaction;
pub mod navigation;
pub mod particles;
pub mod registry;
pub mod reveal;
pub mod text;

use glam::Vec2;

/// Identifier of a page element
pub type ElementId = String;

/// Axis-aligned rectangle in page or screen pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Overlap of two rectangles; empty (zero area) when disjoint
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// Same rectangle with the bottom edge moved up by `margin`
    pub fn shrink_bottom(&self, margin: f32) -> Bounds {
        Bounds {
            min: self.min,
            max: Vec2::new(self.max.x, (self.max.y - margin).max(self.min.y)),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Bounds {
        Bounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_disjoint_rects_is_empty() {
        let a = Bounds::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::from_xywh(20.0, 20.0, 5.0, 5.0);
        assert_eq!(a.intersect(&b).area(), 0.0);
    }

    #[test]
    fn intersection_area() {
        let a = Bounds::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::from_xywh(5.0, 8.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b).area(), 10.0);
    }

    #[test]
    fn shrink_bottom_never_inverts() {
        let a = Bounds::from_xywh(0.0, 0.0, 100.0, 30.0);
        assert_eq!(a.shrink_bottom(50.0).height(), 0.0);
        assert_eq!(a.shrink_bottom(10.0).height(), 20.0);
    }

    #[test]
    fn centre_and_contains() {
        let a = Bounds::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(a.center(), Vec2::new(60.0, 45.0));
        assert!(a.contains(Vec2::new(10.0, 70.0)));
        assert!(!a.contains(Vec2::new(9.0, 30.0)));
    }
}
