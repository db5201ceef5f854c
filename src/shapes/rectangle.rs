use serde::{Deserialize, Serialize};

use super::line::draw_segment;
use super::{fill_mirrored, Bounds};
use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::geometry::Point;
use crate::gradient::{GradientDirection, LinearGradient};

/// Axis-aligned rectangle given by two opposite corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Bounds", into = "Bounds")]
pub struct Rectangle {
    bounds: Bounds,
}

impl Rectangle {
    pub fn new(a: Point<f32>, b: Point<f32>) -> Self {
        Self {
            bounds: Bounds::new(a, b),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The four edges. Both corners are included.
    pub fn draw(&self, pixels: &mut PixelBuffer, color: Color) {
        let Bounds { lower, upper } = self.bounds;
        let (w, h) = (self.bounds.width(), self.bounds.height());

        draw_segment(pixels, lower, Point::new(lower.x + w, lower.y), color);
        draw_segment(pixels, lower, Point::new(lower.x, lower.y + h), color);
        draw_segment(pixels, upper, Point::new(upper.x - w, upper.y), color);
        draw_segment(pixels, upper, Point::new(upper.x, upper.y - h), color);
    }

    /// Every pixel from the lower corner to the upper corner, inclusive
    pub fn fill(&self, pixels: &mut PixelBuffer, color: Color) {
        let w = self.bounds.width() as usize;
        let h = self.bounds.height() as usize;
        fill_mirrored(pixels, self.bounds.lower, w, h, |_, _| true, color);
    }

    /// Gradient over `[lower, upper)`; the far row and column stay as they were
    pub fn fill_gradient(&self, pixels: &mut PixelBuffer, gradient: &LinearGradient, direction: GradientDirection) {
        gradient.apply(pixels, self.bounds.lower, self.bounds.upper, |_, _| true, direction);
    }
}

impl From<Bounds> for Rectangle {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl From<Rectangle> for Bounds {
    fn from(rect: Rectangle) -> Self {
        rect.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point<f32> {
        Point::new(x, y)
    }

    #[test]
    fn test_fill_is_inclusive() {
        let mut buf = PixelBuffer::new(12, 12);
        Rectangle::new(pt(0.0, 0.0), pt(9.0, 9.0)).fill(&mut buf, Color::RED);
        assert_eq!(buf.count(Color::RED), 100);
        assert_eq!(buf.get(9, 9).unwrap(), Color::RED);
        assert_eq!(buf.get(10, 9).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_fill_odd_and_even_sizes() {
        for (w, h) in [(1, 1), (2, 5), (6, 3), (7, 8)] {
            let mut buf = PixelBuffer::new(20, 20);
            Rectangle::new(pt(3.0, 4.0), pt(3.0 + w as f32, 4.0 + h as f32)).fill(&mut buf, Color::GREEN);
            assert_eq!(buf.count(Color::GREEN), (w + 1) * (h + 1), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_draw_outline_only() {
        let mut buf = PixelBuffer::new(10, 10);
        Rectangle::new(pt(7.0, 6.0), pt(2.0, 1.0)).draw(&mut buf, Color::BLUE);
        // 6 columns x 6 rows, hollow
        assert_eq!(buf.count(Color::BLUE), 20);
        for (x, y) in [(2, 1), (7, 1), (2, 6), (7, 6), (4, 1), (7, 3)] {
            assert_eq!(buf.get(x, y).unwrap(), Color::BLUE, "({}, {})", x, y);
        }
        assert_eq!(buf.get(4, 3).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_fill_clips_to_buffer() {
        let mut buf = PixelBuffer::new(5, 5);
        Rectangle::new(pt(-3.0, -3.0), pt(2.0, 2.0)).fill(&mut buf, Color::RED);
        assert_eq!(buf.count(Color::RED), 9);
    }

    #[test]
    fn test_gradient_leaves_far_edge() {
        let mut buf = PixelBuffer::new(12, 12);
        Rectangle::new(pt(0.0, 0.0), pt(10.0, 4.0)).fill_gradient(
            &mut buf,
            &LinearGradient::between(Color::RED, Color::BLUE),
            GradientDirection::LeftToRight,
        );
        assert_eq!(buf.get(0, 0).unwrap(), Color::RED);
        assert_eq!(buf.get(9, 3).unwrap().b, 230);
        assert_eq!(buf.get(10, 0).unwrap(), Color::BLACK);
        assert_eq!(buf.get(0, 4).unwrap(), Color::BLACK);
        assert_eq!(buf.count(Color::BLACK), 144 - 40);
    }

    #[test]
    fn test_gradient_clipped_at_origin() {
        let gradient = LinearGradient::between(Color::RED, Color::BLUE);
        let mut small = PixelBuffer::new(10, 10);
        let mut big = PixelBuffer::new(20, 20);
        Rectangle::new(pt(-5.0, -5.0), pt(5.0, 5.0)).fill_gradient(&mut small, &gradient, GradientDirection::LeftToRight);
        Rectangle::new(pt(0.0, 0.0), pt(10.0, 10.0)).fill_gradient(&mut big, &gradient, GradientDirection::LeftToRight);

        assert_eq!(small.count(Color::BLACK), 100 - 25);
        for x in 0..10 {
            for y in 0..10 {
                assert_eq!(small.get(x, y).unwrap(), big.get(x + 5, y + 5).unwrap(), "({}, {})", x, y);
            }
        }
        // The visible part starts halfway along the ramp
        assert_ne!(small.get(0, 0).unwrap(), Color::RED);
        assert_eq!(small.get(5, 0).unwrap(), Color::BLACK);
    }
}
