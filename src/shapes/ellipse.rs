use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::line::draw_segment;
use super::{fill_mirrored, Bounds};
use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::geometry::Point;
use crate::gradient::{GradientDirection, LinearGradient};
use crate::util::SampleSource;

/// Random samples per outline quarter, on top of the two extremal points
pub const DEFAULT_PRECISION: usize = 20;

/// Share of the semi-axis sampled uniformly before the steep band
const FLAT_SHARE: f32 = 0.8;

/// Axis-aligned ellipse inscribed in a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Bounds", into = "Bounds")]
pub struct Ellipse {
    bounds: Bounds,
}

impl Ellipse {
    /// Any two opposite corners of the bounding box
    pub fn new(a: Point<f32>, b: Point<f32>) -> Self {
        Self {
            bounds: Bounds::new(a, b),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Implicit-equation membership for a cell of a `width x height` box,
    /// with `(x, y)` relative to the box's lower corner
    #[inline]
    fn inside(x: f32, y: f32, width: f32, height: f32) -> bool {
        let a = (x + 0.5) / (width / 2.0) - 1.0;
        let b = (y + 0.5) / (height / 2.0) - 1.0;
        a * a + b * b <= 1.0
    }

    /// Whether the cell at `(i, j)` relative to the lower corner is inside
    pub fn contains(&self, i: usize, j: usize) -> bool {
        Self::inside(i as f32, j as f32, self.bounds.width(), self.bounds.height())
    }

    /// Outline with the default precision
    pub fn draw(&self, pixels: &mut PixelBuffer, color: Color, sampler: &mut dyn SampleSource) {
        self.draw_with_precision(pixels, color, sampler, DEFAULT_PRECISION);
    }

    /// Outline from one sampled quarter, mirrored into the other three and
    /// joined with line segments. A box with zero width or height draws
    /// nothing.
    pub fn draw_with_precision(
        &self,
        pixels: &mut PixelBuffer,
        color: Color,
        sampler: &mut dyn SampleSource,
        precision: usize,
    ) {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        if w == 0.0 || h == 0.0 {
            tracing::trace!(bounds = ?self.bounds, "degenerate ellipse, nothing to draw");
            return;
        }
        let lower = self.bounds.lower;

        // Top of the box at the horizontal center: both mirror axes pass through it
        let pivot = Point::new(w / 2.0 + lower.x, h + lower.y);
        let vertical = Point::new(pivot.x, pivot.y + 100.0);
        let horizontal = Point::new(pivot.x + 100.0, pivot.y);

        let upper_right = self.outline_quarter(precision, sampler);
        let mirror = |points: &[Point<f32>], end: Point<f32>| -> Vec<Point<f32>> {
            points.iter().map(|p| p.reflect(pivot, end)).collect()
        };
        let upper_left = mirror(&upper_right[..], vertical);
        // Mirroring across the top edge lands a full height too high
        let lower_right: Vec<Point<f32>> = mirror(&upper_right[..], horizontal)
            .into_iter()
            .map(|p| Point::new(p.x, p.y - h))
            .collect();
        let lower_left = mirror(&lower_right[..], vertical);

        for quarter in [&upper_right, &upper_left, &lower_right, &lower_left] {
            for pair in quarter.windows(2) {
                draw_segment(pixels, pair[0], pair[1], color);
            }
        }
    }

    /// Boundary points of the quarter with x >= center, y >= center, sorted.
    ///
    /// Half the samples come from the flat part of the arc and half from the
    /// steep band next to the vertical tangent, where points spread out fastest.
    pub fn outline_quarter(&self, precision: usize, sampler: &mut dyn SampleSource) -> Vec<Point<f32>> {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        let lower = self.bounds.lower;
        let a = w / 2.0;
        let b = h / 2.0;
        let ratio = b / a;

        let mut points = Vec::with_capacity(precision + 2);
        points.push(Point::new(a + lower.x, h + lower.y));
        points.push(Point::new(w + lower.x, b + lower.y));

        let per_band = precision / 2;
        for (min, max) in [(0.0, a * FLAT_SHARE), (a * FLAT_SHARE, a)] {
            for _ in 0..per_band {
                let s = sampler.sample(min, max);
                let y = (ratio * (a * a - s * s).max(0.0).sqrt()).round() + b + lower.y;
                points.push(Point::new(s + a + lower.x, y));
            }
        }

        points.sort_by(|p, q| p.partial_cmp(q).unwrap_or(Ordering::Equal));
        points
    }

    /// Solid interior. Cells are tested in one quadrant and painted in all
    /// four.
    pub fn fill(&self, pixels: &mut PixelBuffer, color: Color) {
        let w = self.bounds.width() as usize;
        let h = self.bounds.height() as usize;
        if w == 0 || h == 0 {
            tracing::trace!(bounds = ?self.bounds, "ellipse has no interior");
            return;
        }
        let (wf, hf) = (w as f32, h as f32);
        fill_mirrored(
            pixels,
            self.bounds.lower,
            w,
            h,
            |x, y| Self::inside(x, y, wf, hf),
            color,
        );
    }

    pub fn fill_gradient(&self, pixels: &mut PixelBuffer, gradient: &LinearGradient, direction: GradientDirection) {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        gradient.apply(
            pixels,
            self.bounds.lower,
            self.bounds.upper,
            |i, j| Self::inside(i as f32, j as f32, w, h),
            direction,
        );
    }
}

impl From<Bounds> for Ellipse {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl From<Ellipse> for Bounds {
    fn from(ellipse: Ellipse) -> Self {
        ellipse.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;

    fn pt(x: f32, y: f32) -> Point<f32> {
        Point::new(x, y)
    }

    /// Replays the midpoint of every requested range
    struct Midpoints;

    impl SampleSource for Midpoints {
        fn sample(&mut self, min: f32, max: f32) -> f32 {
            (min + max) / 2.0
        }
    }

    /// Reference membership: a cell is painted when any of its mirror images
    /// in the tested quadrant passes the implicit equation
    fn brute_force_contains(lx: usize, ly: usize, w: usize, h: usize, px: usize, py: usize) -> bool {
        if px < lx || py < ly || px > lx + w || py > ly + h {
            return false;
        }
        let (dx, dy) = (px - lx, py - ly);
        let xs = [dx, w - dx];
        let ys = [dy, h - dy];
        xs.iter().filter(|&&x| x <= w / 2).any(|&x| {
            ys.iter()
                .filter(|&&y| y <= h / 2)
                .any(|&y| Ellipse::inside(x as f32, y as f32, w as f32, h as f32))
        })
    }

    #[test]
    fn test_fill_matches_brute_force() {
        let mut rng = Rng::new(2024);
        for _ in 0..40 {
            let lx = rng.range_i32(0, 30) as usize;
            let ly = rng.range_i32(0, 30) as usize;
            let w = rng.range_i32(1, 40) as usize;
            let h = rng.range_i32(1, 40) as usize;

            let mut buf = PixelBuffer::new(80, 80);
            // Corners given upper-first to exercise normalization
            Ellipse::new(pt((lx + w) as f32, (ly + h) as f32), pt(lx as f32, ly as f32))
                .fill(&mut buf, Color::RED);

            for px in 0..80 {
                for py in 0..80 {
                    let painted = buf.get(px, py).unwrap() == Color::RED;
                    assert_eq!(
                        painted,
                        brute_force_contains(lx, ly, w, h, px, py),
                        "box ({}, {}) {}x{} at ({}, {})",
                        lx,
                        ly,
                        w,
                        h,
                        px,
                        py
                    );
                }
            }
        }
    }

    #[test]
    fn test_fill_circle_is_symmetric() {
        let mut buf = PixelBuffer::new(21, 21);
        Ellipse::new(pt(0.0, 0.0), pt(20.0, 20.0)).fill(&mut buf, Color::GREEN);
        for x in 0..21 {
            for y in 0..21 {
                let c = buf.get(x, y).unwrap();
                assert_eq!(c, buf.get(20 - x, y).unwrap());
                assert_eq!(c, buf.get(x, 20 - y).unwrap());
                assert_eq!(c, buf.get(y, x).unwrap());
            }
        }
        assert_eq!(buf.get(10, 10).unwrap(), Color::GREEN);
        assert_eq!(buf.get(0, 0).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_degenerate_box_draws_nothing() {
        let mut buf = PixelBuffer::new(20, 20);
        let mut rng = Rng::new(5);
        Ellipse::new(pt(5.0, 5.0), pt(5.0, 15.0)).draw(&mut buf, Color::RED, &mut rng);
        Ellipse::new(pt(2.0, 7.0), pt(18.0, 7.0)).draw(&mut buf, Color::RED, &mut rng);
        Ellipse::new(pt(5.0, 5.0), pt(5.0, 15.0)).fill(&mut buf, Color::RED);
        assert_eq!(buf.count(Color::RED), 0);
    }

    #[test]
    fn test_outline_quarter_sorted_and_on_arc() {
        let ellipse = Ellipse::new(pt(10.0, 10.0), pt(50.0, 30.0));
        let points = ellipse.outline_quarter(DEFAULT_PRECISION, &mut Rng::new(9));
        assert_eq!(points.len(), DEFAULT_PRECISION + 2);
        assert_eq!(points[0], pt(30.0, 30.0));
        assert_eq!(points[points.len() - 1], pt(50.0, 20.0));
        for pair in points.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for p in &points {
            assert!((30.0..=50.0).contains(&p.x));
            assert!((20.0..=30.0).contains(&p.y));
        }
    }

    #[test]
    fn test_outline_touches_box_extremes() {
        let mut buf = PixelBuffer::new(64, 64);
        Ellipse::new(pt(10.0, 10.0), pt(50.0, 30.0)).draw(&mut buf, Color::BLUE, &mut Rng::new(3));
        for (x, y) in [(30, 30), (50, 20), (10, 20), (30, 10)] {
            assert_eq!(buf.get(x, y).unwrap(), Color::BLUE, "({}, {})", x, y);
        }
        assert_eq!(buf.get(30, 20).unwrap(), Color::BLACK);
        for x in 0..64 {
            for y in 0..64 {
                // Rounding along a segment can overshoot its endpoints by one
                if buf.get(x, y).unwrap() == Color::BLUE {
                    assert!((9..=51).contains(&x) && (9..=31).contains(&y), "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_outline_tall_box_reaches_all_sides() {
        let mut buf = PixelBuffer::new(128, 128);
        Ellipse::new(pt(0.0, 0.0), pt(60.0, 100.0)).draw(&mut buf, Color::RED, &mut Rng::new(21));
        for (x, y) in [(30, 100), (60, 50), (0, 50), (30, 0)] {
            assert_eq!(buf.get(x, y).unwrap(), Color::RED, "({}, {})", x, y);
        }
    }

    #[test]
    fn test_outline_is_reproducible_with_seeded_source() {
        let ellipse = Ellipse::new(pt(3.0, 4.0), pt(90.0, 60.0));
        let mut a = PixelBuffer::new(100, 100);
        let mut b = PixelBuffer::new(100, 100);
        ellipse.draw(&mut a, Color::WHITE, &mut Rng::new(77));
        ellipse.draw(&mut b, Color::WHITE, &mut Rng::new(77));
        assert_eq!(a, b);

        let mut c = PixelBuffer::new(100, 100);
        let mut d = PixelBuffer::new(100, 100);
        ellipse.draw_with_precision(&mut c, Color::WHITE, &mut Midpoints, 8);
        ellipse.draw_with_precision(&mut d, Color::WHITE, &mut Midpoints, 8);
        assert_eq!(c, d);
        assert!(c.count(Color::WHITE) > 0);
    }

    #[test]
    fn test_gradient_fill_stays_inside() {
        let ellipse = Ellipse::new(pt(4.0, 4.0), pt(36.0, 24.0));
        let mut buf = PixelBuffer::new(40, 40);
        ellipse.fill_gradient(
            &mut buf,
            &LinearGradient::between(Color::RED, Color::YELLOW),
            GradientDirection::LeftToRight,
        );
        for x in 0..40 {
            for y in 0..40 {
                let painted = buf.get(x, y).unwrap() != Color::BLACK;
                let expected = x >= 4 && y >= 4 && ellipse.contains(x - 4, y - 4) && x < 36 && y < 24;
                assert_eq!(painted, expected, "({}, {})", x, y);
            }
        }
    }

    /// `small` must equal the 40x40 window of `big` starting at (20, 20)
    fn assert_window(small: &PixelBuffer, big: &PixelBuffer) {
        for x in 0..40 {
            for y in 0..40 {
                assert_eq!(small.get(x, y).unwrap(), big.get(x + 20, y + 20).unwrap(), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_fill_clipped_at_origin() {
        let mut small = PixelBuffer::new(40, 40);
        let mut big = PixelBuffer::new(80, 80);
        Ellipse::new(pt(-20.0, -20.0), pt(20.0, 20.0)).fill(&mut small, Color::GREEN);
        Ellipse::new(pt(0.0, 0.0), pt(40.0, 40.0)).fill(&mut big, Color::GREEN);

        assert_window(&small, &big);
        assert_eq!(small.get(0, 0).unwrap(), Color::GREEN);
        assert!(small.count(Color::GREEN) < big.count(Color::GREEN) / 2);
    }

    #[test]
    fn test_gradient_fill_clipped_at_origin() {
        for gradient in [
            LinearGradient::between(Color::RED, Color::RED),
            LinearGradient::between(Color::RED, Color::BLUE),
        ] {
            let mut small = PixelBuffer::new(40, 40);
            let mut big = PixelBuffer::new(80, 80);
            Ellipse::new(pt(-20.0, -20.0), pt(20.0, 20.0)).fill_gradient(
                &mut small,
                &gradient,
                GradientDirection::LeftToRight,
            );
            Ellipse::new(pt(0.0, 0.0), pt(40.0, 40.0)).fill_gradient(&mut big, &gradient, GradientDirection::LeftToRight);

            assert_window(&small, &big);
            assert_ne!(small.get(0, 0).unwrap(), Color::BLACK);
            let painted = 1600 - small.count(Color::BLACK);
            let total = 6400 - big.count(Color::BLACK);
            assert!(painted > 0 && painted < total / 2, "{} of {}", painted, total);
        }
    }

    #[test]
    fn test_outline_clipped_at_origin() {
        let mut buf = PixelBuffer::new(40, 40);
        Ellipse::new(pt(-20.0, -20.0), pt(20.0, 20.0)).draw(&mut buf, Color::WHITE, &mut Rng::new(3));

        assert_eq!(buf.get(0, 20).unwrap(), Color::WHITE);
        assert_eq!(buf.get(20, 0).unwrap(), Color::WHITE);
        assert_eq!(buf.get(0, 0).unwrap(), Color::BLACK);
        let mut painted = 0;
        for x in 0..40 {
            for y in 0..40 {
                if buf.get(x, y).unwrap() == Color::WHITE {
                    painted += 1;
                    let r = ((x * x + y * y) as f32).sqrt();
                    assert!((17.0..=22.5).contains(&r), "({}, {}) at {}", x, y, r);
                }
            }
        }
        assert!(painted >= 20, "{}", painted);
    }
}
