use serde::{Deserialize, Serialize};

use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::geometry::Point;

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point<f32>,
    pub end: Point<f32>,
}

impl Line {
    pub const fn new(start: Point<f32>, end: Point<f32>) -> Self {
        Self { start, end }
    }

    pub fn draw(&self, pixels: &mut PixelBuffer, color: Color) {
        draw_segment(pixels, self.start, self.end, color);
    }

    /// Both endpoints rotated about `origin`, clockwise-positive degrees
    pub fn rotate(&self, origin: Point<f32>, degrees: i32) -> Line {
        Line::new(self.start.rotate(origin, degrees), self.end.rotate(origin, degrees))
    }

    /// Both endpoints mirrored across `mirror`
    pub fn reflect(&self, mirror: &Line) -> Line {
        Line::new(
            self.start.reflect(mirror.start, mirror.end),
            self.end.reflect(mirror.start, mirror.end),
        )
    }
}

/// Draw one pixel per integer step along the dominant axis.
///
/// With slope magnitude <= 1 the walk is over x (truncated endpoints, y
/// rounded from `y = kx + b`), otherwise over y. Steps outside the buffer are
/// skipped up front since every write there would be clipped anyway.
pub(crate) fn draw_segment(pixels: &mut PixelBuffer, mut start: Point<f32>, mut end: Point<f32>, color: Color) {
    if start == end {
        pixels.set(start.x as i64, start.y as i64, color);
        return;
    }

    let slope = if start.x == end.x {
        None
    } else {
        Some((end.y - start.y) / (end.x - start.x))
    };

    match slope {
        Some(k) if k.abs() <= 1.0 => {
            if start.x > end.x {
                std::mem::swap(&mut start, &mut end);
            }
            let b = start.y - k * start.x;
            let first = (start.x as i64).max(0);
            let last = (end.x as i64).min(pixels.width() as i64 - 1);
            for i in first..=last {
                pixels.set(i, (k * i as f32 + b).round() as i64, color);
            }
        },
        _ => {
            if start.y > end.y {
                std::mem::swap(&mut start, &mut end);
            }
            let k = (end.x - start.x) / (end.y - start.y);
            let b = start.x - k * start.y;
            let first = (start.y as i64).max(0);
            let last = (end.y as i64).min(pixels.height() as i64 - 1);
            for i in first..=last {
                pixels.set((k * i as f32 + b).round() as i64, i, color);
            }
        },
    }
}
