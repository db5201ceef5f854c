//! 2D points and the two transforms shapes support: rotation and reflection

use serde::{Deserialize, Serialize};

/// A point in 2D space.
///
/// Ordering is lexicographic: by `x`, then by `y`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Hash, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: PartialOrd> Point<T> {
    /// Swap components between `self` and `other` so that afterwards
    /// `self.x <= other.x` and `self.y <= other.y`.
    ///
    /// Turns any two opposite corners into (lower, upper) bounds.
    pub fn order_with(&mut self, other: &mut Self) {
        if self.x > other.x {
            std::mem::swap(&mut self.x, &mut other.x);
        }
        if self.y > other.y {
            std::mem::swap(&mut self.y, &mut other.y);
        }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl Point<f32> {
    /// Rotate about `origin` by `degrees`, positive meaning clockwise in
    /// y-up coordinates. Whole turns return the point unchanged.
    pub fn rotate(self, origin: Point<f32>, degrees: i32) -> Self {
        if degrees % 360 == 0 {
            return self;
        }
        let rad = degrees as f32 * std::f32::consts::PI / -180.0;
        let (s, c) = rad.sin_cos();

        let x = self.x - origin.x;
        let y = self.y - origin.y;
        Self::new(x * c - y * s + origin.x, x * s + y * c + origin.y)
    }

    /// Mirror across the line through `start` and `end`.
    /// A degenerate line (coincident points) leaves the point unchanged.
    pub fn reflect(self, start: Point<f32>, end: Point<f32>) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self;
        }

        let a = (dx * dx - dy * dy) / len_sq;
        let b = 2.0 * dx * dy / len_sq;

        let px = self.x - start.x;
        let py = self.y - start.y;
        Self::new(a * px + b * py + start.x, b * px - a * py + start.y)
    }

    pub fn distance_to(self, other: Point<f32>) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
