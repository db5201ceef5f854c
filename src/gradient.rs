//! Linear gradients
//!
//! A gradient is an ordered list of color stops. Applying it walks one axis of
//! a region pixel by pixel, stepping each channel toward the next stop, and
//! paints one strip per step through [`PixelBuffer::fill_rect_where`] so a
//! shape can mask the region with its own inclusion test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Which way the first stop travels toward the last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    /// First stop at the low x edge
    #[default]
    LeftToRight,
    /// First stop at the high x edge
    RightToLeft,
    /// First stop at the high y edge (the top row once the bitmap is viewed)
    TopToBottom,
    /// First stop at the low y edge
    BottomToTop,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 4] = [
        GradientDirection::LeftToRight,
        GradientDirection::RightToLeft,
        GradientDirection::TopToBottom,
        GradientDirection::BottomToTop,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left-to-right",
            Self::RightToLeft => "right-to-left",
            Self::TopToBottom => "top-to-bottom",
            Self::BottomToTop => "bottom-to-top",
        }
    }
}

impl fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Format(format!("invalid gradient direction {:?}", s)))
    }
}

/// Ordered color stops, at least two
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct LinearGradient {
    stops: Vec<Color>,
}

impl LinearGradient {
    pub fn new(stops: impl Into<Vec<Color>>) -> Result<Self> {
        let stops = stops.into();
        if stops.len() < 2 {
            return Err(Error::Validation(format!(
                "a gradient needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        Ok(Self { stops })
    }

    /// Shorthand for a two-stop gradient
    pub fn between(from: Color, to: Color) -> Self {
        Self {
            stops: vec![from, to],
        }
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: construction guarantees two stops
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.stops.get(index).copied()
    }

    /// Replace the stop at `index`; fails when `index` is out of range
    pub fn set(&mut self, index: usize, color: Color) -> Result<()> {
        let len = self.stops.len();
        let slot = self.stops.get_mut(index).ok_or_else(|| {
            Error::Validation(format!("stop index {} out of range for {} stops", index, len))
        })?;
        *slot = color;
        Ok(())
    }

    /// Paint the region `[lower, upper)` where `include(i, j)` holds, with
    /// `(i, j)` relative to `lower`.
    ///
    /// The walked axis is split into `stops - 1` equal segments of
    /// `trunc(length / (stops - 1))` pixels; a remainder at the far end is left
    /// untouched. A region with no whole pixel per segment paints nothing.
    pub fn apply<F>(
        &self,
        pixels: &mut PixelBuffer,
        lower: Point<f32>,
        upper: Point<f32>,
        mut include: F,
        direction: GradientDirection,
    ) where
        F: FnMut(usize, usize) -> bool,
    {
        let length = if direction.is_horizontal() {
            upper.x - lower.x
        } else {
            upper.y - lower.y
        };
        let segment = length / (self.stops.len() - 1) as f32;
        let steps = segment.max(0.0) as usize;
        if steps == 0 {
            tracing::trace!(length, stops = self.stops.len(), "gradient region too small, skipped");
            return;
        }

        // Signed, so regions hanging off the top or left edge clip in `set`
        let offset = Point::new(lower.x as i64, lower.y as i64);
        let extent = Point::new((upper.x - lower.x) as usize, (upper.y - lower.y) as usize);
        let axis_len = length as usize;

        for (i, pair) in self.stops.windows(2).enumerate() {
            let (start, finish) = (pair[0], pair[1]);
            let mut ramp = ChannelRamp::new(start, finish, segment);

            for j in 0..steps {
                let pos = i * steps + j;
                let color = ramp.current();
                let (lo, hi) = match direction {
                    GradientDirection::LeftToRight => {
                        (Point::new(pos, 0), Point::new(pos + 1, extent.y))
                    },
                    GradientDirection::RightToLeft => (
                        Point::new(axis_len - pos - 1, 0),
                        Point::new(axis_len - pos, extent.y),
                    ),
                    GradientDirection::TopToBottom => (
                        Point::new(0, axis_len - pos - 1),
                        Point::new(extent.x, axis_len - pos),
                    ),
                    GradientDirection::BottomToTop => {
                        (Point::new(0, pos), Point::new(extent.x, pos + 1))
                    },
                };
                pixels.fill_rect_where(lo, hi, &mut include, color, offset);
                ramp.advance();
            }
        }
    }
}

impl TryFrom<Vec<Color>> for LinearGradient {
    type Error = Error;

    fn try_from(stops: Vec<Color>) -> Result<Self> {
        Self::new(stops)
    }
}

impl From<LinearGradient> for Vec<Color> {
    fn from(gradient: LinearGradient) -> Self {
        gradient.stops
    }
}

/// Running channel values between two stops
struct ChannelRamp {
    value: [f32; 3],
    step: [f32; 3],
}

impl ChannelRamp {
    fn new(start: Color, finish: Color, segment: f32) -> Self {
        let from = [start.r, start.g, start.b];
        let to = [finish.r, finish.g, finish.b];
        let mut value = [0.0; 3];
        let mut step = [0.0; 3];
        for c in 0..3 {
            value[c] = f32::from(from[c]);
            let delta = (f32::from(to[c]) - f32::from(from[c])).abs() / segment;
            step[c] = if from[c] < to[c] { delta } else { -delta };
        }
        Self { value, step }
    }

    fn current(&self) -> Color {
        let [r, g, b] = self.value.map(|v| v.round() as u8);
        Color::rgb(r, g, b)
    }

    fn advance(&mut self) {
        for c in 0..3 {
            self.value[c] += self.step[c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everywhere(_: usize, _: usize) -> bool {
        true
    }

    fn full(buf: &mut PixelBuffer, gradient: &LinearGradient, direction: GradientDirection) {
        let upper = Point::new(buf.width() as f32, buf.height() as f32);
        gradient.apply(buf, Point::new(0.0, 0.0), upper, everywhere, direction);
    }

    #[test]
    fn test_needs_two_stops() {
        assert!(matches!(LinearGradient::new(vec![]), Err(Error::Validation(_))));
        assert!(LinearGradient::new(vec![Color::RED]).is_err());
        assert!(LinearGradient::new(vec![Color::RED, Color::BLUE]).is_ok());
        assert!(serde_json::from_str::<LinearGradient>(r##"["#ff0000"]"##).is_err());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("left-to-right".parse::<GradientDirection>().unwrap(), GradientDirection::LeftToRight);
        assert_eq!("Top-To-Bottom".parse::<GradientDirection>().unwrap(), GradientDirection::TopToBottom);
        assert!(matches!("diagonal".parse::<GradientDirection>(), Err(Error::Format(_))));
        for d in GradientDirection::ALL {
            assert_eq!(d.to_string().parse::<GradientDirection>().unwrap(), d);
        }
    }

    #[test]
    fn test_set_stop() {
        let mut g = LinearGradient::between(Color::RED, Color::BLUE);
        g.set(1, Color::GREEN).unwrap();
        assert_eq!(g.get(1), Some(Color::GREEN));
        assert!(g.set(2, Color::GREEN).is_err());
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_left_to_right_is_monotonic() {
        let mut buf = PixelBuffer::new(100, 4);
        let g = LinearGradient::between(Color::rgb(10, 200, 0), Color::rgb(250, 20, 0));
        full(&mut buf, &g, GradientDirection::LeftToRight);

        let row: Vec<Color> = (0..100).map(|x| buf.get(x, 2).unwrap()).collect();
        assert_eq!(row[0], Color::rgb(10, 200, 0));
        for pair in row.windows(2) {
            assert!(pair[0].r <= pair[1].r);
            assert!(pair[0].g >= pair[1].g);
        }
        for c in &row {
            assert!((10..=250).contains(&c.r));
            assert!((20..=200).contains(&c.g));
            assert_eq!(c.b, 0);
        }
        // Every column is uniform
        for x in 0..100 {
            assert_eq!(buf.get(x, 0).unwrap(), buf.get(x, 3).unwrap());
        }
    }

    #[test]
    fn test_directions_mirror_each_other() {
        let g = LinearGradient::new(vec![Color::BLACK, Color::rgb(90, 90, 90), Color::WHITE]).unwrap();
        let mut ltr = PixelBuffer::new(40, 3);
        let mut rtl = PixelBuffer::new(40, 3);
        full(&mut ltr, &g, GradientDirection::LeftToRight);
        full(&mut rtl, &g, GradientDirection::RightToLeft);
        for x in 0..40 {
            assert_eq!(ltr.get(x, 1).unwrap(), rtl.get(39 - x, 1).unwrap());
        }

        let mut btt = PixelBuffer::new(3, 40);
        let mut ttb = PixelBuffer::new(3, 40);
        full(&mut btt, &g, GradientDirection::BottomToTop);
        full(&mut ttb, &g, GradientDirection::TopToBottom);
        assert_eq!(btt.get(1, 0).unwrap(), Color::BLACK);
        assert_eq!(ttb.get(1, 39).unwrap(), Color::BLACK);
        for y in 0..40 {
            assert_eq!(btt.get(0, y).unwrap(), ttb.get(2, 39 - y).unwrap());
        }
    }

    #[test]
    fn test_segment_reaches_next_stop() {
        // 3 stops over 20 px: two 10 px segments, each ramp starts exactly on its stop
        let g = LinearGradient::new(vec![Color::BLACK, Color::rgb(100, 0, 0), Color::BLACK]).unwrap();
        let mut buf = PixelBuffer::new(20, 1);
        full(&mut buf, &g, GradientDirection::LeftToRight);
        assert_eq!(buf.get(0, 0).unwrap(), Color::BLACK);
        assert_eq!(buf.get(9, 0).unwrap(), Color::rgb(90, 0, 0));
        assert_eq!(buf.get(10, 0).unwrap(), Color::rgb(100, 0, 0));
        assert_eq!(buf.get(19, 0).unwrap(), Color::rgb(10, 0, 0));
    }

    #[test]
    fn test_remainder_left_untouched() {
        // 3 stops over 9 px: segments of 4 px, the last column is not painted
        let g = LinearGradient::new(vec![Color::RED, Color::GREEN, Color::BLUE]).unwrap();
        let mut buf = PixelBuffer::filled(9, 2, Color::WHITE);
        full(&mut buf, &g, GradientDirection::LeftToRight);
        assert_eq!(buf.get(8, 0).unwrap(), Color::WHITE);
        assert_ne!(buf.get(7, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_degenerate_region_paints_nothing() {
        let g = LinearGradient::between(Color::RED, Color::BLUE);
        let mut buf = PixelBuffer::new(10, 10);
        g.apply(&mut buf, Point::new(5.0, 5.0), Point::new(5.0, 9.0), everywhere, GradientDirection::LeftToRight);
        g.apply(&mut buf, Point::new(5.0, 5.0), Point::new(2.0, 9.0), everywhere, GradientDirection::LeftToRight);
        g.apply(&mut buf, Point::new(0.0, 3.0), Point::new(9.0, 3.0), everywhere, GradientDirection::BottomToTop);
        assert_eq!(buf.count(Color::BLACK), 100);
    }

    #[test]
    fn test_offset_region_and_mask() {
        let g = LinearGradient::between(Color::RED, Color::RED);
        let mut buf = PixelBuffer::new(10, 10);
        g.apply(
            &mut buf,
            Point::new(2.0, 3.0),
            Point::new(6.0, 5.0),
            |i, _| i % 2 == 0,
            GradientDirection::LeftToRight,
        );
        // 4 x 2 region, only even relative columns
        assert_eq!(buf.count(Color::RED), 4);
        assert_eq!(buf.get(2, 3).unwrap(), Color::RED);
        assert_eq!(buf.get(4, 4).unwrap(), Color::RED);
        assert_eq!(buf.get(3, 3).unwrap(), Color::BLACK);
        assert_eq!(buf.get(2, 5).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_region_off_top_left_edge_clips() {
        let g = LinearGradient::between(Color::RED, Color::RED);
        let mut buf = PixelBuffer::new(10, 10);
        g.apply(
            &mut buf,
            Point::new(-20.0, -20.0),
            Point::new(20.0, 20.0),
            |i, j| i >= 20 && j >= 20 && i < 23 && j < 22,
            GradientDirection::TopToBottom,
        );
        // Relative (20..23, 20..22) lands at the origin, not at (20, 20)
        assert_eq!(buf.count(Color::RED), 6);
        assert_eq!(buf.get(0, 0).unwrap(), Color::RED);
        assert_eq!(buf.get(2, 1).unwrap(), Color::RED);
        assert_eq!(buf.get(3, 0).unwrap(), Color::BLACK);
    }
}
