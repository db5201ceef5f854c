//! Shape rasterization
//!
//! Three primitives, each a plain value drawn into a [`PixelBuffer`]:
//!
//! - [`Line`]: one pixel per step along the dominant axis
//! - [`Ellipse`]: sampled outline, implicit-equation fill
//! - [`Rectangle`]: four edges, or a full fill
//!
//! [`Shape`] and [`Style`] pair them up for callers that pick the primitive and
//! paint at runtime (scene files, the canvas facade).

mod ellipse;
mod line;
mod rectangle;

pub use ellipse::{Ellipse, DEFAULT_PRECISION};
pub use line::Line;
pub use rectangle::Rectangle;

use serde::{Deserialize, Serialize};

use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::gradient::{GradientDirection, LinearGradient};
use crate::util::SampleSource;

/// Axis-aligned box with `lower <= upper` component-wise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Point<f32>,
    pub upper: Point<f32>,
}

impl Bounds {
    /// Build from any two opposite corners
    pub fn new(a: Point<f32>, b: Point<f32>) -> Self {
        let (mut lower, mut upper) = (a, b);
        lower.order_with(&mut upper);
        Self { lower, upper }
    }

    pub fn width(&self) -> f32 {
        (self.upper.x - self.lower.x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.upper.y - self.lower.y).abs()
    }
}

/// Paint every accepted cell of the `w/2 x h/2` quadrant at `lower` together
/// with its three mirror images across the box's center lines.
///
/// `w` and `h` are whole pixels; the far edges `lower + w` and `lower + h` are
/// included.
fn fill_mirrored<F>(pixels: &mut PixelBuffer, lower: Point<f32>, w: usize, h: usize, include: F, color: Color)
where
    F: Fn(f32, f32) -> bool,
{
    let (wf, hf) = (w as f32, h as f32);
    for x in 0..=w / 2 {
        for y in 0..=h / 2 {
            let (xf, yf) = (x as f32, y as f32);
            if !include(xf, yf) {
                continue;
            }
            let near_x = (xf + lower.x) as i64;
            let near_y = (yf + lower.y) as i64;
            let far_x = (wf - xf + lower.x) as i64;
            let far_y = (hf - yf + lower.y) as i64;
            pixels.set(near_x, near_y, color);
            pixels.set(far_x, far_y, color);
            pixels.set(near_x, far_y, color);
            pixels.set(far_x, near_y, color);
        }
    }
}

/// One of the supported primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Line(Line),
    Ellipse(Ellipse),
    Rectangle(Rectangle),
}

/// How a shape is painted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Style {
    /// Outline only
    Stroke { color: Color },
    /// Solid interior; a line has no interior and is stroked
    Fill { color: Color },
    /// Interior painted with a linear gradient
    Gradient {
        stops: LinearGradient,
        #[serde(default)]
        direction: GradientDirection,
    },
}

impl Shape {
    /// Draw into `pixels`. `sampler` and `precision` drive ellipse outlines and
    /// are ignored by everything else.
    ///
    /// Fails only for a gradient on a line.
    pub fn render(
        &self,
        pixels: &mut PixelBuffer,
        style: &Style,
        sampler: &mut dyn SampleSource,
        precision: usize,
    ) -> Result<()> {
        tracing::trace!(shape = ?self, "render");
        match (self, style) {
            (Shape::Line(line), Style::Stroke { color } | Style::Fill { color }) => {
                line.draw(pixels, *color);
            },
            (Shape::Line(_), Style::Gradient { .. }) => {
                return Err(Error::Validation("a line cannot be gradient filled".into()));
            },
            (Shape::Ellipse(ellipse), Style::Stroke { color }) => {
                ellipse.draw_with_precision(pixels, *color, sampler, precision);
            },
            (Shape::Ellipse(ellipse), Style::Fill { color }) => ellipse.fill(pixels, *color),
            (Shape::Ellipse(ellipse), Style::Gradient { stops, direction }) => {
                ellipse.fill_gradient(pixels, stops, *direction);
            },
            (Shape::Rectangle(rect), Style::Stroke { color }) => rect.draw(pixels, *color),
            (Shape::Rectangle(rect), Style::Fill { color }) => rect.fill(pixels, *color),
            (Shape::Rectangle(rect), Style::Gradient { stops, direction }) => {
                rect.fill_gradient(pixels, stops, *direction);
            },
        }
        Ok(())
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}
