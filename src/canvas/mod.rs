//! Drawing surface
//!
//! [`Canvas`] owns a [`PixelBuffer`] together with the settings shapes need
//! (ellipse precision and the boundary sampler) and exposes chainable drawing
//! calls:
//!
//! ```no_run
//! use bitcanvas::{Canvas, Color, GradientDirection, Point};
//!
//! let mut canvas = Canvas::new(480, 480);
//! canvas
//!     .add_rectangle(Point::new(10.0, 10.0), Point::new(200.0, 120.0), Color::RED)
//!     .add_filled_ellipse(Point::new(240.0, 240.0), Point::new(400.0, 320.0), Color::BLUE);
//! canvas
//!     .add_gradient_ellipse(
//!         Point::new(0.0, 300.0),
//!         Point::new(200.0, 480.0),
//!         &[Color::YELLOW, Color::RED],
//!         GradientDirection::BottomToTop,
//!     )
//!     .unwrap();
//! canvas.export_default("figures.bmp").unwrap();
//! ```

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use std::path::Path;

use crate::bitmap::{self, BitDepth};
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Point;
use crate::gradient::{GradientDirection, LinearGradient};
use crate::shapes::{Ellipse, Line, Rectangle, Shape, Style, DEFAULT_PRECISION};
use crate::util::{Rng, SampleSource};

/// A pixel buffer plus the state shapes draw with
pub struct Canvas {
    pixels: PixelBuffer,
    sampler: Box<dyn SampleSource>,
    precision: usize,
}

impl Canvas {
    /// White canvas with default precision and an entropy-seeded sampler
    pub fn new(width: usize, height: usize) -> Self {
        Self::builder(width, height).build()
    }

    pub fn with_background(width: usize, height: usize, background: Color) -> Self {
        Self::builder(width, height).background(background).build()
    }

    pub fn builder(width: usize, height: usize) -> CanvasBuilder {
        CanvasBuilder::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: Color) -> &mut Self {
        self.pixels.clear(color);
        self
    }

    /// Paint the whole canvas with a gradient
    pub fn fill_gradient(&mut self, gradient: &LinearGradient, direction: GradientDirection) -> &mut Self {
        let upper = Point::new(self.width() as f32, self.height() as f32);
        gradient.apply(&mut self.pixels, Point::new(0.0, 0.0), upper, |_, _| true, direction);
        self
    }

    pub fn add_line(&mut self, start: Point<f32>, end: Point<f32>, color: Color) -> &mut Self {
        Line::new(start, end).draw(&mut self.pixels, color);
        self
    }

    /// Ellipse outline inscribed in the box with corners `a` and `b`
    pub fn add_ellipse(&mut self, a: Point<f32>, b: Point<f32>, color: Color) -> &mut Self {
        Ellipse::new(a, b).draw_with_precision(&mut self.pixels, color, self.sampler.as_mut(), self.precision);
        self
    }

    pub fn add_filled_ellipse(&mut self, a: Point<f32>, b: Point<f32>, color: Color) -> &mut Self {
        Ellipse::new(a, b).fill(&mut self.pixels, color);
        self
    }

    /// Fails when fewer than two stops are given
    pub fn add_gradient_ellipse(
        &mut self,
        a: Point<f32>,
        b: Point<f32>,
        stops: &[Color],
        direction: GradientDirection,
    ) -> Result<&mut Self> {
        let gradient = LinearGradient::new(stops)?;
        Ellipse::new(a, b).fill_gradient(&mut self.pixels, &gradient, direction);
        Ok(self)
    }

    pub fn add_rectangle(&mut self, a: Point<f32>, b: Point<f32>, color: Color) -> &mut Self {
        Rectangle::new(a, b).draw(&mut self.pixels, color);
        self
    }

    pub fn add_filled_rectangle(&mut self, a: Point<f32>, b: Point<f32>, color: Color) -> &mut Self {
        Rectangle::new(a, b).fill(&mut self.pixels, color);
        self
    }

    /// Fails when fewer than two stops are given
    pub fn add_gradient_rectangle(
        &mut self,
        a: Point<f32>,
        b: Point<f32>,
        stops: &[Color],
        direction: GradientDirection,
    ) -> Result<&mut Self> {
        let gradient = LinearGradient::new(stops)?;
        Rectangle::new(a, b).fill_gradient(&mut self.pixels, &gradient, direction);
        Ok(self)
    }

    /// Draw any shape in any style
    pub fn draw(&mut self, shape: &Shape, style: &Style) -> Result<&mut Self> {
        shape.render(&mut self.pixels, style, self.sampler.as_mut(), self.precision)?;
        Ok(self)
    }

    /// Write the canvas to a bitmap file
    pub fn export(&self, path: impl AsRef<Path>, depth: BitDepth) -> Result<()> {
        bitmap::write(path, &self.pixels, depth)
    }

    /// Write a 24-bit bitmap
    pub fn export_default(&self, path: impl AsRef<Path>) -> Result<()> {
        self.export(path, BitDepth::default())
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Settings for a new [`Canvas`]
pub struct CanvasBuilder {
    width: usize,
    height: usize,
    background: Color,
    precision: usize,
    sampler: Option<Box<dyn SampleSource>>,
}

impl CanvasBuilder {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            precision: DEFAULT_PRECISION,
            sampler: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Random boundary samples per ellipse quarter
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Seed the boundary sampler so outlines are reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.sampler = Some(Box::new(Rng::new(seed)));
        self
    }

    /// Replace the boundary sampler
    pub fn sampler(mut self, sampler: impl SampleSource + 'static) -> Self {
        self.sampler = Some(Box::new(sampler));
        self
    }

    /// # Panics
    ///
    /// Panics if the pixel buffer cannot be allocated; see [`try_build`](Self::try_build).
    pub fn build(self) -> Canvas {
        let pixels = PixelBuffer::filled(self.width, self.height, self.background);
        self.finish(pixels)
    }

    /// Like [`build`](Self::build), but rejects dimensions whose pixel buffer
    /// cannot be addressed
    pub fn try_build(self) -> Result<Canvas> {
        let pixels = PixelBuffer::try_filled(self.width, self.height, self.background)?;
        Ok(self.finish(pixels))
    }

    fn finish(self, pixels: PixelBuffer) -> Canvas {
        tracing::trace!(width = self.width, height = self.height, precision = self.precision, "new canvas");
        Canvas {
            pixels,
            sampler: self.sampler.unwrap_or_else(|| Box::new(Rng::from_entropy())),
            precision: self.precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn pt(x: f32, y: f32) -> Point<f32> {
        Point::new(x, y)
    }

    #[test]
    fn test_new_is_white() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.pixels().count(Color::WHITE), 12);
        assert_eq!(canvas.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_try_build_rejects_huge_canvas() {
        assert!(matches!(Canvas::builder(usize::MAX, 2).try_build(), Err(Error::Validation(_))));
        let canvas = Canvas::builder(3, 2).background(Color::GREEN).try_build().unwrap();
        assert_eq!(canvas.pixels().count(Color::GREEN), 6);
    }

    #[test]
    fn test_chaining() {
        let mut canvas = Canvas::with_background(20, 20, Color::BLACK);
        canvas
            .add_line(pt(0.0, 0.0), pt(19.0, 0.0), Color::RED)
            .add_filled_rectangle(pt(5.0, 5.0), pt(9.0, 9.0), Color::GREEN)
            .add_rectangle(pt(11.0, 11.0), pt(14.0, 14.0), Color::BLUE);
        assert_eq!(canvas.pixels().count(Color::RED), 20);
        assert_eq!(canvas.pixels().count(Color::GREEN), 25);
        assert_eq!(canvas.pixels().count(Color::BLUE), 12);
    }

    #[test]
    fn test_gradient_needs_stops() {
        let mut canvas = Canvas::new(10, 10);
        let err = canvas
            .add_gradient_rectangle(pt(0.0, 0.0), pt(9.0, 9.0), &[Color::RED], GradientDirection::LeftToRight)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(canvas.pixels().count(Color::WHITE), 100);

        canvas
            .add_gradient_ellipse(pt(0.0, 0.0), pt(9.0, 9.0), &[Color::RED, Color::BLUE], GradientDirection::TopToBottom)
            .unwrap();
        assert!(canvas.pixels().count(Color::WHITE) < 100);
    }

    #[test]
    fn test_fill_gradient_covers_canvas() {
        let mut canvas = Canvas::new(16, 4);
        canvas.fill_gradient(&LinearGradient::between(Color::BLACK, Color::BLUE), GradientDirection::LeftToRight);
        assert_eq!(canvas.pixels().count(Color::WHITE), 0);
        assert_eq!(canvas.pixels().get(0, 2).unwrap(), Color::BLACK);
        assert_eq!(canvas.pixels().get(15, 2).unwrap().b, 239);
    }

    #[test]
    fn test_seeded_outlines_repeat() {
        let draw = || {
            let mut canvas = Canvas::builder(64, 64).seed(12).precision(30).build();
            canvas.add_ellipse(pt(2.0, 2.0), pt(60.0, 40.0), Color::RED);
            canvas.into_pixels()
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn test_draw_dispatch() {
        let mut canvas = Canvas::new(8, 8);
        let shape: Shape = Rectangle::new(pt(0.0, 0.0), pt(3.0, 3.0)).into();
        canvas.draw(&shape, &Style::Fill { color: Color::RED }).unwrap();
        assert_eq!(canvas.pixels().count(Color::RED), 16);

        canvas.pixels_mut().clear(Color::BLACK);
        assert_eq!(canvas.pixels().count(Color::BLACK), 64);
    }

    #[test]
    fn test_export_round_trip() {
        let path = std::env::temp_dir().join(format!("bitcanvas-canvas-{}.bmp", std::process::id()));
        let mut canvas = Canvas::with_background(7, 5, Color::rgb(10, 20, 30));
        canvas.add_line(pt(0.0, 0.0), pt(6.0, 4.0), Color::RED);
        canvas.export_default(&path).unwrap();

        let back = bitmap::read(&path, BitDepth::Bits24).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(&back, canvas.pixels());
    }
}
