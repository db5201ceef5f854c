//! bitcanvas: a pixel-exact software rasterizer
//!
//! Lines, ellipses and rectangles are drawn into a column-major
//! [`PixelBuffer`], stroked, filled solid or filled with a multi-stop
//! [`LinearGradient`], and saved as uncompressed 24- or 32-bit BMP files.
//! [`Canvas`] is the chainable front end; [`Scene`] describes a whole drawing
//! as JSON.

pub mod bitmap;
pub mod canvas;
pub mod color;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod scene;
pub mod shapes;
pub mod util;

pub use bitmap::{BitDepth, Bitmap};
pub use canvas::{Canvas, CanvasBuilder, PixelBuffer};
pub use color::{Color, Hsl, Rgb};
pub use error::{Error, Result};
pub use geometry::Point;
pub use gradient::{GradientDirection, LinearGradient};
pub use scene::{Background, Scene, SceneItem};
pub use shapes::{Bounds, Ellipse, Line, Rectangle, Shape, Style};
pub use util::{Rng, SampleSource};
