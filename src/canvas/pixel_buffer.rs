use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::Point;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Width x height grid of colors. This is what shapes draw into and what the
/// bitmap codec reads and writes.
///
/// Cells are stored column-major (`x * height + y`). `Clone` deep-copies the
/// grid; `std::mem::take` moves it out and leaves an empty 0x0 buffer behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Create a buffer filled with black
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// Like [`PixelBuffer::new`], for sizes that come from untrusted input
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        Self::try_filled(width, height, Color::BLACK)
    }

    /// Like [`PixelBuffer::filled`], failing instead of panicking when the
    /// grid cannot be addressed
    pub fn try_filled(width: usize, height: usize, color: Color) -> Result<Self> {
        let cells = width
            .checked_mul(height)
            .filter(|&n| {
                n.checked_mul(std::mem::size_of::<Color>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| Error::Validation(format!("a {}x{} pixel buffer is too large", width, height)))?;
        Ok(Self {
            pixels: vec![color; cells],
            width,
            height,
        })
    }

    /// Create a buffer with every cell set to `color`
    ///
    /// # Panics
    ///
    /// When `width * height` overflows; see [`PixelBuffer::try_filled`].
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            pixels: vec![color; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if signed coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Calculate the storage offset for (x, y)
    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Read a pixel. Fails when `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> Result<Color> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.pixels[self.pixel_index(x, y)])
    }

    /// Mutable access to a pixel, with the same bounds contract as `get`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Color> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.pixel_index(x, y);
        Ok(&mut self.pixels[idx])
    }

    /// Write a pixel. Coordinates outside the buffer are silently dropped;
    /// shape and gradient code relies on this to draw past the edges.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as usize, y as usize);
            self.pixels[idx] = color;
        }
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fill the half-open rectangle `[lower, upper)`, clamped to the buffer
    pub fn fill_rect(&mut self, lower: Point<usize>, upper: Point<usize>, color: Color) {
        let x_end = upper.x.min(self.width);
        let y_end = upper.y.min(self.height);
        for x in lower.x..x_end {
            // Column-major: a column is one contiguous run
            let start = self.pixel_index(x, lower.y.min(y_end));
            let end = self.pixel_index(x, y_end);
            self.pixels[start..end].fill(color);
        }
    }

    /// For every (i, j) in `[lower, upper)` where `include(i, j)` holds, write
    /// `color` at `(i + offset.x, j + offset.y)` with the clipping `set`.
    ///
    /// `include` sees coordinates relative to the region, not the buffer. A
    /// negative offset places part of the region off the buffer, where the
    /// writes are dropped.
    pub fn fill_rect_where<F>(
        &mut self,
        lower: Point<usize>,
        upper: Point<usize>,
        mut include: F,
        color: Color,
        offset: Point<i64>,
    ) where
        F: FnMut(usize, usize) -> bool,
    {
        for i in lower.x..upper.x {
            for j in lower.y..upper.y {
                if include(i, j) {
                    self.set(i as i64 + offset.x, j as i64 + offset.y, color);
                }
            }
        }
    }

    /// Raw column-major storage
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of cells equal to `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}
