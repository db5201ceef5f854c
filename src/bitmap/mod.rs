//! Uncompressed BMP reading and writing
//!
//! Two layouts are supported, both with a 14-byte file header and a 40-byte
//! info header followed by the pixel array:
//!
//! - 24-bit: B, G, R per pixel, rows padded to a multiple of 4 bytes
//! - 32-bit: B, G, R, A per pixel, no padding
//!
//! Rows are stored in buffer order: file row `r` is buffer row `y = r`, in
//! both directions, so a written file reads back unchanged.

mod codec;
mod header;

pub use codec::{read, read_any, write, BitDepth, Bitmap};
pub use header::{FileHeader, InfoHeader};
