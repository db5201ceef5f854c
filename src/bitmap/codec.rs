use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::header::{FileHeader, InfoHeader};
use crate::canvas::PixelBuffer;
use crate::color::Color;
use crate::error::{Error, Result};

/// Bits per pixel of a bitmap file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    /// Opaque B, G, R with row padding
    #[default]
    Bits24,
    /// B, G, R, A without padding
    Bits32,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bits24 => 24,
            BitDepth::Bits32 => 32,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits() / 8)
    }

    /// Zero bytes appended to each row so rows align to 4 bytes
    pub fn padding(self, width: usize) -> usize {
        (4 - (width * self.bytes_per_pixel()) % 4) % 4
    }

    /// Bytes per row including padding
    pub fn stride(self, width: usize) -> usize {
        width * self.bytes_per_pixel() + self.padding(width)
    }

    fn pixel_bytes(self, color: Color) -> ([u8; 4], usize) {
        ([color.b, color.g, color.r, color.a], self.bytes_per_pixel())
    }

    fn color_from(self, bytes: &[u8]) -> Color {
        match self {
            BitDepth::Bits24 => Color::rgb(bytes[2], bytes[1], bytes[0]),
            BitDepth::Bits32 => Color::rgba(bytes[2], bytes[1], bytes[0], bytes[3]),
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            24 => Ok(BitDepth::Bits24),
            32 => Ok(BitDepth::Bits32),
            other => Err(Error::Format(format!("{}-bit bitmaps are not supported", other))),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for BitDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bits: u16 = s
            .trim()
            .parse()
            .map_err(|_| Error::Format(format!("bit depth must be 24 or 32, got {:?}", s)))?;
        Self::try_from(bits)
    }
}

// ============================================================================
// Bitmap
// ============================================================================

/// A decoded bitmap: the two headers exactly as read plus the pixels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub pixels: PixelBuffer,
}

impl Bitmap {
    /// Headers describing `pixels` stored at `depth`
    pub fn from_pixels(pixels: PixelBuffer, depth: BitDepth) -> Result<Self> {
        let (file_header, info_header) = headers_for(&pixels, depth)?;
        Ok(Self {
            file_header,
            info_header,
            pixels,
        })
    }

    /// Bit depth recorded in the info header
    pub fn depth(&self) -> Result<BitDepth> {
        BitDepth::try_from(self.info_header.bits_per_pixel()?)
    }

    /// Decode a bitmap that must be stored at `depth`
    pub fn decode<R: Read + Seek>(reader: &mut R, depth: BitDepth) -> Result<Self> {
        let (file_header, info_header) = read_headers(reader)?;
        let found = info_header.bits_per_pixel()?;
        if found != depth.bits() {
            return Err(Error::Format(format!(
                "expected a {}-bit bitmap, found {} bits per pixel",
                depth.bits(),
                found
            )));
        }
        decode_pixels(reader, file_header, info_header, depth)
    }

    /// Decode a 24- or 32-bit bitmap, whichever the info header declares
    pub fn decode_any<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let (file_header, info_header) = read_headers(reader)?;
        let depth = BitDepth::try_from(info_header.bits_per_pixel()?)?;
        decode_pixels(reader, file_header, info_header, depth)
    }

    /// Write `pixels` as a complete bitmap file
    pub fn encode<W: Write>(pixels: &PixelBuffer, writer: &mut W, depth: BitDepth) -> Result<()> {
        let (file_header, info_header) = headers_for(pixels, depth)?;
        writer.write_all(file_header.as_bytes().ok_or(Error::EmptyHeader("file"))?)?;
        writer.write_all(info_header.as_bytes().ok_or(Error::EmptyHeader("info"))?)?;

        let padding = depth.padding(pixels.width());
        let mut row = Vec::with_capacity(depth.stride(pixels.width()));
        for y in 0..pixels.height() {
            row.clear();
            for x in 0..pixels.width() {
                let (bytes, len) = depth.pixel_bytes(pixels.get(x, y)?);
                row.extend_from_slice(&bytes[..len]);
            }
            row.resize(row.len() + padding, 0);
            writer.write_all(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn headers_for(pixels: &PixelBuffer, depth: BitDepth) -> Result<(FileHeader, InfoHeader)> {
    let too_large = || {
        Error::Format(format!(
            "{}x{} is too large for a bitmap",
            pixels.width(),
            pixels.height()
        ))
    };
    let width = i32::try_from(pixels.width()).map_err(|_| too_large())?;
    let height = i32::try_from(pixels.height()).map_err(|_| too_large())?;
    let file_size = depth
        .stride(pixels.width())
        .checked_mul(pixels.height())
        .and_then(|n| n.checked_add(FileHeader::SIZE + InfoHeader::SIZE))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;

    Ok((
        FileHeader::new(file_size),
        InfoHeader::new(width, height, depth.bits()),
    ))
}

fn read_headers<R: Read>(reader: &mut R) -> Result<(FileHeader, InfoHeader)> {
    let mut file = [0u8; FileHeader::SIZE];
    reader.read_exact(&mut file)?;
    let file_header = FileHeader::from_bytes(file);
    if !file_header.has_signature()? {
        return Err(Error::Format("missing BM signature".into()));
    }

    let mut info = [0u8; InfoHeader::SIZE];
    reader.read_exact(&mut info)?;
    Ok((file_header, InfoHeader::from_bytes(info)))
}

fn decode_pixels<R: Read + Seek>(
    reader: &mut R,
    file_header: FileHeader,
    info_header: InfoHeader,
    depth: BitDepth,
) -> Result<Bitmap> {
    let (width, height) = (info_header.width()?, info_header.height()?);
    if width < 0 || height < 0 {
        return Err(Error::Format(format!(
            "negative dimensions {}x{} are not supported",
            width, height
        )));
    }
    let (width, height) = (width as usize, height as usize);
    let pixel_offset = u64::from(file_header.pixel_offset()?);
    let needed = depth
        .stride(width)
        .checked_mul(height)
        .and_then(|n| u64::try_from(n).ok())
        .and_then(|n| n.checked_add(pixel_offset))
        .ok_or_else(|| Error::Format(format!("{}x{} is too large", width, height)))?;

    // Check the declared size against the stream before allocating for it
    let available = reader.seek(SeekFrom::End(0))?;
    if needed > available {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "{}x{} pixel data needs {} bytes, stream has {}",
                width, height, needed, available
            ),
        )));
    }
    reader.seek(SeekFrom::Start(pixel_offset))?;

    let bpp = depth.bytes_per_pixel();
    let mut pixels = PixelBuffer::try_new(width, height)?;
    let mut row = vec![0u8; depth.stride(width)];
    for y in 0..height {
        reader.read_exact(&mut row)?;
        for (x, bytes) in row.chunks_exact(bpp).take(width).enumerate() {
            *pixels.get_mut(x, y)? = depth.color_from(bytes);
        }
    }

    Ok(Bitmap {
        file_header,
        info_header,
        pixels,
    })
}

// ============================================================================
// File helpers
// ============================================================================

/// Read the pixels of a bitmap stored at `depth`
pub fn read(path: impl AsRef<Path>, depth: BitDepth) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let bitmap = Bitmap::decode(&mut BufReader::new(file), depth)?;
    tracing::debug!(
        path = %path.display(),
        width = bitmap.pixels.width(),
        height = bitmap.pixels.height(),
        bits = depth.bits(),
        "read bitmap"
    );
    Ok(bitmap.pixels)
}

/// Read a 24- or 32-bit bitmap along with its headers
pub fn read_any(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let bitmap = Bitmap::decode_any(&mut BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        width = bitmap.pixels.width(),
        height = bitmap.pixels.height(),
        "read bitmap"
    );
    Ok(bitmap)
}

/// Write `pixels` to `path`, replacing any existing file
pub fn write(path: impl AsRef<Path>, pixels: &PixelBuffer, depth: BitDepth) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::open(path, e))?;
    Bitmap::encode(pixels, &mut BufWriter::new(file), depth)?;
    tracing::debug!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        bits = depth.bits(),
        "wrote bitmap"
    );
    Ok(())
}
