//! The two fixed-size records at the start of every bitmap file.
//!
//! Each record holds its raw little-endian bytes, or nothing when it has not
//! been read or built yet. Numeric accessors on an empty record fail with
//! [`Error::EmptyHeader`].

use crate::error::{Error, Result};

const SIGNATURE: [u8; 2] = *b"BM";
const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;

#[inline]
fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn i32_at(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// ============================================================================
// File header
// ============================================================================

/// Signature, total file size and the offset of the pixel array
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    bytes: Option<[u8; FILE_HEADER_SIZE]>,
}

impl FileHeader {
    pub const SIZE: usize = FILE_HEADER_SIZE;

    /// Header for a file of `file_size` bytes whose pixels start right after
    /// both headers
    pub fn new(file_size: u32) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&SIGNATURE);
        bytes[2..6].copy_from_slice(&file_size.to_le_bytes());
        let offset = (Self::SIZE + InfoHeader::SIZE) as u32;
        bytes[10..14].copy_from_slice(&offset.to_le_bytes());
        Self { bytes: Some(bytes) }
    }

    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self { bytes: Some(bytes) }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_none()
    }

    pub fn as_bytes(&self) -> Option<&[u8; Self::SIZE]> {
        self.bytes.as_ref()
    }

    fn raw(&self) -> Result<&[u8; Self::SIZE]> {
        self.bytes.as_ref().ok_or(Error::EmptyHeader("file"))
    }

    pub fn signature(&self) -> Result<[u8; 2]> {
        let b = self.raw()?;
        Ok([b[0], b[1]])
    }

    pub fn has_signature(&self) -> Result<bool> {
        Ok(self.signature()? == SIGNATURE)
    }

    pub fn file_size(&self) -> Result<u32> {
        Ok(u32_at(self.raw()?, 2))
    }

    pub fn pixel_offset(&self) -> Result<u32> {
        Ok(u32_at(self.raw()?, 10))
    }
}

// ============================================================================
// Info header
// ============================================================================

/// Dimensions, plane count and bits per pixel. Compression, resolution and
/// palette fields are always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoHeader {
    bytes: Option<[u8; INFO_HEADER_SIZE]>,
}

impl InfoHeader {
    pub const SIZE: usize = INFO_HEADER_SIZE;

    pub fn new(width: i32, height: i32, bits_per_pixel: u16) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&(Self::SIZE as u32).to_le_bytes());
        bytes[4..8].copy_from_slice(&width.to_le_bytes());
        bytes[8..12].copy_from_slice(&height.to_le_bytes());
        bytes[12..14].copy_from_slice(&1u16.to_le_bytes());
        bytes[14..16].copy_from_slice(&bits_per_pixel.to_le_bytes());
        Self { bytes: Some(bytes) }
    }

    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self { bytes: Some(bytes) }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_none()
    }

    pub fn as_bytes(&self) -> Option<&[u8; Self::SIZE]> {
        self.bytes.as_ref()
    }

    fn raw(&self) -> Result<&[u8; Self::SIZE]> {
        self.bytes.as_ref().ok_or(Error::EmptyHeader("info"))
    }

    pub fn header_size(&self) -> Result<u32> {
        Ok(u32_at(self.raw()?, 0))
    }

    pub fn width(&self) -> Result<i32> {
        Ok(i32_at(self.raw()?, 4))
    }

    pub fn height(&self) -> Result<i32> {
        Ok(i32_at(self.raw()?, 8))
    }

    pub fn planes(&self) -> Result<u16> {
        Ok(u16_at(self.raw()?, 12))
    }

    pub fn bits_per_pixel(&self) -> Result<u16> {
        Ok(u16_at(self.raw()?, 14))
    }
}
