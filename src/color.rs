//! Color model
//!
//! An RGB color with alpha, convertible to and from hue/saturation/lightness
//! and `#rrggbb` hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Plain red/green/blue triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Hue in degrees (0-360), saturation and lightness in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u16,
    pub lightness: u16,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u16, lightness: u16) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    fn validate(self) -> Result<Self> {
        if self.hue > 360 || self.saturation > 100 || self.lightness > 100 {
            return Err(Error::Validation(format!(
                "hsl({}, {}, {}) is out of range",
                self.hue, self.saturation, self.lightness
            )));
        }
        Ok(self)
    }
}

/// RGBA color, 8 bits per channel. Alpha 255 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Opaque color from channel values
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(rgb: Rgb, alpha: u8) -> Self {
        Self::rgba(rgb.red, rgb.green, rgb.blue, alpha)
    }

    /// Fails when hue > 360, saturation > 100 or lightness > 100
    pub fn from_hsl(hsl: Hsl, alpha: u8) -> Result<Self> {
        Ok(Self::from_rgb(hsl_to_rgb(hsl.validate()?), alpha))
    }

    /// Parse `#rrggbb` (digits in either case)
    pub fn from_hex(hex: &str, alpha: u8) -> Result<Self> {
        Ok(Self::from_rgb(parse_hex(hex)?, alpha))
    }

    pub fn set_rgb(&mut self, rgb: Rgb, alpha: u8) {
        *self = Self::from_rgb(rgb, alpha);
    }

    /// Leaves the color untouched when the components are out of range
    pub fn set_hsl(&mut self, hsl: Hsl, alpha: u8) -> Result<()> {
        *self = Self::from_hsl(hsl, alpha)?;
        Ok(())
    }

    pub fn set_hex(&mut self, hex: &str, alpha: u8) -> Result<()> {
        *self = Self::from_hex(hex, alpha)?;
        Ok(())
    }

    pub const fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.to_rgb())
    }

    /// Lowercase `#rrggbb`; alpha is not part of the hex form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s, 255)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb, 255)
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn parse_hex(hex: &str) -> Result<Rgb> {
    let bytes = hex.as_bytes();
    if bytes.len() != 7 || bytes[0] != b'#' {
        return Err(Error::Validation(format!(
            "expected #rrggbb, got {:?}",
            hex
        )));
    }
    if !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
        return Err(Error::Validation(format!("invalid hex digits in {:?}", hex)));
    }

    // All seven bytes are ASCII at this point, so slicing is on char boundaries
    let channel = |at: usize| {
        u8::from_str_radix(&hex[at..at + 2], 16)
            .map_err(|e| Error::Validation(format!("{:?}: {}", hex, e)))
    };
    Ok(Rgb::new(channel(1)?, channel(3)?, channel(5)?))
}

fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = f64::from(hsl.hue) / 360.0;
    let s = f64::from(hsl.saturation) / 100.0;
    let l = f64::from(hsl.lightness) / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    let scale = |v: f64| (v * 255.0).round() as u8;
    Rgb::new(scale(r), scale(g), scale(b))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.red) / 255.0;
    let g = f64::from(rgb.green) / 255.0;
    let b = f64::from(rgb.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        // Ties resolve toward green, then blue
        let sector = if r > g && r > b {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if g > b {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (sector / 6.0, s)
    };

    Hsl::new(
        (h * 360.0).round() as u16,
        (s * 100.0).round() as u16,
        (l * 100.0).round() as u16,
    )
}

// ============================================================================
// Serde representation
// ============================================================================

/// Scene files may spell a color as `"#rrggbb"` or as channel fields
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

const fn opaque() -> u8 {
    255
}

impl TryFrom<ColorRepr> for Color {
    type Error = Error;

    fn try_from(repr: ColorRepr) -> Result<Self> {
        match repr {
            ColorRepr::Hex(hex) => hex.parse(),
            ColorRepr::Channels { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(c: Color) -> Self {
        if c.a == 255 {
            return ColorRepr::Hex(c.to_hex());
        }
        ColorRepr::Channels {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}
