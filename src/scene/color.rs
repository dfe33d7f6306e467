//! sRGB colors written as CSS-style hex strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color, serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// A hex string that is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl Rgb {
    /// Build a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the short `#rgb` form. The leading `#` is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] for any other length or a non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(hex.to_owned());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => {
                // #abc expands to #aabbcc
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self {
                    r: short(&digits[0..1])?,
                    g: short(&digits[1..2])?,
                    b: short(&digits[2..3])?,
                })
            }
            _ => Err(err()),
        }
    }

    /// Channels as `[0, 1]` floats, still sRGB-encoded.
    #[must_use]
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Channels decoded to linear light.
    #[must_use]
    pub fn to_linear_f32(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }

    /// Channels in the encoding a render target of `format` expects:
    /// linear for `*Srgb` formats (the GPU re-encodes on write), sRGB
    /// otherwise.
    #[must_use]
    pub fn for_target(self, format: wgpu::TextureFormat) -> [f32; 3] {
        if format.is_srgb() {
            self.to_linear_f32()
        } else {
            self.to_srgb_f32()
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::from_hex("#ff6b6b"), Ok(Rgb::new(255, 107, 107)));
        assert_eq!(Rgb::from_hex("4ecdc4"), Ok(Rgb::new(0x4e, 0xcd, 0xc4)));
        assert_eq!(Rgb::from_hex("#111"), Ok(Rgb::new(0x11, 0x11, 0x11)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        assert!(Rgb::from_hex("#+f+f+f").is_err());
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0xF9, 0xA6, 0x02).to_string(), "#f9a602");
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Rgb::new(0, 0, 0).to_linear_f32(), [0.0; 3]);
        let white = Rgb::new(255, 255, 255).to_linear_f32();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        // Mid-grey darkens when decoded.
        assert!(Rgb::new(128, 128, 128).to_linear_f32()[0] < 0.5);
    }

    #[test]
    fn target_encoding_follows_format() {
        let c = Rgb::new(128, 64, 32);
        assert_eq!(
            c.for_target(wgpu::TextureFormat::Bgra8Unorm),
            c.to_srgb_f32()
        );
        assert_eq!(
            c.for_target(wgpu::TextureFormat::Bgra8UnormSrgb),
            c.to_linear_f32()
        );
    }
}
