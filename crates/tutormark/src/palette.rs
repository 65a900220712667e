//! Chart palette generation.
//!
//! Progress charts colour their series from a fixed list of base colours.
//! When a chart has more series than base colours, further colours are
//! derived by raising the lightness of the base colours in HSL space.

use crate::{Result, TutormarkError};

/// Upper bound for the lightness of derived colours, in percent
pub const MAX_DERIVED_LIGHTNESS: f64 = 85.0;

/// Lightness added per cycle through the base colours, in percent
pub const LIGHTNESS_STEP: f64 = 10.0;

/// An sRGB colour with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A colour in HSL space: hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Base colours in series order
pub const BASE_COLORS: [Rgb; 10] = [
    Rgb::new(0x0d, 0x6e, 0xfd), // primary
    Rgb::new(0x20, 0xc9, 0x97), // teal
    Rgb::new(0x0d, 0xca, 0xf0), // info
    Rgb::new(0xff, 0xc1, 0x07), // warning
    Rgb::new(0xdc, 0x35, 0x45), // danger
    Rgb::new(0x6f, 0x42, 0xc1), // purple
    Rgb::new(0xfd, 0x7e, 0x14), // orange
    Rgb::new(0x66, 0x10, 0xf2), // indigo
    Rgb::new(0x19, 0x87, 0x54), // success
    Rgb::new(0xd6, 0x33, 0x84), // pink
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TutormarkError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| TutormarkError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // achromatic
            return Self {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self {
            h: h / 6.0 * 360.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h / 360.0;
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        Self::new(to_byte(r), to_byte(g), to_byte(b))
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert `#rrggbb` to HSL
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Rgb::from_hex(hex).map(Hsl::from)
}

/// Convert HSL to lowercase `#rrggbb`
pub fn hsl_to_hex(hsl: Hsl) -> String {
    Rgb::from(hsl).to_hex()
}

/// Colours for `count` chart series
///
/// The first ten are the base colours. Further colours cycle over the base
/// colours, each cycle raising lightness by [`LIGHTNESS_STEP`] up to
/// [`MAX_DERIVED_LIGHTNESS`].
pub fn chart_colors(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let base = BASE_COLORS[i % BASE_COLORS.len()];
            let cycle = i / BASE_COLORS.len();
            if cycle == 0 {
                return base.to_hex();
            }

            let mut hsl = Hsl::from(base);
            hsl.l = (hsl.l + LIGHTNESS_STEP * cycle as f64).min(MAX_DERIVED_LIGHTNESS);
            hsl_to_hex(hsl)
        })
        .collect()
}
