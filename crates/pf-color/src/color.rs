// SPDX-License-Identifier: MIT
//
// Hex / RGB / HSL conversions.
//
// Single-character variable names (r, g, b, h, s, l, p, q, t, d) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference formulas.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   hex ──parse──▶ Rgb ──rgb_to_hsl──▶ Hsl
//   hex ◀──fmt─── Rgb ◀──hsl_to_rgb── Hsl
//
// HSL → RGB → HSL is not bit-exact (channels are rounded to integers), but
// once a color has been rounded to RGB, repeating the trip reproduces the
// same RGB triple within ±1 per channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::RandomSource;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Errors produced when a caller asks for a `Result` instead of an `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not `#RRGGBB` / `RRGGBB`.
    #[error("invalid hex color '{0}': expected 6 hex digits with an optional leading '#'")]
    InvalidHex(String),

    /// The display format name is not one of `hex`, `rgb`, `hsl`.
    #[error("unknown color format '{0}': expected one of hex, rgb, hsl")]
    UnknownFormat(String),
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An sRGB color with 8-bit channels.
///
/// # Examples
///
/// ```
/// use pf_color::Rgb;
///
/// let teal = Rgb::from_hex("#008080").unwrap();
/// assert_eq!(teal, Rgb::new(0, 128, 128));
/// assert_eq!(teal.to_hex(), "#008080");
///
/// // Case-insensitive, '#' optional.
/// assert_eq!(Rgb::from_hex("ff00AA"), Some(Rgb::new(255, 0, 170)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color. Accepts exactly six hex digits with an optional
    /// leading `#`; returns `None` for any other input.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Canonical `#RRGGBB` representation (uppercase).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in hue / saturation / lightness form.
///
/// - `h`: hue in degrees, [0, 360)
/// - `s`: saturation in percent, [0, 100]
/// - `l`: lightness in percent, [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        hsl_to_hex(self.h, self.s, self.l)
    }
}

// ─── Free-function API ───────────────────────────────────────────────────────

/// Parse `#RRGGBB` / `RRGGBB` (case-insensitive) into an [`Rgb`].
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    parse_hex(hex)
}

/// Format three channel values as `#RRGGBB`.
///
/// Each channel is rounded to the nearest integer and clamped to [0, 255],
/// so the result is always exactly six uppercase digits.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::new(to_u8(r), to_u8(g), to_u8(b)).to_hex()
}

/// Convert 8-bit RGB to HSL.
///
/// Gray inputs (all channels equal) have hue 0 and saturation 0.
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let (rf, gf, bf) = (unit(r), unit(g), unit(b));
    let (maxf, minf) = (unit(max), unit(min));
    let l = (maxf + minf) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = maxf - minf;
    let s = if l > 0.5 { d / (2.0 - maxf - minf) } else { d / (maxf + minf) };

    // 60° segments, picked by whichever channel holds the maximum.
    let h = if max == r {
        (gf - bf) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (bf - rf) / d + 2.0
    } else {
        (rf - gf) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Convert HSL to 8-bit RGB.
///
/// Hue wraps modulo 360 (negative values included). Saturation and
/// lightness are clamped to [0, 100] first, which keeps generator offsets
/// such as "lightness + 10" inside the displayable range.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = normalize_hue(h) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s <= 0.0 {
        let v = to_u8(l * 255.0);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0f64.mul_add(l, -q);

    Rgb::new(
        to_u8(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
        to_u8(hue_to_channel(p, q, h) * 255.0),
        to_u8(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
    )
}

/// Parse a hex color straight into HSL. `None` if the hex is invalid.
#[must_use]
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    parse_hex(hex).map(Rgb::to_hsl)
}

/// Convert HSL straight into a canonical hex string.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Six independently sampled hex digits from `0-9A-F`.
#[must_use]
pub fn random_hex(rng: &mut dyn RandomSource) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut hex = String::with_capacity(7);
    hex.push('#');
    for _ in 0..6 {
        hex.push(char::from(DIGITS[rng.index(DIGITS.len())]));
    }
    hex
}

/// Normalize a hue to [0, 360).
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-20 + 360.0 rounds to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Piecewise channel function over the hue fraction `t`.
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

#[inline]
fn unit(v: u8) -> f64 {
    f64::from(v) / 255.0
}

/// Round a 0–255 float to the nearest channel value, clamping out-of-range input.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
