//! WCAG contrast scoring for palette swatches.
//!
//! Answers two questions about a pair of colors:
//!
//! - How far apart are they in relative luminance? (ratio, 1:1 to 21:1)
//! - Which WCAG 2.1 level does that ratio reach?
//!
//!   | ratio  | level    | meaning                               |
//!   |--------|----------|---------------------------------------|
//!   | >= 7   | AAA      | any text                              |
//!   | >= 4.5 | AA       | normal text                           |
//!   | >= 3   | AA Large | large or bold text only               |
//!   | < 3    | Fail     | not legible enough for text           |
//!
//! Luminance uses the WCAG 2.x linearization threshold of 0.03928.

use std::fmt;

use pf_color::{Rgb, hex_to_rgb};
use serde::{Deserialize, Serialize};

/// Text color used on light swatches.
pub const DARK_TEXT: &str = "#1A1A2E";

/// Text color used on dark swatches.
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Compute the relative luminance of a hex color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white. An
/// invalid hex string scores 0.
#[must_use]
pub fn relative_luminance(hex: &str) -> f64 {
    hex_to_rgb(hex).map_or(0.0, rgb_luminance)
}

/// Relative luminance of an already-parsed color.
#[must_use]
pub fn rgb_luminance(color: Rgb) -> f64 {
    let r = linearize(color.r);
    let g = linearize(color.g);
    let b = linearize(color.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the WCAG 2.1 contrast ratio between two hex colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is always >= 1.0 regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a swatch reads as dark (luminance below 0.5).
#[must_use]
pub fn is_dark(hex: &str) -> bool {
    relative_luminance(hex) < 0.5
}

/// Text color for labels drawn on top of `hex`: white on dark swatches,
/// near-black on light ones.
#[must_use]
pub fn contrasting_text_color(hex: &str) -> &'static str {
    if is_dark(hex) { LIGHT_TEXT } else { DARK_TEXT }
}

// ---------------------------------------------------------------------------
// WcagLevel
// ---------------------------------------------------------------------------

/// WCAG conformance level reached by a contrast ratio, ordered from worst
/// to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    Fail,
    AaLarge,
    Aa,
    Aaa,
}

impl WcagLevel {
    /// Classify a contrast ratio.
    #[must_use]
    pub fn classify(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// Short level name as used in WCAG documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }

    /// Human-readable verdict.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Insufficient",
            Self::AaLarge => "Large text only",
            Self::Aa => "Good",
            Self::Aaa => "Excellent",
        }
    }

    /// Stable tag for styling hooks.
    #[must_use]
    pub const fn class_tag(self) -> &'static str {
        match self {
            Self::Fail => "wcag-fail",
            Self::AaLarge => "wcag-aa-large",
            Self::Aa => "wcag-aa",
            Self::Aaa => "wcag-aaa",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contrast ratio together with the level it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub level: WcagLevel,
}

impl ContrastResult {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        Self { ratio, level: WcagLevel::classify(ratio) }
    }

    /// Score a foreground/background pair (order does not matter).
    #[must_use]
    pub fn between(a: &str, b: &str) -> Self {
        Self::from_ratio(contrast_ratio(a, b))
    }
}

impl fmt::Display for ContrastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:1 ({})", self.ratio, self.level)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
