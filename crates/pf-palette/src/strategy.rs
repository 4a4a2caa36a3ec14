//! Color-theory strategies: palettes derived from a single base color.
//!
//! Each strategy converts the base color to HSL and walks a fixed geometric
//! relationship around the hue wheel (30° neighbours, 120° triads, 90°
//! squares, ...), nudging lightness per position so adjacent swatches stay
//! distinguishable. All hue arithmetic wraps modulo 360.

use std::fmt;
use std::str::FromStr;

use pf_color::{Hsl, RandomSource, hex_to_hsl, hsl_to_hex, normalize_hue, random_hex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PaletteError;
use crate::harmonious::generate_harmonious;

/// The rule used to derive a palette from a base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteStrategy {
    /// Golden-ratio rotation from the base hue.
    #[default]
    Random,
    /// 30° neighbours on either side of the base.
    Analogous,
    /// One hue, lightness ramp from 25% to 75%.
    Monochromatic,
    /// 120° spacing.
    Triadic,
    /// Base and its 180° opposite, alternating.
    Complementary,
    /// Base plus the two hues flanking its complement (150°, 210°).
    SplitComplementary,
    /// 90° spacing.
    Tetradic,
}

impl PaletteStrategy {
    /// Generate a palette with this strategy. See [`generate_by_type`].
    #[must_use]
    pub fn generate(self, count: usize, base: Option<&str>, rng: &mut dyn RandomSource) -> Vec<String> {
        generate_by_type(self, count, base, rng)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Analogous => "analogous",
            Self::Monochromatic => "monochromatic",
            Self::Triadic => "triadic",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Tetradic => "tetradic",
        }
    }

    /// Parse a strategy from its name string (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|p| p.name() == lower).copied()
    }

    /// Parse a strategy, falling back to [`Self::Random`] for unknown names.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            debug!(name, "unknown palette strategy, falling back to random");
            Self::Random
        })
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Random, Self::Analogous, Self::Monochromatic, Self::Triadic,
            Self::Complementary, Self::SplitComplementary, Self::Tetradic,
        ]
    }
}

impl fmt::Display for PaletteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteStrategy {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownStrategy(s.to_owned()))
    }
}

/// Hue offsets cycled by the split-complementary rule.
const SPLIT_ANGLES: [f64; 3] = [0.0, 150.0, 210.0];

/// Generate `count` colors from `base` using `strategy`.
///
/// - `base`: a hex color; `None` (or empty) picks a random base.
/// - An unparseable base yields a single-element palette holding the input
///   unchanged.
/// - [`PaletteStrategy::Random`] delegates to [`generate_harmonious`] seeded
///   with the base hue.
#[must_use]
pub fn generate_by_type(
    strategy: PaletteStrategy,
    count: usize,
    base: Option<&str>,
    rng: &mut dyn RandomSource,
) -> Vec<String> {
    let base_hex = match base {
        Some(hex) if !hex.is_empty() => hex.to_owned(),
        _ => random_hex(rng),
    };
    let Some(Hsl { h, s, l }) = hex_to_hsl(&base_hex) else {
        debug!(base = %base_hex, "invalid base color, returning it unchanged");
        return vec![base_hex];
    };
    debug!(%strategy, count, base = %base_hex, "generating palette by type");

    let mut colors: Vec<String> = match strategy {
        PaletteStrategy::Analogous => {
            const STEP: f64 = 30.0;
            let mid = (count / 2) as f64;
            (0..count)
                .map(|i| {
                    let offset = (i as f64 - mid) * STEP;
                    let shade = if i % 2 == 0 { 5.0 } else { -5.0 };
                    hsl_to_hex(normalize_hue(h + offset), s, l + shade)
                })
                .collect()
        }
        PaletteStrategy::Monochromatic => {
            // count == 1 would divide by zero; treat the span as one step.
            let steps = count.saturating_sub(1).max(1) as f64;
            (0..count)
                .map(|i| {
                    let lightness = (i as f64).mul_add(50.0 / steps, 25.0);
                    let saturation = (i as f64).mul_add(-5.0, s).max(30.0);
                    hsl_to_hex(h, saturation, lightness)
                })
                .collect()
        }
        PaletteStrategy::Triadic => (0..count)
            .map(|i| {
                let hue = normalize_hue((i as f64).mul_add(120.0, h));
                let shade = if i % 2 == 0 { 0.0 } else { 10.0 };
                hsl_to_hex(hue, s, l + shade)
            })
            .collect(),
        PaletteStrategy::Complementary => (0..count)
            .map(|i| {
                let hue = if i % 2 == 0 { h } else { normalize_hue(h + 180.0) };
                let lightness = ((i % 3) as f64).mul_add(10.0, l - 10.0);
                hsl_to_hex(hue, s, lightness.clamp(30.0, 80.0))
            })
            .collect(),
        PaletteStrategy::SplitComplementary => (0..count)
            .map(|i| {
                let hue = normalize_hue(h + SPLIT_ANGLES[i % SPLIT_ANGLES.len()]);
                let lightness = (i as f64).mul_add(5.0, l - 10.0);
                hsl_to_hex(hue, s, lightness)
            })
            .collect(),
        PaletteStrategy::Tetradic => (0..count)
            .map(|i| {
                let hue = normalize_hue((i as f64).mul_add(90.0, h));
                let shade = if i % 2 == 0 { 0.0 } else { 8.0 };
                hsl_to_hex(hue, s, l + shade)
            })
            .collect(),
        PaletteStrategy::Random => return generate_harmonious(count, Some(h), rng),
    };

    colors.truncate(count);
    colors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
