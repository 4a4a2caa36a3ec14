//! Mood presets: palettes sampled inside fixed HSL boxes.
//!
//! A mood is a named box in HSL space. Every color of a mood palette is an
//! independent uniform sample of hue, saturation and lightness within the
//! box, so the palette varies from call to call but always keeps the feel.

use std::fmt;
use std::str::FromStr;

use pf_color::{Hsl, RandomSource, hsl_to_hex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PaletteError;

/// Inclusive `(lo, hi)` bounds for each HSL component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodRanges {
    /// Hue, degrees.
    pub hue: (f64, f64),
    /// Saturation, percent.
    pub saturation: (f64, f64),
    /// Lightness, percent.
    pub lightness: (f64, f64),
}

impl MoodRanges {
    const fn new(hue: (f64, f64), saturation: (f64, f64), lightness: (f64, f64)) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Draw one color uniformly inside the box (hue, then saturation, then lightness).
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Hsl {
        Hsl::new(
            rng.range(self.hue.0, self.hue.1),
            rng.range(self.saturation.0, self.saturation.1),
            rng.range(self.lightness.0, self.lightness.1),
        )
    }

    /// Whether `hsl` lies inside the box, allowing `tolerance` on every axis.
    #[must_use]
    pub fn contains(&self, hsl: Hsl, tolerance: f64) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| v >= lo - tolerance && v <= hi + tolerance;
        within(hsl.h, self.hue) && within(hsl.s, self.saturation) && within(hsl.l, self.lightness)
    }
}

/// A named visual feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Soft blues and cyans.
    #[default]
    Calm,
    /// Saturated reds, oranges and yellows.
    Energetic,
    /// Muted corporate blues.
    Professional,
    /// Bright purples and pinks.
    Playful,
    /// Greens.
    Nature,
    /// Warm reds and oranges.
    Sunset,
}

impl Mood {
    #[must_use]
    pub const fn ranges(self) -> MoodRanges {
        match self {
            Self::Calm => MoodRanges::new((180.0, 240.0), (20.0, 40.0), (60.0, 80.0)),
            Self::Energetic => MoodRanges::new((0.0, 60.0), (70.0, 95.0), (50.0, 65.0)),
            Self::Professional => MoodRanges::new((200.0, 230.0), (30.0, 50.0), (35.0, 55.0)),
            Self::Playful => MoodRanges::new((280.0, 340.0), (60.0, 85.0), (55.0, 75.0)),
            Self::Nature => MoodRanges::new((80.0, 160.0), (40.0, 70.0), (40.0, 65.0)),
            Self::Sunset => MoodRanges::new((0.0, 45.0), (60.0, 90.0), (50.0, 70.0)),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Energetic => "energetic",
            Self::Professional => "professional",
            Self::Playful => "playful",
            Self::Nature => "nature",
            Self::Sunset => "sunset",
        }
    }

    /// Parse a mood from its name string (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|m| m.name() == lower).copied()
    }

    /// Parse a mood, falling back to [`Self::Calm`] for unknown names.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            debug!(name, "unknown mood, falling back to calm");
            Self::Calm
        })
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Calm, Self::Energetic, Self::Professional,
            Self::Playful, Self::Nature, Self::Sunset,
        ]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownMood(s.to_owned()))
    }
}

/// Generate `count` colors sampled independently inside `mood`'s box.
#[must_use]
pub fn generate_by_mood(mood: Mood, count: usize, rng: &mut dyn RandomSource) -> Vec<String> {
    debug!(%mood, count, "generating palette by mood");
    let ranges = mood.ranges();
    (0..count)
        .map(|_| {
            let Hsl { h, s, l } = ranges.sample(rng);
            hsl_to_hex(h, s, l)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
