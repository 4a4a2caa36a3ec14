// SPDX-License-Identifier: MIT
//
// Display formatting: how a palette entry is shown to the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{ColorError, hex_to_hsl, hex_to_rgb};

/// The notation used to display a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#RRGGBB`
    #[default]
    Hex,
    /// `rgb(R, G, B)`
    Rgb,
    /// `hsl(H, S%, L%)`
    Hsl,
}

impl ColorFormat {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }

    /// Parse a format from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|f| f.name() == lower).copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Hex, Self::Rgb, Self::Hsl]
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ColorError::UnknownFormat(s.to_owned()))
    }
}

/// Render a hex color in the requested notation.
///
/// Pure formatting: HSL components are rounded to whole numbers. An invalid
/// hex string is returned unchanged in every format.
#[must_use]
pub fn format_color(hex: &str, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hex => hex.to_owned(),
        ColorFormat::Rgb => hex_to_rgb(hex).map_or_else(
            || hex.to_owned(),
            |c| format!("rgb({}, {}, {})", c.r, c.g, c.b),
        ),
        ColorFormat::Hsl => hex_to_hsl(hex).map_or_else(
            || hex.to_owned(),
            |c| format!("hsl({:.0}, {:.0}%, {:.0}%)", c.h.round(), c.s.round(), c.l.round()),
        ),
    }
}
