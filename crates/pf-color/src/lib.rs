// SPDX-License-Identifier: MIT
//
// pf-color: Color space engine for palette-forge.
//
// Three interchangeable representations of a 24-bit sRGB color:
//
//   "#RRGGBB" hex string  ↔  Rgb (u8 channels)  ↔  Hsl (degrees / percent)
//
// Hex output is always canonical: '#' followed by six uppercase digits.
// Hex input is case-insensitive and the leading '#' is optional. Anything
// else is rejected with `None` rather than an error, because callers in the
// generator layer treat a bad hex as "fall back", never as "abort".
//
// Randomness is never read from ambient state. Every function that needs
// it takes a `&mut dyn RandomSource`, so tests can substitute a fixed
// sequence and the CLI can substitute a seeded generator.

pub mod color;
pub mod format;
pub mod random;

pub use color::{
    ColorError, Hsl, Rgb, hex_to_hsl, hex_to_rgb, hsl_to_hex, hsl_to_rgb, normalize_hue,
    random_hex, rgb_to_hex, rgb_to_hsl,
};
pub use format::{ColorFormat, format_color};
pub use random::{FixedSequence, RandomSource, ThreadRandom, Xorshift32};
