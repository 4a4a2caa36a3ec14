// SPDX-License-Identifier: MIT

//! Property tests for the hex / RGB / HSL conversions.
//!
//! - hex → RGB → hex reproduces the same digits, uppercased, for any case
//! - RGB → HSL → RGB stays within ±1 per channel
//! - once rounded, HSL → RGB → HSL → RGB is stable

use pf_color::{Rgb, hex_to_hsl, hex_to_rgb, hsl_to_hex, hsl_to_rgb, rgb_to_hex, rgb_to_hsl};
use proptest::prelude::*;

fn arb_hex_digits() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{6}"
}

fn arb_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn close(a: u8, b: u8) -> bool {
    a.abs_diff(b) <= 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_hex_roundtrip_uppercases(digits in arb_hex_digits(), hash in any::<bool>()) {
        let input = if hash { format!("#{digits}") } else { digits.clone() };
        let rgb = hex_to_rgb(&input).expect("generated hex must parse");
        let out = rgb_to_hex(f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b));
        prop_assert_eq!(out, format!("#{}", digits.to_uppercase()));
    }

    #[test]
    fn prop_rgb_hsl_rgb_within_one(c in arb_rgb()) {
        let hsl = rgb_to_hsl(c.r, c.g, c.b);
        let back = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
        prop_assert!(
            close(c.r, back.r) && close(c.g, back.g) && close(c.b, back.b),
            "{c:?} -> {hsl:?} -> {back:?}"
        );
    }

    #[test]
    fn prop_hsl_ranges(c in arb_rgb()) {
        let hsl = rgb_to_hsl(c.r, c.g, c.b);
        prop_assert!((0.0..360.0).contains(&hsl.h), "hue {}", hsl.h);
        prop_assert!((0.0..=100.0).contains(&hsl.s), "saturation {}", hsl.s);
        prop_assert!((0.0..=100.0).contains(&hsl.l), "lightness {}", hsl.l);
    }

    #[test]
    fn prop_rounded_trip_is_idempotent(h in 0.0f64..360.0, s in 0.0f64..=100.0, l in 0.0f64..=100.0) {
        let once = hsl_to_hex(h, s, l);
        let hsl = hex_to_hsl(&once).expect("canonical hex must parse");
        let twice = hsl_to_hex(hsl.h, hsl.s, hsl.l);
        let hsl2 = hex_to_hsl(&twice).expect("canonical hex must parse");
        let thrice = hsl_to_hex(hsl2.h, hsl2.s, hsl2.l);
        prop_assert_eq!(twice, thrice);
    }

    #[test]
    fn prop_any_hsl_gives_six_digits(h in -1000.0f64..1000.0, s in -50.0f64..150.0, l in -50.0f64..150.0) {
        let hex = hsl_to_hex(h, s, l);
        prop_assert_eq!(hex.len(), 7);
        prop_assert!(hex_to_rgb(&hex).is_some());
    }
}
