//! Harmonious palettes: golden-ratio hue rotation.
//!
//! Each color advances the hue by `0.618… × 360°` (≈ 222.5°) from the
//! previous one. Because the step is an irrational fraction of the circle,
//! hues never repeat and stay well spread for any palette size. Saturation
//! and lightness are sampled per color inside a band that reads as
//! "pleasant" on screen.

use pf_color::{RandomSource, hsl_to_hex, normalize_hue};
use tracing::debug;

/// Conjugate of the golden ratio, `1 / φ`.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Per-color saturation band, percent.
pub const SATURATION_RANGE: (f64, f64) = (55.0, 85.0);

/// Per-color lightness band, percent.
pub const LIGHTNESS_RANGE: (f64, f64) = (45.0, 70.0);

/// Generate `count` colors by golden-ratio hue rotation.
///
/// The first hue is `base_hue` (normalized into [0, 360)) or, when absent,
/// a uniformly random hue.
#[must_use]
pub fn generate_harmonious(
    count: usize,
    base_hue: Option<f64>,
    rng: &mut dyn RandomSource,
) -> Vec<String> {
    let hue = base_hue.unwrap_or_else(|| rng.range(0.0, 360.0));
    debug!(count, hue, "generating harmonious palette");

    (0..count)
        .map(|i| {
            let h = normalize_hue((i as f64).mul_add(GOLDEN_RATIO_CONJUGATE * 360.0, hue));
            let s = rng.range(SATURATION_RANGE.0, SATURATION_RANGE.1);
            let l = rng.range(LIGHTNESS_RANGE.0, LIGHTNESS_RANGE.1);
            hsl_to_hex(h, s, l)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pf_color::{FixedSequence, ThreadRandom, hex_to_hsl, hex_to_rgb};

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn exact_count() {
        let mut rng = ThreadRandom;
        for count in [1, 2, 5, 10, 32] {
            assert_eq!(generate_harmonious(count, None, &mut rng).len(), count);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_harmonious(0, Some(10.0), &mut ThreadRandom).is_empty());
    }

    #[test]
    fn colors_are_well_formed() {
        for hex in generate_harmonious(5, None, &mut ThreadRandom) {
            assert_eq!(hex.len(), 7, "{hex}");
            assert!(hex_to_rgb(&hex).is_some(), "{hex}");
            assert_eq!(hex, hex.to_uppercase());
        }
    }

    #[test]
    fn first_color_uses_base_hue() {
        let mut rng = FixedSequence::constant(0.5);
        let palette = generate_harmonious(1, Some(120.0), &mut rng);
        // s = 70, l = 57.5 at the midpoint of both bands.
        assert_eq!(palette, vec![hsl_to_hex(120.0, 70.0, 57.5)]);
    }

    #[test]
    fn hues_follow_golden_rotation() {
        let mut rng = FixedSequence::constant(0.5);
        let palette = generate_harmonious(3, Some(0.0), &mut rng);
        let step = GOLDEN_RATIO_CONJUGATE * 360.0;
        assert_eq!(palette[1], hsl_to_hex(step, 70.0, 57.5));
        assert_eq!(palette[2], hsl_to_hex(normalize_hue(2.0 * step), 70.0, 57.5));
    }

    #[test]
    fn hues_pairwise_distinct_up_to_six() {
        let mut rng = FixedSequence::constant(0.5);
        let hues: Vec<f64> = generate_harmonious(6, Some(0.0), &mut rng)
            .iter()
            .map(|hex| hex_to_hsl(hex).unwrap().h)
            .collect();
        for (i, a) in hues.iter().enumerate() {
            for b in &hues[i + 1..] {
                assert!(hue_distance(*a, *b) > 10.0, "hues too close: {a} vs {b}");
            }
        }
    }

    #[test]
    fn random_base_hue_consumes_one_draw() {
        // First draw picks the hue (0.25 → 90°), then s/l per color.
        let mut rng = FixedSequence::new(vec![0.25, 0.0, 1.0]);
        let palette = generate_harmonious(1, None, &mut rng);
        let hsl = hex_to_hsl(&palette[0]).unwrap();
        assert!((hsl.h - 90.0).abs() < 1.0, "hue: {}", hsl.h);
    }

    #[test]
    fn base_hue_wraps() {
        let mut a = FixedSequence::constant(0.5);
        let mut b = FixedSequence::constant(0.5);
        assert_eq!(
            generate_harmonious(4, Some(-40.0), &mut a),
            generate_harmonious(4, Some(320.0), &mut b)
        );
    }

    #[test]
    fn saturation_and_lightness_in_band() {
        for hex in generate_harmonious(50, None, &mut ThreadRandom) {
            let hsl = hex_to_hsl(&hex).unwrap();
            assert!(hsl.s > 53.0 && hsl.s < 87.0, "{hex}: saturation {}", hsl.s);
            assert!(hsl.l > 44.0 && hsl.l < 71.0, "{hex}: lightness {}", hsl.l);
        }
    }
}
