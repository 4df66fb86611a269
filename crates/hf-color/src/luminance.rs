// SPDX-License-Identifier: MIT
//
// Relative luminance and contrast ratio.
//
// Luminance follows the WCAG 2.1 definition: linearize each sRGB channel,
// then weight by the Rec. 709 primaries. Contrast is the classic
// (L1 + 0.05) / (L2 + 0.05) with L1 the brighter of the two, so the
// magnitude never depends on argument order. Callers that care which side
// is foreground use the light/dark partition to decide a direction.

use crate::color::ToSrgb;

/// Luminance above which a color counts as light.
///
/// This is the point where contrast against black equals contrast against
/// white: `(L + 0.05) / 0.05 == 1.05 / (L + 0.05)`, i.e. `sqrt(0.0525) - 0.05`.
/// Pushing a foreground away from a background on the "right" side of this
/// line always moves toward the larger achievable contrast.
pub const LIGHT_LUMINANCE_THRESHOLD: f64 = 0.179_128_784_747_792;

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in [0.0, 1.0]: 0 is black, 1 is white.
#[must_use]
pub fn relative_luminance<C: ToSrgb>(color: C) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Contrast ratio between a foreground and a background, in [1.0, 21.0].
#[must_use]
pub fn contrast_ratio<A: ToSrgb, B: ToSrgb>(fg: A, bg: B) -> f64 {
    let lf = relative_luminance(fg);
    let lb = relative_luminance(bg);
    let (lighter, darker) = if lf >= lb { (lf, lb) } else { (lb, lf) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `color` reads as light. Exactly one of [`is_light`] and
/// [`is_dark`] holds for any color.
#[must_use]
pub fn is_light<C: ToSrgb>(color: C) -> bool {
    relative_luminance(color) > LIGHT_LUMINANCE_THRESHOLD
}

/// Whether `color` reads as dark.
#[must_use]
pub fn is_dark<C: ToSrgb>(color: C) -> bool {
    !is_light(color)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Hsl, Rgb};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-9));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-9));
    }

    #[test]
    fn luminance_primaries() {
        assert!(approx_eq(relative_luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-6));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-6));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 0, 255)), 0.0722, 1e-6));
    }

    #[test]
    fn luminance_agrees_across_forms() {
        let rgb = Rgb::new(0x33, 0x66, 0x99);
        let hsl = rgb.to_hsl();
        assert!(approx_eq(relative_luminance(rgb), relative_luminance(hsl), 1e-9));
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        assert!(approx_eq(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0, 1e-9));
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Hsl::new(180.0, 40.0, 50.0);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-12));
    }

    #[test]
    fn contrast_magnitude_ignores_order() {
        let a = Rgb::new(200, 50, 70);
        let b = Rgb::new(20, 20, 90);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn contrast_at_least_one() {
        let a = Hsl::new(270.0, 20.0, 30.0);
        let b = Hsl::new(90.0, 30.0, 35.0);
        assert!(contrast_ratio(a, b) >= 1.0);
    }

    // ── Light / dark partition ──────────────────────────────────────

    #[test]
    fn white_is_light_black_is_dark() {
        assert!(is_light(Rgb::WHITE));
        assert!(is_dark(Rgb::BLACK));
    }

    #[test]
    fn typical_theme_backgrounds() {
        assert!(is_dark(Hsl::new(220.0, 15.0, 10.0)));
        assert!(is_light(Hsl::new(220.0, 15.0, 97.0)));
    }

    #[test]
    fn threshold_balances_contrast() {
        let l = LIGHT_LUMINANCE_THRESHOLD;
        let against_black = (l + 0.05) / 0.05;
        let against_white = 1.05 / (l + 0.05);
        assert!(approx_eq(against_black, against_white, 1e-9));
    }

    #[test]
    fn partition_is_exclusive_and_exhaustive() {
        for v in 0..=255u8 {
            let gray = Rgb::new(v, v, v);
            assert_ne!(is_light(gray), is_dark(gray), "gray {v}");
        }
    }
}
