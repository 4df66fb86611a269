//! Contrast constraint adjustment for readable and muted text.
//!
//! Two bounded local searches over a single foreground color:
//!
//! - [`ensure_readability`]: push the foreground away from the background
//!   until it clears a contrast floor (primary text, accents, syntax).
//! - [`adjust_muted_color`]: keep the foreground inside a contrast *band*,
//!   then cap its saturation (comments, tertiary text), so it is visible but
//!   clearly de-emphasized.
//!
//! Both searches work on an unrounded [`Hsl`] and measure contrast on the
//! 8-bit color they would return. Neither can fail: running out of
//! iterations returns the best color reached and `converged: false`.

use hf_color::{Hsl, Rgb, ToSrgb, contrast_ratio, is_light, relative_luminance};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ThemeError};

// ---------------------------------------------------------------------------
// ContrastBand
// ---------------------------------------------------------------------------

/// A closed contrast-ratio interval `[min, max]`.
///
/// Construction rejects degenerate bands, so an adjuster holding one can
/// never chase an empty target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand", into = "RawBand")]
pub struct ContrastBand {
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize)]
struct RawBand {
    min: f64,
    max: f64,
}

impl ContrastBand {
    /// Default band for muted text on a dark background.
    pub const MUTED_DARK: Self = Self { min: 2.5, max: 3.5 };
    /// Default band for muted text on a light background.
    pub const MUTED_LIGHT: Self = Self { min: 1.5, max: 3.0 };

    /// # Errors
    ///
    /// [`ThemeError::DegenerateConstraint`] when `min > max`, either bound is
    /// not finite, or `min < 1.0` (no two colors have contrast below 1).
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 1.0 || min > max {
            return Err(ThemeError::DegenerateConstraint { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn contains(self, ratio: f64) -> bool {
        (self.min..=self.max).contains(&ratio)
    }

    /// How far `ratio` lies outside the band (0 inside).
    fn distance(self, ratio: f64) -> f64 {
        if ratio < self.min {
            self.min - ratio
        } else if ratio > self.max {
            ratio - self.max
        } else {
            0.0
        }
    }
}

impl TryFrom<RawBand> for ContrastBand {
    type Error = ThemeError;

    fn try_from(raw: RawBand) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl From<ContrastBand> for RawBand {
    fn from(band: ContrastBand) -> Self {
        Self {
            min: band.min,
            max: band.max,
        }
    }
}

// ---------------------------------------------------------------------------
// Polarity and outcomes
// ---------------------------------------------------------------------------

/// Which end of the lightness range a background sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Dark,
    Light,
}

impl Polarity {
    /// Polarity of a background color.
    #[must_use]
    pub fn of<C: ToSrgb>(background: C) -> Self {
        if is_light(background) { Self::Light } else { Self::Dark }
    }
}

/// Result of a bounded adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustOutcome {
    pub color: Rgb,
    /// Steps taken by the contrast loop.
    pub iterations: u32,
    /// Whether the returned color meets the contrast target.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tuning for [`ensure_readability_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityOptions {
    /// Lightness and saturation points moved per step.
    pub step: f64,
    pub max_iterations: u32,
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            step: 5.0,
            max_iterations: 100,
        }
    }
}

/// Tuning for [`adjust_muted_color_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutedOptions {
    pub max_iterations: u32,
    /// Relative lighten/darken per step.
    pub lightness_ratio: f64,
    /// Relative saturate per step (when contrast is too low).
    pub saturate_ratio: f64,
    /// Relative desaturate per step (when contrast is too high).
    pub desaturate_ratio: f64,
    pub dark_saturation_ceiling: f64,
    pub light_saturation_ceiling: f64,
    /// Saturation points removed per step of the ceiling pass.
    pub desaturate_step: f64,
    /// Stop darkening once luminance falls below this on dark backgrounds.
    pub dark_luminance_floor: f64,
    /// Stop lightening once luminance rises above this on light backgrounds.
    pub light_luminance_ceiling: f64,
}

impl Default for MutedOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            lightness_ratio: 0.2,
            saturate_ratio: 0.2,
            desaturate_ratio: 0.5,
            dark_saturation_ceiling: 20.0,
            light_saturation_ceiling: 40.0,
            desaturate_step: 0.5,
            dark_luminance_floor: 0.05,
            light_luminance_ceiling: 0.95,
        }
    }
}

impl MutedOptions {
    #[must_use]
    pub const fn saturation_ceiling(&self, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Dark => self.dark_saturation_ceiling,
            Polarity::Light => self.light_saturation_ceiling,
        }
    }

    const fn hit_safety_valve(&self, polarity: Polarity, luminance: f64) -> bool {
        match polarity {
            Polarity::Dark => luminance < self.dark_luminance_floor,
            Polarity::Light => luminance > self.light_luminance_ceiling,
        }
    }
}

// ---------------------------------------------------------------------------
// ensure_readability
// ---------------------------------------------------------------------------

/// Push `fg` away from `bg` until their contrast is at least `min_contrast`,
/// with default options. Best effort: see [`ensure_readability_with`].
#[must_use]
pub fn ensure_readability(fg: Rgb, bg: Rgb, min_contrast: f64) -> Rgb {
    ensure_readability_with(fg, bg, min_contrast, &ReadabilityOptions::default()).color
}

/// Step `fg` toward black (light `bg`) or white (dark `bg`), saturating as
/// it goes, until the contrast floor is met.
///
/// Stops after `max_iterations` steps, or earlier once lightness and
/// saturation are both pinned at their bounds and no step can change the
/// color. In either case the last color is returned unconverged.
#[must_use]
pub fn ensure_readability_with(
    fg: Rgb,
    bg: Rgb,
    min_contrast: f64,
    opts: &ReadabilityOptions,
) -> AdjustOutcome {
    let polarity = Polarity::of(bg);
    let mut color = fg.to_hsl();
    let mut realized = fg;
    let mut iterations = 0;

    while contrast_ratio(realized, bg) < min_contrast && iterations < opts.max_iterations {
        let lightness = match polarity {
            Polarity::Light => color.l - opts.step,
            Polarity::Dark => color.l + opts.step,
        };
        let next = color
            .with_lightness(lightness)
            .with_saturation(color.s + opts.step);
        iterations += 1;
        if next == color {
            break;
        }
        color = next;
        realized = color.to_rgb();
    }

    let converged = contrast_ratio(realized, bg) >= min_contrast;
    if !converged {
        debug!(
            fg = %fg,
            bg = %bg,
            min_contrast,
            achieved = contrast_ratio(realized, bg),
            iterations,
            "readability floor not reached"
        );
    }

    AdjustOutcome {
        color: realized,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// adjust_muted_color
// ---------------------------------------------------------------------------

/// Bring `fg` into `band` against `bg` and cap its saturation, with default
/// options. Best effort: see [`adjust_muted_color_with`].
#[must_use]
pub fn adjust_muted_color(fg: Rgb, bg: Rgb, band: ContrastBand) -> Rgb {
    adjust_muted_color_with(fg, bg, band, &MutedOptions::default()).color
}

/// Two bounded passes:
///
/// 1. Contrast: while outside `band`, step lightness and saturation by the
///    configured ratios (toward `bg` and greyer when contrast is too high,
///    away from `bg` and more vivid when too low). Stops inside the band,
///    after `max_iterations` steps, or when a step takes luminance past the
///    polarity's safety valve. The color closest to the band wins.
/// 2. Saturation: remove `desaturate_step` points at a time until the
///    realized color's saturation is at most the polarity's ceiling. Pure
///    grey always satisfies the ceiling, so this pass is bounded by
///    `100 / desaturate_step` steps.
///
/// Capping saturation at fixed lightness shifts luminance, so `converged`
/// is judged on the color actually returned, after both passes.
#[must_use]
pub fn adjust_muted_color_with(
    fg: Rgb,
    bg: Rgb,
    band: ContrastBand,
    opts: &MutedOptions,
) -> AdjustOutcome {
    let polarity = Polarity::of(bg);
    let mut color = fg.to_hsl();
    let mut best = (f64::INFINITY, color);
    let mut iterations = 0;

    loop {
        let contrast = contrast_ratio(color.to_rgb(), bg);
        let distance = band.distance(contrast);
        if distance < best.0 {
            best = (distance, color);
        }
        if band.contains(contrast) {
            break;
        }
        if iterations >= opts.max_iterations
            || (iterations > 0 && opts.hit_safety_valve(polarity, relative_luminance(color)))
        {
            break;
        }
        color = step_toward_band(color, contrast > band.max(), polarity, opts);
        iterations += 1;
    }

    let color = cap_saturation(best.1, opts.saturation_ceiling(polarity), opts.desaturate_step);
    let achieved = contrast_ratio(color, bg);
    let converged = band.contains(achieved);
    if !converged {
        debug!(
            fg = %fg,
            bg = %bg,
            min = band.min(),
            max = band.max(),
            achieved,
            iterations,
            "muted contrast band not reached"
        );
    }

    AdjustOutcome {
        color,
        iterations,
        converged,
    }
}

/// One step of the band search.
fn step_toward_band(color: Hsl, too_high: bool, polarity: Polarity, opts: &MutedOptions) -> Hsl {
    match (polarity, too_high) {
        // Too much contrast on dark: sink toward the background, greyer.
        (Polarity::Dark, true) => color
            .darken(opts.lightness_ratio)
            .desaturate(opts.desaturate_ratio),
        (Polarity::Dark, false) => color
            .lighten(opts.lightness_ratio)
            .saturate(opts.saturate_ratio),
        (Polarity::Light, true) => color
            .lighten(opts.lightness_ratio)
            .desaturate(opts.desaturate_ratio),
        (Polarity::Light, false) => color
            .darken(opts.lightness_ratio)
            .saturate(opts.saturate_ratio),
    }
}

/// Lower saturation until the 8-bit color measures at or under `ceiling`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn cap_saturation(mut color: Hsl, ceiling: f64, step: f64) -> Rgb {
    let step = if step > 0.0 { step } else { MutedOptions::default().desaturate_step };
    let max_steps = (100.0 / step).ceil() as u32 + 1;

    for _ in 0..max_steps {
        let realized = color.to_rgb();
        if realized.to_hsl().s <= ceiling {
            return realized;
        }
        color = color.with_saturation(color.s - step);
    }
    // Unreachable for a non-negative ceiling: saturation 0 realizes as grey.
    color.with_saturation(0.0).to_rgb()
}

// ---------------------------------------------------------------------------
// Utility colors
// ---------------------------------------------------------------------------

/// A strong counterpart to `background`: 60% darker if it is light, 60%
/// lighter if it is dark.
#[must_use]
pub fn contrasting_color(background: Rgb) -> Rgb {
    let hsl = background.to_hsl();
    match Polarity::of(background) {
        Polarity::Light => hsl.darken(0.6),
        Polarity::Dark => hsl.lighten(0.6),
    }
    .to_rgb()
}

/// Lighten `color` by `amount` of its current lightness.
#[must_use]
pub fn adjust_brightness(color: Rgb, amount: f64) -> Rgb {
    color.to_hsl().lighten(amount).to_rgb()
}

/// Mix two colors; `ratio` is the share of `b`.
#[must_use]
pub fn blend_colors(a: Rgb, b: Rgb, ratio: f64) -> Rgb {
    a.mix(b, ratio)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(hex: &str) -> Rgb {
        Rgb::from_hex(hex).unwrap()
    }

    fn dark_bg() -> Rgb {
        Hsl::new(230.0, 15.0, 9.0).to_rgb()
    }

    fn light_bg() -> Rgb {
        Hsl::new(230.0, 15.0, 97.0).to_rgb()
    }

    fn band(min: f64, max: f64) -> ContrastBand {
        ContrastBand::new(min, max).unwrap()
    }

    // ── ContrastBand ────────────────────────────────────────────────

    #[test]
    fn band_rejects_inverted_bounds() {
        assert_eq!(
            ContrastBand::new(3.5, 2.5),
            Err(ThemeError::DegenerateConstraint { min: 3.5, max: 2.5 })
        );
    }

    #[test]
    fn band_rejects_non_ratios() {
        assert!(ContrastBand::new(f64::NAN, 3.0).is_err());
        assert!(ContrastBand::new(2.0, f64::INFINITY).is_err());
        assert!(ContrastBand::new(0.5, 3.0).is_err());
    }

    #[test]
    fn band_allows_single_point() {
        let b = band(3.0, 3.0);
        assert!(b.contains(3.0));
        assert!(!b.contains(3.01));
    }

    #[test]
    fn band_distance() {
        let b = band(2.5, 3.5);
        assert!((b.distance(2.0) - 0.5).abs() < 1e-12);
        assert!((b.distance(4.0) - 0.5).abs() < 1e-12);
        assert!(b.distance(3.0).abs() < 1e-12);
    }

    #[test]
    fn band_deserialization_validates() {
        let ok: ContrastBand = serde_json::from_str(r#"{"min":1.5,"max":3.0}"#).unwrap();
        assert_eq!(ok, band(1.5, 3.0));
        let bad: std::result::Result<ContrastBand, _> =
            serde_json::from_str(r#"{"min":4.0,"max":3.0}"#);
        assert!(bad.is_err());
    }

    // ── Polarity ────────────────────────────────────────────────────

    #[test]
    fn polarity_of_backgrounds() {
        assert_eq!(Polarity::of(dark_bg()), Polarity::Dark);
        assert_eq!(Polarity::of(light_bg()), Polarity::Light);
    }

    // ── ensure_readability ──────────────────────────────────────────

    #[test]
    fn readability_already_good_is_untouched() {
        let out = ensure_readability_with(Rgb::WHITE, Rgb::BLACK, 5.5, &ReadabilityOptions::default());
        assert_eq!(out.color, Rgb::WHITE);
        assert_eq!(out.iterations, 0);
        assert!(out.converged);
    }

    #[test]
    fn readability_dark_background_lightens() {
        let fg = rgb("#3a3a4a");
        let bg = dark_bg();
        let out = ensure_readability_with(fg, bg, 5.5, &ReadabilityOptions::default());
        assert!(out.converged);
        assert!(contrast_ratio(out.color, bg) >= 5.5);
        assert!(out.color.to_hsl().l > fg.to_hsl().l, "should have lightened");
    }

    #[test]
    fn readability_light_background_darkens() {
        let fg = rgb("#c8c8d0");
        let bg = light_bg();
        let out = ensure_readability_with(fg, bg, 5.5, &ReadabilityOptions::default());
        assert!(out.converged);
        assert!(contrast_ratio(out.color, bg) >= 5.5);
        assert!(out.color.to_hsl().l < fg.to_hsl().l, "should have darkened");
    }

    #[test]
    fn readability_saturates_while_moving() {
        let fg = Hsl::new(200.0, 30.0, 30.0).to_rgb();
        let out = ensure_readability(fg, dark_bg(), 5.5);
        assert!(out.to_hsl().s > 30.0);
    }

    #[test]
    fn readability_black_on_black_recovers() {
        let out = ensure_readability_with(Rgb::BLACK, Rgb::BLACK, 5.5, &ReadabilityOptions::default());
        assert!(out.converged);
        assert!(contrast_ratio(out.color, Rgb::BLACK) >= 5.5);
    }

    #[test]
    fn readability_unreachable_target_is_bounded() {
        let out = ensure_readability_with(rgb("#777777"), dark_bg(), 25.0, &ReadabilityOptions::default());
        assert!(!out.converged);
        assert!(out.iterations <= 100);
        // Pushed all the way to white before giving up.
        assert_eq!(out.color, Rgb::WHITE);
    }

    #[test]
    fn readability_respects_custom_bound() {
        let opts = ReadabilityOptions {
            step: 1.0,
            max_iterations: 3,
        };
        let out = ensure_readability_with(rgb("#202020"), Rgb::BLACK, 5.5, &opts);
        assert_eq!(out.iterations, 3);
        assert!(!out.converged);
    }

    #[test]
    fn readability_keeps_hue() {
        let fg = Hsl::new(150.0, 40.0, 25.0).to_rgb();
        let out = ensure_readability(fg, dark_bg(), 5.5).to_hsl();
        let diff = (out.h - 150.0).abs();
        assert!(diff < 3.0, "hue drifted to {}", out.h);
    }

    // ── adjust_muted_color ──────────────────────────────────────────

    #[test]
    fn muted_dark_lands_in_band() {
        let bg = dark_bg();
        let out = adjust_muted_color_with(rgb("#c0c0d0"), bg, band(2.5, 3.5), &MutedOptions::default());
        assert!(out.converged, "{out:?}");
        let ratio = contrast_ratio(out.color, bg);
        assert!((2.3..=3.7).contains(&ratio), "contrast {ratio}");
    }

    #[test]
    fn muted_light_lands_in_band() {
        let bg = light_bg();
        let out = adjust_muted_color_with(rgb("#303040"), bg, band(1.5, 3.0), &MutedOptions::default());
        assert!(out.converged, "{out:?}");
        let ratio = contrast_ratio(out.color, bg);
        assert!((1.4..=3.2).contains(&ratio), "contrast {ratio}");
    }

    #[test]
    fn muted_dark_caps_saturation_at_20() {
        let out = adjust_muted_color(rgb("#ff0066"), dark_bg(), band(2.5, 3.5));
        assert!(out.to_hsl().s <= 20.0, "saturation {}", out.to_hsl().s);
    }

    #[test]
    fn muted_light_caps_saturation_at_40() {
        let out = adjust_muted_color(rgb("#0066ff"), light_bg(), band(1.5, 3.0));
        assert!(out.to_hsl().s <= 40.0, "saturation {}", out.to_hsl().s);
    }

    #[test]
    fn muted_black_on_dark_stops() {
        // Relative lightening cannot move black; the loop must still end.
        let out = adjust_muted_color_with(Rgb::BLACK, dark_bg(), band(2.5, 3.5), &MutedOptions::default());
        assert!(!out.converged);
        assert!(out.iterations <= 100);
    }

    #[test]
    fn muted_vivid_blue_reports_final_contrast() {
        // The band search settles on a saturated blue; the cap then greys it
        // out and its luminance climbs past the band.
        let bg = rgb("#14151a");
        let b = band(2.5, 3.5);
        let out = adjust_muted_color_with(rgb("#0000ff"), bg, b, &MutedOptions::default());
        let ratio = contrast_ratio(out.color, bg);
        assert!(ratio > b.max(), "{out:?}: {ratio:.2}");
        assert!(!out.converged, "{out:?}");
    }

    #[test]
    fn muted_converged_means_in_band_across_grid() {
        let opts = MutedOptions::default();
        for (bg, b) in [(dark_bg(), ContrastBand::MUTED_DARK), (light_bg(), ContrastBand::MUTED_LIGHT)] {
            for r in (0..=255u8).step_by(17) {
                for g in (0..=255u8).step_by(51) {
                    for bl in (0..=255u8).step_by(17) {
                        let fg = Rgb::new(r, g, bl);
                        let out = adjust_muted_color_with(fg, bg, b, &opts);
                        let ratio = contrast_ratio(out.color, bg);
                        assert_eq!(out.converged, b.contains(ratio), "{fg} on {bg}: {ratio:.3}");
                    }
                }
            }
        }
    }

    #[test]
    fn muted_point_band_terminates() {
        let out = adjust_muted_color_with(rgb("#808090"), dark_bg(), band(3.0, 3.0), &MutedOptions::default());
        assert!(out.iterations <= MutedOptions::default().max_iterations);
    }

    // ── Utility colors ──────────────────────────────────────────────

    #[test]
    fn contrasting_color_flips_polarity() {
        let on_dark = contrasting_color(dark_bg());
        assert!(on_dark.to_hsl().l > dark_bg().to_hsl().l);
        let on_light = contrasting_color(light_bg());
        assert!(on_light.to_hsl().l < light_bg().to_hsl().l);
    }

    #[test]
    fn blend_and_brightness() {
        assert_eq!(blend_colors(Rgb::BLACK, Rgb::WHITE, 1.0), Rgb::WHITE);
        let brighter = adjust_brightness(rgb("#404040"), 0.5);
        assert!(brighter.to_hsl().l > 25.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rgb() -> impl Strategy<Value = Rgb> {
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
        }

        proptest! {
            #[test]
            fn readability_bounded_and_honest(fg in any_rgb(), bg in any_rgb(), min in 1.0f64..10.0) {
                let out = ensure_readability_with(fg, bg, min, &ReadabilityOptions::default());
                prop_assert!(out.iterations <= 100);
                if out.converged {
                    prop_assert!(contrast_ratio(out.color, bg) >= min);
                }
            }

            #[test]
            fn muted_respects_saturation_ceiling(fg in any_rgb(), bg in any_rgb()) {
                let opts = MutedOptions::default();
                let out = adjust_muted_color_with(fg, bg, band(2.5, 3.5), &opts);
                let ceiling = opts.saturation_ceiling(Polarity::of(bg));
                prop_assert!(out.color.to_hsl().s <= ceiling + 0.5, "{out:?}");
                prop_assert!(out.iterations <= opts.max_iterations);
                if out.converged {
                    prop_assert!(band(2.5, 3.5).contains(contrast_ratio(out.color, bg)));
                }
            }
        }
    }
}
