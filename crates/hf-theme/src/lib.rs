//! # hf-theme: harmonic palette engine
//!
//! Derives a complete, named UI palette from a base hue, a saturation and
//! a harmonic scheme, while leaving user-locked colors untouched. One
//! parameter shift (base hue, scheme, dark/light) produces an entirely new
//! coherent palette with its text kept readable.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest { is_dark, base_hue, saturation, scheme, locked }
//!     │
//!     ▼
//! scheme.rs:   generate hue list (pure math)
//!     │
//!     ▼
//! palette.rs:  assign hues to color roles, realize as RGB, overlay locks
//!     │
//!     ▼
//! contrast.rs: readability floors and muted bands against paired backgrounds
//!     │
//!     ▼
//! mapping.rs:  role → external variable name (ThemeVariables)
//!     │
//!     ▼
//! sink.rs:     write "H S% L%" values to a StyleSink
//! ```
//!
//! # Color Space
//!
//! Generation happens in HSL. Every role is stored as 8-bit RGB, and contrast
//! is always measured on the stored color, never on the unrounded HSL.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Small integer-to-float casts (loop indices, hue steps).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]
// Scheme dispatch and the role table are one arm or row per entry.
#![allow(clippy::too_many_lines)]

pub mod config;
pub mod contrast;
pub mod error;
pub mod mapping;
pub mod palette;
pub mod presets;
pub mod roles;
pub mod scheme;
pub mod sink;

pub use config::GeneratorConfig;
pub use contrast::{
    AdjustOutcome, ContrastBand, MutedOptions, Polarity, ReadabilityOptions, adjust_brightness,
    adjust_muted_color, adjust_muted_color_with, blend_colors, contrasting_color,
    ensure_readability, ensure_readability_with,
};
pub use error::{Result, ThemeError};
pub use mapping::{
    MAPPING_VERSION, ThemeVariables, role_for_variable, to_theme_variables, variable_for_role,
};
pub use palette::{
    GenerationRequest, generate_palette, generate_palette_with, regenerate_for_saturation,
    regenerate_for_saturation_with,
};
pub use presets::{PRESETS, Preset, preset, preset_names};
pub use roles::{ColorRole, ColorVariables, LockedColors, PartialColors};
pub use scheme::{ColorScheme, generate_scheme_hues, generate_scheme_hues_named, harmonized_color};
pub use sink::{CssRule, StyleSink, apply_theme};
