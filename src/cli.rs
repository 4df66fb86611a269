// SPDX-License-Identifier: MIT
//
// Command-line definitions.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use hf_color::Rgb;
use hf_theme::{ColorRole, ColorScheme};

#[derive(Debug, Parser)]
#[command(
    name = "hueforge",
    version,
    about = "Generate harmonic, contrast-checked UI color palettes from a single hue",
    long_about = "Generate harmonic, contrast-checked UI color palettes from a single hue.\n\n\
                  A scheme spreads the base hue into related hues, every role is realized\n\
                  at its own lightness, and text roles are pushed until they read against\n\
                  their background. Locked roles are passed through untouched."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (-q errors only, -qq silent).
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Log output format. Logs always go to stderr.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a palette.
    Generate(GenerateArgs),

    /// Re-derive the saturation of an existing palette, keeping hue and lightness.
    Resaturate(ResaturateArgs),

    /// List every scheme and the hues it produces for a base hue.
    Schemes(SchemesArgs),

    /// List the named presets.
    Presets,

    /// Measure the contrast of two colors and fix the foreground if needed.
    Contrast(ContrastArgs),
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Base hue in degrees (normalized into [0, 360)).
    #[arg(long, default_value_t = 210.0, allow_negative_numbers = true)]
    pub hue: f64,

    /// Saturation in percent (clamped into [0, 100]).
    #[arg(long, default_value_t = 60.0)]
    pub saturation: f64,

    /// Harmonic scheme, e.g. triadic, golden-ratio, metatrons-cube.
    #[arg(long, default_value = "analogous")]
    pub scheme: ColorScheme,

    /// Start from a named preset (overrides --hue and --scheme).
    #[arg(long)]
    pub preset: Option<String>,

    /// Generate a dark theme.
    #[arg(long)]
    pub dark: bool,

    /// Use at most five scheme hues.
    #[arg(long)]
    pub few: bool,

    /// Pin a role to a color. Repeatable.
    #[arg(long = "lock", value_name = "ROLE=#HEX", value_parser = parse_lock)]
    pub locks: Vec<(ColorRole, Rgb)>,

    /// JSON generator config (contrast floors, muted bands, adjuster bounds).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser)]
pub struct ResaturateArgs {
    /// Palette JSON as written by `generate --format json` ("-" for stdin).
    #[arg(value_name = "PALETTE")]
    pub palette: PathBuf,

    /// New saturation in percent.
    #[arg(long)]
    pub saturation: f64,

    /// Keep a role unchanged. Repeatable.
    #[arg(long = "lock", value_name = "ROLE")]
    pub locks: Vec<ColorRole>,

    /// JSON generator config (muted saturation ceilings).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser)]
pub struct SchemesArgs {
    /// Base hue in degrees.
    #[arg(long, default_value_t = 210.0, allow_negative_numbers = true)]
    pub hue: f64,

    /// Show only the first five hues of each scheme.
    #[arg(long)]
    pub few: bool,
}

#[derive(Debug, Parser)]
pub struct ContrastArgs {
    /// Foreground color (#rgb or #rrggbb).
    pub fg: Rgb,

    /// Background color (#rgb or #rrggbb).
    pub bg: Rgb,

    /// Contrast floor to enforce on the foreground.
    #[arg(long, default_value_t = 4.5)]
    pub min: f64,
}

#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "css")]
    pub format: OutputFormat,

    /// CSS selector for `--format css`.
    #[arg(long, default_value = ":root")]
    pub selector: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A CSS rule of custom properties in "H S% L%" form.
    Css,
    /// The palette as a role → hex JSON map (input for `resaturate`).
    Json,
    /// External variable name → hex JSON map.
    Vars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse `role=#hex`.
fn parse_lock(s: &str) -> anyhow::Result<(ColorRole, Rgb)> {
    let Some((role, color)) = s.split_once('=') else {
        bail!("expected ROLE=#HEX, got {s:?}");
    };
    let role = role.trim().parse::<ColorRole>()?;
    let color = color
        .trim()
        .parse::<Rgb>()
        .with_context(|| format!("lock for {role}"))?;
    Ok((role, color))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
