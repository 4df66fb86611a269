// SPDX-License-Identifier: MIT
//
// Subcommand handlers. Each one returns the text to print so the rendering
// can be tested without touching stdout.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use hf_color::{contrast_ratio, is_light};
use hf_theme::{
    ColorScheme, ColorVariables, CssRule, GenerationRequest, GeneratorConfig, LockedColors, PRESETS,
    apply_theme, ensure_readability_with, generate_palette_with, preset,
    regenerate_for_saturation_with, to_theme_variables,
};
use tracing::info;

use crate::cli::{ContrastArgs, GenerateArgs, OutputArgs, OutputFormat, ResaturateArgs, SchemesArgs};

pub fn run_generate(args: &GenerateArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;

    let mut request = match &args.preset {
        Some(name) => preset(name)?.request(args.dark, args.saturation),
        None => GenerationRequest::new(args.dark, args.hue, args.saturation, args.scheme),
    }
    .with_few(args.few);
    for &(role, color) in &args.locks {
        request = request.with_locked_color(role, color);
    }

    info!(
        scheme = %request.scheme,
        hue = request.base_hue,
        saturation = request.saturation,
        locked = request.locked.len(),
        "generate"
    );
    let palette = generate_palette_with(&request, &config);
    render(&palette, &args.output)
}

pub fn run_resaturate(args: &ResaturateArgs) -> Result<String> {
    let json = read_input(&args.palette)?;
    let current: ColorVariables = serde_json::from_str(&json)
        .with_context(|| format!("parsing palette {}", args.palette.display()))?;
    let locked: LockedColors = args.locks.iter().copied().collect();
    let config = load_config(args.config.as_deref())?;

    info!(saturation = args.saturation, locked = locked.len(), "resaturate");
    let palette = regenerate_for_saturation_with(&current, args.saturation, &locked, &config);
    render(&palette, &args.output)
}

pub fn run_schemes(args: &SchemesArgs) -> String {
    let width = ColorScheme::all().iter().map(|s| s.name().len()).max().unwrap_or(0);
    ColorScheme::all()
        .iter()
        .map(|&scheme| {
            let hues = if args.few { scheme.generate_few(args.hue) } else { scheme.generate(args.hue) };
            let hues: Vec<String> = hues.iter().map(|h| format!("{h:.1}")).collect();
            format!("{:<width$}  {}\n", scheme.name(), hues.join(" "))
        })
        .collect()
}

pub fn run_presets() -> String {
    PRESETS
        .iter()
        .map(|p| format!("{:<10} hue {:>5.1}  {}\n", p.name, p.base_hue, p.scheme))
        .collect()
}

pub fn run_contrast(args: &ContrastArgs) -> String {
    let ratio = contrast_ratio(args.fg, args.bg);
    let polarity = if is_light(args.bg) { "light" } else { "dark" };
    let mut lines = vec![
        format!("fg        {}", args.fg),
        format!("bg        {} ({polarity})", args.bg),
        format!("ratio     {ratio:.2}"),
    ];

    if ratio >= args.min {
        lines.push(format!("readable  yes (>= {:.2})", args.min));
    } else {
        let outcome = ensure_readability_with(
            args.fg,
            args.bg,
            args.min,
            &GeneratorConfig::default().readability,
        );
        lines.push(format!(
            "adjusted  {} ratio {:.2} after {} steps{}",
            outcome.color,
            contrast_ratio(outcome.color, args.bg),
            outcome.iterations,
            if outcome.converged { "" } else { " (floor not reached)" }
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Format a palette for output.
pub fn render(palette: &ColorVariables, output: &OutputArgs) -> Result<String> {
    Ok(match output.format {
        OutputFormat::Css => {
            let mut rule = CssRule::new(output.selector.as_str());
            apply_theme(&to_theme_variables(palette), &mut rule);
            format!("{rule}\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(palette)? + "\n",
        OutputFormat::Vars => serde_json::to_string_pretty(&to_theme_variables(palette))? + "\n",
    })
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GeneratorConfig::from_json_str(&json).with_context(|| format!("loading config {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading palette from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading palette {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
