// SPDX-License-Identifier: MIT
//
// hueforge: harmonic UI palettes from a single hue.
//
// This is the binary that wires the crates together:
//
//   hf-color → hex/HSL conversion, luminance, contrast ratio
//   hf-theme → schemes, contrast adjusters, palette generation, style sinks
//
// The binary plays the host role the engine expects: it owns the lock set
// for one invocation, calls the engine, and applies the result to a sink.
// Each invocation flows through:
//
//   args → GenerationRequest → generate_palette → ThemeVariables → CssRule → stdout
//
// Logs go to stderr so stdout can be piped straight into a stylesheet.

mod cli;
mod commands;
mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::logging::{LogConfig, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet).with_format(cli.log_format.into());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> anyhow::Result<()> {
    let text = match command {
        Command::Generate(args) => commands::run_generate(args)?,
        Command::Resaturate(args) => commands::run_resaturate(args)?,
        Command::Schemes(args) => commands::run_schemes(args),
        Command::Presets => commands::run_presets(),
        Command::Contrast(args) => commands::run_contrast(args),
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
