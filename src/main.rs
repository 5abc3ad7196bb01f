//! logokit - pixel-level touch-ups for logo images.
//!
//! | Command | Effect                                      |
//! |---------|---------------------------------------------|
//! | `dark`  | dark pixels to white (dark-mode variant)    |
//! | `trim`  | crop a uniform border                       |
//! | `nobg`  | near-white pixels to transparent            |

mod cli;
mod config;
mod image;
mod logger;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::LogoConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = LogoConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    cli::run::run(&cli.command, &config)
}
