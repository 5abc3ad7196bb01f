//! Configuration management for `logokit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths]
//! │   ├── dark       # [dark]
//! │   ├── nobg       # [nobg]
//! │   └── trim       # [trim]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # LogoConfig (this file)
//! ```
//!
//! The config file is optional. Without one every section takes its
//! defaults and the current directory is the project root. Command-line
//! flags override file values.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{DarkConfig, NobgConfig, PathsConfig, TrimConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug,
    image::Operation,
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the current directory.
pub const CONFIG_FILE: &str = "logokit.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing logokit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Default file locations
    pub paths: PathsConfig,

    /// Dark-to-white recolor
    pub dark: DarkConfig,

    /// Near-white-to-transparent recolor
    pub nobg: NobgConfig,

    /// Border trimming
    pub trim: TrimConfig,
}

impl LogoConfig {
    /// Load configuration for the given command line.
    ///
    /// An explicitly passed `--config` must exist; the default name is
    /// optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let name = cli.config.as_deref().unwrap_or(Path::new(CONFIG_FILE));

        let mut config = match find_config_file(name, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None if cli.config.is_some() => {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    name.display()
                )));
            }
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(&cli.command);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Image used when the command line names none.
    pub fn default_input(&self) -> PathBuf {
        self.root_join(&self.paths.input)
    }

    /// Pixel operation selected by `command`, with configured parameters.
    pub fn operation(&self, command: &Commands) -> Operation {
        match command {
            Commands::Dark { .. } => Operation::Dark(self.dark.rule()),
            Commands::Trim { .. } => Operation::Trim(self.trim.tolerance()),
            Commands::Nobg { .. } => Operation::NoBackground(self.nobg.rule()),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Dark {
                red_below,
                green_below,
                ..
            } => {
                Self::update_option(&mut self.dark.red_below, red_below.as_ref());
                Self::update_option(&mut self.dark.green_below, green_below.as_ref());
            }
            Commands::Trim { scale, offset, .. } => {
                Self::update_option(&mut self.trim.scale, scale.as_ref());
                Self::update_option(&mut self.trim.offset, offset.as_ref());
            }
            Commands::Nobg { threshold, .. } => {
                Self::update_option(&mut self.nobg.threshold, threshold.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, reporting every error at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.paths.validate(&mut diag);
        self.nobg.validate(&mut diag);
        self.trim.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Parse a config snippet, failing the test on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> LogoConfig {
    let (parsed, ignored) = LogoConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
