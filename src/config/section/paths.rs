//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! input = "public/logo.png"   # Used when no INPUT is given
//! dark_suffix = "-dark"       # logo.png -> logo-dark.png
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Default file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Image processed when the command line names none.
    /// Relative paths are resolved against the project root.
    pub input: PathBuf,

    /// Appended to the file stem to name the dark variant.
    pub dark_suffix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("public/logo.png"),
            dark_suffix: "-dark".to_string(),
        }
    }
}

impl PathsConfig {
    pub const INPUT: FieldPath = FieldPath::new("paths.input");
    pub const DARK_SUFFIX: FieldPath = FieldPath::new("paths.dark_suffix");

    /// Output path of the dark variant of `input`.
    ///
    /// `public/logo.png` -> `public/logo-dark.png`
    pub fn dark_output(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        input.with_file_name(format!("{stem}{}.png", self.dark_suffix))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.input.as_os_str().is_empty() {
            diag.error(Self::INPUT, "must not be empty");
        }
        if self.dark_suffix.is_empty() {
            diag.error_with_hint(
                Self::DARK_SUFFIX,
                "must not be empty",
                "an empty suffix would overwrite the source logo, pass `-o` instead",
            );
        } else if self.dark_suffix.contains(['/', '\\']) {
            diag.error(Self::DARK_SUFFIX, "must not contain path separators");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::test_parse_config;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.input, Path::new("public/logo.png"));
        assert_eq!(config.paths.dark_suffix, "-dark");
    }

    #[test]
    fn test_dark_output() {
        let config = test_parse_config("[paths]\ndark_suffix = \"_night\"");
        assert_eq!(
            config.paths.dark_output(Path::new("public/logo.png")),
            Path::new("public/logo_night.png")
        );
        assert_eq!(
            config.paths.dark_output(Path::new("brand.jpg")),
            Path::new("brand_night.png")
        );
    }
}
