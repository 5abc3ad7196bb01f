//! `[nobg]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [nobg]
//! threshold = 240   # r, g and b all above this become transparent
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::WhiteRule;

/// Threshold for the near-white-to-transparent recolor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NobgConfig {
    pub threshold: u8,
}

impl Default for NobgConfig {
    fn default() -> Self {
        Self {
            threshold: WhiteRule::default().threshold,
        }
    }
}

impl NobgConfig {
    pub const THRESHOLD: FieldPath = FieldPath::new("nobg.threshold");

    pub const fn rule(&self) -> WhiteRule {
        WhiteRule {
            threshold: self.threshold,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.threshold == u8::MAX {
            diag.warn(Self::THRESHOLD, "255 matches no pixel, nothing will be removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_nobg_config() {
        let config = test_parse_config("[nobg]\nthreshold = 200");
        assert_eq!(config.nobg.rule().threshold, 200);
    }

    #[test]
    fn test_nobg_max_threshold_only_warns() {
        let config = test_parse_config("[nobg]\nthreshold = 255");
        let mut diag = ConfigDiagnostics::new();
        config.nobg.validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }
}
