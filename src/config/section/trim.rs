//! `[trim]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [trim]
//! scale = 2.0     # shifted = (d + d) / scale + offset
//! offset = -100   # defaults: a channel counts when d > 100
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::Tolerance;

/// Tolerance for border detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub scale: f32,
    pub offset: i32,
}

impl Default for TrimConfig {
    fn default() -> Self {
        let tolerance = Tolerance::default();
        Self {
            scale: tolerance.scale,
            offset: tolerance.offset,
        }
    }
}

impl TrimConfig {
    pub const SCALE: FieldPath = FieldPath::new("trim.scale");
    pub const OFFSET: FieldPath = FieldPath::new("trim.offset");

    pub const fn tolerance(&self) -> Tolerance {
        Tolerance {
            scale: self.scale,
            offset: self.offset,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            diag.error(
                Self::SCALE,
                format!("must be a positive number, got {}", self.scale),
            );
        }
        if !(-255..=255).contains(&self.offset) {
            diag.error_with_hint(
                Self::OFFSET,
                format!("must be within -255..=255, got {}", self.offset),
                "beyond that range every pixel, or none, counts as content",
            );
        }
    }
}
