//! `[dark]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [dark]
//! red_below = 100     # Pixel is dark when red < red_below ...
//! green_below = 100   # ... and green < green_below
//! ```

use serde::{Deserialize, Serialize};

use crate::image::DarkRule;

/// Limits for the dark-to-white recolor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkConfig {
    pub red_below: u8,
    pub green_below: u8,
}

impl Default for DarkConfig {
    fn default() -> Self {
        let rule = DarkRule::default();
        Self {
            red_below: rule.red_below,
            green_below: rule.green_below,
        }
    }
}

impl DarkConfig {
    pub const fn rule(&self) -> DarkRule {
        DarkRule {
            red_below: self.red_below,
            green_below: self.green_below,
        }
    }
}
