//! Image processing.
//!
//! # Modules
//!
//! - [`recolor`]: per-pixel dark-to-white and white-to-transparent passes
//! - [`trim`]: uniform border detection and cropping
//! - [`process`]: file-level decode/transform/encode

pub mod process;
pub mod recolor;
pub mod trim;

pub use process::{Change, Operation, process_file};
pub use recolor::{DarkRule, WhiteRule};
pub use trim::Tolerance;
