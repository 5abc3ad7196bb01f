//! Configuration section definitions.
//!
//! Each module corresponds to a section in `logokit.toml`:
//!
//! | Module  | TOML Section | Purpose                                |
//! |---------|--------------|----------------------------------------|
//! | `paths` | `[paths]`    | Default input, dark-variant suffix     |
//! | `dark`  | `[dark]`     | Dark-to-white limits                   |
//! | `nobg`  | `[nobg]`     | Near-white threshold                   |
//! | `trim`  | `[trim]`     | Border tolerance                       |

mod dark;
mod nobg;
mod paths;
mod trim;

pub use dark::DarkConfig;
pub use nobg::NobgConfig;
pub use paths::PathsConfig;
pub use trim::TrimConfig;
