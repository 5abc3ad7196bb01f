//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Logo touch-up tool: dark-mode recolor, border trim, background removal
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: logokit.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Turn dark pixels white to produce a dark-mode logo
    #[command(visible_alias = "d")]
    Dark {
        #[command(flatten)]
        io: IoArgs,

        /// Pixel is dark when red is below this value
        #[arg(long, value_name = "N")]
        red_below: Option<u8>,

        /// Pixel is dark when green is below this value
        #[arg(long, value_name = "N")]
        green_below: Option<u8>,
    },

    /// Crop a uniform border (color taken from the top-left pixel)
    #[command(visible_alias = "t")]
    Trim {
        #[command(flatten)]
        io: IoArgs,

        /// Divisor applied to the doubled channel difference
        #[arg(long, value_name = "F")]
        scale: Option<f32>,

        /// Added to the scaled difference before clamping
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        offset: Option<i32>,
    },

    /// Make near-white pixels transparent
    #[command(visible_alias = "n")]
    Nobg {
        #[command(flatten)]
        io: IoArgs,

        /// Red, green and blue must all exceed this value
        #[arg(short, long, value_name = "N")]
        threshold: Option<u8>,
    },
}

/// Input/output arguments shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct IoArgs {
    /// Images to process. If omitted, uses `[paths] input` from the config.
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only). Defaults to the input itself, or
    /// `<stem>-dark.png` next to it for `dark`.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl Commands {
    pub const fn io(&self) -> &IoArgs {
        match self {
            Self::Dark { io, .. } | Self::Trim { io, .. } | Self::Nobg { io, .. } => io,
        }
    }

    pub const fn is_dark(&self) -> bool {
        matches!(self, Self::Dark { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases_and_overrides() {
        let cli = Cli::try_parse_from(["logokit", "t", "a.png", "--offset", "-80"]).unwrap();
        match cli.command {
            Commands::Trim { io, scale, offset } => {
                assert_eq!(io.inputs, vec![PathBuf::from("a.png")]);
                assert_eq!(scale, None);
                assert_eq!(offset, Some(-80));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["logokit", "nobg", "-v", "-C", "x.toml", "-t", "200"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Nobg { threshold: Some(200), .. }));
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["logokit", "nobg", "-t", "256"]).is_err());
    }
}
