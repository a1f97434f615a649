//! Command-line argument surface, via `clap` derive.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Colourise valgrind output.
///
/// With `-i` a pre-captured log file is read and colourised; otherwise the
/// remaining arguments are forwarded to `valgrind` and its diagnostic stream
/// is colourised live, with the program's own stdout passed through.
#[derive(Debug, Parser)]
#[command(name = "vgcolour", version, about)]
pub struct VgArgs {
    /// Valgrind log file to run through the colour filters.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// When to emit colour escape sequences.
    #[arg(long, value_enum, default_value = "auto")]
    pub colour: ColourChoice,

    /// Arguments forwarded verbatim to valgrind.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub valgrind_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColourChoice {
    /// Colour only when stdout is a terminal.
    Auto,
    Always,
    Never,
}

impl ColourChoice {
    pub fn coloured(self) -> bool {
        match self {
            ColourChoice::Always => true,
            ColourChoice::Never => false,
            ColourChoice::Auto => atty::is(atty::Stream::Stdout),
        }
    }
}
