//! CLI subcommands.

pub mod generate;
pub mod knobs;
pub mod process;
