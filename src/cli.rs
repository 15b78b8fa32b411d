use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Data source per chart: the built-in subject table, or thresholds
    /// typed in at the prompt
    #[arg(long, value_enum, default_value = "table")]
    pub mode: Mode,

    /// Path to config TOML
    #[arg(long, default_value = "audiogram.toml")]
    pub config: String,

    /// Override the configured output directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Look identifiers up in the built-in table
    Table,
    /// Prompt for six thresholds per ear
    Entry,
}
