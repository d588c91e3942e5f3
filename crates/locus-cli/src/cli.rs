use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "locus",
    about = "Inspect object identifiers and loader sequences",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse identifiers and show their fields
    Parse(ParseArgs),
    /// Show the candidate each sequence entry produces for an identifier
    Expand(ExpandArgs),
    /// Print the effective loader configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Identifiers such as `type://application/package.path.name`
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// Identifier to expand
    pub identifier: String,
    /// Loader configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Sequence entries to try instead of the configured sequence
    #[arg(short, long = "template")]
    pub templates: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Loader configuration file (TOML); defaults are printed when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
