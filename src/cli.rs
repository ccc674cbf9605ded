use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "conflictmap")]
#[command(
    about = "Metadata conflict and regression analyzer for deployment exports",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report conflicting components and production regressions
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the deployment plan for one developer, or for everyone
    Developer {
        #[command(flatten)]
        input: InputArgs,

        /// Developer name as it appears in the export
        #[arg(short = 'n', long = "name", required_unless_present = "all")]
        name: Option<String>,

        /// Plans for every developer with an affected story
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Options shared by every command that reads an export.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Deployment export (CSV)
    pub deployment: PathBuf,

    /// Production baseline export (CSV)
    #[arg(short, long)]
    pub baseline: Option<PathBuf>,

    /// Output format (defaults to the config file's choice, then terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Evaluate ages as of this date instead of the current time
    #[arg(long = "as-of")]
    pub as_of: Option<String>,

    /// Configuration file (skips discovery)
    #[arg(short, long, env = "CONFLICTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

impl Commands {
    /// Verbosity requested on the command line, zero for commands without one.
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Analyze { input } | Commands::Developer { input, .. } => input.verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
