//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Add numbers stored as reversed digit chains, and run JSON test-case files against the adder
#[derive(Parser, Debug)]
#[command(name = "digitchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add two numbers
    Add {
        /// First operand (decimal, or digit list with --lsd)
        a: String,
        /// Second operand (decimal, or digit list with --lsd)
        b: String,
        /// Operands are least-significant-first digit lists, e.g. "2,4,3"; "" is the absent chain
        #[arg(long)]
        lsd: bool,
    },

    /// Run testcases.json files against the adder
    Run {
        /// Case files (default: discover under problems_dir)
        #[arg(value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
        /// Problems directory to discover case files in (overrides config)
        #[arg(short, long, conflicts_with = "files", value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
