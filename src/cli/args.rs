//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Navigate tree state: expand/collapse, selection, lazy directory loading
#[derive(Parser, Debug)]
#[command(name = "treenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding the local .treenav.toml (default: cwd)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "TREENAV_PROJECT_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a tree file or directory
    Show {
        /// Tree file (.toml) or directory
        #[arg(value_hint = ValueHint::AnyPath)]
        source: PathBuf,
        /// Render collapsed subtrees too
        #[arg(short, long)]
        all: bool,
        /// Mark this node as selected (e.g. src/Button); its ancestors are expanded
        #[arg(short, long)]
        select: Option<String>,
        /// Directory levels to load below the top level (default: scan_depth)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Expand nodes (all nodes when no path is given)
    Expand(MutateArgs),

    /// Collapse nodes (all nodes when no path is given)
    Collapse(MutateArgs),

    /// Flip the expanded flag of one node
    Toggle {
        /// Tree file (.toml) or directory
        #[arg(value_hint = ValueHint::AnyPath)]
        source: PathBuf,
        /// Node path, e.g. src/Button
        path: String,
        /// Print the resulting tree as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Print the seeded demo tree as TOML
    Generate {
        /// Nodes per level (default: generate.breadth)
        #[arg(short, long)]
        breadth: Option<usize>,
        /// Number of levels (default: generate.depth)
        #[arg(long)]
        depth: Option<usize>,
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

/// Arguments shared by `expand` and `collapse`.
#[derive(Args, Debug)]
pub struct MutateArgs {
    /// Tree file (.toml) or directory
    #[arg(value_hint = ValueHint::AnyPath)]
    pub source: PathBuf,
    /// Node paths, e.g. src/Button
    pub paths: Vec<String>,
    /// Print the resulting tree as TOML
    #[arg(long)]
    pub toml: bool,
    /// Directory levels to load below the top level (default: scan_depth)
    #[arg(long)]
    pub depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
