//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --config) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// schema-sync - regenerate API clients whenever the schema changes
#[derive(Parser, Debug)]
#[command(name = "schema-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./schema-sync.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the schema file and broadcast it to connected clients
    Serve {
        /// Schema file to watch
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Follow a server and regenerate the client on every schema change
    Follow {
        /// Server WebSocket URL
        #[arg(short, long)]
        url: Option<String>,

        /// Generator output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Feed a local schema file through the agent once and exit
    Sync {
        /// Schema file to apply
        #[arg(short, long)]
        file: PathBuf,

        /// Generator output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the fingerprint of a file
    Fingerprint {
        /// File to hash
        path: PathBuf,
    },
}
