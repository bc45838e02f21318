//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// docroute documentation route tooling CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Routes directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub routes: Option<PathBuf>,

    /// Config file path (default: docroute.toml)
    #[arg(short = 'C', long, default_value = "docroute.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve meta and sidebar JSON endpoints
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Query meta or sidebar data for a route parameter
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub target: QueryTarget,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// What to query.
#[derive(Subcommand, Debug, Clone)]
pub enum QueryTarget {
    /// Parsed markdown metadata for a slug parameter
    Meta {
        /// Route parameter (underscores decode to path separators)
        param: String,
    },

    /// Sidebar links for a directory parameter
    Sidebar {
        /// Route parameter naming a directory under the routes root
        param: String,
    },
}
