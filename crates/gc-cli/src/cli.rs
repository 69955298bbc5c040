//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Golden config - compare device backups against intended configurations
#[derive(Parser, Debug)]
#[command(name = "golden-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Input documents shared by the commands that need them
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Golden config settings (toml, json or yaml)
    #[arg(long, env = "GOLDEN_CONFIG_SETTINGS")]
    pub settings: PathBuf,

    /// Compliance rules document
    #[arg(long, env = "GOLDEN_CONFIG_RULES")]
    pub rules: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run compliance for a set of devices
    ///
    /// Examples:
    ///   golden-config compliance --settings gc.toml --rules rules.yaml --devices devices.yaml
    ///   golden-config compliance ... --platform cisco_ios --filter site.slug=ams01
    ///   golden-config compliance ... --store ./results --json
    Compliance {
        #[command(flatten)]
        inputs: Inputs,

        /// Device inventory document
        #[arg(long, env = "GOLDEN_CONFIG_DEVICES")]
        devices: PathBuf,

        /// Directory for per-device result documents (kept in memory if omitted)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Devices evaluated concurrently (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Only devices with this name
        #[arg(short = 'd', long = "device")]
        names: Vec<String>,

        /// Only devices of this platform
        #[arg(short, long = "platform")]
        platforms: Vec<String>,

        /// Only devices whose attribute equals a value, as `path=value`
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the unified diff between a backup and an intended file
    Diff {
        /// Backup configuration file
        backup: PathBuf,

        /// Intended configuration file
        intended: PathBuf,

        /// Lines of context around each change
        #[arg(short = 'U', long, default_value_t = 3)]
        context: usize,
    },

    /// Load and validate settings and rules
    Validate {
        #[command(flatten)]
        inputs: Inputs,
    },
}
