pub mod discover;

use clap::{ArgAction, Args, Parser, Subcommand};
use sweepr_common::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_MS};
use sweepr_common::network::range::NetworkRange;

#[derive(Parser)]
#[command(name = "sweepr", version)]
#[command(about = "Finds the live hosts of an IPv4 subnet.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print more diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print less (-q drops decorations, -qq prints only the summary)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover the live hosts of a subnet
    #[command(alias = "d")]
    Discover(DiscoverArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Subnet in CIDR notation, e.g. 192.168.1.0/24
    pub target: NetworkRange,

    /// Per-host timeout in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Maximum number of hosts probed at once
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Probe one host at a time
    #[arg(long)]
    pub sequential: bool,

    /// Skip the hardware vendor lookup
    #[arg(long)]
    pub no_vendor: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
