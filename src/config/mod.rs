pub mod cli;
pub mod toml_config;

pub use toml_config::{HookConfig, LogFormat};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "vizhook")]
#[command(about = "Turn chart, table and diagram blocks in an agent response into UI events")]
pub struct CliConfig {
    /// Response file to read; stdin when omitted
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, help = "Read the input as a JSON conversation state instead of raw text")]
    pub conversation: bool,

    /// Path to a TOML hook configuration
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Write CSV/JSON/Mermaid exports for every record to this directory")]
    pub export_dir: Option<String>,

    #[arg(long, requires = "export_dir", help = "Pack the exports into a single zip archive")]
    pub bundle: bool,

    #[arg(long, help = "Print the agent system instructions and exit")]
    pub print_instructions: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
