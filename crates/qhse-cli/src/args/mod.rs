// NOTE: Command Organization Rationale
//
// Why namespaced subcommands (not flat)?
// - Six modules × five verbs would be thirty flat commands
// - `qhse incident list` / `qhse risk show` groups by module the way the
//   API groups its routes, and every module shares one EntityCommand shape

mod commands;
mod enums;

pub use commands::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "qhse")]
#[command(about = "Terminal client for QHSE management", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Data directory (config and session)")]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "Override the configured API base URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
