use super::enums::{ModuleArg, PeriodeArg};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Manage incident declarations")]
    Incident {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Manage the risk register")]
    Risk {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Manage trainings and participants")]
    Training {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Manage chemical products and safety data sheets")]
    Chemical {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Manage personal protective equipment")]
    Ppe {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Manage hygiene checks")]
    Hygiene {
        #[command(subcommand)]
        command: EntityCommand,
    },

    #[command(about = "Show server-computed aggregate statistics")]
    Stats {
        #[arg(long, help = "Restrict to one module")]
        module: Option<ModuleArg>,

        #[arg(long, default_value = "30j")]
        periode: PeriodeArg,
    },

    #[command(about = "Browse all modules interactively")]
    Browse {
        #[arg(long, help = "Module screen to open first")]
        module: Option<ModuleArg>,
    },

    #[command(about = "Manage the stored API session")]
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    #[command(about = "Manage qhse configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// The five collection verbs, shared by every module namespace.
#[derive(Subcommand)]
pub enum EntityCommand {
    #[command(about = "List the collection")]
    List {
        #[arg(long, help = "Filter by status")]
        statut: Option<String>,

        #[arg(long, help = "Filter by zone")]
        zone: Option<String>,

        #[arg(long, help = "Case-insensitive substring search")]
        search: Option<String>,
    },

    #[command(about = "Show one entity")]
    Show { id: String },

    #[command(about = "Create an entity from a JSON draft file")]
    Create {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },

    #[command(about = "Update an entity from a JSON draft file")]
    Edit {
        id: String,

        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },

    #[command(about = "Delete an entity")]
    Delete {
        id: String,

        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    #[command(about = "Store a bearer token for API calls")]
    Login {
        #[arg(long)]
        token: String,
    },

    #[command(about = "Clear the stored session")]
    Logout,

    #[command(about = "Show whether a session is stored")]
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the active configuration")]
    Show,

    #[command(about = "Write a default config file")]
    Init {
        #[arg(long, help = "API base URL to record")]
        api_url: Option<String>,
    },
}
