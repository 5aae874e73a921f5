use crate::args::ConfigCommand;
use crate::context::ExecutionContext;
use anyhow::Result;
use owo_colors::OwoColorize;
use qhse_client::Config;

pub fn handle(ctx: &ExecutionContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = ctx.config()?;
            println!("Config file: {}", ctx.config_path().display());
            println!("  api_base_url = {}", config.api_base_url);
            println!("  timeout_secs = {}", config.timeout_secs);
            println!("  verify_tls   = {}", config.verify_tls);
        }
        ConfigCommand::Init { api_url } => {
            let path = ctx.config_path();
            if path.exists() {
                println!("Config already exists at {}", path.display());
                return Ok(());
            }
            let mut config = Config::default();
            if let Some(url) = api_url {
                config.api_base_url = url;
            }
            config.save_to(&path)?;
            println!("{} wrote {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}
