use crate::args::AuthCommand;
use crate::context::ExecutionContext;
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn handle(ctx: &ExecutionContext, command: AuthCommand) -> Result<()> {
    let store = ctx.session();

    match command {
        AuthCommand::Login { token } => {
            store.save(&token)?;
            println!("{} session stored", "✓".green().bold());
        }
        AuthCommand::Logout => {
            store.clear()?;
            println!("{} session cleared", "✓".green().bold());
        }
        AuthCommand::Status => {
            if store.is_logged_in() {
                println!("Session: {}", "stored".green());
            } else {
                println!("Session: {}", "none".yellow());
                println!("Run 'qhse auth login --token <TOKEN>' to store one.");
            }
        }
    }

    Ok(())
}
