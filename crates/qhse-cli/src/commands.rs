use crate::args::{Cli, Commands, EntityCommand, OutputFormat};
use crate::context::ExecutionContext;
use crate::handlers;
use anyhow::Result;
use qhse_types::Module;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.data_dir.as_deref(), cli.api_url.clone())?;

    let Some(command) = cli.command else {
        show_guidance(&ctx);
        return Ok(());
    };

    match command {
        Commands::Incident { command } => run_entity(&ctx, Module::Incidents, command, cli.format),
        Commands::Risk { command } => run_entity(&ctx, Module::Risques, command, cli.format),
        Commands::Training { command } => run_entity(&ctx, Module::Formations, command, cli.format),
        Commands::Chemical { command } => run_entity(&ctx, Module::Chimique, command, cli.format),
        Commands::Ppe { command } => run_entity(&ctx, Module::Epi, command, cli.format),
        Commands::Hygiene { command } => run_entity(&ctx, Module::Hygiene, command, cli.format),

        Commands::Stats { module, periode } => {
            handlers::stats::handle(&ctx, module.map(Into::into), periode.into(), cli.format)
        }

        Commands::Browse { module } => handlers::browse::handle(&ctx, module.map(Into::into)),

        Commands::Auth { command } => handlers::auth::handle(&ctx, command),

        Commands::Config { command } => handlers::config_cmd::handle(&ctx, command),
    }
}

fn run_entity(
    ctx: &ExecutionContext,
    module: Module,
    command: EntityCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        EntityCommand::List {
            statut,
            zone,
            search,
        } => handlers::entity::list(ctx, module, statut, zone, search, format),
        EntityCommand::Show { id } => handlers::entity::show(ctx, module, &id, format),
        EntityCommand::Create { file } => handlers::entity::create(ctx, module, &file, format),
        EntityCommand::Edit { id, file } => handlers::entity::edit(ctx, module, &id, &file, format),
        EntityCommand::Delete { id, yes } => handlers::entity::delete(ctx, module, &id, yes),
    }
}

fn show_guidance(ctx: &ExecutionContext) {
    println!("qhse — terminal client for QHSE management");
    println!();
    println!("Quick start:");
    println!("  qhse config init --api-url <URL>   record the API endpoint");
    println!("  qhse auth login --token <TOKEN>    store a session");
    println!("  qhse browse                        open the interactive console");
    println!();
    println!("Modules: incident, risk, training, chemical, ppe, hygiene");
    println!("  qhse <module> list|show|create|edit|delete");
    println!("  qhse stats [--module <m>] [--periode 7j|30j|90j|12m]");
    println!();
    println!("Data directory: {}", ctx.data_dir().display());
}
