use crate::context::ExecutionContext;
use crate::tui;
use anyhow::{bail, Result};
use qhse_types::Module;

pub fn handle(ctx: &ExecutionContext, module: Option<Module>) -> Result<()> {
    if !ctx.session().is_logged_in() {
        bail!("no stored session; run 'qhse auth login --token <TOKEN>' first");
    }

    let client = ctx.client()?.clone();
    tui::run(client, module.unwrap_or(Module::Incidents))
}
