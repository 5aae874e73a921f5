// NOTE: Architecture Rationale
//
// Why one generic entity pipeline (not one screen per entity)?
// - Every module follows the same shape: fetch a collection, filter it,
//   open a schema-driven form, submit, splice the local rows
// - The per-entity knowledge lives in two places only: the FormSchema
//   (qhse-forms) and the ModuleView column/search declaration (display.rs)
// - Adding a module touches configuration, not control flow
//
// Why local derived counts AND a server stats endpoint?
// - List screens derive their chips from the rows they already hold so a
//   create/delete updates instantly without a refetch; these are an
//   approximation and are rebuilt from scratch on every full refetch
// - The stats screen always shows server-computed aggregates; the two are
//   never mixed on one screen
//
// Why a fetch generation counter?
// - Changing a filter twice in quick succession issues two fetches; only
//   the response matching the latest issued generation is applied, so a
//   slow first response can never overwrite a newer one

mod args;
mod commands;
pub mod aggregates;
pub mod context;
pub mod display;
mod export;
mod handlers;
mod tui;
mod views;

pub use args::{AuthCommand, Cli, Commands, ConfigCommand, EntityCommand, OutputFormat};
pub use commands::run;
