mod setup;
pub use setup::{Settings, load_settings};

use std::io::{self, Write};
use std::time::Instant;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::dispatch::run_inline;
use crate::io::http_store::HttpItemStore;
use crate::io::store::ItemStore;
use crate::model::ItemId;
use crate::ops::{ErrorKind, Request, ViewState};

/// Why a command exited unsuccessfully
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Failed(ErrorKind),
    #[error("no item with id {0}")]
    NotFound(ItemId),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        return Ok(());
    };
    let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref(), cli.owner)?;
    let store = HttpItemStore::from_config(&settings.config.server, settings.owner_id)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(command, &store, cli.json, &mut out)
}

/// Load the list, apply one command, run every request it issues, then print
/// the resulting list.
pub fn run_command(
    command: Commands,
    store: &dyn ItemStore,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = ViewState::new(store.owner_id());
    let load = state.load();
    run_inline(&mut state, store, load);
    check_error(&state)?;

    let requests = apply(&mut state, command)?;
    run_inline(&mut state, store, requests);
    check_error(&state)?;

    print_list(&state, json, out)?;
    Ok(())
}

fn apply(state: &mut ViewState, command: Commands) -> Result<Vec<Request>, CommandError> {
    let requests = match command {
        Commands::List(args) => {
            state.set_filter(args.filter);
            Vec::new()
        }
        Commands::Add(args) => {
            state.set_new_title(args.title);
            state.submit_new(Instant::now())
        }
        Commands::Toggle(args) => {
            require_item(state, args.id)?;
            state.toggle(args.id)
        }
        Commands::ToggleAll => state.toggle_all(),
        Commands::Rename(args) => {
            require_item(state, args.id)?;
            state.begin_rename(args.id);
            state.set_draft(args.title);
            state.commit_rename()
        }
        Commands::Rm(args) => {
            require_item(state, args.id)?;
            state.delete(args.id)
        }
        Commands::ClearCompleted => state.clear_completed(),
    };
    Ok(requests)
}

fn require_item(state: &ViewState, id: ItemId) -> Result<(), CommandError> {
    match state.item(id) {
        Some(_) => Ok(()),
        None => Err(CommandError::NotFound(id)),
    }
}

fn check_error(state: &ViewState) -> Result<(), CommandError> {
    match state.error() {
        Some(kind) => Err(CommandError::Failed(kind)),
        None => Ok(()),
    }
}

fn print_list(state: &ViewState, json: bool, out: &mut dyn Write) -> io::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(&list_to_json(state))?;
        writeln!(out, "{}", text)
    } else {
        for line in format_list(state) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
