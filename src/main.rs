use std::sync::Arc;

use clap::Parser;
use tend::cli::commands::Cli;
use tend::cli::handlers;
use tend::io::http_store::HttpItemStore;
use tend::logging;
use tend::ops::ViewState;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => {
            logging::init_file();
            run_tui(&cli)
        }
        Some(_) => {
            logging::init_stderr();
            handlers::dispatch(cli)
        }
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings =
        handlers::load_settings(cli.config.as_deref(), cli.base_url.as_deref(), cli.owner)?;
    let store = HttpItemStore::from_config(&settings.config.server, settings.owner_id)?;
    let state =
        ViewState::new(settings.owner_id).with_error_timeout(settings.config.ui.error_timeout());
    tend::tui::run(state, Arc::new(store), &settings.config.ui)
}
