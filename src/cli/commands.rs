use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{Filter, ItemId};

#[derive(Parser)]
#[command(name = "tend", about = concat!("tend v", env!("CARGO_PKG_VERSION"), " - a todo list in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $TEND_CONFIG or ~/.config/tend/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override server.base_url
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Override server.owner_id
    #[arg(long, global = true)]
    pub owner: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items
    List(ListArgs),
    /// Add an item
    Add(AddArgs),
    /// Flip an item between active and completed
    Toggle(IdArgs),
    /// Complete every item, or reopen all of them if all are completed
    ToggleAll,
    /// Change an item's title (an empty title deletes it)
    Rename(RenameArgs),
    /// Delete an item
    Rm(IdArgs),
    /// Delete every completed item
    ClearCompleted,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which items to show (all, active, completed)
    #[arg(long, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args)]
pub struct AddArgs {
    /// Title of the new item
    pub title: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item id
    pub id: ItemId,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Item id
    pub id: ItemId,
    /// New title
    pub title: String,
}
