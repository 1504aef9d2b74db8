use clap::{Args, Parser, Subcommand};

use crate::model::item::ItemId;

#[derive(Parser)]
#[command(name = "tick", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a todo list that remembers"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a .tick/ directory with a default config
    Init(InitArgs),
    /// Add an item to the top of the list
    Add(AddArgs),
    /// List items
    List(ListArgs),
    /// Show one item in full
    Show(IdArgs),
    /// Mark an item completed, or active again
    Toggle(IdArgs),
    /// Change an item's text
    Edit(EditArgs),
    /// Delete an item
    Rm(RmArgs),
    /// Show item counts
    Stats,
    /// View or clear the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which items to show (all, active, completed)
    #[arg(short, long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item ID
    pub id: ItemId,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item ID
    pub id: ItemId,
    /// New text (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Item ID
    pub id: ItemId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show at most this many entries (most recent first)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Delete the recovery log
    #[arg(long)]
    pub clear: bool,
}
