mod init;
pub use init::cmd_init;

use std::error::Error;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery;
use crate::io::workspace::Workspace;
use crate::model::item::Filter;
use crate::ops::view;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one CLI command. `init` runs without opening the workspace, so a
/// broken `config.toml` can still be overwritten with `init --force`.
pub fn dispatch(command: Commands, json: bool, start: &Path) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Init(args) => cmd_init(args, start),

        // Read commands
        Commands::List(args) => cmd_list(&Workspace::open(start)?, args, json),
        Commands::Show(args) => cmd_show(&Workspace::open(start)?, args, json),
        Commands::Stats => cmd_stats(&Workspace::open(start)?, json),
        Commands::Recovery(args) => cmd_recovery(&Workspace::open(start)?, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&Workspace::open(start)?, args, json),
        Commands::Toggle(args) => cmd_toggle(&Workspace::open(start)?, args, json),
        Commands::Edit(args) => cmd_edit(&Workspace::open(start)?, args, json),
        Commands::Rm(args) => cmd_rm(&Workspace::open(start)?, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(workspace: &Workspace, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = workspace.open_store();
    let filter = match args.filter.as_deref() {
        Some(s) => s.parse::<Filter>()?,
        None => Filter::default(),
    };
    let snapshot = store.snapshot();
    let items = view::filtered(snapshot, filter);
    let counts = view::counts(snapshot);

    if json {
        print_json(&ListJson {
            filter,
            items,
            counts,
        })
    } else {
        print_lines(&format_listing(&items, filter, &counts));
        Ok(())
    }
}

fn cmd_show(workspace: &Workspace, args: IdArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let store = workspace.open_store();
    let item = store.get(args.id)?;
    if json {
        print_json(item)
    } else {
        print_lines(&format_item_detail(item));
        Ok(())
    }
}

fn cmd_stats(workspace: &Workspace, json: bool) -> Result<(), Box<dyn Error>> {
    let store = workspace.open_store();
    let counts = view::counts(store.snapshot());
    if json {
        print_json(&counts)
    } else {
        println!("{}", format_counts(&counts));
        Ok(())
    }
}

fn cmd_recovery(
    workspace: &Workspace,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if args.clear {
        if recovery::clear_recovery(&workspace.dir)? {
            println!("recovery log cleared");
        } else {
            println!("no recovery log");
        }
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(&workspace.dir, args.limit);
    if json {
        let out: Vec<_> = entries.iter().map(recovery_to_json).collect();
        return print_json(&out);
    }
    if entries.is_empty() {
        println!("no recovery entries");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_lines(&format_recovery_entry(entry));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(workspace: &Workspace, args: AddArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = workspace.open_store();
    let item = store.add(&args.text.join(" "))?;
    if json {
        print_json(&item)
    } else {
        println!("{}", format_item_line(&item));
        Ok(())
    }
}

fn cmd_toggle(workspace: &Workspace, args: IdArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = workspace.open_store();
    let item = store.toggle(args.id)?;
    if json {
        print_json(&item)
    } else {
        println!("{}", format_item_line(&item));
        Ok(())
    }
}

fn cmd_edit(workspace: &Workspace, args: EditArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = workspace.open_store();
    let item = store.edit(args.id, &args.text.join(" "))?;
    if json {
        print_json(&item)
    } else {
        println!("{}", format_item_line(&item));
        Ok(())
    }
}

fn cmd_rm(workspace: &Workspace, args: RmArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = workspace.open_store();
    let text = store.get(args.id)?.text.clone();

    if !args.yes && !confirm(&format!("Delete \"{}\"?", text))? {
        println!("cancelled");
        return Ok(());
    }

    let item = store.remove(args.id)?;
    if json {
        print_json(&item)
    } else {
        println!("deleted {}", format_item_line(&item));
        Ok(())
    }
}
