use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tick::cli::commands::Cli;
use tick::cli::handlers;
use tick::io::workspace;

/// Where log records go
enum LogTarget<'a> {
    Stderr,
    /// Append to `tick.log` inside an existing tick directory
    File(&'a Path),
}

fn init_tracing(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File(dir) => {
            // The TUI owns the terminal, so logs only go to a file, and only
            // when the tick directory already exists.
            if !dir.is_dir() {
                return;
            }
            let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("tick.log"))
            else {
                return;
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let start = match workspace::resolve_start(cli.dir.as_deref()) {
        Ok(start) => start,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let json = cli.json;
    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            let tick_dir = workspace::discover_tick_dir(&start);
            init_tracing(LogTarget::File(&tick_dir));
            tick::tui::run(&start)
        }
        Some(command) => {
            init_tracing(LogTarget::Stderr);
            handlers::dispatch(command, json, &start)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
