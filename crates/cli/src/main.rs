// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb - Switchboard demo CLI

mod commands;
mod completions;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{chat, order};
use completions::{generate_completions, CompletionsArgs};
use settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sb",
    version,
    about = "Switchboard - components talking through a mediator"
)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log dispatch activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an order through payment and inventory
    Order(order::OrderArgs),
    /// Broadcast messages between chat users
    Chat(chat::ChatArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Completions need no settings
    if let Commands::Completions(args) = &cli.command {
        generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Order(args) => order::handle(args, &settings).await,
        Commands::Chat(args) => chat::handle(args, &settings).await,
        Commands::Completions(_) => Ok(()),
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
