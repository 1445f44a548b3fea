// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! shmstore CLI
//!
//! Command-line interface for the keyed shared memory store.

use clap::{Parser, Subcommand};

mod commands;

/// shmstore - Keyed System V shared memory store
#[derive(Parser)]
#[command(name = "shmstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Segment capacity in bytes (overrides the configuration file)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a value under an identifier
    Write {
        /// Identifier naming the slot
        identifier: String,

        /// Value to store
        data: String,
    },

    /// Read the value stored under an identifier
    Read {
        /// Identifier naming the slot
        identifier: String,
    },

    /// Destroy the segment behind an identifier
    Delete {
        /// Identifier naming the slot
        identifier: String,
    },

    /// Print the segment key derived from an identifier
    Key {
        /// Identifier naming the slot
        identifier: String,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::Settings {
        config: cli.config,
        capacity: cli.capacity,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Write { identifier, data } => {
            commands::write::execute(&settings, &identifier, &data)
        }
        Commands::Read { identifier } => commands::read::execute(&settings, &identifier),
        Commands::Delete { identifier } => commands::delete::execute(&settings, &identifier),
        Commands::Key { identifier } => commands::key::execute(&identifier),
        Commands::Validate { file } => commands::validate::execute(&file),
    }
}
