//! Command-line interface for Montir.

use clap::{Parser, Subcommand};

/// Montir - vehicle diagnostics knowledge-base server
#[derive(Parser)]
#[command(name = "montir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Translate a complaint into search keywords without searching
    #[command(alias = "t")]
    Translate {
        /// Free-text complaint, e.g. "mesin bergetar saat idle"
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Run one diagnostic search against the configured database
    #[command(alias = "s")]
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create a default config file in the working directory
    Init,
}
