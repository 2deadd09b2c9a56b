mod auth;
mod local;
mod sheet;
mod show;

use crate::error::Result;
use crate::store::ScoreStore;
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;

pub use local::LocalCommand;
pub use sheet::SheetCommand;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "score-keeper")]
#[command(about = "Record and look up game high scores", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Local { file, command } => command.execute(file.as_deref()).await,
            Commands::Sheet { command } => command.execute().await,
            Commands::Auth { reset } => auth::execute(*reset).await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scores kept in a local document
    Local {
        /// Score document to use instead of the configured one
        #[arg(long, global = true)]
        file: Option<PathBuf>,

        #[command(subcommand)]
        command: LocalCommand,
    },
    /// Scores kept in a Google Sheets worksheet
    Sheet {
        #[command(subcommand)]
        command: SheetCommand,
    },
    /// Authorize access to Google Sheets
    Auth {
        /// Discard cached tokens and authorize again
        #[arg(long)]
        reset: bool,
    },
    /// Show local paths used by score-keeper
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

/// Look up one record and report it, or report that the slot is empty.
async fn show_record<S>(store: &S, index: i64) -> Result<()>
where
    S: ScoreStore + Sync,
    S::Record: Display,
{
    match store.get(index).await? {
        Some(record) => info!(index, %record, "Score"),
        None => info!(index, "No data at this index"),
    }

    Ok(())
}
