use super::show_record;
use crate::config::Config;
use crate::error::Result;
use crate::local::LocalScoreStore;
use crate::models::{ScoreEntry, score::Score};
use crate::store::ScoreStore;
use clap::Subcommand;
use std::path::Path;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum LocalCommand {
    /// Record a new score
    Add { username: String, score: Score },
    /// Show the score at a 0-based position
    Get {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
}

impl LocalCommand {
    pub async fn execute(&self, file: Option<&Path>) -> Result<()> {
        let path = match file {
            Some(path) => path.to_path_buf(),
            None => Config::load()?.local.score_file()?,
        };
        let store = LocalScoreStore::open(path);

        match self {
            LocalCommand::Add { username, score } => {
                let entry = ScoreEntry::new(username.as_str(), *score)?;
                store.append(entry).await?;
                info!(username, score, path = ?store.path(), "Score added");
                Ok(())
            }
            LocalCommand::Get { index } => show_record(&store, *index).await,
        }
    }
}
