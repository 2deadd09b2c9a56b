use crate::config::Config;
use crate::error::Result;
use crate::sheets::token_cache_path;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration, data and cache paths
    Paths,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;
    let score_path = Config::load()?.local.score_file()?;
    let cache_dir = Config::cache_dir()?;
    let token_path = token_cache_path()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?score_path, "Score document path");
    info!(path = ?cache_dir, "Cache path");
    info!(path = ?token_path, "Token cache path");

    Ok(())
}
