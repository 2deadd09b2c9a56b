use super::show_record;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ScoreRow, score::Score};
use crate::sheets::{SheetScoreStore, SheetsClient};
use crate::store::ScoreStore;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum SheetCommand {
    /// Append a score to the next free row
    Add { name: String, score: Score },
    /// Show the score at a 0-based position below the header
    Get {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Print the whole score table
    List,
    /// Show how many scores are recorded
    Count,
    /// Write the column headers into an empty worksheet
    Init,
}

impl SheetCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load()?;
        let spreadsheet_id = config.sheet.spreadsheet_id()?;
        let layout = config.sheet.layout()?;
        let client = SheetsClient::new(&config.google).await?;
        let store = SheetScoreStore::new(client, spreadsheet_id, layout);

        match self {
            SheetCommand::Add { name, score } => {
                store.append(ScoreRow::new(name.as_str(), *score)?).await?;
                info!(name, score, "Score added");
            }
            SheetCommand::Get { index } => show_record(&store, *index).await?,
            SheetCommand::List => list_scores(&store).await?,
            SheetCommand::Count => {
                let count = store.count_existing().await?;
                info!(count, "Scores recorded");
            }
            SheetCommand::Init => match store.ensure_header().await? {
                true => info!(range = store.layout().full_range(), "Header written"),
                false => info!("Score table already has rows"),
            },
        }

        Ok(())
    }
}

async fn list_scores(store: &SheetScoreStore<SheetsClient>) -> Result<()> {
    let rows = store.rows().await?;
    if rows.is_empty() {
        info!("No data found");
        return Ok(());
    }

    for row in &rows {
        info!(name = %row.name, score = row.score, "Score");
    }

    Ok(())
}
