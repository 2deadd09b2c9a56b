use super::document::DocumentStore;
use crate::error::Result;
use crate::models::ScoreEntry;
use crate::store::{ScoreStore, slot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// On-disk layout of the score document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreDocument {
    /// `None` until the first entry is appended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<ScoreEntry>>,
}

/// Score table kept in a local transactional document.
pub struct LocalScoreStore {
    document: DocumentStore<ScoreDocument>,
}

impl LocalScoreStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: DocumentStore::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.document.path()
    }
}

#[async_trait]
impl ScoreStore for LocalScoreStore {
    type Record = ScoreEntry;

    #[instrument(name = "Appending local score", skip_all, fields(username = %record.username))]
    async fn append(&self, record: ScoreEntry) -> Result<()> {
        let count = self.document.transaction(|doc| {
            let scores = doc.scores.get_or_insert_with(Vec::new);
            scores.push(record);
            Ok(scores.len())
        })?;
        debug!(count, "Score appended");

        Ok(())
    }

    #[instrument(name = "Reading local score", skip(self))]
    async fn get(&self, index: i64) -> Result<Option<ScoreEntry>> {
        self.document.read(|doc| {
            let scores = doc.scores.as_deref().unwrap_or_default();
            slot(index, scores.len()).map(|i| scores[i].clone())
        })
    }
}
