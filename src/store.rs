use crate::error::Result;
use async_trait::async_trait;

/// Append-only table of score records, addressed by insertion position.
///
/// Records are never edited or removed once appended. Every call goes back
/// to the backend; nothing is cached between calls.
#[async_trait]
pub trait ScoreStore {
    type Record: Send + Sync;

    async fn append(&self, record: Self::Record) -> Result<()>;

    /// Fetch the record at a 0-based position.
    ///
    /// Returns `Ok(None)` when the table is empty or missing, or when
    /// `index` is negative or past the end.
    async fn get(&self, index: i64) -> Result<Option<Self::Record>>;
}

/// Convert a signed position into a slice index, if it can address one.
pub(crate) fn slot(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}
