pub mod score;

pub use score::{FromSheetRows, ScoreEntry, ScoreRow};
