mod document;
mod store;

pub use store::LocalScoreStore;
