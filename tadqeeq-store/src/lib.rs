//! In-memory custom vocabulary for the tadqeeq correction engine.
//!
//! [`MemoryWordStore`] holds user-added words with their metadata and usage
//! counters, plus user-defined corrections, and implements
//! [`tadqeeq_core::WordStore`] so a [`tadqeeq_core::Corrector`] can consult it.

mod memory;
mod record;

pub use memory::{MemoryWordStore, MAX_PER_PAGE};
pub use record::{
    CustomCorrection, FrequentWord, NewWord, Page, Pagination, StoreStatistics, WordRecord,
    WordType, WordUpdate,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("word {0:?} already exists")]
    Duplicate(String),

    #[error("word {0} not found")]
    NotFound(u64),

    #[error("invalid word: {0}")]
    Invalid(String),

    #[error("store lock poisoned")]
    Poisoned,
}
