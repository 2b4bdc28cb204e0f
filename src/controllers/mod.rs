pub mod batch;

pub use batch::{BatchController, BatchOptions, BatchSummary, PhraseOutcome};
