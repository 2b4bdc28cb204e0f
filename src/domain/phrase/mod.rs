pub mod error;
pub mod model;
pub mod slug;

pub use error::PhraseError;
pub use model::PhrasePair;
pub use slug::{clip_file_name, slugify, DEFAULT_SLUG_WORDS};
