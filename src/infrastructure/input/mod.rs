pub mod csv_reader;

pub use csv_reader::{discover_phrase_files, read_phrase_file, InputError, PhraseColumns, PhraseRow};
