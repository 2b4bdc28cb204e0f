pub mod audio;
pub mod phrase;
pub mod plan;
pub mod tts;
