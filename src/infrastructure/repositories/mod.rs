pub mod elevenlabs_tts_repository;
pub mod tts_repository;

pub use elevenlabs_tts_repository::{ElevenLabsTtsRepository, DEFAULT_ELEVENLABS_API_URL};
pub use tts_repository::TtsRepository;
