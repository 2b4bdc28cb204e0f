pub mod client;
pub mod error;
pub mod request;
pub mod retry;
pub mod voice;

pub use client::TtsClient;
pub use error::{TransientApiError, TtsError};
pub use request::{SynthesisRequest, SynthesisSettings, TextType, DEFAULT_MODEL_ID};
pub use retry::{Backoff, RetryPolicy, Sleeper, TokioSleeper};
pub use voice::{
    is_placeholder_value, VoiceConfig, VoicePair, VoiceRole, VoiceSettings, PLACEHOLDER_VOICE_ID,
};
