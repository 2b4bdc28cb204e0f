use crate::domain::tts::{SynthesisRequest, TransientApiError, TtsError};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (ElevenLabs, or a fake in tests).
///
/// Implementations perform exactly one provider call per `synthesize`;
/// retrying is the caller's job.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Verify credentials are present without touching the network
    ///
    /// # Errors
    /// Returns `TtsError::Configuration` when the API key is missing or a placeholder
    fn check_credentials(&self) -> Result<(), TtsError>;

    /// Synthesize one text fragment
    ///
    /// Returns the raw audio payload in the requested `output_format`
    ///
    /// # Errors
    /// Any non-success status or transport failure
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TransientApiError>;
}
