use super::error::{TransientApiError, TtsError};
use super::request::{SynthesisRequest, SynthesisSettings};
use super::retry::{RetryPolicy, Sleeper, TokioSleeper};
use super::voice::VoiceConfig;
use crate::domain::audio::{AudioClip, AudioFormat};
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;

/// Synthesizes single text fragments, retrying transient provider failures.
pub struct TtsClient {
    tts_repo: Arc<dyn TtsRepository>,
    settings: SynthesisSettings,
    retry_policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl TtsClient {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        settings: SynthesisSettings,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self::with_sleeper(tts_repo, settings, retry_policy, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        tts_repo: Arc<dyn TtsRepository>,
        settings: SynthesisSettings,
        retry_policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            tts_repo,
            settings,
            retry_policy,
            sleeper,
        }
    }

    pub fn output_format(&self) -> AudioFormat {
        self.settings.output_format
    }

    /// Fail fast on missing credentials or an unconfigured voice
    pub fn check_configuration(&self, voice: &VoiceConfig) -> Result<(), TtsError> {
        self.tts_repo.check_credentials()?;

        if voice.is_placeholder() {
            return Err(TtsError::Configuration(format!(
                "voice id '{}' is not configured",
                voice.voice_id
            )));
        }

        Ok(())
    }

    /// Synthesize `text` with `voice`
    ///
    /// Transient failures are retried up to the policy's attempt limit,
    /// sleeping `backoff(attempt)` between attempts.
    ///
    /// # Errors
    /// `Configuration` before any request is made, or `ExhaustedRetries`
    /// once every attempt has failed
    pub async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<AudioClip, TtsError> {
        self.check_configuration(voice)?;

        let request = SynthesisRequest::new(text, voice, &self.settings);
        let max_attempts = self.retry_policy.max_attempts();
        let mut last_error: Option<TransientApiError> = None;

        for attempt in 1..=max_attempts {
            match self.tts_repo.synthesize(&request).await {
                Ok(data) => {
                    tracing::debug!(
                        attempt,
                        voice_id = %voice.voice_id,
                        audio_size_bytes = data.len(),
                        "Synthesis succeeded"
                    );
                    return Ok(AudioClip::new(data, self.settings.output_format));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        text = %text,
                        voice_id = %voice.voice_id,
                        "Synthesis attempt failed"
                    );
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                self.sleeper.sleep(self.retry_policy.backoff(attempt)).await;
            }
        }

        Err(TtsError::ExhaustedRetries {
            text: text.to_string(),
            attempts: max_attempts,
            last_error: last_error
                .unwrap_or_else(|| TransientApiError::Transport("no attempt made".to_string())),
        })
    }
}
