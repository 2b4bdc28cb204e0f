use super::tts_repository::TtsRepository;
use crate::domain::tts::{is_placeholder_value, SynthesisRequest, TransientApiError, TtsError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

pub const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

const XI_API_KEY_HEADER: &str = "xi-api-key";
const APPLICATION_JSON: &str = "application/json";

/// ElevenLabs text-to-speech implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TtsError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!("{}/text-to-speech/{}", self.base_url, voice_id)
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    fn check_credentials(&self) -> Result<(), TtsError> {
        if is_placeholder_value(&self.api_key) {
            return Err(TtsError::Configuration(
                "ELEVENLABS_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TransientApiError> {
        let start_time = std::time::Instant::now();
        let output_format = request.output_format.to_string();

        tracing::debug!(
            voice_id = %request.voice_id,
            model = %request.model_id,
            output_format = %output_format,
            text_length = request.text.chars().count(),
            "Calling ElevenLabs text-to-speech"
        );

        let response = self
            .http_client
            .post(self.endpoint(&request.voice_id))
            .query(&[("output_format", output_format.as_str())])
            .header(XI_API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, request.output_format.mime_type())
            .json(request)
            .send()
            .await
            .map_err(|e| TransientApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransientApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| TransientApiError::Transport(format!("failed to read audio body: {}", e)))?
            .to_vec();

        tracing::debug!(
            provider = "elevenlabs",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "ElevenLabs audio received"
        );

        Ok(audio_bytes)
    }
}
