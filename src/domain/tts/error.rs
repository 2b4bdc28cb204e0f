/// One failed request to the TTS provider. Always retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransientApiError {
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtsError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to synthesize '{text}' after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        text: String,
        attempts: u32,
        last_error: TransientApiError,
    },
}
