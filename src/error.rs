use crate::domain::audio::AssemblyError;
use crate::domain::tts::TtsError;
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::input::InputError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<TtsError> for AppError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::Configuration(msg) => AppError::Configuration(msg),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
