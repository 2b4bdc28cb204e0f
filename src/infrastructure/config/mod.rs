use crate::domain::audio::{AudioFormat, SegmentFailurePolicy};
use crate::domain::phrase::DEFAULT_SLUG_WORDS;
use crate::domain::plan::PlanPattern;
use crate::domain::tts::{
    RetryPolicy, SynthesisSettings, TextType, VoiceConfig, VoicePair, VoiceSettings,
    DEFAULT_MODEL_ID, PLACEHOLDER_VOICE_ID,
};
use crate::infrastructure::repositories::DEFAULT_ELEVENLABS_API_URL;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ElevenLabs
    pub api_key: String,
    pub api_url: String,
    pub source_voice_id: String,
    pub target_voice_id: String,
    pub model_id: String,
    pub output_format: AudioFormat,
    // Voice prosody
    pub speed: f32,
    pub stability: f32,
    pub similarity_boost: f32,
    // Retry
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub request_timeout: Duration,
    // Assembly
    pub tts_cache_enabled: bool,
    pub on_segment_failure: SegmentFailurePolicy,
    pub plan_pattern: PlanPattern,
    // Files
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source_column: String,
    pub target_column: String,
    pub slug_words: usize,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let source_voice_id = get("ELEVENLABS_SOURCE_VOICE_ID")
            .or_else(|| get("ELEVENLABS_VOICE_ID"))
            .unwrap_or_else(|| PLACEHOLDER_VOICE_ID.to_string());

        let config = Config {
            api_key: get("ELEVENLABS_API_KEY").unwrap_or_default(),
            api_url: get("ELEVENLABS_API_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_string()),
            target_voice_id: get("ELEVENLABS_TARGET_VOICE_ID")
                .unwrap_or_else(|| source_voice_id.clone()),
            source_voice_id,
            model_id: get("ELEVENLABS_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            output_format: parse_or("TTS_OUTPUT_FORMAT", get("TTS_OUTPUT_FORMAT"), AudioFormat::default())?,
            speed: parse_or("TTS_SPEED", get("TTS_SPEED"), VoiceConfig::DEFAULT_SPEED)?,
            stability: parse_or(
                "TTS_STABILITY",
                get("TTS_STABILITY"),
                VoiceSettings::default().stability,
            )?,
            similarity_boost: parse_or(
                "TTS_SIMILARITY_BOOST",
                get("TTS_SIMILARITY_BOOST"),
                VoiceSettings::default().similarity_boost,
            )?,
            max_attempts: parse_or(
                "TTS_MAX_ATTEMPTS",
                get("TTS_MAX_ATTEMPTS"),
                RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            )?,
            backoff_base: parse_seconds("TTS_BACKOFF_BASE_SECS", get("TTS_BACKOFF_BASE_SECS"))?
                .unwrap_or(RetryPolicy::DEFAULT_BACKOFF_BASE),
            request_timeout: Duration::from_secs(parse_or(
                "TTS_REQUEST_TIMEOUT_SECS",
                get("TTS_REQUEST_TIMEOUT_SECS"),
                30,
            )?),
            tts_cache_enabled: get("TTS_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            on_segment_failure: parse_or(
                "ON_SEGMENT_FAILURE",
                get("ON_SEGMENT_FAILURE"),
                SegmentFailurePolicy::default(),
            )?,
            plan_pattern: parse_or("PLAN_PATTERN", get("PLAN_PATTERN"), PlanPattern::default())?,
            input_dir: get("INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("inputs")),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("outputs")),
            source_column: get("SOURCE_COLUMN").unwrap_or_else(|| "germanphrase".to_string()),
            target_column: get("TARGET_COLUMN")
                .unwrap_or_else(|| "russiantranslation".to_string()),
            slug_words: parse_or("SLUG_WORDS", get("SLUG_WORDS"), DEFAULT_SLUG_WORDS)?,
            log_format: get("LOG_FORMAT")
                .map(|s| match s.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
        };

        if config.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "TTS_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(config)
    }

    pub fn voices(&self) -> VoicePair {
        let settings = VoiceSettings {
            stability: self.stability,
            similarity_boost: self.similarity_boost,
            ..VoiceSettings::default()
        };
        let voice = |voice_id: &str| {
            VoiceConfig::new(voice_id)
                .with_settings(settings)
                .with_speed(self.speed)
        };
        VoicePair::new(voice(&self.source_voice_id), voice(&self.target_voice_id))
    }

    pub fn synthesis_settings(&self) -> SynthesisSettings {
        SynthesisSettings {
            model_id: self.model_id.clone(),
            output_format: self.output_format,
            text_type: TextType::Plain,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::linear(self.max_attempts, self.backoff_base)
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

/// Non-negative, possibly fractional, number of seconds
fn parse_seconds(key: &'static str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let secs: f64 = parse_or(key, Some(value.clone()), 0.0)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected a non-negative number of seconds".to_string(),
        });
    }
    Ok(Some(Duration::from_secs_f64(secs)))
}
