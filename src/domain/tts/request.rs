use super::voice::{VoiceConfig, VoiceSettings};
use crate::domain::audio::AudioFormat;
use serde::Serialize;

pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// How the provider should interpret `text`. Each segment is sent as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Plain,
}

/// Request settings shared by every synthesis call of a run
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisSettings {
    pub model_id: String,
    pub output_format: AudioFormat,
    pub text_type: TextType,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: AudioFormat::default(),
            text_type: TextType::Plain,
        }
    }
}

/// Body of a text-to-speech call. `voice_id` travels in the URL path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    #[serde(skip)]
    pub voice_id: String,
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    pub speed: f32,
    pub output_format: AudioFormat,
    pub text_type: TextType,
}

impl SynthesisRequest {
    pub fn new(text: &str, voice: &VoiceConfig, settings: &SynthesisSettings) -> Self {
        Self {
            voice_id: voice.voice_id.clone(),
            text: text.to_string(),
            model_id: settings.model_id.clone(),
            voice_settings: voice.settings,
            speed: voice.speed,
            output_format: settings.output_format,
            text_type: settings.text_type,
        }
    }
}
