use serde::Serialize;
use std::fmt;

/// Voice id shipped in the sample `.env`; never a real ElevenLabs voice
pub const PLACEHOLDER_VOICE_ID: &str = "YOUR_TEACHER_VOICE_ID";

/// Which side of a phrase pair a voice speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceRole {
    Source,
    Target,
}

impl fmt::Display for VoiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceRole::Source => write!(f, "source"),
            VoiceRole::Target => write!(f, "target"),
        }
    }
}

/// Prosody settings sent as `voice_settings` in a synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.9,
            similarity_boost: 0.85,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

/// A synthetic speaker identity plus the prosody it should use.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub voice_id: String,
    pub settings: VoiceSettings,
    pub speed: f32,
}

impl VoiceConfig {
    pub const DEFAULT_SPEED: f32 = 0.6;

    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            settings: VoiceSettings::default(),
            speed: Self::DEFAULT_SPEED,
        }
    }

    pub fn with_settings(mut self, settings: VoiceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// True when the voice id is unset or still a template value
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_value(&self.voice_id)
    }

    /// Stable key for memoizing synthesized audio of this voice
    pub fn fingerprint(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            self.voice_id,
            self.settings.stability,
            self.settings.similarity_boost,
            self.settings.style,
            self.settings.use_speaker_boost,
            self.speed
        )
    }
}

/// The two voices used for one clip. They may be the same voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePair {
    pub source: VoiceConfig,
    pub target: VoiceConfig,
}

impl VoicePair {
    pub fn new(source: VoiceConfig, target: VoiceConfig) -> Self {
        Self { source, target }
    }
}

/// Empty values and all-caps `YOUR_…` template tokens count as unconfigured.
pub fn is_placeholder_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || value == PLACEHOLDER_VOICE_ID
        || (value.starts_with("YOUR_")
            && value.chars().all(|c| c.is_ascii_uppercase() || c == '_'))
}
