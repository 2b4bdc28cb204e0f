use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Codec, sample rate and (for MP3) bitrate of an encoded audio payload.
///
/// The string form matches the provider's `output_format` values,
/// e.g. `mp3_44100_128` or `pcm_16000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3 { sample_rate: u32, bitrate_kbps: u32 },
    /// Raw little-endian signed 16-bit mono samples
    Pcm { sample_rate: u32 },
    Wav { sample_rate: u32 },
}

impl AudioFormat {
    pub fn sample_rate(&self) -> u32 {
        match self {
            AudioFormat::Mp3 { sample_rate, .. }
            | AudioFormat::Pcm { sample_rate }
            | AudioFormat::Wav { sample_rate } => *sample_rate,
        }
    }

    /// Value for the HTTP `Accept` header when requesting this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 { .. } => "audio/mpeg",
            AudioFormat::Pcm { .. } => "audio/*",
            AudioFormat::Wav { .. } => "audio/wav",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 { .. } => "mp3",
            AudioFormat::Pcm { .. } => "pcm",
            AudioFormat::Wav { .. } => "wav",
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        AudioFormat::Mp3 {
            sample_rate: 44100,
            bitrate_kbps: 128,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFormat::Mp3 {
                sample_rate,
                bitrate_kbps,
            } => write!(f, "mp3_{}_{}", sample_rate, bitrate_kbps),
            AudioFormat::Pcm { sample_rate } => write!(f, "pcm_{}", sample_rate),
            AudioFormat::Wav { sample_rate } => write!(f, "wav_{}", sample_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported output format '{0}', expected mp3_<rate>_<kbps> or pcm_<rate>")]
pub struct ParseFormatError(pub String);

impl FromStr for AudioFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFormatError(s.to_string());
        let normalized = s.trim().to_lowercase();
        let parts: Vec<&str> = normalized.split('_').collect();

        fn number(value: &str) -> Option<u32> {
            value.parse::<u32>().ok().filter(|n| *n > 0)
        }

        match parts.as_slice() {
            ["mp3", rate, kbps] => Ok(AudioFormat::Mp3 {
                sample_rate: number(rate).ok_or_else(invalid)?,
                bitrate_kbps: number(kbps).ok_or_else(invalid)?,
            }),
            ["pcm", rate] => Ok(AudioFormat::Pcm {
                sample_rate: number(rate).ok_or_else(invalid)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for AudioFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
