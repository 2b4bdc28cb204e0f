use super::decode::DecodeError;
use crate::domain::tts::TtsError;

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Configuration(TtsError),
    #[error("segment {index} failed: {reason}")]
    SegmentFailed { index: usize, reason: SegmentFailure },
    #[error("no speech segment could be synthesized ({failed} failed)")]
    NoSpeech { failed: usize },
    #[error("failed to export clip: {0}")]
    Export(String),
}

/// Why a single speech segment produced no audio
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentFailure {
    #[error(transparent)]
    Synthesis(TtsError),
    #[error(transparent)]
    Decode(DecodeError),
    #[error("sample rate {actual} Hz does not match the clip's {expected} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },
    #[error("provider returned no audio samples")]
    EmptyAudio,
}
