use crate::domain::tts::{VoiceConfig, VoiceRole};
use std::fmt;
use std::time::Duration;

/// One instruction in a plan: something to say, or a silence to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Speech {
        text: String,
        voice: VoiceConfig,
        role: VoiceRole,
    },
    Pause {
        duration: Duration,
    },
}

impl Segment {
    pub fn is_speech(&self) -> bool {
        matches!(self, Segment::Speech { .. })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Speech { text, role, .. } => write!(f, "{}({})", role, text),
            Segment::Pause { duration } => write!(f, "pause({}ms)", duration.as_millis()),
        }
    }
}

/// The full audio program for one phrase pair, in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
}

impl SegmentPlan {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn speech_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_speech()).count()
    }

    pub fn total_pause(&self) -> Duration {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Pause { duration } => *duration,
                Segment::Speech { .. } => Duration::ZERO,
            })
            .sum()
    }
}

impl fmt::Display for SegmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
