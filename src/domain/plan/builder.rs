use super::model::{Segment, SegmentPlan};
use crate::domain::phrase::PhrasePair;
use crate::domain::tts::{VoiceConfig, VoiceRole};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Source,
    Target,
    PauseMillis(u64),
}

use Step::{PauseMillis, Source, Target};

const STANDARD_STEPS: &[Step] = &[
    Source,
    PauseMillis(1000),
    Target,
    PauseMillis(2000),
    Source,
    PauseMillis(2000),
    Source,
];

const EXTENDED_STEPS: &[Step] = &[
    Source,
    PauseMillis(1000),
    Target,
    PauseMillis(2000),
    Source,
    PauseMillis(2000),
    Source,
    PauseMillis(1000),
    Target,
    PauseMillis(2000),
    Source,
    PauseMillis(2000),
    Source,
];

/// Repetition pattern of a clip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanPattern {
    /// S, 1s, T, 2s, S, 2s, S
    #[default]
    Standard,
    /// The standard pattern followed by a second T round: 13 segments
    Extended,
}

impl PlanPattern {
    fn steps(&self) -> &'static [Step] {
        match self {
            PlanPattern::Standard => STANDARD_STEPS,
            PlanPattern::Extended => EXTENDED_STEPS,
        }
    }
}

impl fmt::Display for PlanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanPattern::Standard => write!(f, "standard"),
            PlanPattern::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for PlanPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(PlanPattern::Standard),
            "extended" => Ok(PlanPattern::Extended),
            other => Err(format!(
                "unknown plan pattern '{}', expected standard or extended",
                other
            )),
        }
    }
}

/// Turns a phrase pair into its fixed speech/pause sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentPlanBuilder {
    pattern: PlanPattern,
}

impl SegmentPlanBuilder {
    pub fn new(pattern: PlanPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> PlanPattern {
        self.pattern
    }

    pub fn build(
        &self,
        pair: &PhrasePair,
        source_voice: &VoiceConfig,
        target_voice: &VoiceConfig,
    ) -> SegmentPlan {
        let segments = self
            .pattern
            .steps()
            .iter()
            .map(|step| match step {
                Source => Segment::Speech {
                    text: pair.source_text().to_string(),
                    voice: source_voice.clone(),
                    role: VoiceRole::Source,
                },
                Target => Segment::Speech {
                    text: pair.target_text().to_string(),
                    voice: target_voice.clone(),
                    role: VoiceRole::Target,
                },
                PauseMillis(millis) => Segment::Pause {
                    duration: Duration::from_millis(*millis),
                },
            })
            .collect();

        SegmentPlan::new(segments)
    }
}
