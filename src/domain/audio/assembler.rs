use super::clip::{AudioClip, PcmTrack};
use super::decode::decode_clip;
use super::error::{AssemblyError, SegmentFailure};
use super::format::AudioFormat;
use super::wav::encode_wav;
use crate::domain::plan::{Segment, SegmentPlan};
use crate::domain::tts::{TtsClient, TtsError, VoiceConfig};
use moka::future::Cache;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// What to do when a speech segment cannot be produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentFailurePolicy {
    /// Drop the segment and keep assembling the rest of the plan
    #[default]
    Skip,
    /// Give up on the whole phrase
    Abort,
}

impl fmt::Display for SegmentFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentFailurePolicy::Skip => write!(f, "skip"),
            SegmentFailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for SegmentFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(SegmentFailurePolicy::Skip),
            "abort" => Ok(SegmentFailurePolicy::Abort),
            other => Err(format!(
                "unknown segment failure policy '{}', expected skip or abort",
                other
            )),
        }
    }
}

/// Lifecycle of one plan segment during assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentStatus {
    Pending,
    Requested,
    Succeeded,
    /// Served from the per-plan memo without a new request
    Reused,
    Failed(SegmentFailure),
}

impl SegmentStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, SegmentStatus::Succeeded | SegmentStatus::Reused)
    }
}

/// Result of assembling one plan
#[derive(Debug, Clone)]
pub struct AssembledClip {
    pub clip: AudioClip,
    pub duration: Duration,
    /// One entry per plan segment, in plan order
    pub segment_statuses: Vec<SegmentStatus>,
    pub synthesis_calls: usize,
}

impl AssembledClip {
    pub fn failed_segments(&self) -> usize {
        self.segment_statuses
            .iter()
            .filter(|s| matches!(s, SegmentStatus::Failed(_)))
            .count()
    }
}

/// Synthesizes each plan segment and joins the results into one clip.
pub struct AudioAssembler {
    tts_client: Arc<TtsClient>,
    failure_policy: SegmentFailurePolicy,
    memoize: bool,
}

impl AudioAssembler {
    pub fn new(
        tts_client: Arc<TtsClient>,
        failure_policy: SegmentFailurePolicy,
        memoize: bool,
    ) -> Self {
        Self {
            tts_client,
            failure_policy,
            memoize,
        }
    }

    pub fn failure_policy(&self) -> SegmentFailurePolicy {
        self.failure_policy
    }

    /// Format of every clip `assemble` returns
    pub fn export_format(&self) -> AudioFormat {
        AudioFormat::Wav {
            sample_rate: self.tts_client.output_format().sample_rate(),
        }
    }

    pub async fn assemble(&self, plan: &SegmentPlan) -> Result<AssembledClip, AssemblyError> {
        let sample_rate = self.tts_client.output_format().sample_rate();
        let mut statuses = vec![SegmentStatus::Pending; plan.len()];
        let mut parts: Vec<PcmTrack> = Vec::with_capacity(plan.len());
        let mut synthesis_calls = 0;

        // Lives for this plan only; audio is never shared across phrases
        let memo: Option<Cache<String, Arc<PcmTrack>>> = self
            .memoize
            .then(|| Cache::builder().max_capacity(plan.len() as u64).build());

        tracing::debug!(
            segments = plan.len(),
            speech_segments = plan.speech_count(),
            sample_rate,
            "Synthesizing plan"
        );

        for (index, segment) in plan.segments().iter().enumerate() {
            match segment {
                Segment::Pause { duration } => {
                    parts.push(PcmTrack::silence(*duration, sample_rate));
                    statuses[index] = SegmentStatus::Succeeded;
                }
                Segment::Speech { text, voice, role } => {
                    let key = format!("{}\u{1f}{}", voice.fingerprint(), text);

                    if let Some(cache) = &memo {
                        if let Some(track) = cache.get(&key).await {
                            tracing::debug!(index, role = %role, "Reusing synthesized segment");
                            parts.push(track.as_ref().clone());
                            statuses[index] = SegmentStatus::Reused;
                            continue;
                        }
                    }

                    statuses[index] = SegmentStatus::Requested;
                    synthesis_calls += 1;

                    match self.synthesize_segment(text, voice, sample_rate).await {
                        Ok(track) => {
                            if let Some(cache) = &memo {
                                cache.insert(key, Arc::new(track.clone())).await;
                            }
                            parts.push(track);
                            statuses[index] = SegmentStatus::Succeeded;
                        }
                        Err(SegmentFailure::Synthesis(e @ TtsError::Configuration(_))) => {
                            return Err(AssemblyError::Configuration(e));
                        }
                        Err(reason) => {
                            tracing::error!(
                                index,
                                role = %role,
                                text = %text,
                                error = %reason,
                                policy = %self.failure_policy,
                                "Speech segment failed"
                            );
                            if self.failure_policy == SegmentFailurePolicy::Abort {
                                return Err(AssemblyError::SegmentFailed { index, reason });
                            }
                            statuses[index] = SegmentStatus::Failed(reason);
                        }
                    }
                }
            }
        }

        let succeeded_speech = plan
            .segments()
            .iter()
            .zip(&statuses)
            .filter(|(segment, status)| segment.is_speech() && status.is_success())
            .count();

        if succeeded_speech == 0 {
            let failed = statuses
                .iter()
                .filter(|s| matches!(s, SegmentStatus::Failed(_)))
                .count();
            return Err(AssemblyError::NoSpeech { failed });
        }

        let mut timeline = PcmTrack::empty(sample_rate);
        for part in &parts {
            timeline.append(part);
        }

        let clip = encode_wav(&timeline).map_err(|e| AssemblyError::Export(e.to_string()))?;

        Ok(AssembledClip {
            clip,
            duration: timeline.duration(),
            segment_statuses: statuses,
            synthesis_calls,
        })
    }

    async fn synthesize_segment(
        &self,
        text: &str,
        voice: &VoiceConfig,
        sample_rate: u32,
    ) -> Result<PcmTrack, SegmentFailure> {
        let encoded = self
            .tts_client
            .synthesize(text, voice)
            .await
            .map_err(SegmentFailure::Synthesis)?;

        let track = decode_clip(&encoded).map_err(SegmentFailure::Decode)?;
        if track.is_empty() {
            return Err(SegmentFailure::EmptyAudio);
        }
        if track.sample_rate() != sample_rate {
            return Err(SegmentFailure::SampleRateMismatch {
                expected: sample_rate,
                actual: track.sample_rate(),
            });
        }

        Ok(track)
    }
}
