use super::format::AudioFormat;
use std::time::Duration;

/// Encoded audio bytes tagged with their format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }
}

/// Decoded mono 16-bit audio held in memory while a clip is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmTrack {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmTrack {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// Digital silence lasting exactly `duration`, rounded down to whole samples
    pub fn silence(duration: Duration, sample_rate: u32) -> Self {
        let sample_count = duration.as_millis() * u128::from(sample_rate) / 1000;
        Self::new(vec![0; sample_count as usize], sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }

    /// Append `other` at the end of this track. Sample rates must match.
    pub fn append(&mut self, other: &PcmTrack) {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        self.samples.extend_from_slice(&other.samples);
    }
}
