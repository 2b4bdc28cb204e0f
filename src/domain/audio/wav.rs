use super::clip::{AudioClip, PcmTrack};
use super::format::AudioFormat;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Wrap a track in a mono 16-bit WAV container
pub fn encode_wav(track: &PcmTrack) -> Result<AudioClip, hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: track.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for sample in track.samples() {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
    }

    Ok(AudioClip::new(
        cursor.into_inner(),
        AudioFormat::Wav {
            sample_rate: track.sample_rate(),
        },
    ))
}
