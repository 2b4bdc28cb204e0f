use super::clip::{AudioClip, PcmTrack};
use super::format::AudioFormat;
use std::io::{Cursor, ErrorKind};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{format} payload is malformed: {details}")]
    Malformed { format: String, details: String },
    #[error("{0} audio cannot be decoded")]
    Unsupported(String),
}

/// Decode a provider payload into mono PCM
pub fn decode_clip(clip: &AudioClip) -> Result<PcmTrack, DecodeError> {
    match clip.format {
        AudioFormat::Pcm { sample_rate } => decode_pcm(&clip.data, sample_rate),
        AudioFormat::Mp3 { .. } => decode_mp3(&clip.data),
        AudioFormat::Wav { .. } => Err(DecodeError::Unsupported(clip.format.to_string())),
    }
}

/// Raw little-endian signed 16-bit samples
fn decode_pcm(data: &[u8], sample_rate: u32) -> Result<PcmTrack, DecodeError> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::Malformed {
            format: "PCM".to_string(),
            details: format!("odd byte count {}", data.len()),
        });
    }

    let samples = data
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Ok(PcmTrack::new(samples, sample_rate))
}

/// Gapless mode trims encoder delay and padding, so joined segments stay
/// exactly as long as the spoken audio
fn mp3_format_options() -> FormatOptions {
    FormatOptions {
        enable_gapless: true,
        ..Default::default()
    }
}

fn decode_mp3(data: &[u8]) -> Result<PcmTrack, DecodeError> {
    let malformed = |e: SymphoniaError| DecodeError::Malformed {
        format: "MP3".to_string(),
        details: e.to_string(),
    };

    let source = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(source), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &mp3_format_options(), &MetadataOptions::default())
        .map_err(malformed)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::Malformed {
            format: "MP3".to_string(),
            details: "no audio track".to_string(),
        })?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(malformed)?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(malformed(e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A corrupt frame is dropped, the rest of the stream is still usable
            Err(SymphoniaError::DecodeError(details)) => {
                tracing::warn!(details, "Skipping undecodable MP3 frame");
                continue;
            }
            Err(e) => return Err(malformed(e)),
        };

        let spec = *decoded.spec();
        if sample_rate.is_none() {
            sample_rate = Some(spec.rate);
        }

        let mut buffer = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        downmix_into(buffer.samples(), spec.channels.count(), &mut samples);
    }

    let sample_rate = sample_rate.ok_or_else(|| DecodeError::Malformed {
        format: "MP3".to_string(),
        details: "unknown sample rate".to_string(),
    })?;

    Ok(PcmTrack::new(samples, sample_rate))
}

/// Average interleaved frames down to one channel
fn downmix_into(interleaved: &[i16], channels: usize, out: &mut Vec<i16>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }

    out.extend(interleaved.chunks_exact(channels).map(|frame| {
        let sum: i32 = frame.iter().map(|s| i32::from(*s)).sum();
        (sum / channels as i32) as i16
    }));
}
