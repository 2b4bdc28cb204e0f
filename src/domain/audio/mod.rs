pub mod assembler;
pub mod clip;
pub mod decode;
pub mod error;
pub mod format;
pub mod wav;

pub use assembler::{AssembledClip, AudioAssembler, SegmentFailurePolicy, SegmentStatus};
pub use clip::{AudioClip, PcmTrack};
pub use decode::{decode_clip, DecodeError};
pub use error::{AssemblyError, SegmentFailure};
pub use format::{AudioFormat, ParseFormatError};
pub use wav::encode_wav;
