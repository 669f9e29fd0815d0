//! PCM-side helpers at the codec boundary

pub mod buffer;
pub mod pcm;

pub use buffer::{ChunkAccumulator, PcmChunk};
pub use pcm::{read_retrying, samples_from_le_bytes, samples_to_le_bytes};
